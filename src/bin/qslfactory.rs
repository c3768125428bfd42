//! Parse an ADIF log, print its contacts as JSON, optionally store them.

use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};

use serde::Serialize;

use qslfactory::{
    adif,
    card::{CardDefaults, QsoCardData},
    contact::ContactRecord,
    core::store::LogError,
    persist::{ContactSink, PersistError, sqlite::SqliteContactSink},
};

#[derive(Parser, Debug)]
#[command(name = "qslfactory")]
#[command(about = "Convert ADIF logs into QSL card contact records")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// ADIF file to read, or `-` for stdin
    #[arg(value_name = "ADIF_PATH")]
    input: PathBuf,

    /// Append imported contacts to this SQLite database
    #[arg(long, value_name = "DB_PATH")]
    db: Option<PathBuf>,

    /// Output layout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Pretty-print the JSON array
    #[arg(long)]
    pretty: bool,

    /// Emit card QSO blocks with placeholders instead of raw contacts
    #[arg(long)]
    cards: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Log(LogError),
    Persist(PersistError),
    Serde(serde_json::Error),
}

impl From<LogError> for CliError {
    fn from(value: LogError) -> Self {
        Self::Log(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PersistError> for CliError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o: {err}"),
            Self::Log(err) => write!(f, "contact log: {err:?}"),
            Self::Persist(err) => write!(f, "persist: {err}"),
            Self::Serde(err) => write!(f, "json: {err}"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("qslfactory={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let text = read_input(&args.input)?;
    debug!(bytes = text.len(), "read ADIF input");

    let contacts: Vec<ContactRecord> = match &args.db {
        Some(db) => {
            let mut sink = SqliteContactSink::open(db)?;
            let mut log = sink.load_log()?;
            let before = log.len();
            let summary = log.import_adif(&text)?;
            let pending = log.drain_pending();
            let last_id = sink.append_contacts(&pending)?;
            sink.flush()?;
            info!(
                db = %db.display(),
                stored = summary.imported,
                previously = before,
                last_id,
                "appended contacts"
            );
            pending.into_iter().map(|s| s.contact).collect()
        }
        None => {
            let report = adif::parse_report(&text);
            info!(
                contacts = report.contacts.len(),
                scanned = report.records_scanned,
                skipped = report.skipped_without_call,
                "parsed ADIF log"
            );
            report.contacts
        }
    };

    if args.cards {
        let defaults = CardDefaults::default();
        let cards: Vec<QsoCardData> = contacts
            .iter()
            .map(|c| QsoCardData::from_contact(c, &defaults))
            .collect();
        write_items(out, &cards, args.format, args.pretty)
    } else {
        write_items(out, &contacts, args.format, args.pretty)
    }
}

fn write_items<W: Write, T: Serialize>(
    out: &mut W,
    items: &[T],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, items)?;
            } else {
                serde_json::to_writer(&mut *out, items)?;
            }
            out.write_all(b"\n")?;
        }
        OutputFormat::Jsonl => {
            for item in items {
                serde_json::to_writer(&mut *out, item)?;
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        return Ok(decode_input(&bytes));
    }
    Ok(decode_input(&std::fs::read(path)?))
}

// ADIF files in the wild are often Latin-1; keep going on bad bytes.
fn decode_input(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
