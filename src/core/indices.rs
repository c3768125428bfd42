use hashbrown::HashMap;

use crate::types::ContactId;

/// Secondary index from a key to contact ids in insert order.
pub type VecIndex<K> = HashMap<K, Vec<ContactId>>;
