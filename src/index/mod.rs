//! Autocomplete index module
//!
//! A prefix tree over known document titles, warmed from the store at
//! startup and queried for bounded prefix enumeration.

mod trie;

pub use trie::Trie;
