//! Category Records

/// Category Record
///
/// Only the name is ever exposed; the storage key stays in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub name: String,
}
