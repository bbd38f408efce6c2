//! Category Data

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Unique, case-sensitive category name.
    pub name: String,
}
