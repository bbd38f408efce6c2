//! Storefront Domain Concerns

pub mod categories;
pub mod products;

/// Postgres text columns cannot hold NUL, so such values never match or store.
pub(crate) fn is_storable_text(text: &str) -> bool {
    !text.contains('\0')
}
