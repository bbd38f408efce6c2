//! Product listing queries.
//!
//! Raw `sortby` / `order` parameters are translated here into typed values;
//! only allow-listed fields ever reach the generated `ORDER BY` clause.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::domain::products::errors::ProductsServiceError;

/// Sortable product fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Title,
    Price,
    Description,
    Category,
    #[default]
    RatingRate,
    RatingCount,
}

impl SortField {
    /// Every field accepted by `sortby`.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Price,
        Self::Description,
        Self::Category,
        Self::RatingRate,
        Self::RatingCount,
    ];

    /// Name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Description => "description",
            Self::Category => "category",
            Self::RatingRate => "rating.rate",
            Self::RatingCount => "rating.count",
        }
    }

    /// Column expression used for ordering.
    ///
    /// Text columns use byte-wise collation so ordering does not depend on the
    /// server locale.
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::Title => "title COLLATE \"C\"",
            Self::Price => "price",
            Self::Description => "description COLLATE \"C\"",
            Self::Category => "category COLLATE \"C\"",
            Self::RatingRate => "rating_rate",
            Self::RatingCount => "rating_count",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ProductsServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or(ProductsServiceError::InvalidSortBy)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Ascending => f.write_str("1"),
            Self::Descending => f.write_str("-1"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ProductsServiceError;

    /// Coerces the leading integer of `value`; only `1` and `-1` are directions.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match leading_integer(value) {
            Some(1) => Ok(Self::Ascending),
            Some(-1) => Ok(Self::Descending),
            _ => Err(ProductsServiceError::InvalidOrder),
        }
    }
}

/// Optional whitespace, optional sign, then at least one digit. Anything after
/// the digits is ignored, so `"1.0"` and `"-1px"` both coerce.
fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    let magnitude = unsigned.get(..digits_end)?.parse::<i64>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

/// Product listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsQuery {
    /// Exact, case-sensitive category match.
    pub category: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl ProductsQuery {
    /// Render the `ORDER BY` clause. Ties fall back to ascending id.
    pub(crate) fn order_by_clause(&self) -> String {
        format!(
            "ORDER BY {} {}, id ASC",
            self.sort_by.column(),
            self.order.keyword()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_listed_fields_parse() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>().ok(), Some(field));
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        for raw in ["banana", "id", "rating", "Title", "rating_rate", "image"] {
            assert!(
                matches!(raw.parse::<SortField>(), Err(ProductsServiceError::InvalidSortBy)),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn default_sort_is_rating_rate_ascending() {
        let query = ProductsQuery::default();

        assert_eq!(query.sort_by, SortField::RatingRate);
        assert_eq!(query.order, SortOrder::Ascending);
        assert_eq!(query.order_by_clause(), "ORDER BY rating_rate ASC, id ASC");
    }

    #[test]
    fn order_coerces_leading_integer() {
        let cases = [
            ("1", SortOrder::Ascending),
            ("-1", SortOrder::Descending),
            ("+1", SortOrder::Ascending),
            ("  -1", SortOrder::Descending),
            ("1.0", SortOrder::Ascending),
            ("-1abc", SortOrder::Descending),
            ("01", SortOrder::Ascending),
        ];

        for (raw, expected) in cases {
            assert_eq!(raw.parse::<SortOrder>().ok(), Some(expected), "for {raw:?}");
        }
    }

    #[test]
    fn order_rejects_other_values() {
        for raw in ["banana", "", "0", "2", "-2", "asc", "desc", "-", "+-1"] {
            assert!(
                matches!(raw.parse::<SortOrder>(), Err(ProductsServiceError::InvalidOrder)),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn descending_text_sort_uses_binary_collation() {
        let query = ProductsQuery {
            category: Some("men's clothing".to_string()),
            sort_by: SortField::Title,
            order: SortOrder::Descending,
        };

        assert_eq!(
            query.order_by_clause(),
            "ORDER BY title COLLATE \"C\" DESC, id ASC"
        );
    }
}
