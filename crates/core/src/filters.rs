//! Filter and sort selection for the discover listing.
//!
//! The remote API takes a single combined sort token such as
//! `vote_average.desc`. The selection keeps the token picked by the user
//! (`sort_by`) and a separate direction (`sort_order`); the direction wins when
//! the two disagree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Popularity,
    VoteAverage,
    ReleaseDate,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::VoteAverage => "vote_average",
            Self::ReleaseDate => "release_date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort token: {0}")]
pub struct ParseSortError(pub String);

/// A combined `field.direction` sort token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortBy {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortBy {
    pub const DEFAULT: SortBy = SortBy {
        field: SortField::Popularity,
        order: SortOrder::Desc,
    };

    /// Every token offered to users, in menu order.
    pub const OPTIONS: [SortBy; 6] = [
        SortBy::new(SortField::Popularity, SortOrder::Desc),
        SortBy::new(SortField::Popularity, SortOrder::Asc),
        SortBy::new(SortField::VoteAverage, SortOrder::Desc),
        SortBy::new(SortField::VoteAverage, SortOrder::Asc),
        SortBy::new(SortField::ReleaseDate, SortOrder::Desc),
        SortBy::new(SortField::ReleaseDate, SortOrder::Asc),
    ];

    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn label(&self) -> &'static str {
        match (self.field, self.order) {
            (SortField::Popularity, SortOrder::Desc) => "Popularity (High to Low)",
            (SortField::Popularity, SortOrder::Asc) => "Popularity (Low to High)",
            (SortField::VoteAverage, SortOrder::Desc) => "Rating (High to Low)",
            (SortField::VoteAverage, SortOrder::Asc) => "Rating (Low to High)",
            (SortField::ReleaseDate, SortOrder::Desc) => "Release Date (Newest)",
            (SortField::ReleaseDate, SortOrder::Asc) => "Release Date (Oldest)",
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.order)
    }
}

impl FromStr for SortBy {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .rsplit_once('.')
            .ok_or_else(|| ParseSortError(s.to_string()))?;
        let field = match field {
            "popularity" => SortField::Popularity,
            "vote_average" => SortField::VoteAverage,
            "release_date" => SortField::ReleaseDate,
            _ => return Err(ParseSortError(s.to_string())),
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(Self { field, order })
    }
}

impl TryFrom<String> for SortBy {
    type Error = ParseSortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortBy> for String {
    fn from(value: SortBy) -> Self {
        value.to_string()
    }
}

/// Transient genre/year/sort selection. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub genre: Option<i64>,
    pub year: Option<i32>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterSelection {
    /// The single token sent as `sort_by`: the field of `sort_by` with the
    /// suffix forced to match `sort_order`.
    pub fn effective_sort(&self) -> SortBy {
        SortBy::new(self.sort_by.field, self.sort_order)
    }

    pub fn effective_sort_token(&self) -> String {
        self.effective_sort().to_string()
    }

    /// True when the selection differs from "popularity, descending" with no
    /// genre or year, i.e. when the discover listing must be used instead of
    /// trending.
    pub fn is_active(&self) -> bool {
        self.genre.is_some() || self.year.is_some() || self.effective_sort() != SortBy::DEFAULT
    }

    /// Put the sort back to the default, leaving genre and year alone.
    pub fn reset_sort(&mut self) {
        self.sort_by = SortBy::DEFAULT;
        self.sort_order = SortOrder::Desc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render_tokens() {
        for sort in SortBy::OPTIONS {
            let token = sort.to_string();
            assert_eq!(token.parse::<SortBy>().unwrap(), sort);
        }
        assert_eq!(
            "vote_average.asc".parse::<SortBy>().unwrap(),
            SortBy::new(SortField::VoteAverage, SortOrder::Asc)
        );
        assert!("title.asc".parse::<SortBy>().is_err());
        assert!("popularity".parse::<SortBy>().is_err());
        assert!("popularity.sideways".parse::<SortBy>().is_err());
    }

    #[test]
    fn direction_overrides_stored_suffix() {
        let mut filters = FilterSelection {
            sort_by: SortBy::new(SortField::Popularity, SortOrder::Desc),
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(filters.effective_sort_token(), "popularity.asc");

        filters.sort_by = SortBy::new(SortField::Popularity, SortOrder::Asc);
        filters.sort_order = SortOrder::Desc;
        assert_eq!(filters.effective_sort_token(), "popularity.desc");

        filters.sort_by = SortBy::new(SortField::ReleaseDate, SortOrder::Desc);
        filters.sort_order = SortOrder::Asc;
        assert_eq!(filters.effective_sort_token(), "release_date.asc");
    }

    #[test]
    fn default_selection_is_inactive() {
        let filters = FilterSelection::default();
        assert!(!filters.is_active());
        assert_eq!(filters.effective_sort_token(), "popularity.desc");

        assert!(FilterSelection { genre: Some(28), ..Default::default() }.is_active());
        assert!(FilterSelection { year: Some(1999), ..Default::default() }.is_active());
        assert!(
            FilterSelection {
                sort_by: SortBy::new(SortField::VoteAverage, SortOrder::Desc),
                ..Default::default()
            }
            .is_active()
        );
    }

    #[test]
    fn reset_sort_keeps_genre_and_year() {
        let mut filters = FilterSelection {
            genre: Some(18),
            year: Some(2001),
            sort_by: SortBy::new(SortField::ReleaseDate, SortOrder::Asc),
            sort_order: SortOrder::Asc,
        };
        filters.reset_sort();
        assert_eq!(filters.genre, Some(18));
        assert_eq!(filters.year, Some(2001));
        assert_eq!(filters.sort_by, SortBy::DEFAULT);
        assert_eq!(filters.sort_order, SortOrder::Desc);
    }

    #[test]
    fn selection_serde_uses_combined_token() {
        let filters: FilterSelection = serde_json::from_value(serde_json::json!({
            "genre": 35,
            "sort_by": "vote_average.desc"
        }))
        .unwrap();
        assert_eq!(filters.genre, Some(35));
        assert_eq!(filters.year, None);
        assert_eq!(filters.sort_order, SortOrder::Desc);

        let value = serde_json::to_value(filters).unwrap();
        assert_eq!(value["sort_by"], "vote_average.desc");
        assert_eq!(value["sort_order"], "desc");
    }
}
