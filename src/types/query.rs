use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, types::column::Column};

/// Rows per page, limited to the sizes offered by the page size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub const OPTIONS: [u32; 4] = [10, 25, 50, 100];

    pub fn new(size: u32) -> Result<Self, Error> {
        if Self::OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::InvalidPageSize(size))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction {other:?}")),
        }
    }
}

/// Everything that decides which books are fetched and in which order they
/// are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub author_term:    String,
    /// 1-based.
    pub page:           u32,
    pub page_size:      PageSize,
    pub sort_column:    Column,
    pub sort_direction: SortDirection,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            author_term:    String::new(),
            page:           1,
            page_size:      PageSize::default(),
            sort_column:    Column::Title,
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl QueryState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_offered_page_sizes_are_accepted() {
        for size in PageSize::OPTIONS {
            assert_eq!(PageSize::new(size).unwrap().get(), size);
        }
        assert!(matches!(PageSize::new(20), Err(Error::InvalidPageSize(20))));
    }

    #[test]
    fn page_size_deserializes_through_validation() {
        let size: PageSize = serde_json::from_str("25").unwrap();
        assert_eq!(size.get(), 25);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
    }
}
