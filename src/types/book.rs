use serde::Serialize;

use crate::{
    error::{Error, Result},
    types::{
        cell::{Cell, NOT_AVAILABLE},
        column::Column,
    },
};

/// A book as returned by the author search, before enrichment.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub key:                String,
    pub title:              String,
    pub author_names:       Vec<String>,
    pub author_keys:        Vec<String>,
    pub first_publish_year: Option<i32>,
    pub subjects:           Vec<String>,
}

impl BookRecord {
    /// The author whose details are joined onto this book.
    pub fn primary_author_key(&self) -> Result<&str> {
        self.author_keys
            .first()
            .map(String::as_str)
            .ok_or_else(|| Error::MissingAuthorKey {
                key: self.key.clone(),
            })
    }
}

/// Author metadata, every field optional.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct AuthorDetail {
    pub birth_date:      Option<String>,
    pub top_work:        Option<String>,
    pub ratings_average: Option<f64>,
}

impl AuthorDetail {
    /// Detail used when an author could not be looked up.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// A book joined with its primary author's details. This is what the table
/// holds, renders and exports.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedBookRecord {
    pub key:                String,
    pub title:              String,
    pub author_names:       Vec<String>,
    pub author_keys:        Vec<String>,
    pub first_publish_year: Option<i32>,
    pub subjects:           Vec<String>,
    pub author_birth_date:  String,
    pub author_top_work:    String,
    pub ratings_average:    Option<f64>,
}

impl EnrichedBookRecord {
    pub fn enrich(book: BookRecord, detail: AuthorDetail) -> Self {
        let or_sentinel = |s: Option<String>| {
            s.filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        Self {
            key:                book.key,
            title:              book.title,
            author_names:       book.author_names,
            author_keys:        book.author_keys,
            first_publish_year: book.first_publish_year,
            subjects:           book.subjects,
            author_birth_date:  or_sentinel(detail.birth_date),
            author_top_work:    or_sentinel(detail.top_work),
            ratings_average:    detail.ratings_average,
        }
    }

    pub fn cell(&self, column: Column) -> Cell<'_> {
        match column {
            Column::Title => Cell::Text(&self.title),
            Column::AuthorName => Cell::List(&self.author_names),
            Column::FirstPublishYear => match self.first_publish_year {
                Some(year) => Cell::Number(year as f64),
                None => Cell::Empty,
            },
            Column::Subject => Cell::List(&self.subjects),
            Column::AuthorBirthDate => Cell::Text(&self.author_birth_date),
            Column::AuthorTopWork => Cell::Text(&self.author_top_work),
            Column::RatingsAverage => match self.ratings_average {
                Some(rating) => Cell::Number(rating),
                None => Cell::Text(NOT_AVAILABLE),
            },
        }
    }

    /// True if any author name contains `term`, ignoring case.
    pub fn has_author_matching(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.author_names
            .iter()
            .any(|name| name.to_lowercase().contains(&term))
    }

    /// Overwrite one field from its text form, as typed into an edit form.
    ///
    /// List fields are split on commas. The key is not a column and can't be
    /// changed this way.
    pub fn set_field(&mut self, column: Column, value: &str) -> Result<()> {
        let invalid = || Error::InvalidField {
            column,
            value: value.to_string(),
        };
        let trimmed = value.trim();
        match column {
            Column::Title => self.title = value.to_string(),
            Column::AuthorName => self.author_names = split_list(value),
            Column::FirstPublishYear => {
                self.first_publish_year = match trimmed {
                    "" => None,
                    s => Some(s.parse().map_err(|_| invalid())?),
                }
            }
            Column::Subject => self.subjects = split_list(value),
            Column::AuthorBirthDate => self.author_birth_date = value.to_string(),
            Column::AuthorTopWork => self.author_top_work = value.to_string(),
            Column::RatingsAverage => {
                self.ratings_average = match trimmed {
                    "" | NOT_AVAILABLE => None,
                    s => Some(s.parse().map_err(|_| invalid())?),
                }
            }
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookRecord {
        BookRecord {
            key:                "/works/OL27482W".into(),
            title:              "The Hobbit".into(),
            author_names:       vec!["J.R.R. Tolkien".into()],
            author_keys:        vec!["OL26320A".into()],
            first_publish_year: Some(1937),
            subjects:           vec!["Fantasy".into(), "Dragons".into()],
        }
    }

    #[test]
    fn missing_author_key_is_an_error() {
        let mut book = book();
        book.author_keys.clear();
        assert!(matches!(
            book.primary_author_key(),
            Err(Error::MissingAuthorKey { key }) if key == "/works/OL27482W"
        ));
    }

    #[test]
    fn absent_details_become_sentinels() {
        let enriched = EnrichedBookRecord::enrich(
            book(),
            AuthorDetail {
                birth_date: Some("".into()),
                ..AuthorDetail::default()
            },
        );
        assert_eq!(enriched.author_birth_date, NOT_AVAILABLE);
        assert_eq!(enriched.author_top_work, NOT_AVAILABLE);
        assert_eq!(enriched.cell(Column::RatingsAverage), Cell::Text(NOT_AVAILABLE));
    }

    #[test]
    fn set_field_parses_typed_columns() {
        let mut record = EnrichedBookRecord::enrich(book(), AuthorDetail::unavailable());
        record.set_field(Column::Subject, "Elves, , Rings ").unwrap();
        assert_eq!(record.subjects, vec!["Elves".to_string(), "Rings".to_string()]);
        record.set_field(Column::RatingsAverage, "4.5").unwrap();
        assert_eq!(record.ratings_average, Some(4.5));
        record.set_field(Column::FirstPublishYear, "").unwrap();
        assert_eq!(record.first_publish_year, None);
        assert!(matches!(
            record.set_field(Column::FirstPublishYear, "nineteen"),
            Err(Error::InvalidField { column: Column::FirstPublishYear, .. })
        ));
    }

    #[test]
    fn author_match_ignores_case() {
        let record = EnrichedBookRecord::enrich(book(), AuthorDetail::unavailable());
        assert!(record.has_author_matching("tolk"));
        assert!(!record.has_author_matching("lewis"));
    }
}
