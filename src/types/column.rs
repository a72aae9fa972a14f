use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The columns of the book table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Title,
    AuthorName,
    FirstPublishYear,
    Subject,
    AuthorBirthDate,
    AuthorTopWork,
    RatingsAverage,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Title,
        Column::AuthorName,
        Column::FirstPublishYear,
        Column::Subject,
        Column::AuthorBirthDate,
        Column::AuthorTopWork,
        Column::RatingsAverage,
    ];

    /// Identifier used on the command line and in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::AuthorName => "author_name",
            Column::FirstPublishYear => "first_publish_year",
            Column::Subject => "subject",
            Column::AuthorBirthDate => "author_birth_date",
            Column::AuthorTopWork => "author_top_work",
            Column::RatingsAverage => "ratings_average",
        }
    }

    /// Human readable header, also used as the CSV header row.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::AuthorName => "Author Name",
            Column::FirstPublishYear => "First Publish Year",
            Column::Subject => "Subject",
            Column::AuthorBirthDate => "Author Birth Date",
            Column::AuthorTopWork => "Author Top Work",
            Column::RatingsAverage => "Ratings Average",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Column::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| Error::UnknownColumn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_headers() {
        assert_eq!("title".parse::<Column>().unwrap(), Column::Title);
        assert_eq!(
            "First Publish Year".parse::<Column>().unwrap(),
            Column::FirstPublishYear
        );
        assert_eq!(
            "ratings-average".parse::<Column>().unwrap(),
            Column::RatingsAverage
        );
        assert!(matches!(
            "isbn".parse::<Column>(),
            Err(Error::UnknownColumn(s)) if s == "isbn"
        ));
    }
}
