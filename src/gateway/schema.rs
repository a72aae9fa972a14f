//! Wire shapes of the Open Library responses we read.
//!
//! Only the fields the table needs are declared, everything else in the
//! payload is ignored.

use serde::{Deserialize, Serialize};

use crate::types::{AuthorDetail, BookRecord};

/// `GET /search.json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Live responses carry both spellings with the same value.
    #[serde(rename = "numFound", default, skip_serializing_if = "Option::is_none")]
    pub num_found_camel: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_found:       Option<u64>,
    #[serde(default)]
    pub docs:            Vec<SearchDoc>,
}

impl SearchResponse {
    /// Total number of matches, whichever key the server sent.
    pub fn total_found(&self) -> u64 {
        self.num_found.or(self.num_found_camel).unwrap_or_default()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDoc {
    pub key:                String,
    pub title:              String,
    #[serde(default)]
    pub author_name:        Vec<String>,
    #[serde(default)]
    pub author_key:         Vec<String>,
    pub first_publish_year: Option<i32>,
    pub subject:            Option<Vec<String>>,
}

impl From<SearchDoc> for BookRecord {
    fn from(doc: SearchDoc) -> Self {
        Self {
            key:                doc.key,
            title:              doc.title,
            author_names:       doc.author_name,
            author_keys:        doc.author_key,
            first_publish_year: doc.first_publish_year,
            subjects:           doc.subject.unwrap_or_default(),
        }
    }
}

/// `GET /authors/{key}.json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub birth_date:      Option<String>,
    pub top_work:        Option<String>,
    pub ratings_average: Option<f64>,
}

impl From<AuthorResponse> for AuthorDetail {
    fn from(author: AuthorResponse) -> Self {
        Self {
            birth_date:      author.birth_date,
            top_work:        author.top_work,
            ratings_average: author.ratings_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_doc_tolerates_missing_optional_fields() {
        let body = r#"{
            "numFound": 1,
            "docs": [{ "key": "/works/OL1W", "title": "Untitled", "author_name": [] }]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_found(), 1);
        let record = BookRecord::from(response.docs[0].clone());
        assert!(record.author_keys.is_empty());
        assert!(record.subjects.is_empty());
        assert_eq!(record.first_publish_year, None);
    }

    #[test]
    fn search_response_accepts_both_total_keys() {
        let body = r#"{
            "numFound": 2, "start": 0, "numFoundExact": true, "num_found": 2,
            "docs": []
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_found(), 2);

        let response: SearchResponse = serde_json::from_str(r#"{ "num_found": 7 }"#).unwrap();
        assert_eq!(response.total_found(), 7);
        assert!(response.docs.is_empty());
    }

    #[test]
    fn author_response_ignores_unknown_fields() {
        let body = r#"{ "name": "J.R.R. Tolkien", "birth_date": "3 January 1892", "bio": "..." }"#;
        let detail = AuthorDetail::from(serde_json::from_str::<AuthorResponse>(body).unwrap());
        assert_eq!(detail.birth_date.as_deref(), Some("3 January 1892"));
        assert_eq!(detail.top_work, None);
    }
}
