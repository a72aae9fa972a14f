#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use bookdash::{
    types::{AuthorDetail, BookRecord, PageSize},
    BookSource, Error, Result, SearchPage,
};

/// In-memory stand-in for Open Library.
#[derive(Default)]
pub struct FakeSource {
    pub books:           Vec<BookRecord>,
    pub authors:         HashMap<String, AuthorDetail>,
    pub failing_authors: HashSet<String>,
    /// Reported instead of the number of matching books.
    pub total_found:     Option<u64>,
    pub fail_search:     AtomicBool,
    pub search_calls:    AtomicUsize,
    pub author_calls:    AtomicUsize,
    pub searches:        Mutex<Vec<(String, u32, u32)>>,
}

impl FakeSource {
    pub fn new(books: Vec<BookRecord>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    pub fn with_author(mut self, key: &str, detail: AuthorDetail) -> Self {
        self.authors.insert(key.to_string(), detail);
        self
    }

    pub fn with_failing_author(mut self, key: &str) -> Self {
        self.failing_authors.insert(key.to_string());
        self
    }

    pub fn with_total_found(mut self, total: u64) -> Self {
        self.total_found = Some(total);
        self
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.search_calls.load(Ordering::SeqCst),
            self.author_calls.load(Ordering::SeqCst),
        )
    }
}

impl BookSource for FakeSource {
    async fn search_books_by_author(
        &self,
        author_term: &str,
        page: u32,
        page_size: PageSize,
    ) -> Result<SearchPage> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searches
            .lock()
            .unwrap()
            .push((author_term.to_string(), page, page_size.get()));
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(Error::Status {
                url:    "fake://search.json".into(),
                status: 503,
            });
        }
        let term = author_term.to_lowercase();
        let records: Vec<BookRecord> = self
            .books
            .iter()
            .filter(|book| {
                term.is_empty()
                    || book
                        .author_names
                        .iter()
                        .any(|name| name.to_lowercase().contains(&term))
            })
            .cloned()
            .collect();
        Ok(SearchPage {
            total_found: self.total_found.unwrap_or(records.len() as u64),
            records,
        })
    }

    async fn fetch_author_detail(&self, author_key: &str) -> Result<AuthorDetail> {
        self.author_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_authors.contains(author_key) {
            return Err(Error::Status {
                url:    format!("fake://authors/{author_key}.json"),
                status: 500,
            });
        }
        Ok(self.authors.get(author_key).cloned().unwrap_or_default())
    }
}

pub fn book(key: &str, title: &str, author: &str, author_key: &str, year: Option<i32>) -> BookRecord {
    BookRecord {
        key:                key.into(),
        title:              title.into(),
        author_names:       vec![author.into()],
        author_keys:        vec![author_key.into()],
        first_publish_year: year,
        subjects:           vec![],
    }
}

pub fn detail(birth_date: &str, top_work: &str, rating: Option<f64>) -> AuthorDetail {
    AuthorDetail {
        birth_date:      Some(birth_date.into()),
        top_work:        Some(top_work.into()),
        ratings_average: rating,
    }
}

/// Five Tolkien books and two by other authors.
pub fn library() -> FakeSource {
    FakeSource::new(vec![
        book("/works/OL27482W", "The Hobbit", "J.R.R. Tolkien", "OL26320A", Some(1937)),
        book("/works/OL27513W", "The Fellowship of the Ring", "J.R.R. Tolkien", "OL26320A", Some(1954)),
        book("/works/OL27516W", "The Two Towers", "J.R.R. Tolkien", "OL26320A", Some(1954)),
        book("/works/OL27479W", "The Silmarillion", "J.R.R. Tolkien", "OL26320A", Some(1977)),
        book("/works/OL15413843W", "Unfinished Tales", "J.R.R. Tolkien", "OL26320A", Some(1980)),
        book("/works/OL71068W", "The Lion, the Witch and the Wardrobe", "C.S. Lewis", "OL31574A", Some(1950)),
        book("/works/OL362427W", "Dune", "Frank Herbert", "OL79034A", Some(1965)),
    ])
    .with_author("OL26320A", detail("3 January 1892", "The Hobbit", Some(4.2)))
    .with_author("OL31574A", detail("29 November 1898", "Mere Christianity", Some(4.1)))
}
