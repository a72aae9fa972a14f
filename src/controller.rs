//! State of the book table and the transitions that change it.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::{
    error::{Error, Result},
    export::{self, CsvFormat},
    gateway::BookSource,
    pipeline::{self, EnrichmentPolicy, LoadRequest, LoadedPage},
    types::{Column, EnrichedBookRecord, PageSize, QueryState, SortDirection},
    view::{self, TableView, WindowMode},
};

/// Outcome of a transition: does the current page have to be fetched again,
/// or is redrawing enough.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Reload,
    Redraw,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// The one book currently in edit and its uncommitted changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub key:     String,
    pub scratch: EnrichedBookRecord,
}

pub struct TableController<S> {
    source:      S,
    policy:      EnrichmentPolicy,
    window:      WindowMode,
    query:       QueryState,
    books:       Vec<EnrichedBookRecord>,
    total_found: u64,
    edit:        Option<EditState>,
    status:      LoadStatus,
    /// Sequence number of the most recently started load.
    issued:      u64,
    /// Page and page size the loaded books were fetched with.
    loaded:      Option<(u32, PageSize)>,
}

impl<S: BookSource> TableController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: EnrichmentPolicy::default(),
            window: WindowMode::default(),
            query: QueryState::default(),
            books: Vec::new(),
            total_found: 0,
            edit: None,
            status: LoadStatus::Idle,
            issued: 0,
            loaded: None,
        }
    }

    pub fn with_policy(mut self, policy: EnrichmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_window(mut self, window: WindowMode) -> Self {
        self.window = window;
        self
    }

    pub fn with_query(mut self, query: QueryState) -> Self {
        self.query = query;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> EnrichmentPolicy {
        self.policy
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The working set in load order.
    pub fn books(&self) -> &[EnrichedBookRecord] {
        &self.books
    }

    pub fn total_found(&self) -> u64 {
        self.total_found
    }

    pub fn edit(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    // Query transitions

    pub fn set_author_term(&mut self, term: impl Into<String>) -> Transition {
        let term = term.into();
        if term == self.query.author_term {
            return Transition::Redraw;
        }
        self.query.author_term = term;
        Transition::Reload
    }

    pub fn set_page(&mut self, page: u32) -> Result<Transition> {
        if page == 0 {
            return Err(Error::InvalidPage);
        }
        if page == self.query.page {
            return Ok(Transition::Redraw);
        }
        self.query.page = page;
        Ok(Transition::Reload)
    }

    pub fn next_page(&mut self) -> Result<Transition> {
        if !self.has_next() {
            return Err(Error::NextDisabled);
        }
        self.set_page(self.query.page + 1)
    }

    pub fn previous_page(&mut self) -> Result<Transition> {
        if !self.has_previous() {
            return Err(Error::PreviousDisabled);
        }
        self.set_page(self.query.page - 1)
    }

    /// Changing the page size always goes back to the first page.
    pub fn set_page_size(&mut self, size: u32) -> Result<Transition> {
        let size = PageSize::new(size)?;
        let changed = size != self.query.page_size || self.query.page != 1;
        self.query.page_size = size;
        self.query.page = 1;
        Ok(if changed {
            Transition::Reload
        } else {
            Transition::Redraw
        })
    }

    /// The search button: narrow the loaded books down to those with an
    /// author matching the current term and go back to the first page.
    ///
    /// This only filters what is already loaded. The term itself is also what
    /// the next remote search is made with.
    pub fn search(&mut self) -> Transition {
        let term = &self.query.author_term;
        let before = self.books.len();
        let kept: Vec<EnrichedBookRecord> = self
            .books
            .iter()
            .filter(|book| book.has_author_matching(term))
            .cloned()
            .collect();
        debug!("Search {term:?} kept {} of {before} books", kept.len());
        self.books = kept;
        self.query.page = 1;
        Transition::Redraw
    }

    /// Clicking a column header.
    pub fn request_sort(&mut self, column: Column) {
        if self.query.sort_column == column {
            self.query.sort_direction = self.query.sort_direction.toggled();
        } else {
            self.query.sort_column = column;
            self.query.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort(&mut self, column: Column, direction: SortDirection) {
        self.query.sort_column = column;
        self.query.sort_direction = direction;
    }

    // Editing

    pub fn begin_edit(&mut self, key: &str) -> Result<()> {
        let book = self
            .books
            .iter()
            .find(|book| book.key == key)
            .ok_or_else(|| Error::UnknownRecord(key.to_string()))?;
        if let Some(previous) = &self.edit {
            debug!("Discarding unsaved edit of {}", previous.key);
        }
        self.edit = Some(EditState {
            key:     book.key.clone(),
            scratch: book.clone(),
        });
        Ok(())
    }

    pub fn stage_field(&mut self, column: Column, value: &str) -> Result<()> {
        let edit = self.edit.as_mut().ok_or(Error::NotEditing)?;
        edit.scratch.set_field(column, value)
    }

    /// Replace the edited book with its scratch copy. Never touches the
    /// remote.
    pub fn commit_edit(&mut self) -> Result<()> {
        let EditState { key, mut scratch } = self.edit.take().ok_or(Error::NotEditing)?;
        scratch.key = key;
        let books = self
            .books
            .iter()
            .map(|book| {
                if book.key == scratch.key {
                    scratch.clone()
                } else {
                    book.clone()
                }
            })
            .collect::<Vec<_>>();
        if !books.iter().any(|book| book.key == scratch.key) {
            warn!("{} is no longer loaded, edit dropped", scratch.key);
        }
        self.books = books;
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Option<EditState> {
        self.edit.take()
    }

    // Loading

    /// Start a load sequence for the current query.
    pub fn begin_load(&mut self) -> LoadRequest {
        self.issued += 1;
        self.status = LoadStatus::Loading;
        LoadRequest {
            sequence:    self.issued,
            author_term: self.query.author_term.clone(),
            page:        self.query.page,
            page_size:   self.query.page_size,
        }
    }

    /// Apply the outcome of a load sequence.
    ///
    /// Returns `Ok(false)` if a newer load was started in the meantime, in
    /// which case the outcome is dropped whether it succeeded or not. A
    /// failed current load keeps the previously loaded books and moves the
    /// page and page size back to the ones they were loaded with.
    pub fn finish_load(
        &mut self,
        request: &LoadRequest,
        outcome: Result<LoadedPage>,
    ) -> Result<bool> {
        if request.sequence < self.issued {
            debug!(
                "Dropping result of load #{}, #{} is newer",
                request.sequence, self.issued
            );
            return Ok(false);
        }
        match outcome {
            Ok(page) => {
                info!(
                    "Load #{} done: {} books of {}",
                    page.sequence,
                    page.records.len(),
                    page.total_found
                );
                self.books = unique_by_key(page.records);
                self.total_found = page.total_found;
                self.loaded = Some((request.page, request.page_size));
                self.status = LoadStatus::Ready;
                Ok(true)
            }
            Err(e) => {
                error!("Load #{} failed: {e}", request.sequence);
                // The footer has to describe the books still on screen.
                if let Some((page, page_size)) = self.loaded {
                    self.query.page = page;
                    self.query.page_size = page_size;
                }
                self.status = LoadStatus::Failed(format!("Failed to load books: {e}"));
                Err(e)
            }
        }
    }

    /// Run a whole load sequence for the current query.
    pub async fn load(&mut self) -> Result<()> {
        let request = self.begin_load();
        let outcome = pipeline::load_page(&self.source, &request, self.policy).await;
        self.finish_load(&request, outcome).map(|_| ())
    }

    // Derived view

    pub fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    /// Judged against the remote total, not the loaded rows.
    pub fn has_next(&self) -> bool {
        (self.query.page as u64) * (self.query.page_size.get() as u64) < self.total_found
    }

    /// Every loaded book in the current sort order.
    pub fn sorted_rows(&self) -> Vec<&EnrichedBookRecord> {
        let mut rows: Vec<&EnrichedBookRecord> = self.books.iter().collect();
        view::sort_records(&mut rows, self.query.sort_column, self.query.sort_direction);
        rows
    }

    pub fn visible_rows(&self) -> Vec<&EnrichedBookRecord> {
        let rows = self.sorted_rows();
        let page = match self.window {
            WindowMode::RemotePage => 1,
            WindowMode::Absolute => self.query.page,
        };
        view::paginate(&rows, page, self.query.page_size).to_vec()
    }

    pub fn view(&self) -> TableView<'_> {
        TableView {
            rows:         self.visible_rows(),
            query:        &self.query,
            total_found:  self.total_found,
            page_count:   view::page_count(self.total_found, self.query.page_size),
            has_previous: self.has_previous(),
            has_next:     self.has_next(),
            editing:      self.edit.as_ref(),
            status:       &self.status,
        }
    }

    /// CSV of every loaded book in the current sort order.
    pub fn export_csv(&self, format: CsvFormat) -> Result<String> {
        export::to_csv(&self.sorted_rows(), format)
    }
}

fn unique_by_key(records: Vec<EnrichedBookRecord>) -> Vec<EnrichedBookRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let first = seen.insert(record.key.clone());
            if !first {
                warn!("Dropping duplicate book {}", record.key);
            }
            first
        })
        .collect()
}
