use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    controller::{EditState, LoadStatus},
    types::{Column, EnrichedBookRecord, PageSize, QueryState, SortDirection},
};

/// How the visible window is placed over the loaded rows.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// The remote already returned exactly the requested page, show it from
    /// the top.
    #[default]
    RemotePage,
    /// Offset the window by `(page - 1) * page_size` into the loaded rows.
    Absolute,
}

/// Everything needed to draw the table for the current state.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub rows:         Vec<&'a EnrichedBookRecord>,
    pub query:        &'a QueryState,
    pub total_found:  u64,
    pub page_count:   u64,
    pub has_previous: bool,
    pub has_next:     bool,
    pub editing:      Option<&'a EditState>,
    pub status:       &'a LoadStatus,
}

impl<'a> TableView<'a> {
    /// The row as it should be displayed, i.e. the scratch copy while it is
    /// being edited.
    pub fn display_row(&self, row: &'a EnrichedBookRecord) -> &'a EnrichedBookRecord {
        match self.editing {
            Some(edit) if edit.key == row.key => &edit.scratch,
            _ => row,
        }
    }
}

pub fn compare_records(
    a: &EnrichedBookRecord,
    b: &EnrichedBookRecord,
    column: Column,
    direction: SortDirection,
) -> Ordering {
    let ordering = a.cell(column).natural_cmp(&b.cell(column));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort, ties keep their current relative order.
pub fn sort_records(rows: &mut [&EnrichedBookRecord], column: Column, direction: SortDirection) {
    rows.sort_by(|a, b| compare_records(a, b, column, direction));
}

/// The rows of 1-based page `page`. Consecutive pages partition `rows`.
pub fn paginate<T>(rows: &[T], page: u32, page_size: PageSize) -> &[T] {
    let size = page_size.get() as usize;
    let start = (page.saturating_sub(1) as usize)
        .saturating_mul(size)
        .min(rows.len());
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

/// Number of pages the remote total spans.
pub fn page_count(total_found: u64, page_size: PageSize) -> u64 {
    let size = page_size.get() as u64;
    (total_found + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_partition_the_rows() {
        let rows: Vec<u32> = (0..23).collect();
        let size = PageSize::new(10).unwrap();
        let pages: Vec<&[u32]> = (1..=4).map(|p| paginate(&rows, p, size)).collect();
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[2], &[20, 21, 22]);
        assert!(pages[3].is_empty());
        assert_eq!(pages.concat(), rows);
    }

    #[test]
    fn page_count_rounds_up() {
        let size = PageSize::new(10).unwrap();
        assert_eq!(page_count(0, size), 0);
        assert_eq!(page_count(5, size), 1);
        assert_eq!(page_count(20, size), 2);
        assert_eq!(page_count(21, size), 3);
    }
}
