use std::{cmp::Ordering, fmt::Display};

/// Sentinel shown for author details the remote did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator used whenever a list field is shown as a single string.
pub const LIST_SEPARATOR: &str = ", ";

/// The value of one column of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    List(&'a [String]),
    Empty,
}

impl Cell<'_> {
    /// Natural ordering of two cells of the same column.
    ///
    /// Numbers compare numerically. Anything else, including a number against
    /// the `N/A` sentinel, compares by its string form.
    pub fn natural_cmp(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl Display for Cell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::List(items) => write!(f, "{}", items.join(LIST_SEPARATOR)),
            Cell::Empty => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(Cell::Number(9.0).natural_cmp(&Cell::Number(10.0)), Ordering::Less);
    }

    #[test]
    fn sentinel_sorts_by_string_form() {
        assert_eq!(
            Cell::Number(4.5).natural_cmp(&Cell::Text(NOT_AVAILABLE)),
            Ordering::Less
        );
        assert_eq!(Cell::Empty.natural_cmp(&Cell::Number(1999.0)), Ordering::Less);
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(1954.0).to_string(), "1954");
        assert_eq!(Cell::Number(4.25).to_string(), "4.25");
    }
}
