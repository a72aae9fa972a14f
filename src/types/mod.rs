pub mod book;
pub mod cell;
pub mod column;
pub mod query;

pub use book::{AuthorDetail, BookRecord, EnrichedBookRecord};
pub use cell::{Cell, NOT_AVAILABLE};
pub use column::Column;
pub use query::{PageSize, QueryState, SortDirection};
