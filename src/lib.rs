//! Search Open Library by author, join every book with its author's details
//! and work with the result as a sortable, pageable, editable table.

pub mod config;
pub mod controller;
pub mod default_colors;
pub mod error;
pub mod export;
pub mod gateway;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod view;

pub use controller::{EditState, LoadStatus, TableController, Transition};
pub use error::{Error, Result};
pub use gateway::{BookSource, OpenLibrary, SearchPage};
