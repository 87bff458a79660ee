// State management module.
// Holds the generic catalog list state shared by all three resource views.

#![allow(dead_code)]

pub mod catalog;

pub use catalog::{Catalog, CatalogEntry, LoadingState, page_window};
