#![forbid(unsafe_code)]
//! Domain model for the sequence twenty-questions game: tri-state answers,
//! question and sequence catalogs, term rules and preview helpers.

pub mod builtin;
pub mod error;
pub mod model;
pub mod preview;
pub mod time;

pub use builtin::CatalogVariant;
pub use error::CatalogError;
pub use time::Clock;
