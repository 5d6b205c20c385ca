//! Template-driven row validation.
//!
//! The engine is pure computation: a [`BatchProcessor`] walks the rows in
//! fixed-size chunks, [`validate_row`] applies every schema column to a row,
//! and the [`ValidatorTable`] dispatches each typed column to one of the
//! field validators in [`validators`].

mod batch;
mod row;
mod table;
pub mod validators;

pub use batch::{BatchOptions, BatchProcessor, DEFAULT_CHUNK_SIZE, Parallelism};
pub use row::validate_row;
pub use table::{DateCheck, NumberCheck, PlainCheck, StringCheck, ValidatorTable};
