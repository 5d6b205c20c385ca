//! Data model for template-driven row validation.
//!
//! A [`Schema`] is materialized once per job from a raw [`TemplateDef`] and
//! stays immutable while rows are checked against it. Rows are plain ordered
//! string maps, and every check produces data ([`Violation`],
//! [`ValidationOutcome`], [`BatchResult`]) rather than errors.

pub mod error;
pub mod outcome;
pub mod row;
pub mod schema;
pub mod violation;

pub use error::{Result, SchemaError};
pub use outcome::{BatchResult, RowDetail, ValidationOutcome};
pub use row::Row;
pub use schema::{
    ColumnDef, ColumnRule, DateFormat, DateRule, NumberRule, RawColumnDef, RawColumns, Schema,
    StringRule, TemplateDef,
};
pub use violation::Violation;
