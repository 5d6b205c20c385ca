use thiserror::Error;

/// Structural problems with a validation template.
///
/// Any of these aborts the whole job before a single row is checked.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("template has no `columns` mapping")]
    MissingColumns,

    #[error("duplicate column `{column}` in template")]
    DuplicateColumn { column: String },

    #[error("invalid pattern for column `{column}`: {pattern}")]
    InvalidPattern {
        column: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
