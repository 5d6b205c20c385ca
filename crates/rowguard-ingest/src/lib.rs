//! Collaborators that feed the validation engine: the template store that
//! yields a [`Schema`](rowguard_model::Schema) and the row sources that
//! decode CSV, JSON and spreadsheet files into [`Row`](rowguard_model::Row)s.

pub mod error;
pub mod paths;
pub mod rows;
pub mod spreadsheet;
pub mod templates;

pub use error::{IngestError, Result};
pub use paths::{DEFAULT_TEMPLATES_DIR, TEMPLATES_ENV_VAR, resolve_templates_dir};
pub use rows::{InputFormat, read_csv_rows, read_json_rows, read_rows};
pub use spreadsheet::read_spreadsheet_rows;
pub use templates::{TemplateInfo, TemplateStore, display_name, load_schema_file};
