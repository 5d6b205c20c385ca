//! One validation job: load a schema, read rows, validate, write outputs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rowguard_ingest::{
    TemplateInfo, TemplateStore, load_schema_file, read_rows, resolve_templates_dir,
};
use rowguard_model::{BatchResult, Schema};
use rowguard_report::{resolve_report_path, write_error_report_file, write_json_result_file};
use rowguard_validate::{BatchOptions, BatchProcessor};
use tracing::{info, info_span, trace};

use crate::logging::redact_value;

/// Where the job's schema comes from.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    Template {
        id: String,
        templates_dir: Option<PathBuf>,
    },
    File(PathBuf),
}

impl SchemaSource {
    pub fn label(&self) -> String {
        match self {
            Self::Template { id, .. } => id.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobRequest {
    pub input: PathBuf,
    pub schema: SchemaSource,
    pub options: BatchOptions,
    /// CSV error report target; a directory gets the dated default name.
    pub report: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobProgress {
    /// Rows are loaded and validation is about to start.
    Started { total_rows: usize },
    /// A chunk boundary was reached.
    Advanced { processed: usize },
}

#[derive(Debug)]
pub struct JobOutcome {
    pub result: BatchResult,
    pub schema: Schema,
    pub report_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl JobOutcome {
    /// Process exit code: 0 when every row is valid, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.result.has_invalid_rows() { 1 } else { 0 }
    }
}

pub fn load_schema(source: &SchemaSource) -> Result<Schema> {
    match source {
        SchemaSource::Template { id, templates_dir } => {
            let dir = resolve_templates_dir(templates_dir.as_deref());
            let store = TemplateStore::open(&dir)
                .with_context(|| format!("open template store {}", dir.display()))?;
            store
                .load(id)
                .with_context(|| format!("load template `{id}`"))
        }
        SchemaSource::File(path) => load_schema_file(path)
            .with_context(|| format!("load schema {}", path.display())),
    }
}

pub fn list_templates(templates_dir: Option<&Path>) -> Result<(PathBuf, Vec<TemplateInfo>)> {
    let dir = resolve_templates_dir(templates_dir);
    let store = TemplateStore::open(&dir)
        .with_context(|| format!("open template store {}", dir.display()))?;
    let templates = store.list().context("list templates")?;
    Ok((dir, templates))
}

pub fn run_job<F>(request: &JobRequest, mut on_progress: F) -> Result<JobOutcome>
where
    F: FnMut(JobProgress),
{
    let span = info_span!(
        "job",
        input = %request.input.display(),
        schema = %request.schema.label()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let schema = load_schema(&request.schema)?;
    let rows = read_rows(&request.input)
        .with_context(|| format!("read rows from {}", request.input.display()))?;

    on_progress(JobProgress::Started {
        total_rows: rows.len(),
    });
    let processor = BatchProcessor::new(request.options);
    let result = processor.process_with_progress(&rows, &schema, |processed| {
        on_progress(JobProgress::Advanced { processed });
    });
    trace_violations(&result);

    let report_path = match &request.report {
        Some(target) => {
            let path = resolve_report_path(target, report_date());
            write_error_report_file(&result, &path)
                .with_context(|| format!("write error report {}", path.display()))?;
            Some(path)
        }
        None => None,
    };
    let json_path = match &request.json {
        Some(path) => {
            write_json_result_file(&result, path)
                .with_context(|| format!("write JSON result {}", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    info!(
        total_rows = result.total_rows,
        invalid_rows = result.invalid_rows,
        duration_ms = start.elapsed().as_millis(),
        "job complete"
    );
    Ok(JobOutcome {
        result,
        schema,
        report_path,
        json_path,
    })
}

/// Date stamped into default report file names, in UTC.
pub fn report_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn trace_violations(result: &BatchResult) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for detail in &result.details {
        for (field, violation) in &detail.errors {
            trace!(
                row = detail.row_index,
                field = field.as_str(),
                code = violation.code(),
                value = redact_value(detail.row_data.value_or_empty(field)),
                "violation"
            );
        }
    }
}
