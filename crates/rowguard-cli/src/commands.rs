use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use comfy_table::Table;
use rowguard_cli::job::{JobOutcome, JobRequest, SchemaSource, list_templates, run_job};
use rowguard_report::write_json_result;
use rowguard_validate::{BatchOptions, Parallelism};
use tracing::info_span;

use crate::cli::{OutputArg, TemplatesArgs, ValidateArgs};
use crate::progress::ChunkProgress;
use crate::summary::{apply_table_style, print_summary};

pub fn run_templates(args: &TemplatesArgs) -> Result<()> {
    let (dir, templates) = list_templates(args.templates_dir.as_deref())?;
    if templates.is_empty() {
        println!("No templates found in {}", dir.display());
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Template", "Name", "File"]);
    apply_table_style(&mut table);
    for template in templates {
        let file = template
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![template.id, template.name, file]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<JobOutcome> {
    let span = info_span!("validate");
    let _guard = span.enter();

    let request = job_request(args)?;
    let mut progress = ChunkProgress::new(!args.no_progress && io::stderr().is_terminal());
    let outcome = run_job(&request, |event| progress.update(event));
    progress.finish();
    let outcome = outcome?;

    match args.output {
        OutputArg::Table => print_summary(&request, &outcome, args.limit),
        OutputArg::Json => {
            write_json_result(&outcome.result, io::stdout().lock()).context("print JSON result")?;
        }
    }
    Ok(outcome)
}

fn job_request(args: &ValidateArgs) -> Result<JobRequest> {
    let schema = match (&args.template, &args.schema) {
        (Some(id), None) => SchemaSource::Template {
            id: id.clone(),
            templates_dir: args.templates_dir.clone(),
        },
        (None, Some(path)) => SchemaSource::File(path.clone()),
        _ => anyhow::bail!("pass exactly one of --template or --schema"),
    };
    let parallelism = args
        .threads
        .map_or(Parallelism::Sequential, Parallelism::Threads);
    Ok(JobRequest {
        input: args.input.clone(),
        schema,
        options: BatchOptions::default()
            .with_chunk_size(args.chunk_size)
            .with_parallelism(parallelism),
        report: args.report.clone(),
        json: args.json.clone(),
    })
}
