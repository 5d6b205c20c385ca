use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rowguard_model::BatchResult;
use tracing::info;

use crate::error::{ReportError, Result};

/// Pretty JSON of the whole result, followed by a newline.
pub fn write_json_result<W: Write>(result: &BatchResult, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn write_json_result_file(result: &BatchResult, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_json_result(result, BufWriter::new(file))?;
    info!(path = %path.display(), "wrote JSON result");
    Ok(())
}
