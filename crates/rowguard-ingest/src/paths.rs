//! Templates directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the templates directory.
pub const TEMPLATES_ENV_VAR: &str = "ROWGUARD_TEMPLATES_DIR";

/// Directory used when neither a flag nor the environment names one.
pub const DEFAULT_TEMPLATES_DIR: &str = "validation-templates";

/// Get the templates directory.
///
/// Resolution order:
/// 1. `explicit` (the `--templates-dir` flag)
/// 2. `ROWGUARD_TEMPLATES_DIR` environment variable
/// 3. `validation-templates/` relative to the working directory
pub fn resolve_templates_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var_os(TEMPLATES_ENV_VAR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_TEMPLATES_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let dir = resolve_templates_dir(Some(Path::new("/srv/templates")));
        assert_eq!(dir, PathBuf::from("/srv/templates"));
    }
}
