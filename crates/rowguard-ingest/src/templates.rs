//! Template store: one validation template per file in a directory.

use std::path::{Path, PathBuf};

use rowguard_model::{Schema, TemplateDef};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Extensions recognized as template documents, in lookup order.
const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A template available in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// File stem, used to select the template.
    pub id: String,
    /// Human-readable name derived from the id.
    pub name: String,
    pub path: PathBuf,
}

/// A directory of template documents.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Open a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::DirectoryNotFound`] if `dir` is not a directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();
        if !root.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists all templates, sorted by id.
    pub fn list(&self) -> Result<Vec<TemplateInfo>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| IngestError::io(&self.root, e))?;

        let mut templates = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() || template_extension(&path).is_none() {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            templates.push(TemplateInfo {
                id: id.to_string(),
                name: display_name(id),
                path: path.clone(),
            });
        }

        templates.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
        // `x.yaml` and `x.json` share an id; the first extension in lookup order wins.
        templates.dedup_by(|later, earlier| {
            if later.id != earlier.id {
                return false;
            }
            if extension_rank(&later.path) < extension_rank(&earlier.path) {
                std::mem::swap(later, earlier);
            }
            true
        });
        debug!(root = %self.root.display(), count = templates.len(), "listed templates");
        Ok(templates)
    }

    /// Path of the template file for `id`.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(IngestError::InvalidTemplateId { id: id.to_string() });
        }
        TEMPLATE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{id}.{ext}")))
            .find(|path| path.is_file())
            .ok_or_else(|| IngestError::TemplateNotFound { id: id.to_string() })
    }

    /// Load and materialize the template `id`.
    pub fn load(&self, id: &str) -> Result<Schema> {
        let path = self.path_for(id)?;
        let schema = load_schema_file(&path)?;
        info!(template = id, columns = schema.len(), "loaded template");
        Ok(schema)
    }
}

/// Load a standalone template file. JSON by extension, YAML otherwise.
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let template: TemplateDef = match template_extension(path) {
        Some("json") => serde_json::from_str(&content).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        _ => serde_yaml::from_str(&content).map_err(|source| IngestError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    Schema::from_template(template).map_err(|source| IngestError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// `employee-records` -> `Employee Records`.
pub fn display_name(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn template_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    TEMPLATE_EXTENSIONS
        .iter()
        .copied()
        .find(|known| ext.eq_ignore_ascii_case(known))
}

fn extension_rank(path: &Path) -> usize {
    template_extension(path)
        .and_then(|ext| TEMPLATE_EXTENSIONS.iter().position(|known| *known == ext))
        .unwrap_or(usize::MAX)
}
