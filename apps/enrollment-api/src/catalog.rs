//! Program catalog loading.
//!
//! The catalog is a JSON file listing each program and the course runs its
//! curricula contain. It is read once at startup into a
//! [`StaticCatalog`].

use campus_api_enrollments::services::StaticCatalog;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// One program entry in the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: Uuid,
    title: String,
    #[serde(default)]
    course_keys: Vec<String>,
}

/// Load the program catalog from a JSON file.
pub fn load_catalog(path: &str) -> Result<StaticCatalog, CatalogLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_string(),
        source,
    })?;

    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&contents).map_err(|source| CatalogLoadError::Parse {
            path: path.to_string(),
            source,
        })?;

    let mut catalog = StaticCatalog::new();
    for entry in &entries {
        catalog = catalog.with_program(entry.id, entry.title.clone(), entry.course_keys.clone());
    }

    tracing::info!(programs = entries.len(), path, "Program catalog loaded");
    Ok(catalog)
}
