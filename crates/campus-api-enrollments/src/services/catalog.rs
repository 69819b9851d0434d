//! Program catalog lookups.
//!
//! Program and curriculum metadata lives outside this service; handlers only
//! need to know whether a program exists and whether a course run belongs to
//! it. The trait keeps that dependency swappable, and `StaticCatalog` is the
//! in-process implementation used for single-tenant deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Catalog lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// What the catalog knows about a program.
#[derive(Debug, Clone)]
pub struct ProgramRecord {
    pub id: Uuid,
    pub title: String,
    /// Course runs reachable through the program's curricula.
    pub course_keys: Vec<String>,
}

impl ProgramRecord {
    /// Whether the given course run belongs to this program.
    #[must_use]
    pub fn contains_course(&self, course_key: &str) -> bool {
        self.course_keys.iter().any(|key| key == course_key)
    }
}

/// Source of program and curriculum metadata.
#[async_trait]
pub trait ProgramCatalog: Send + Sync {
    /// Look up a program by id. `Ok(None)` means the program does not exist.
    async fn find_program(&self, program_id: Uuid) -> Result<Option<ProgramRecord>, CatalogError>;
}

/// In-process catalog backed by a fixed program map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    programs: HashMap<Uuid, ProgramRecord>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a program and the course runs its curricula contain.
    #[must_use]
    pub fn with_program(
        mut self,
        id: Uuid,
        title: impl Into<String>,
        course_keys: Vec<String>,
    ) -> Self {
        self.programs.insert(
            id,
            ProgramRecord {
                id,
                title: title.into(),
                course_keys,
            },
        );
        self
    }
}

#[async_trait]
impl ProgramCatalog for StaticCatalog {
    async fn find_program(&self, program_id: Uuid) -> Result<Option<ProgramRecord>, CatalogError> {
        Ok(self.programs.get(&program_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_catalog_lookup() {
        let program_id = Uuid::new_v4();
        let catalog = StaticCatalog::new().with_program(
            program_id,
            "Masters in Data Science",
            vec!["course-v1:campusX+DS500+2026".to_string()],
        );

        let record = catalog
            .find_program(program_id)
            .await
            .unwrap()
            .expect("program should exist");
        assert!(record.contains_course("course-v1:campusX+DS500+2026"));
        assert!(!record.contains_course("course-v1:campusX+DS501+2026"));

        assert!(catalog.find_program(Uuid::new_v4()).await.unwrap().is_none());
    }
}
