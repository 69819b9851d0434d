//! In-memory test doubles for the reconciliation engine's seams.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campus_core::StudentKey;
use campus_db::models::{program_enrollment::status, ProgramCourseEnrollment, ProgramEnrollment};
use chrono::Utc;
use uuid::Uuid;

use campus_api_enrollments::services::{
    CourseEnrollmentGateway, CourseEnrollmentStore, EnrollmentMatcher, GatewayError,
    NewCourseEnrollment, ReconciliationEngine, StoreError,
};

/// Matcher backed by a fixed map of program enrollments.
#[derive(Default)]
pub struct InMemoryMatcher {
    enrollments: HashMap<(Uuid, StudentKey), ProgramEnrollment>,
}

impl InMemoryMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a learner in a program, returning their enrollment id.
    pub fn add_learner(
        &mut self,
        program_id: Uuid,
        student_key: &str,
        user_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.enrollments.insert(
            (program_id, StudentKey::from(student_key)),
            ProgramEnrollment {
                id,
                program_id,
                curriculum_id: Uuid::new_v4(),
                student_key: student_key.to_string(),
                user_id,
                status: status::ENROLLED.to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl EnrollmentMatcher for InMemoryMatcher {
    async fn match_all(
        &self,
        program_id: Uuid,
        keys: &[StudentKey],
    ) -> Result<HashMap<StudentKey, ProgramEnrollment>, sqlx::Error> {
        Ok(keys
            .iter()
            .filter_map(|key| {
                self.enrollments
                    .get(&(program_id, key.clone()))
                    .map(|e| (key.clone(), e.clone()))
            })
            .collect())
    }
}

/// Gateway that records calls and optionally fails them.
#[derive(Default)]
pub struct RecordingGateway {
    pub created: Mutex<Vec<(Uuid, String)>>,
    pub deactivated: Mutex<Vec<(Uuid, String)>>,
    pub fail_creates: bool,
    pub fail_deactivations: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn deactivate_count(&self) -> usize {
        self.deactivated.lock().unwrap().len()
    }
}

#[async_trait]
impl CourseEnrollmentGateway for RecordingGateway {
    async fn create_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
        _mode: &str,
    ) -> Result<Uuid, GatewayError> {
        if self.fail_creates {
            return Err(GatewayError::Unavailable("platform down".to_string()));
        }
        self.created
            .lock()
            .unwrap()
            .push((user_id, course_key.to_string()));
        Ok(Uuid::new_v4())
    }

    async fn deactivate_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
    ) -> Result<(), GatewayError> {
        if self.fail_deactivations {
            return Err(GatewayError::Unavailable("platform down".to_string()));
        }
        self.deactivated
            .lock()
            .unwrap()
            .push((user_id, course_key.to_string()));
        Ok(())
    }
}

/// Store backed by a set of `(program_enrollment_id, course_key)` pairs.
#[derive(Default)]
pub struct InMemoryStore {
    pub rows: Mutex<Vec<NewCourseEnrollment>>,
    pub taken: Mutex<HashSet<(Uuid, String)>>,
    pub race_losers: Mutex<HashSet<Uuid>>,
    pub fail_inserts: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an existing course enrollment.
    pub fn seed_existing(&self, program_enrollment_id: Uuid, course_key: &str) {
        self.taken
            .lock()
            .unwrap()
            .insert((program_enrollment_id, course_key.to_string()));
    }

    /// Make inserts for this enrollment hit the unique constraint, as if a
    /// concurrent batch took the row after the bulk check ran.
    pub fn lose_insert_race(&self, program_enrollment_id: Uuid) {
        self.race_losers
            .lock()
            .unwrap()
            .insert(program_enrollment_id);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CourseEnrollmentStore for InMemoryStore {
    async fn insert(
        &self,
        new: NewCourseEnrollment,
    ) -> Result<ProgramCourseEnrollment, StoreError> {
        if self.fail_inserts {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if self
            .race_losers
            .lock()
            .unwrap()
            .contains(&new.program_enrollment_id)
        {
            return Err(StoreError::Conflict);
        }
        let pair = (new.program_enrollment_id, new.course_key.clone());
        if !self.taken.lock().unwrap().insert(pair) {
            return Err(StoreError::Conflict);
        }

        let row = ProgramCourseEnrollment {
            id: Uuid::new_v4(),
            program_enrollment_id: new.program_enrollment_id,
            course_key: new.course_key.clone(),
            status: new.status.clone(),
            course_enrollment_ref: new.course_enrollment_ref,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(new);
        Ok(row)
    }

    async fn existing_for_course(
        &self,
        program_enrollment_ids: &[Uuid],
        course_key: &str,
    ) -> Result<HashSet<Uuid>, StoreError> {
        let taken = self.taken.lock().unwrap();
        Ok(program_enrollment_ids
            .iter()
            .copied()
            .filter(|id| taken.contains(&(*id, course_key.to_string())))
            .collect())
    }
}

/// Wire an engine from the given doubles.
pub fn engine(
    matcher: InMemoryMatcher,
    gateway: Arc<RecordingGateway>,
    store: Arc<InMemoryStore>,
) -> ReconciliationEngine {
    ReconciliationEngine::new(Arc::new(matcher), gateway, store)
}
