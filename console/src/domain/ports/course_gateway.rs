//! Port for course persistence on the remote Gateway.
//!
//! The courses screen lists, creates, updates, and deletes courses through
//! this trait. Outbound adapters translate each call into the backend's
//! transport; the fixture keeps courses in memory for tests and local runs.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use super::GatewayError;
use crate::domain::{Course, CourseDraft, CourseId};

/// Course CRUD operations exposed by the Gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseGateway: Send + Sync {
    /// Return every course, newest first.
    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError>;

    /// Store a new course and return it with its server-assigned fields.
    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, GatewayError>;

    /// Replace the editable fields of `id` and return the stored course.
    async fn update_course(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, GatewayError>;

    async fn delete_course(&self, id: &CourseId) -> Result<(), GatewayError>;
}

/// In-memory course store.
///
/// New courses are inserted at the front so listing order matches the
/// backend's `created_at` descending order.
pub struct FixtureCourseGateway {
    courses: Mutex<Vec<Course>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for FixtureCourseGateway {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl FixtureCourseGateway {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            courses: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Seed the store with `courses`, kept in the given order.
    #[must_use]
    pub fn with_courses(self, courses: Vec<Course>) -> Self {
        *self.courses.lock().unwrap_or_else(PoisonError::into_inner) = courses;
        self
    }
}

#[async_trait]
impl CourseGateway for FixtureCourseGateway {
    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        Ok(self
            .courses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, GatewayError> {
        let course = Course::new(CourseId::random(), draft.clone(), self.clock.utc());
        self.courses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, GatewayError> {
        let mut courses = self.courses.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = courses
            .iter_mut()
            .find(|course| course.id() == *id)
            .ok_or_else(|| GatewayError::not_found(format!("course {id}")))?;
        *slot = Course::new(*id, draft.clone(), slot.created_at());
        Ok(slot.clone())
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), GatewayError> {
        let mut courses = self.courses.lock().unwrap_or_else(PoisonError::into_inner);
        let before = courses.len();
        courses.retain(|course| course.id() != *id);
        if courses.len() == before {
            return Err(GatewayError::not_found(format!("course {id}")));
        }
        Ok(())
    }
}
