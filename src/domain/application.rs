use chrono::{DateTime, Utc};
use thiserror::Error;

use super::teacher::TeachingClass;

/// A student's application to a teaching class.
///
/// The application is a snapshot of the class data at the moment it was made
/// and is the unit that answers whether the application counts. Student and
/// class are referenced by id only.
#[derive(Debug, Clone)]
pub struct ClassApplication {
    pub id: Option<i64>,
    pub student_id: i64,
    pub teaching_class_id: i64,
    class_title: String,
    class_description: String,
    class_price: i32,
    pub class_registered_at: DateTime<Utc>,
    pub class_recruitment_start_at: DateTime<Utc>,
    pub class_recruitment_end_at: DateTime<Utc>,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassApplicationError {
    #[error("cannot apply to a class that has not been saved")]
    UnsavedClass,
    #[error("snapshot title cannot be empty")]
    EmptyTitle,
    #[error("snapshot description cannot be empty")]
    EmptyDescription,
    #[error("snapshot price cannot be negative: {0}")]
    NegativePrice(i32),
}

impl ClassApplication {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<i64>,
        student_id: i64,
        teaching_class_id: i64,
        class_title: impl Into<String>,
        class_description: impl Into<String>,
        class_price: i32,
        class_registered_at: DateTime<Utc>,
        class_recruitment_start_at: DateTime<Utc>,
        class_recruitment_end_at: DateTime<Utc>,
        applied_at: DateTime<Utc>,
    ) -> Result<Self, ClassApplicationError> {
        let class_title = class_title.into();
        let class_description = class_description.into();
        if class_title.trim().is_empty() {
            return Err(ClassApplicationError::EmptyTitle);
        }
        if class_description.trim().is_empty() {
            return Err(ClassApplicationError::EmptyDescription);
        }
        if class_price < 0 {
            return Err(ClassApplicationError::NegativePrice(class_price));
        }
        Ok(Self {
            id,
            student_id,
            teaching_class_id,
            class_title,
            class_description,
            class_price,
            class_registered_at,
            class_recruitment_start_at,
            class_recruitment_end_at,
            applied_at,
        })
    }

    /// Snapshot the class data for a new application made at `applied_at`.
    pub fn from_teaching_class(
        teaching_class: &TeachingClass,
        student_id: i64,
        applied_at: DateTime<Utc>,
    ) -> Result<Self, ClassApplicationError> {
        let teaching_class_id = teaching_class
            .id
            .ok_or(ClassApplicationError::UnsavedClass)?;
        Self::new(
            None,
            student_id,
            teaching_class_id,
            teaching_class.title(),
            teaching_class.description(),
            teaching_class.price(),
            teaching_class.registered_at,
            teaching_class.recruitment_start_at,
            teaching_class.recruitment_end_at,
            applied_at,
        )
    }

    pub fn class_title(&self) -> &str {
        &self.class_title
    }

    pub fn class_description(&self) -> &str {
        &self.class_description
    }

    pub fn class_price(&self) -> i32 {
        self.class_price
    }

    /// An application counts when it was made inside the snapshotted
    /// recruitment window, bounds inclusive.
    pub fn is_valid(&self) -> bool {
        self.applied_at >= self.class_recruitment_start_at
            && self.applied_at <= self.class_recruitment_end_at
    }
}
