use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use thiserror::Error;

use crate::domain::application::{ClassApplication, ClassApplicationError};
use crate::domain::teacher::{TeachingClass, TeachingClassError};

#[derive(Debug, Error)]
pub enum ClassRepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("teaching class domain error: {0}")]
    Class(#[from] TeachingClassError),
    #[error("class application domain error: {0}")]
    Application(#[from] ClassApplicationError),
}

#[async_trait]
pub trait TeachingClassRepository {
    async fn find_by_id(
        &self,
        class_id: i64,
    ) -> Result<Option<TeachingClass>, ClassRepositoryError>;
}

#[async_trait]
pub trait ClassApplicationRepository {
    /// Insert the application and return it with its generated id.
    async fn save(
        &self,
        application: ClassApplication,
    ) -> Result<ClassApplication, ClassRepositoryError>;
}

#[derive(Clone)]
pub struct MySqlTeachingClassRepository {
    pool: MySqlPool,
}

impl MySqlTeachingClassRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_class(row: &MySqlRow) -> Result<TeachingClass, ClassRepositoryError> {
    Ok(TeachingClass::new(
        Some(row.try_get("id")?),
        row.try_get("teacher_id")?,
        row.try_get::<String, _>("title")?,
        row.try_get::<String, _>("description")?,
        row.try_get("price")?,
        row.try_get::<DateTime<Utc>, _>("registered_at")?,
        row.try_get::<DateTime<Utc>, _>("recruitment_start_at")?,
        row.try_get::<DateTime<Utc>, _>("recruitment_end_at")?,
    )?)
}

#[async_trait]
impl TeachingClassRepository for MySqlTeachingClassRepository {
    async fn find_by_id(
        &self,
        class_id: i64,
    ) -> Result<Option<TeachingClass>, ClassRepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, teacher_id, title, description, price,
                   registered_at, recruitment_start_at, recruitment_end_at
            FROM teaching_classes
            WHERE id = ?
            "#,
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;

        match maybe_row {
            Some(row) => Ok(Some(map_row_to_class(&row)?)),
            None => Ok(None),
        }
    }
}

#[derive(Clone)]
pub struct MySqlClassApplicationRepository {
    pool: MySqlPool,
}

impl MySqlClassApplicationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassApplicationRepository for MySqlClassApplicationRepository {
    async fn save(
        &self,
        application: ClassApplication,
    ) -> Result<ClassApplication, ClassRepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO class_applications
                (student_id, teaching_class_id, class_title, class_description,
                 class_price, class_registered_at, class_recruitment_start_at,
                 class_recruitment_end_at, applied_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(application.student_id)
        .bind(application.teaching_class_id)
        .bind(application.class_title())
        .bind(application.class_description())
        .bind(application.class_price())
        .bind(application.class_registered_at)
        .bind(application.class_recruitment_start_at)
        .bind(application.class_recruitment_end_at)
        .bind(application.applied_at)
        .execute(&self.pool)
        .await?;

        let mut saved = application;
        saved.id = Some(result.last_insert_id() as i64);
        Ok(saved)
    }
}
