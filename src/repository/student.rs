use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use thiserror::Error;

use crate::domain::student::{Email, Student, StudentDomainError};
use crate::domain::teacher::{ActiveStatus, ParseActiveStatusError};

#[async_trait]
pub trait StudentRepository {
    async fn create_student(
        &self,
        new_student: NewStudent,
    ) -> Result<Student, StudentRepositoryError>;
    async fn find_by_id(&self, student_id: i64)
        -> Result<Option<Student>, StudentRepositoryError>;
    async fn find_by_email(&self, email: &str)
        -> Result<Option<Student>, StudentRepositoryError>;
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: Email,
    pub active_status: ActiveStatus,
}

#[derive(Debug, Error)]
pub enum StudentRepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("student domain error: {0}")]
    Domain(#[from] StudentDomainError),
    #[error("invalid active status column: {0}")]
    Status(#[from] ParseActiveStatusError),
}

#[derive(Clone)]
pub struct MySqlStudentRepository {
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn create_student(
        &self,
        new_student: NewStudent,
    ) -> Result<Student, StudentRepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO students (name, email, active_status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&new_student.name)
        .bind(new_student.email.as_str())
        .bind(new_student.active_status.as_str())
        .execute(&self.pool)
        .await?;

        let student = Student::new(
            result.last_insert_id() as i64,
            new_student.name,
            new_student.email,
            new_student.active_status,
        )?;
        Ok(student)
    }

    async fn find_by_id(
        &self,
        student_id: i64,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, name, email, active_status
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        maybe_row.map(map_row_to_student).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, name, email, active_status
            FROM students
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        maybe_row.map(map_row_to_student).transpose()
    }
}

fn map_row_to_student(row: MySqlRow) -> Result<Student, StudentRepositoryError> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let email = Email::new(row.try_get::<String, _>("email")?)
        .map_err(StudentDomainError::from)?;
    let active_status: ActiveStatus = row.try_get::<String, _>("active_status")?.parse()?;

    Ok(Student::new(id, name, email, active_status)?)
}
