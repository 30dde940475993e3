use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::domain::application::ClassApplication;
use crate::domain::student::Email;
use crate::domain::teacher::ActiveStatus;
use crate::dto::student::{
    ApplyClassRequest, ApplyClassResult, RegisterStudentRequest, StudentResponse,
};
use crate::repository::class::{
    ClassApplicationRepository, ClassRepositoryError, TeachingClassRepository,
};
use crate::repository::student::{NewStudent, StudentRepository, StudentRepositoryError};
use crate::service::teacher::validation_errors;
use crate::util::error::{BusinessError, ClassError, InternalError, StudentError};
use crate::util::AppError;

pub struct StudentService<S, C, A>
where
    S: StudentRepository + Send + Sync + 'static,
    C: TeachingClassRepository + Send + Sync + 'static,
    A: ClassApplicationRepository + Send + Sync + 'static,
{
    student_repository: Arc<S>,
    class_repository: Arc<C>,
    application_repository: Arc<A>,
}

impl<S, C, A> StudentService<S, C, A>
where
    S: StudentRepository + Send + Sync + 'static,
    C: TeachingClassRepository + Send + Sync + 'static,
    A: ClassApplicationRepository + Send + Sync + 'static,
{
    pub fn new(student_repository: S, class_repository: C, application_repository: A) -> Self {
        Self {
            student_repository: Arc::new(student_repository),
            class_repository: Arc::new(class_repository),
            application_repository: Arc::new(application_repository),
        }
    }

    #[instrument(skip(self, payload))]
    pub async fn register_student(
        &self,
        payload: RegisterStudentRequest,
    ) -> Result<StudentResponse, AppError> {
        payload
            .validate()
            .map_err(|err| AppError::from(BusinessError::Validation(validation_errors(err))))?;

        let email = Email::new(payload.email)
            .map_err(|_| AppError::from(BusinessError::Student(StudentError::InvalidEmail)))?;

        let existing = self
            .student_repository
            .find_by_email(email.as_str())
            .await
            .map_err(map_student_repository_error)?;
        if existing.is_some() {
            return Err(AppError::from(BusinessError::Student(
                StudentError::EmailTaken,
            )));
        }

        let student = self
            .student_repository
            .create_student(NewStudent {
                name: payload.name.trim().to_string(),
                email,
                active_status: ActiveStatus::Active,
            })
            .await
            .map_err(map_student_repository_error)?;

        Ok(to_response(student))
    }

    #[instrument(skip(self), fields(student_id = student_id))]
    pub async fn student(&self, student_id: i64) -> Result<StudentResponse, AppError> {
        let student = self
            .student_repository
            .find_by_id(student_id)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| AppError::from(BusinessError::Student(StudentError::NotFound)))?;

        Ok(to_response(student))
    }

    /// 클래스 신청: 신청 시점의 클래스 정보를 스냅샷으로 저장한다
    #[instrument(skip(self, payload), fields(student_id = student_id))]
    pub async fn apply_class(
        &self,
        student_id: i64,
        payload: ApplyClassRequest,
    ) -> Result<ApplyClassResult, AppError> {
        payload
            .validate()
            .map_err(|err| AppError::from(BusinessError::Validation(validation_errors(err))))?;

        let student = self
            .student_repository
            .find_by_id(student_id)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| AppError::from(BusinessError::Student(StudentError::NotFound)))?;
        if !student.is_valid() {
            return Err(AppError::from(BusinessError::Student(
                StudentError::Inactive,
            )));
        }

        let teaching_class = self
            .class_repository
            .find_by_id(payload.class_id)
            .await
            .map_err(map_class_repository_error)?
            .ok_or_else(|| AppError::from(BusinessError::Class(ClassError::NotFound)))?;

        let application =
            ClassApplication::from_teaching_class(&teaching_class, student_id, Utc::now())
                .map_err(|_| AppError::from(InternalError::Unknown))?;

        let saved = self
            .application_repository
            .save(application)
            .await
            .map_err(map_class_repository_error)?;

        let application_id = saved
            .id
            .ok_or_else(|| AppError::from(InternalError::Unknown))?;
        Ok(ApplyClassResult {
            application_id,
            student_id: saved.student_id,
            class_id: saved.teaching_class_id,
            class_title: saved.class_title().to_string(),
            class_description: saved.class_description().to_string(),
            class_price: saved.class_price(),
            applied_at: saved.applied_at,
        })
    }
}

fn to_response(student: crate::domain::student::Student) -> StudentResponse {
    StudentResponse {
        id: student.id,
        name: student.name().to_string(),
        email: student.email().as_str().to_string(),
        active_status: student.active_status().as_str().to_string(),
    }
}

fn map_student_repository_error(err: StudentRepositoryError) -> AppError {
    match err {
        StudentRepositoryError::Database(_)
        | StudentRepositoryError::Domain(_)
        | StudentRepositoryError::Status(_) => AppError::from(InternalError::Unknown),
    }
}

fn map_class_repository_error(err: ClassRepositoryError) -> AppError {
    match err {
        ClassRepositoryError::Database(_)
        | ClassRepositoryError::Class(_)
        | ClassRepositoryError::Application(_) => AppError::from(InternalError::Unknown),
    }
}
