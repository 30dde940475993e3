use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use super::response::{ApiResponse, ResponseBuilder};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    BusinessError(#[from] BusinessError),
    #[error(transparent)]
    DbError(#[from] DbError),
    #[error(transparent)]
    InternalError(#[from] InternalError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum BusinessError {
    #[error(transparent)]
    Teacher(#[from] TeacherError),
    #[error(transparent)]
    Student(#[from] StudentError),
    #[error(transparent)]
    Class(#[from] ClassError),
    #[error("Validation failed")]
    Validation(Vec<ValidationField>),
}

#[derive(Debug, Error)]
pub enum TeacherError {
    #[error("Teacher not found")]
    NotFound,
    #[error("Teacher is inactive")]
    Inactive,
    #[error("Class limit exceeded")]
    ClassLimitExceeded,
    #[error("Class title is too short")]
    TitleTooShort,
    #[error("Class title is too long")]
    TitleTooLong,
    #[error("Class registration hour is not allowed")]
    RegistrationHourNotAllowed,
}

impl TeacherError {
    fn code(&self) -> i32 {
        match self {
            TeacherError::NotFound => 4101,
            TeacherError::Inactive => 4102,
            TeacherError::ClassLimitExceeded => 4103,
            TeacherError::TitleTooShort => 4104,
            TeacherError::TitleTooLong => 4105,
            TeacherError::RegistrationHourNotAllowed => 4106,
        }
    }
}

#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Student not found")]
    NotFound,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Student is inactive")]
    Inactive,
}

impl StudentError {
    fn code(&self) -> i32 {
        match self {
            StudentError::NotFound => 4201,
            StudentError::InvalidEmail => 4202,
            StudentError::EmailTaken => 4203,
            StudentError::Inactive => 4204,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassError {
    #[error("Class not found")]
    NotFound,
}

impl ClassError {
    fn code(&self) -> i32 {
        match self {
            ClassError::NotFound => 4301,
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection failed")]
    ConnectionFailed,
    #[error("Unique constraint violation")]
    UniqueConstraintViolation,
}

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum InternalError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Internal panic")]
    Panic,
    #[error("Unknown error")]
    Unknown,
}

#[derive(Debug, Serialize, Clone)]
pub struct ValidationField {
    pub field: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        // 규칙: HTTP 200으로 통일하고 비즈니스 code로 오류 종류를 구분한다
        match self {
            AppError::BusinessError(be) => match be {
                BusinessError::Validation(fields) => {
                    let trace_id = ResponseBuilder::current_trace_id();
                    let message = "요청 값 검증에 실패했습니다".to_string();
                    let mut body: ApiResponse<Vec<ValidationField>> =
                        ApiResponse::error_with_trace(4001, message, trace_id);
                    body.data = Some(fields.clone());
                    HttpResponse::Ok().json(body)
                }
                BusinessError::Teacher(teacher_error) => {
                    HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::error_with_trace(
                        teacher_error.code(),
                        teacher_error.to_string(),
                        ResponseBuilder::current_trace_id(),
                    ))
                }
                BusinessError::Student(student_error) => {
                    HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::error_with_trace(
                        student_error.code(),
                        student_error.to_string(),
                        ResponseBuilder::current_trace_id(),
                    ))
                }
                BusinessError::Class(class_error) => {
                    HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::error_with_trace(
                        class_error.code(),
                        class_error.to_string(),
                        ResponseBuilder::current_trace_id(),
                    ))
                }
            },
            AppError::DbError(_) | AppError::InternalError(_) | AppError::IoError(_) => {
                HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::error_with_trace(
                    5000,
                    "내부 서버 오류입니다",
                    ResponseBuilder::current_trace_id(),
                ))
            }
        }
    }
}
