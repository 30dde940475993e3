use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 64, message = "학생 이름은 1자 이상 64자 이하여야 합니다"))]
    pub name: String,
    #[validate(email(message = "유효하지 않은 이메일 형식입니다"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub active_status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyClassRequest {
    #[validate(range(min = 1, message = "클래스 ID가 올바르지 않습니다"))]
    pub class_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ApplyClassResult {
    pub application_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub class_title: String,
    pub class_description: String,
    pub class_price: i32,
    pub applied_at: DateTime<Utc>,
}
