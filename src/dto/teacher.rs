use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTeacherRequest {
    #[validate(length(min = 1, max = 64, message = "선생님 이름은 1자 이상 64자 이하여야 합니다"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterTeacherResult {
    pub teacher_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterClassRequest {
    #[validate(length(min = 10, max = 99, message = "클래스 제목은 10자 이상 100자 미만이어야 합니다"))]
    pub title: String,
    #[validate(length(min = 1, message = "클래스 설명은 비어 있을 수 없습니다"))]
    pub description: String,
    #[validate(range(min = 0, message = "클래스 가격은 0 이상이어야 합니다"))]
    pub price: i32,
    /// 생략하면 서버 시각으로 등록된다
    pub registered_at: Option<DateTime<Utc>>,
    pub recruitment_start_at: DateTime<Utc>,
    pub recruitment_end_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ClassRegistered {
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassMetadata {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// 최근 등록순
    Latest,
    /// 낮은 가격순
    Price,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClassSearchQuery {
    pub title_keyword: Option<String>,
    pub sort: Option<SortType>,
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "페이지 크기는 1 이상 100 이하여야 합니다"))]
    pub size: Option<u32>,
}
