use actix_web::HttpResponse;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
    pub traceId: String,
    pub timestamp: i64,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success_with_trace(data: T, trace_id: String) -> Self {
        Self {
            code: 2000,
            message: "OK".to_string(),
            data: Some(data),
            traceId: trace_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn error_with_trace(code: i32, message: impl Into<String>, trace_id: String) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            traceId: trace_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// 성공 응답(HTTP 200)을 통일된 구조와 traceId, 타임스탬프로 구성한다
    pub fn ok<T>(data: T) -> Result<HttpResponse, crate::util::AppError>
    where
        T: Serialize,
    {
        let trace_id = Self::current_trace_id();
        let body = ApiResponse::success_with_trace(data, trace_id);
        Ok(HttpResponse::Ok().json(body))
    }

    /// 실패 응답(HTTP 200)을 비즈니스 code와 메시지로 구성하고 data는 비워 둔다
    #[allow(dead_code)]
    pub fn from_error(
        code: i32,
        message: impl Into<String>,
    ) -> Result<HttpResponse, crate::util::AppError> {
        let trace_id = Self::current_trace_id();
        let body = ApiResponse::<serde_json::Value>::error_with_trace(code, message, trace_id);
        Ok(HttpResponse::Ok().json(body))
    }

    /// 현재 요청의 traceId를 조회한다: task-local 우선, 없으면 UUID 생성
    pub(crate) fn current_trace_id() -> String {
        if let Ok(id) = REQUEST_ID.try_with(|id| id.clone()) {
            return id;
        }
        Uuid::new_v4().to_string()
    }
}

#[derive(Serialize, Debug)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Serialize, Debug)]
pub struct PagedData<T>
where
    T: Serialize,
{
    pub items: Vec<T>,
    pub pagination: Pagination,
}

// 요청 범위의 Request-Id, 응답과 로그 연관에 사용
tokio::task_local! {
    pub static REQUEST_ID: String;
}
