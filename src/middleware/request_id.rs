use std::future::{ready, Ready};
use std::pin::Pin;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use uuid::Uuid;

/// 모든 요청이 `X-Request-Id`를 갖도록 보장하는 미들웨어:
/// - 요청 헤더에 `X-Request-Id`가 있으면 재사용하고 없으면 UUID v4를 생성한다
/// - Request-Id를 요청 확장(extensions)에 기록해 하위에서 읽을 수 있게 한다
/// - 응답 헤더에 `X-Request-Id`를 기록해 프런트와 로그를 연관시킨다
/// - task-local로 Request-Id를 전달해 응답 빌더 등 어디서든 읽을 수 있게 한다
pub struct RequestId;

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

pub struct RequestIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future =
        Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + 'static>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header_name = HeaderName::from_static("x-request-id");
        let incoming = req
            .headers()
            .get(&header_name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(incoming.clone());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = crate::util::response::REQUEST_ID
                .scope(incoming.clone(), async move { fut.await })
                .await;

            match result {
                Ok(mut res) => {
                    if let Ok(val) = HeaderValue::from_str(&incoming) {
                        res.headers_mut().insert(header_name, val);
                    }
                    Ok(res)
                }
                Err(e) => Err(e),
            }
        })
    }
}
