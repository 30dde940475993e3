use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::dto::teacher::{ClassSearchQuery, RegisterClassRequest, RegisterTeacherRequest};
use crate::repository::teacher::TeacherRepository;
use crate::service::teacher::TeacherService;
use crate::util::{AppError, ResponseBuilder};

pub struct TeacherController<R>
where
    R: TeacherRepository + Send + Sync + 'static,
{
    service: Arc<TeacherService<R>>,
}

impl<R> Clone for TeacherController<R>
where
    R: TeacherRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<R> TeacherController<R>
where
    R: TeacherRepository + Send + Sync + 'static,
{
    pub fn new(service: TeacherService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn configure(cfg: &mut web::ServiceConfig, controller: TeacherController<R>) {
        let controller = web::Data::new(controller);
        cfg.app_data(controller.clone())
            .route("/teachers", web::post().to(Self::register))
            .route(
                "/teachers/{teacher_id}/classes",
                web::post().to(Self::register_class),
            )
            .route(
                "/teachers/{teacher_id}/classes",
                web::get().to(Self::classes),
            );
    }

    async fn register(
        controller: web::Data<TeacherController<R>>,
        payload: web::Json<RegisterTeacherRequest>,
    ) -> Result<HttpResponse, AppError> {
        let result = controller.service.register_teacher(payload.into_inner()).await?;
        ResponseBuilder::ok(result)
    }

    async fn register_class(
        controller: web::Data<TeacherController<R>>,
        path: web::Path<i64>,
        payload: web::Json<RegisterClassRequest>,
    ) -> Result<HttpResponse, AppError> {
        let teacher_id = path.into_inner();
        let result = controller
            .service
            .register_class(teacher_id, payload.into_inner())
            .await?;
        ResponseBuilder::ok(result)
    }

    async fn classes(
        controller: web::Data<TeacherController<R>>,
        path: web::Path<i64>,
        query: web::Query<ClassSearchQuery>,
    ) -> Result<HttpResponse, AppError> {
        let teacher_id = path.into_inner();
        let page = controller
            .service
            .classes(teacher_id, query.into_inner())
            .await?;
        ResponseBuilder::ok(page)
    }
}
