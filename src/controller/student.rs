use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::dto::student::{ApplyClassRequest, RegisterStudentRequest};
use crate::repository::class::{ClassApplicationRepository, TeachingClassRepository};
use crate::repository::student::StudentRepository;
use crate::service::student::StudentService;
use crate::util::{AppError, ResponseBuilder};

pub struct StudentController<S, C, A>
where
    S: StudentRepository + Send + Sync + 'static,
    C: TeachingClassRepository + Send + Sync + 'static,
    A: ClassApplicationRepository + Send + Sync + 'static,
{
    service: Arc<StudentService<S, C, A>>,
}

impl<S, C, A> Clone for StudentController<S, C, A>
where
    S: StudentRepository + Send + Sync + 'static,
    C: TeachingClassRepository + Send + Sync + 'static,
    A: ClassApplicationRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S, C, A> StudentController<S, C, A>
where
    S: StudentRepository + Send + Sync + 'static,
    C: TeachingClassRepository + Send + Sync + 'static,
    A: ClassApplicationRepository + Send + Sync + 'static,
{
    pub fn new(service: StudentService<S, C, A>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn configure(cfg: &mut web::ServiceConfig, controller: StudentController<S, C, A>) {
        let controller = web::Data::new(controller);
        cfg.app_data(controller.clone())
            .route("/students", web::post().to(Self::register))
            .route("/students/{student_id}", web::get().to(Self::student))
            .route(
                "/students/{student_id}/applications",
                web::post().to(Self::apply_class),
            );
    }

    async fn register(
        controller: web::Data<StudentController<S, C, A>>,
        payload: web::Json<RegisterStudentRequest>,
    ) -> Result<HttpResponse, AppError> {
        let student = controller
            .service
            .register_student(payload.into_inner())
            .await?;
        ResponseBuilder::ok(student)
    }

    async fn student(
        controller: web::Data<StudentController<S, C, A>>,
        path: web::Path<i64>,
    ) -> Result<HttpResponse, AppError> {
        let student = controller.service.student(path.into_inner()).await?;
        ResponseBuilder::ok(student)
    }

    async fn apply_class(
        controller: web::Data<StudentController<S, C, A>>,
        path: web::Path<i64>,
        payload: web::Json<ApplyClassRequest>,
    ) -> Result<HttpResponse, AppError> {
        let student_id = path.into_inner();
        let result = controller
            .service
            .apply_class(student_id, payload.into_inner())
            .await?;
        ResponseBuilder::ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::ClassApplication;
    use crate::domain::student::Student;
    use crate::domain::teacher::TeachingClass;
    use crate::repository::class::ClassRepositoryError;
    use crate::repository::student::{NewStudent, StudentRepositoryError};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct InMemoryStudentRepository {
        students: RwLock<HashMap<i64, Student>>,
    }

    #[async_trait]
    impl StudentRepository for InMemoryStudentRepository {
        async fn create_student(
            &self,
            new_student: NewStudent,
        ) -> Result<Student, StudentRepositoryError> {
            let mut students = self.students.write().await;
            let id = (students.len() + 1) as i64;
            let student = Student::new(
                id,
                new_student.name,
                new_student.email,
                new_student.active_status,
            )?;
            students.insert(id, student.clone());
            Ok(student)
        }

        async fn find_by_id(
            &self,
            student_id: i64,
        ) -> Result<Option<Student>, StudentRepositoryError> {
            let students = self.students.read().await;
            Ok(students.get(&student_id).cloned())
        }

        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<Student>, StudentRepositoryError> {
            let students = self.students.read().await;
            Ok(students
                .values()
                .find(|student| student.email().as_str() == email)
                .cloned())
        }
    }

    struct FixedClassRepository {
        class: TeachingClass,
    }

    #[async_trait]
    impl TeachingClassRepository for FixedClassRepository {
        async fn find_by_id(
            &self,
            class_id: i64,
        ) -> Result<Option<TeachingClass>, ClassRepositoryError> {
            if self.class.id == Some(class_id) {
                Ok(Some(self.class.clone()))
            } else {
                Ok(None)
            }
        }
    }

    #[derive(Default)]
    struct InMemoryApplicationRepository {
        applications: RwLock<Vec<ClassApplication>>,
    }

    #[async_trait]
    impl ClassApplicationRepository for InMemoryApplicationRepository {
        async fn save(
            &self,
            application: ClassApplication,
        ) -> Result<ClassApplication, ClassRepositoryError> {
            let mut applications = self.applications.write().await;
            let mut saved = application;
            saved.id = Some(applications.len() as i64 + 1);
            applications.push(saved.clone());
            Ok(saved)
        }
    }

    fn recruiting_class() -> TeachingClass {
        let now = Utc::now();
        TeachingClass::new(
            Some(100),
            2,
            "자바 프로그래밍 기초 클래스",
            "자바 프로그래밍의 기초를 배웁니다.",
            50_000,
            now - Duration::days(10),
            now - Duration::days(5),
            now + Duration::days(5),
        )
        .unwrap()
    }

    fn controller() -> StudentController<
        InMemoryStudentRepository,
        FixedClassRepository,
        InMemoryApplicationRepository,
    > {
        StudentController::new(StudentService::new(
            InMemoryStudentRepository::default(),
            FixedClassRepository {
                class: recruiting_class(),
            },
            InMemoryApplicationRepository::default(),
        ))
    }

    #[actix_rt::test]
    async fn register_endpoint_returns_student() {
        let controller = controller();
        let app = test::init_service(
            App::new().configure(|cfg| StudentController::configure(cfg, controller.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/students")
            .set_json(&json!({ "name": "김학생", "email": "student@tutorlink.com" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2000);
        assert_eq!(body["data"]["name"], "김학생");
        assert_eq!(body["data"]["active_status"], "ACTIVE");
    }

    #[actix_rt::test]
    async fn apply_endpoint_returns_application_result() {
        let controller = controller();
        let app = test::init_service(
            App::new().configure(|cfg| StudentController::configure(cfg, controller.clone())),
        )
        .await;

        let register = test::TestRequest::post()
            .uri("/students")
            .set_json(&json!({ "name": "김학생", "email": "student@tutorlink.com" }))
            .to_request();
        let _ = test::call_service(&app, register).await;

        let req = test::TestRequest::post()
            .uri("/students/1/applications")
            .set_json(&json!({ "class_id": 100 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2000);
        assert_eq!(body["data"]["application_id"], 1);
        assert_eq!(body["data"]["class_id"], 100);
        assert_eq!(body["data"]["class_title"], "자바 프로그래밍 기초 클래스");
    }

    #[actix_rt::test]
    async fn apply_endpoint_rejects_unknown_class() {
        let controller = controller();
        let app = test::init_service(
            App::new().configure(|cfg| StudentController::configure(cfg, controller.clone())),
        )
        .await;

        let register = test::TestRequest::post()
            .uri("/students")
            .set_json(&json!({ "name": "김학생", "email": "student@tutorlink.com" }))
            .to_request();
        let _ = test::call_service(&app, register).await;

        let req = test::TestRequest::post()
            .uri("/students/1/applications")
            .set_json(&json!({ "class_id": 999 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4301);
    }
}
