use actix_web::{test, App};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use tutorlink_backend::controller::teacher::TeacherController;
use tutorlink_backend::domain::teacher::{Teacher, TeachingClass};
use tutorlink_backend::repository::teacher::{
    ClassPage, ClassRecord, ClassSearchParams, ClassSort, NewTeacher, NewTeachingClass,
    TeacherRepository, TeacherRepositoryError,
};
use tutorlink_backend::service::teacher::TeacherService;

#[derive(Default)]
struct InMemoryTeacherRepository {
    teachers: RwLock<HashMap<i64, Teacher>>,
    next_class_id: RwLock<i64>,
}

#[async_trait]
impl TeacherRepository for InMemoryTeacherRepository {
    async fn create_teacher(
        &self,
        new_teacher: NewTeacher,
    ) -> Result<Teacher, TeacherRepositoryError> {
        let mut teachers = self.teachers.write().await;
        let id = (teachers.len() + 1) as i64;
        let teacher = Teacher::new(id, new_teacher.name, new_teacher.active_status, Vec::new())?;
        teachers.insert(id, teacher.clone());
        Ok(teacher)
    }

    async fn find_by_id(
        &self,
        teacher_id: i64,
    ) -> Result<Option<Teacher>, TeacherRepositoryError> {
        let teachers = self.teachers.read().await;
        Ok(teachers.get(&teacher_id).cloned())
    }

    async fn add_class(
        &self,
        new_class: NewTeachingClass,
    ) -> Result<TeachingClass, TeacherRepositoryError> {
        let mut next_id = self.next_class_id.write().await;
        *next_id += 1;
        let class = TeachingClass::new(
            Some(*next_id),
            new_class.teacher_id,
            new_class.title,
            new_class.description,
            new_class.price,
            new_class.registered_at,
            new_class.recruitment_start_at,
            new_class.recruitment_end_at,
        )?;
        let mut teachers = self.teachers.write().await;
        if let Some(teacher) = teachers.get_mut(&new_class.teacher_id) {
            teacher.register_class(class.clone())?;
        }
        Ok(class)
    }

    async fn search_classes(
        &self,
        params: ClassSearchParams,
    ) -> Result<ClassPage, TeacherRepositoryError> {
        let teachers = self.teachers.read().await;
        let mut records: Vec<ClassRecord> = teachers
            .get(&params.teacher_id)
            .map(|teacher| teacher.teaching_classes().to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|class| match params.title_keyword.as_deref() {
                Some(keyword) if !keyword.is_empty() => class.title().contains(keyword),
                _ => true,
            })
            .map(|class| ClassRecord {
                id: class.id.unwrap_or_default(),
                teacher_id: class.teacher_id,
                title: class.title().to_string(),
                description: class.description().to_string(),
                price: class.price(),
                registered_at: class.registered_at,
            })
            .collect();
        match params.sort {
            Some(ClassSort::Latest) => {
                records.sort_by(|a, b| b.registered_at.cmp(&a.registered_at))
            }
            Some(ClassSort::Price) => records.sort_by_key(|record| record.price),
            None => {}
        }
        let total = records.len() as u64;
        if let Some(page) = params.page {
            records = records
                .into_iter()
                .skip((page.page * page.size) as usize)
                .take(page.size as usize)
                .collect();
        }
        Ok(ClassPage::of(records, params.page, total))
    }
}

fn controller() -> TeacherController<InMemoryTeacherRepository> {
    TeacherController::new(TeacherService::new(InMemoryTeacherRepository::default()))
}

fn class_payload(title: &str, price: i32) -> serde_json::Value {
    json!({
        "title": title,
        "description": "자바 프로그래밍의 기초를 배웁니다.",
        "price": price,
        "registered_at": "2024-03-04T07:00:00Z",
        "recruitment_start_at": "2024-03-05T00:00:00Z",
        "recruitment_end_at": "2024-03-11T00:00:00Z"
    })
}

#[actix_rt::test]
async fn register_and_list_classes_flow() {
    let controller = controller();
    let app = test::init_service(
        App::new().configure(|cfg| TeacherController::configure(cfg, controller.clone())),
    )
    .await;

    // register teacher
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/teachers")
            .set_json(&json!({ "name": "suchan" }))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let teacher_id = body["data"]["teacher_id"].as_i64().unwrap();

    // register two classes
    for (title, price) in [
        ("프로그래밍 기초 클래스", 50_000),
        ("알고리즘 마스터 클래스", 70_000),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/teachers/{teacher_id}/classes"))
                .set_json(&class_payload(title, price))
                .to_request(),
        )
        .await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2000);
    }

    // keyword filter narrows the listing
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/teachers/{teacher_id}/classes?title_keyword=%EC%95%8C%EA%B3%A0%EB%A6%AC%EC%A6%98"
            ))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "알고리즘 마스터 클래스");

    // price sort returns the cheaper class first
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/teachers/{teacher_id}/classes?sort=price"))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["price"], 50_000);
    assert_eq!(items[1]["price"], 70_000);
}

#[actix_rt::test]
async fn register_class_out_of_hours_returns_policy_code() {
    let controller = controller();
    let app = test::init_service(
        App::new().configure(|cfg| TeacherController::configure(cfg, controller.clone())),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/teachers")
            .set_json(&json!({ "name": "suchan" }))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let teacher_id = body["data"]["teacher_id"].as_i64().unwrap();

    let mut payload = class_payload("자바 프로그래밍 기초 클래스", 50_000);
    payload["registered_at"] = json!("2024-03-04T14:00:00Z");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/teachers/{teacher_id}/classes"))
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4106);
}

#[actix_rt::test]
async fn listing_unknown_teacher_returns_not_found_code() {
    let controller = controller();
    let app = test::init_service(
        App::new().configure(|cfg| TeacherController::configure(cfg, controller.clone())),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/teachers/42/classes").to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4101);
    assert!(body["data"].is_null());
}

#[actix_rt::test]
async fn pagination_reports_totals() {
    let controller = controller();
    let app = test::init_service(
        App::new().configure(|cfg| TeacherController::configure(cfg, controller.clone())),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/teachers")
            .set_json(&json!({ "name": "suchan" }))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let teacher_id = body["data"]["teacher_id"].as_i64().unwrap();

    for i in 0..7 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/teachers/{teacher_id}/classes"))
                .set_json(&class_payload(&format!("자바 프로그래밍 클래스 {i}"), 10_000))
                .to_request(),
        )
        .await;
        assert!(resp.status().is_success());
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/teachers/{teacher_id}/classes?page=2&size=3"))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["page"], 2);
    assert_eq!(body["data"]["pagination"]["total"], 7);
    assert_eq!(body["data"]["pagination"]["total_pages"], 3);
}
