use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::mysql::MySqlPoolOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod controller;
mod domain;
mod dto;
mod middleware;
mod repository;
mod service;
mod util;

use crate::config::Settings;
use controller::{StudentController, TeacherController};
use middleware::RequestId;
use repository::{
    MySqlClassApplicationRepository, MySqlStudentRepository, MySqlTeacherRepository,
    MySqlTeachingClassRepository,
};
use service::{StudentService, TeacherService};
use util::error::DbError;
use util::{AppError, ResponseBuilder};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutorlink=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|_| Settings::default());

    tracing::info!(
        "Starting TutorLink backend server on {}:{}",
        settings.application.host,
        settings.application.port
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.connection_string())
        .await
        .map_err(|err| {
            tracing::error!("failed to connect to MySQL: {err}");
            AppError::from(DbError::ConnectionFailed)
        })?;

    let teacher_controller =
        TeacherController::new(TeacherService::new(MySqlTeacherRepository::new(pool.clone())));
    let student_controller = StudentController::new(StudentService::new(
        MySqlStudentRepository::new(pool.clone()),
        MySqlTeachingClassRepository::new(pool.clone()),
        MySqlClassApplicationRepository::new(pool.clone()),
    ));

    // Start HTTP server
    let bind_address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(settings.clone()))
            .service(
                web::scope("/api/v1")
                    // Health check endpoint
                    .route("/health", web::get().to(health_check))
                    .configure(|cfg| TeacherController::configure(cfg, teacher_controller.clone()))
                    .configure(|cfg| StudentController::configure(cfg, student_controller.clone())),
            )
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> Result<actix_web::HttpResponse, AppError> {
    #[derive(serde::Serialize)]
    struct HealthStatus {
        status: String,
        service: String,
        version: String,
    }

    let health_data = HealthStatus {
        status: "healthy".to_string(),
        service: "TutorLink Backend".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(ResponseBuilder::ok(health_data)?)
}
