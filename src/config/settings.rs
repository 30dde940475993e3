use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // 실행 환경을 읽는다
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        // 여러 설정 소스를 겹쳐서 구성한다
        let config = config::Config::builder()
            // 1. 기본 설정 파일
            .add_source(config::File::with_name("config/default").required(false))
            // 2. 환경별 설정 파일
            .add_source(config::File::with_name(&format!("config/{}", environment)).required(false))
            // 3. 환경 변수 오버라이드
            .add_source(config::Environment::with_prefix("TUTORLINK").separator("_"))
            .build()?;

        config.try_deserialize()
    }

    #[allow(dead_code)]
    pub fn load_for_environment(env: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("TUTORLINK").separator("_"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                username: "tutorlink".to_string(),
                password: "tutorlink123".to_string(),
                host: "localhost".to_string(),
                port: 3306,
                database_name: "tutorlink_dev".to_string(),
                max_connections: 10,
            },
            application: ApplicationSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
