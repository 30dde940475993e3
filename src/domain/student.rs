use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use super::teacher::ActiveStatus;

pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email regex must compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EmailError::Empty);
        }
        if !Self::is_valid(&value) {
            return Err(EmailError::InvalidFormat(value));
        }
        Ok(Self(value))
    }

    pub fn is_valid(email: &str) -> bool {
        if email.trim().is_empty() {
            return false;
        }
        EMAIL_REGEX.is_match(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Student {
    pub id: i64,
    name: String,
    email: Email,
    active_status: ActiveStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudentDomainError {
    #[error("student name cannot be empty")]
    EmptyName,
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl Student {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: Email,
        active_status: ActiveStatus,
    ) -> Result<Self, StudentDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StudentDomainError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            email,
            active_status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn active_status(&self) -> ActiveStatus {
        self.active_status
    }

    /// 상태가 ACTIVE인 학생만 유효한 사용자다
    pub fn is_valid(&self) -> bool {
        self.active_status.is_active()
    }
}
