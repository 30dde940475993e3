use chrono::{DateTime, Timelike, Utc};
use thiserror::Error;

pub const MAX_CLASSES_PER_TEACHER: usize = 10;
pub const MIN_CLASS_TITLE_CHARS: usize = 10;
pub const MAX_CLASS_TITLE_CHARS: usize = 100;
pub const REGISTRATION_OPEN_HOUR: u32 = 6;
pub const REGISTRATION_CLOSE_HOUR: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn is_active(self) -> bool {
        self == ActiveStatus::Active
    }

    pub fn description(self) -> &'static str {
        match self {
            ActiveStatus::Active => "활성",
            ActiveStatus::Inactive => "비활성",
        }
    }

    /// Storage representation, matching the `ACTIVE` / `INACTIVE` column values.
    pub fn as_str(self) -> &'static str {
        match self {
            ActiveStatus::Active => "ACTIVE",
            ActiveStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown active status: {0}")]
pub struct ParseActiveStatusError(pub String);

impl std::str::FromStr for ActiveStatus {
    type Err = ParseActiveStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(ActiveStatus::Active),
            "INACTIVE" => Ok(ActiveStatus::Inactive),
            other => Err(ParseActiveStatusError(other.to_string())),
        }
    }
}

/// Recruitment state of a teaching class relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitmentStatus {
    Recruiting,
    Closed,
    NotYetOpened,
}

#[derive(Debug, Clone)]
pub struct TeachingClass {
    pub id: Option<i64>,
    pub teacher_id: i64,
    title: String,
    description: String,
    price: i32,
    pub registered_at: DateTime<Utc>,
    pub recruitment_start_at: DateTime<Utc>,
    pub recruitment_end_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeachingClassError {
    #[error("class title cannot be empty")]
    EmptyTitle,
    #[error("class description cannot be empty")]
    EmptyDescription,
    #[error("class price cannot be negative: {0}")]
    NegativePrice(i32),
}

impl TeachingClass {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<i64>,
        teacher_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        price: i32,
        registered_at: DateTime<Utc>,
        recruitment_start_at: DateTime<Utc>,
        recruitment_end_at: DateTime<Utc>,
    ) -> Result<Self, TeachingClassError> {
        let title = title.into();
        let description = description.into();
        if title.trim().is_empty() {
            return Err(TeachingClassError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(TeachingClassError::EmptyDescription);
        }
        if price < 0 {
            return Err(TeachingClassError::NegativePrice(price));
        }
        Ok(Self {
            id,
            teacher_id,
            title,
            description,
            price,
            registered_at,
            recruitment_start_at,
            recruitment_end_at,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    /// Recruitment window bounds are inclusive on both ends.
    pub fn recruitment_status(&self, now: DateTime<Utc>) -> RecruitmentStatus {
        if now < self.recruitment_start_at {
            RecruitmentStatus::NotYetOpened
        } else if now > self.recruitment_end_at {
            RecruitmentStatus::Closed
        } else {
            RecruitmentStatus::Recruiting
        }
    }
}

#[derive(Debug, Clone)]
pub struct Teacher {
    pub id: i64,
    name: String,
    active_status: ActiveStatus,
    teaching_classes: Vec<TeachingClass>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeacherDomainError {
    #[error("teacher name cannot be empty")]
    EmptyName,
    #[error("class limit exceeded: teacher already holds {0} classes (max {MAX_CLASSES_PER_TEACHER})")]
    ClassLimitExceeded(usize),
}

impl Teacher {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        active_status: ActiveStatus,
        teaching_classes: Vec<TeachingClass>,
    ) -> Result<Self, TeacherDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TeacherDomainError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            active_status,
            teaching_classes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn active_status(&self) -> ActiveStatus {
        self.active_status
    }

    pub fn teaching_classes(&self) -> &[TeachingClass] {
        &self.teaching_classes
    }

    pub fn register_class(&mut self, teaching_class: TeachingClass) -> Result<(), TeacherDomainError> {
        if self.teaching_classes.len() >= MAX_CLASSES_PER_TEACHER {
            return Err(TeacherDomainError::ClassLimitExceeded(
                self.teaching_classes.len(),
            ));
        }
        self.teaching_classes.push(teaching_class);
        Ok(())
    }
}

/// Registration rules a teacher must satisfy before a new class is accepted.
pub struct ClassPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassPolicyError {
    #[error("inactive teacher cannot register a class")]
    InactiveTeacher,
    #[error("class limit exceeded: {0} classes registered (max {MAX_CLASSES_PER_TEACHER})")]
    ClassLimitExceeded(usize),
    #[error("class title too short: {0} characters (min {MIN_CLASS_TITLE_CHARS})")]
    TitleTooShort(usize),
    #[error("class title too long: {0} characters (must be under {MAX_CLASS_TITLE_CHARS})")]
    TitleTooLong(usize),
    #[error("class registration only allowed between {REGISTRATION_OPEN_HOUR}:00 and {REGISTRATION_CLOSE_HOUR}:00, got hour {0}")]
    RegistrationHourNotAllowed(u32),
}

impl ClassPolicy {
    pub fn validate(
        teacher: &Teacher,
        title: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<(), ClassPolicyError> {
        if !teacher.active_status().is_active() {
            return Err(ClassPolicyError::InactiveTeacher);
        }
        let class_count = teacher.teaching_classes().len();
        if class_count >= MAX_CLASSES_PER_TEACHER {
            return Err(ClassPolicyError::ClassLimitExceeded(class_count));
        }
        // 제목 길이는 바이트가 아니라 문자 수 기준이다
        let title_chars = title.chars().count();
        if title_chars < MIN_CLASS_TITLE_CHARS {
            return Err(ClassPolicyError::TitleTooShort(title_chars));
        }
        if title_chars >= MAX_CLASS_TITLE_CHARS {
            return Err(ClassPolicyError::TitleTooLong(title_chars));
        }
        let hour = registered_at.hour();
        if !(REGISTRATION_OPEN_HOUR..REGISTRATION_CLOSE_HOUR).contains(&hour) {
            return Err(ClassPolicyError::RegistrationHourNotAllowed(hour));
        }
        Ok(())
    }
}
