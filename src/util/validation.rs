use thiserror::Error;

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value cannot be blank")]
    Blank,
    #[error("name too long: {0} characters (max {MAX_NAME_LENGTH})")]
    NameTooLong(usize),
    #[error("description too long: {0} characters (max {MAX_DESCRIPTION_LENGTH})")]
    DescriptionTooLong(usize),
}

pub fn validate_name(name: impl AsRef<str>) -> Result<String, ValidationError> {
    let value = name.as_ref().trim();
    if value.is_empty() {
        return Err(ValidationError::Blank);
    }
    let length = value.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong(length));
    }
    Ok(value.to_string())
}

pub fn validate_description(description: impl AsRef<str>) -> Result<String, ValidationError> {
    let value = description.as_ref().trim();
    if value.is_empty() {
        return Err(ValidationError::Blank);
    }
    let length = value.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong(length));
    }
    Ok(value.to_string())
}
