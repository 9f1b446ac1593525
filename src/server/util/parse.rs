use entity::sea_orm_active_enums::{ContentKind, CourseLevel, RegistrantType};

use crate::server::error::AppError;

/// Parses the `registrantType` field (`self` or `parent`).
///
/// # Returns
/// - `Ok(RegistrantType)` - Recognized value
/// - `Err(AppError::BadRequest)` - Any other value
pub fn parse_registrant_type(value: &str) -> Result<RegistrantType, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "self" => Ok(RegistrantType::Individual),
        "parent" => Ok(RegistrantType::Parent),
        _ => Err(AppError::BadRequest(
            "registrantType must be one of: self, parent".to_string(),
        )),
    }
}

/// Wire form of a [`RegistrantType`], the inverse of [`parse_registrant_type`].
pub fn registrant_type_label(value: RegistrantType) -> &'static str {
    match value {
        RegistrantType::Individual => "self",
        RegistrantType::Parent => "parent",
    }
}

pub fn parse_course_level(value: &str) -> Result<CourseLevel, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "beginner" => Ok(CourseLevel::Beginner),
        "intermediate" => Ok(CourseLevel::Intermediate),
        "advanced" => Ok(CourseLevel::Advanced),
        _ => Err(AppError::BadRequest(
            "level must be one of: beginner, intermediate, advanced".to_string(),
        )),
    }
}

pub fn parse_content_kind(value: &str) -> Result<ContentKind, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(ContentKind::Text),
        "image" => Ok(ContentKind::Image),
        _ => Err(AppError::BadRequest("type must be one of: text, image".to_string())),
    }
}
