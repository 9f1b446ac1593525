use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCompletionDto {
    pub enrollment_id: i32,
    pub module_id: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressDto {
    pub course_id: i32,
    /// Whole percentage between 0 and 100.
    pub progress: u8,
    pub completed_modules: u64,
    pub total_modules: u64,
}
