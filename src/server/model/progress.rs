use chrono::{DateTime, Utc};

use crate::model::progress::{CourseProgressDto, ModuleCompletionDto};

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCompletion {
    pub enrollment_id: i32,
    pub module_id: i32,
    pub completed_at: DateTime<Utc>,
}

impl ModuleCompletion {
    pub fn from_entity(entity: entity::enrollment_module::Model) -> Self {
        Self {
            enrollment_id: entity.enrollment_id,
            module_id: entity.module_id,
            completed_at: entity.completed_at,
        }
    }

    pub fn into_dto(self) -> ModuleCompletionDto {
        ModuleCompletionDto {
            enrollment_id: self.enrollment_id,
            module_id: self.module_id,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub course_id: i32,
    pub completed: u64,
    pub total: u64,
}

impl CourseProgress {
    /// Whole percentage of completed modules, rounded half up. Zero for a course with no
    /// modules.
    pub fn percentage(&self) -> u8 {
        percentage(self.completed, self.total)
    }

    pub fn into_dto(self) -> CourseProgressDto {
        CourseProgressDto {
            course_id: self.course_id,
            progress: self.percentage(),
            completed_modules: self.completed,
            total_modules: self.total,
        }
    }
}

/// `round(100 * completed / total)` in integer arithmetic.
pub fn percentage(completed: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}
