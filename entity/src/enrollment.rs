use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::EnrollmentStatus;

/// A user's enrollment in a course. One row per `(user_id, course_id)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(indexed)]
    pub course_id: i32,
    pub payment_status: EnrollmentStatus,
    #[sea_orm(unique, nullable)]
    pub payment_reference: Option<String>,
    /// Set once the enrollment reaches `completed`.
    #[sea_orm(nullable)]
    pub enrolled_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(has_many = "super::enrollment_module::Entity")]
    EnrollmentModule,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollment_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnrollmentModule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
