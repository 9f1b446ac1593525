use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{RegistrantType, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub registrant_type: RegistrantType,
    pub password_hash: String,
    pub role: Role,
    pub verified: bool,
    #[sea_orm(nullable)]
    pub verification_code_hash: Option<String>,
    #[sea_orm(nullable)]
    pub verification_code_issued_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub forgot_password_code_hash: Option<String>,
    #[sea_orm(nullable)]
    pub forgot_password_code_issued_at: Option<DateTimeUtc>,
    /// Bumped whenever the password changes so older bearer tokens stop validating.
    pub token_version: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
