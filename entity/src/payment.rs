use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PaymentStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Cleared when the paying account is deleted; the payment itself is kept.
    #[sea_orm(indexed, nullable)]
    pub user_id: Option<i32>,
    #[sea_orm(unique)]
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    #[sea_orm(nullable)]
    pub payment_method: Option<String>,
    #[sea_orm(nullable)]
    pub paid_at: Option<DateTimeUtc>,
    /// Last gateway payload seen for this reference, serialized JSON.
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_response: Option<String>,
    /// Caller supplied metadata, serialized JSON. Carries `course_id` for checkouts.
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
