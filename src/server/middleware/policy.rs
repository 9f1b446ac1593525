//! Ownership and role policy.
//!
//! Every per-resource access decision goes through `authorize`. Callers resolve the owner of
//! the resource first (for catalog nodes via `CatalogRepository::resolve_owner`) and pass it
//! in, so the rules below never touch the database.

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::User,
};

/// Resource being acted on, carrying the user id that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Course, module or content item; `owner_id` is the creator of the root course.
    Catalog { owner_id: i32 },
    Comment { author_id: i32 },
    /// `owner_id` is `None` for payments whose account was deleted.
    Payment { owner_id: Option<i32> },
    Account { user_id: i32 },
    /// Enrollments and learners of a course.
    CourseRoster { owner_id: i32 },
    /// Platform-wide admin views.
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Decides whether `actor` may perform `action` on `resource`.
///
/// | Resource      | Read            | Create          | Update / Delete |
/// |---------------|-----------------|-----------------|-----------------|
/// | Catalog       | anyone          | owning admin    | owning admin    |
/// | Comment       | anyone          | anyone          | author or admin |
/// | Payment       | owner or admin  | owner           | owner or admin  |
/// | Account       | self or admin   | -               | self or admin   |
/// | CourseRoster  | owning admin    | owning admin    | owning admin    |
/// | Platform      | admin           | admin           | admin           |
///
/// # Returns
/// - `Ok(())` - Access granted
/// - `Err(AppError::AuthErr(AccessDenied))` - Access denied
pub fn authorize(actor: &User, resource: Resource, action: Action) -> Result<(), AppError> {
    let allowed = match (resource, action) {
        (Resource::Catalog { .. }, Action::Read) => true,
        (Resource::Catalog { owner_id }, _) => actor.is_admin() && actor.id == owner_id,

        (Resource::Comment { .. }, Action::Read | Action::Create) => true,
        (Resource::Comment { author_id }, _) => actor.id == author_id || actor.is_admin(),

        (Resource::Payment { owner_id }, Action::Create) => owner_id == Some(actor.id),
        (Resource::Payment { owner_id }, _) => owner_id == Some(actor.id) || actor.is_admin(),

        (Resource::Account { .. }, Action::Create) => false,
        (Resource::Account { user_id }, _) => actor.id == user_id || actor.is_admin(),

        (Resource::CourseRoster { owner_id }, _) => actor.is_admin() && actor.id == owner_id,

        (Resource::Platform, _) => actor.is_admin(),
    };

    if allowed {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(
            actor.id,
            format!("{:?} on {:?} not permitted", action, resource),
        )
        .into())
    }
}
