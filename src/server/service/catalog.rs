use sea_orm::DatabaseConnection;

use crate::server::{
    data::catalog::{CatalogNode, CatalogOwner, CatalogRepository},
    error::AppError,
    middleware::policy::{authorize, Action, Resource},
    model::user::User,
};

/// Resolves the course owning `node` and checks that `actor` may perform `action` on it.
///
/// # Returns
/// - `Ok(CatalogOwner)` - Access granted, with the resolved root course
/// - `Err(AppError::NotFound)` - The node does not exist
/// - `Err(AppError::AuthErr(AccessDenied))` - Caller is not the owning admin
pub async fn authorize_node(
    db: &DatabaseConnection,
    actor: &User,
    node: CatalogNode,
    action: Action,
) -> Result<CatalogOwner, AppError> {
    let owner = CatalogRepository::new(db)
        .resolve_owner(node)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", node_name(node))))?;

    authorize(
        actor,
        Resource::Catalog {
            owner_id: owner.owner_id,
        },
        action,
    )?;

    Ok(owner)
}

fn node_name(node: CatalogNode) -> &'static str {
    match node {
        CatalogNode::Course(_) => "Course",
        CatalogNode::Module(_) => "Module",
        CatalogNode::Content(_) => "Content",
    }
}
