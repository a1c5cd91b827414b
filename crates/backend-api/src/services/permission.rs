use std::collections::HashSet;

use sqlx::SqlitePool;

use super::error::ServiceError;

/// A permission granted directly to the caller, with the granter's identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GrantedPermission {
    pub public_id: String,
    pub permission_type: String,
    pub granted: bool,
    pub granter_name: Option<String>,
    pub granter_email: Option<String>,
    pub created_at: String,
}

/// A permission another user shared with the caller. The type is resolved
/// from the referenced permissions row, not stored on the share itself.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SharedPermission {
    pub public_id: String,
    pub permission_type: String,
    pub sharer_name: Option<String>,
    pub sharer_email: Option<String>,
    pub created_at: String,
}

#[derive(Debug)]
pub struct PermissionSummary {
    pub permissions: Vec<GrantedPermission>,
    pub shared_permissions: Vec<SharedPermission>,
    pub role_permissions: Vec<String>,
    pub all_permissions: Vec<String>,
}

/// Collect every permission source for one user: direct grants, shares
/// received from others and tags implied by company roles.
pub async fn summarise_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<PermissionSummary, ServiceError> {
    let permissions = sqlx::query_as::<_, GrantedPermission>(
        r#"
        SELECT p.public_id, p.type AS permission_type, p.granted,
               granter.display_name AS granter_name, granter.email AS granter_email,
               p.created_at
        FROM permissions p
        JOIN users granter ON granter.id = p.granter_id
        WHERE p.user_id = ? AND p.granted = 1
        ORDER BY p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let shared_permissions = sqlx::query_as::<_, SharedPermission>(
        r#"
        SELECT s.public_id, p.type AS permission_type,
               sharer.display_name AS sharer_name, sharer.email AS sharer_email,
               s.created_at
        FROM permission_shares s
        JOIN permissions p ON p.id = s.permission_id
        JOIN users sharer ON sharer.id = s.sharer_id
        WHERE s.shared_with_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let roles = sqlx::query_scalar::<_, String>(
        "SELECT role FROM company_members WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    // Duplicates across memberships are kept; clients render one block per
    // membership.
    let role_permissions: Vec<String> = roles
        .iter()
        .flat_map(|role| role_permission_tags(role))
        .map(|tag| tag.to_string())
        .collect();

    let mut seen = HashSet::new();
    let mut all_permissions = Vec::new();
    let combined = permissions
        .iter()
        .map(|permission| permission.permission_type.as_str())
        .chain(
            shared_permissions
                .iter()
                .map(|shared| shared.permission_type.as_str()),
        )
        .chain(role_permissions.iter().map(String::as_str));
    for permission_type in combined {
        if seen.insert(permission_type) {
            all_permissions.push(permission_type.to_string());
        }
    }

    Ok(PermissionSummary {
        permissions,
        shared_permissions,
        role_permissions,
        all_permissions,
    })
}

fn role_permission_tags(role: &str) -> &'static [&'static str] {
    match role {
        "ADMIN" => &[
            "API_ACCESS",
            "COMPANY_INFO_EDIT",
            "REPORT_VIEW",
            "REPORT_CREATE",
            "TASK_ASSIGN",
            "USER_MANAGE",
            "FINANCIAL_VIEW",
        ],
        "MANAGER" => &[
            "API_ACCESS",
            "REPORT_VIEW",
            "REPORT_CREATE",
            "TASK_ASSIGN",
            "USER_MANAGE",
        ],
        "EMPLOYEE" => &["REPORT_VIEW", "TASK_ASSIGN"],
        _ => &[],
    }
}
