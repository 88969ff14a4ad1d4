//! Company membership lookups.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tracing::warn;

use crate::entities::company_members;
use kontor_core::auth::MemberRole;
use kontor_shared::types::{CompanyId, UserId};

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user's role in the company, or `None` if they are not a member.
    ///
    /// Unrecognized stored roles are treated as no membership.
    pub async fn member_role(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Result<Option<MemberRole>, DbErr> {
        let membership = company_members::Entity::find()
            .filter(company_members::Column::CompanyId.eq(company_id.into_inner()))
            .filter(company_members::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?;

        Ok(membership.and_then(|m| {
            let role = MemberRole::parse(&m.role);
            if role.is_none() {
                warn!(company_id = %company_id, user_id = %user_id, role = %m.role, "Unknown member role");
            }
            role
        }))
    }
}
