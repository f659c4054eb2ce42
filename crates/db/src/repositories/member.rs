//! Member repository for roster database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use clubdesk_core::member::{MemberError as MemberValidationError, NewMember};
use clubdesk_shared::types::PageRequest;

use crate::entities::{
    members,
    sea_orm_active_enums::{MemberRole, MemberStatus},
};

/// Error types for member operations.
#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    /// Member not found.
    #[error("Member not found: {0}")]
    NotFound(Uuid),

    /// Input failed validation.
    #[error(transparent)]
    Invalid(#[from] MemberValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for updating a member. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateMemberInput {
    /// New full name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<clubdesk_core::member::MemberRole>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New monthly fee.
    pub monthly_fee: Option<rust_decimal::Decimal>,
    /// New status.
    pub status: Option<clubdesk_core::member::MemberStatus>,
}

/// Filter options for listing members.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Filter by role.
    pub role: Option<clubdesk_core::member::MemberRole>,
    /// Filter by status.
    pub status: Option<clubdesk_core::member::MemberStatus>,
}

/// Member repository for roster CRUD operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a member record after validating the input.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error.
    pub async fn create_member(&self, input: NewMember) -> Result<members::Model, MemberError> {
        input.validate()?;

        let now = Utc::now().into();
        let member = members::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            role: Set(input.role.into()),
            email: Set(input.email),
            phone: Set(input.phone),
            country: Set(input.country),
            date_of_birth: Set(input.date_of_birth),
            joined_on: Set(input.joined_on),
            status: Set(MemberStatus::Active),
            monthly_fee: Set(input.monthly_fee),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let member = member.insert(&self.db).await?;
        info!(member_id = %member.id, role = ?member.role, "Member created");
        Ok(member)
    }

    /// Gets a member by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn get_member(&self, member_id: Uuid) -> Result<members::Model, MemberError> {
        members::Entity::find_by_id(member_id)
            .one(&self.db)
            .await?
            .ok_or(MemberError::NotFound(member_id))
    }

    /// Lists members with optional filters, newest first.
    ///
    /// Returns the page of members and the total count across all pages.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_members(
        &self,
        filter: MemberFilter,
        page: &PageRequest,
    ) -> Result<(Vec<members::Model>, u64), MemberError> {
        let mut query = members::Entity::find();

        if let Some(role) = filter.role {
            query = query.filter(members::Column::Role.eq(MemberRole::from(role)));
        }
        if let Some(status) = filter.status {
            query = query.filter(members::Column::Status.eq(MemberStatus::from(status)));
        }

        let total = query.clone().count(&self.db).await?;

        let members = query
            .order_by_desc(members::Column::JoinedOn)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((members, total))
    }

    /// Updates a member record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a validation error, or a database error.
    pub async fn update_member(
        &self,
        member_id: Uuid,
        input: UpdateMemberInput,
    ) -> Result<members::Model, MemberError> {
        let member = self.get_member(member_id).await?;

        if let Some(name) = &input.full_name
            && name.trim().is_empty()
        {
            return Err(MemberValidationError::EmptyName.into());
        }
        if let Some(fee) = input.monthly_fee
            && fee < rust_decimal::Decimal::ZERO
        {
            return Err(MemberValidationError::NegativeFee.into());
        }

        let mut active: members::ActiveModel = member.into();

        if let Some(name) = input.full_name {
            active.full_name = Set(name);
        }
        if let Some(role) = input.role {
            active.role = Set(role.into());
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(country) = input.country {
            active.country = Set(Some(country));
        }
        if let Some(fee) = input.monthly_fee {
            active.monthly_fee = Set(Some(fee));
        }
        if let Some(status) = input.status {
            active.status = Set(status.into());
        }
        active.updated_at = Set(Utc::now().into());

        let member = active.update(&self.db).await?;
        Ok(member)
    }

    /// Deletes a member record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete_member(&self, member_id: Uuid) -> Result<(), MemberError> {
        let result = members::Entity::delete_by_id(member_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(MemberError::NotFound(member_id));
        }

        info!(member_id = %member_id, "Member deleted");
        Ok(())
    }
}
