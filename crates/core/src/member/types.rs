//! Roster domain types and input validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a club member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Registered player.
    Player,
    /// Coaching staff.
    Coach,
    /// Team or club manager.
    Manager,
    /// Other staff (physio, kit, admin).
    Staff,
}

impl MemberRole {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Coach => "coach",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl std::str::FromStr for MemberRole {
    type Err = MemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "coach" => Ok(Self::Coach),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            _ => Err(MemberError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a member is currently active in the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Member is active.
    Active,
    /// Member has left or been deactivated.
    Inactive,
}

impl MemberStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = MemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(MemberError::UnknownStatus(s.to_string())),
        }
    }
}

/// Validation errors for roster input.
#[derive(Debug, Error)]
pub enum MemberError {
    /// Full name is empty or whitespace.
    #[error("Member name must not be empty")]
    EmptyName,

    /// Unknown role string.
    #[error("Unknown member role: {0}")]
    UnknownRole(String),

    /// Unknown status string.
    #[error("Unknown member status: {0}")]
    UnknownStatus(String),

    /// Monthly fee below zero.
    #[error("Monthly fee must not be negative")]
    NegativeFee,
}

/// Validated input for creating or updating a member record.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Full display name.
    pub full_name: String,
    /// Role in the club.
    pub role: MemberRole,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Country of origin.
    pub country: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Date the member joined the club.
    pub joined_on: NaiveDate,
    /// Monthly membership fee, if any.
    pub monthly_fee: Option<Decimal>,
}

impl NewMember {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Returns `MemberError` for an empty name or a negative fee.
    pub fn validate(&self) -> Result<(), MemberError> {
        if self.full_name.trim().is_empty() {
            return Err(MemberError::EmptyName);
        }
        if let Some(fee) = self.monthly_fee
            && fee < Decimal::ZERO
        {
            return Err(MemberError::NegativeFee);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn valid_member() -> NewMember {
        NewMember {
            full_name: "Jordan Alvarez".to_string(),
            role: MemberRole::Player,
            email: None,
            phone: None,
            country: Some("ES".to_string()),
            date_of_birth: None,
            joined_on: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            monthly_fee: Some(dec!(30.00)),
        }
    }

    #[test]
    fn test_valid_member_passes() {
        assert!(valid_member().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut member = valid_member();
        member.full_name = "   ".to_string();
        assert!(matches!(member.validate(), Err(MemberError::EmptyName)));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut member = valid_member();
        member.monthly_fee = Some(dec!(-1.00));
        assert!(matches!(member.validate(), Err(MemberError::NegativeFee)));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            MemberRole::Player,
            MemberRole::Coach,
            MemberRole::Manager,
            MemberRole::Staff,
        ] {
            assert_eq!(MemberRole::from_str(role.as_str()).unwrap(), role);
        }
        assert!(MemberRole::from_str("referee").is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            MemberStatus::from_str("Active").unwrap(),
            MemberStatus::Active
        );
        assert!(MemberStatus::from_str("retired").is_err());
    }
}
