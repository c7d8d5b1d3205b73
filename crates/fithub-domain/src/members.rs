use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Subscription plan of a member. Determines the
/// subscription duration and the flat fee.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl PlanType {
    pub const ALL: [PlanType; 3] =
        [PlanType::Monthly, PlanType::Quarterly, PlanType::Annual];

    /// Subscription length in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            PlanType::Monthly => 1,
            PlanType::Quarterly => 3,
            PlanType::Annual => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "monthly",
            PlanType::Quarterly => "quarterly",
            PlanType::Annual => "annual",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(PlanType::Monthly),
            "quarterly" => Ok(PlanType::Quarterly),
            "annual" => Ok(PlanType::Annual),
            _ => Err(ParseEnumError {
                kind: "subscription type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
    Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "overdue" => Ok(PaymentStatus::Overdue),
            _ => Err(ParseEnumError {
                kind: "payment status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub unique_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

/// A gym member as persisted in the `members` table.
///
/// `subscription_end` is derived from `subscription_start` and
/// `subscription_type`. It is never taken from user input.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub unique_id: String,
    pub name: String,
    pub age: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub subscription_type: PlanType,
    pub subscription_start: NaiveDate,
    pub subscription_end: NaiveDate,
    pub payment_status: PaymentStatus,
}

impl Member {
    /// Check if the subscription covers the given date.
    pub fn is_active(&self, date: NaiveDate) -> bool {
        date >= self.subscription_start && date <= self.subscription_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_parse() {
        assert_eq!("monthly".parse::<PlanType>().unwrap(), PlanType::Monthly);
        assert_eq!("Quarterly".parse::<PlanType>().unwrap(), PlanType::Quarterly);
        assert_eq!(" ANNUAL ".parse::<PlanType>().unwrap(), PlanType::Annual);
        assert!("weekly".parse::<PlanType>().is_err());
    }

    #[test]
    fn test_plan_type_months() {
        assert_eq!(PlanType::Monthly.months(), 1);
        assert_eq!(PlanType::Quarterly.months(), 3);
        assert_eq!(PlanType::Annual.months(), 12);
    }

    #[test]
    fn test_payment_status_roundtrip_str() {
        for status in [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Overdue,
        ] {
            assert_eq!(status.to_string().parse::<PaymentStatus>().unwrap(), status);
        }
        let err = "refunded".parse::<PaymentStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown payment status 'refunded'");
    }

    #[test]
    fn test_member_is_active() {
        let member = Member {
            subscription_start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            subscription_end: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            ..Default::default()
        };
        assert!(!member.is_active(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(member.is_active(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(member.is_active(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
        assert!(!member.is_active(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()));
    }

    #[test]
    fn test_plan_type_serde() {
        let json = serde_json::to_string(&PlanType::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
        let status: PaymentStatus = serde_json::from_str("\"overdue\"").unwrap();
        assert_eq!(status, PaymentStatus::Overdue);
    }
}
