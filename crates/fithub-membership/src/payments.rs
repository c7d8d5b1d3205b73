use chrono::NaiveDate;
use serde::Serialize;

use fithub_domain::{Member, PaymentStatus, PlanType};

use crate::metrics::{amount_due, PaymentBadge};

/// A member with an outstanding subscription fee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPayment {
    pub member_id: u32,
    pub unique_id: String,
    pub name: String,
    pub subscription_type: PlanType,
    pub subscription_end: NaiveDate,
    pub badge: PaymentBadge,
    pub amount_due: f64,
}

impl From<&Member> for PendingPayment {
    fn from(member: &Member) -> Self {
        PendingPayment {
            member_id: member.id,
            unique_id: member.unique_id.clone(),
            name: member.name.clone(),
            subscription_type: member.subscription_type,
            subscription_end: member.subscription_end,
            badge: member.payment_status.into(),
            amount_due: amount_due(member.subscription_type),
        }
    }
}

/// All members that have not paid, in list order.
pub fn pending_payments(members: &[Member]) -> Vec<PendingPayment> {
    members
        .iter()
        .filter(|m| m.payment_status != PaymentStatus::Paid)
        .map(PendingPayment::from)
        .collect()
}

/// Sum of all outstanding fees.
pub fn total_due(payments: &[PendingPayment]) -> f64 {
    payments.iter().map(|p| p.amount_due).sum()
}
