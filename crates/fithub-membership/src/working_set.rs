use chrono::NaiveDate;

use fithub_domain::{Member, PaymentStatus, PlanType};

use crate::lifecycle::ChangeSubscription;
use crate::payments::{pending_payments, PendingPayment};
use crate::search::filter_members;

/// The members currently materialized for a view.
///
/// The list is owned by the view holding it. Changes return
/// the recomputed record so the caller decides whether to
/// persist it.
#[derive(Debug, Clone, Default)]
pub struct MemberList {
    members: Vec<Member>,
}

impl MemberList {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<Member> {
        filter_members(&self.members, query)
    }

    pub fn pending_payments(&self) -> Vec<PendingPayment> {
        pending_payments(&self.members)
    }

    fn replace<F>(&mut self, id: u32, change: F) -> Option<Member>
    where
        F: FnOnce(&Member) -> Member,
    {
        let member = self.members.iter_mut().find(|m| m.id == id)?;
        *member = change(&*member);
        Some(member.clone())
    }

    /// Switch the plan of a listed member. The end date is
    /// recomputed from the stored start date.
    pub fn change_subscription_type(&mut self, id: u32, plan: PlanType) -> Option<Member> {
        self.replace(id, |m| m.with_plan_type(plan))
    }

    pub fn change_subscription_start(&mut self, id: u32, start: NaiveDate) -> Option<Member> {
        self.replace(id, |m| m.with_start_date(start))
    }

    pub fn change_payment_status(&mut self, id: u32, status: PaymentStatus) -> Option<Member> {
        self.replace(id, |m| Member {
            payment_status: status,
            ..m.clone()
        })
    }

    pub fn remove(&mut self, id: u32) -> Option<Member> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index))
    }
}

impl From<Vec<Member>> for MemberList {
    fn from(members: Vec<Member>) -> Self {
        Self::new(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn list() -> MemberList {
        MemberList::new(vec![
            Member {
                id: 1,
                name: "John Doe".to_string(),
                subscription_type: PlanType::Monthly,
                subscription_start: date(2025, 3, 1),
                subscription_end: date(2025, 4, 1),
                payment_status: PaymentStatus::Paid,
                ..Default::default()
            },
            Member {
                id: 5,
                name: "Robert Brown".to_string(),
                subscription_type: PlanType::Quarterly,
                subscription_start: date(2024, 12, 20),
                subscription_end: date(2025, 3, 20),
                payment_status: PaymentStatus::Overdue,
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_change_subscription_type() {
        let mut list = list();
        let updated = list.change_subscription_type(5, PlanType::Annual).unwrap();
        assert_eq!(updated.subscription_start, date(2024, 12, 20));
        assert_eq!(updated.subscription_end, date(2025, 12, 20));

        // The change is visible in the list right away
        assert_eq!(list.get(5), Some(&updated));
        assert_eq!(list.get(1).unwrap().subscription_end, date(2025, 4, 1));
    }

    #[test]
    fn test_change_unknown_member() {
        let mut list = list();
        assert_eq!(list.change_subscription_type(42, PlanType::Annual), None);
        assert_eq!(list.change_subscription_start(42, date(2025, 1, 1)), None);
    }

    #[test]
    fn test_change_start_and_status() {
        let mut list = list();
        let updated = list.change_subscription_start(1, date(2025, 1, 31)).unwrap();
        assert_eq!(updated.subscription_end, date(2025, 2, 28));

        let updated = list.change_payment_status(5, PaymentStatus::Paid).unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert!(list.pending_payments().is_empty());
    }

    #[test]
    fn test_search_and_remove() {
        let mut list = list();
        assert_eq!(list.search("robert").len(), 1);
        assert_eq!(list.remove(5).map(|m| m.id), Some(5));
        assert_eq!(list.len(), 1);
        assert!(list.search("robert").is_empty());
        assert!(list.remove(5).is_none());
    }
}
