use chrono::{Months, NaiveDate};

use fithub_domain::{non_blank, Member, NewMember, PlanType, ValidationError};

use crate::datetime::{format_date, parse_date, DateError};

/// Derive the end of a subscription from its start and plan.
///
/// Months are added on the calendar: the day of month is kept
/// where the target month has it, otherwise the result is the
/// last day of the target month (2025-01-31 + 1 month is
/// 2025-02-28). Dates beyond chrono's range saturate.
pub fn derive_end_date(start: NaiveDate, plan: PlanType) -> NaiveDate {
    start
        .checked_add_months(Months::new(plan.months()))
        .unwrap_or(NaiveDate::MAX)
}

/// The plan changed, the start date stays.
pub fn on_plan_type_changed(current_start: NaiveDate, new_plan: PlanType) -> NaiveDate {
    derive_end_date(current_start, new_plan)
}

/// The start date changed, the plan stays.
pub fn on_start_date_changed(new_start: NaiveDate, current_plan: PlanType) -> NaiveDate {
    derive_end_date(new_start, current_plan)
}

/// Same as `derive_end_date` for dates in their stored
/// `YYYY-MM-DD` form.
pub fn derive_end_date_str(start: &str, plan: PlanType) -> Result<String, DateError> {
    let start = parse_date(start)?;
    Ok(format_date(derive_end_date(start, plan)))
}

/// Subscription fields of the member entry form. The end
/// date can only be read; every change of start or plan
/// recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionForm {
    start: NaiveDate,
    plan: PlanType,
    end: NaiveDate,
}

impl SubscriptionForm {
    pub fn new(start: NaiveDate, plan: PlanType) -> Self {
        Self {
            start,
            plan,
            end: derive_end_date(start, plan),
        }
    }

    pub fn set_plan_type(&mut self, plan: PlanType) {
        self.plan = plan;
        self.end = on_plan_type_changed(self.start, plan);
    }

    pub fn set_start_date(&mut self, start: NaiveDate) {
        self.start = start;
        self.end = on_start_date_changed(start, self.plan);
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn plan(&self) -> PlanType {
        self.plan
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Validate the entry form and build the member record
/// to be stored. Id and unique id are assigned by the store.
pub fn create_member(form: NewMember, today: NaiveDate) -> Result<Member, ValidationError> {
    form.validate(today)?;
    let subscription = SubscriptionForm::new(form.subscription_start, form.subscription_type);

    Ok(Member {
        id: 0,
        unique_id: String::new(),
        name: form.name.trim().to_string(),
        age: form.age,
        date_of_birth: form.date_of_birth,
        phone: non_blank(form.phone),
        email: non_blank(form.email),
        address: non_blank(form.address),
        emergency_contact: non_blank(form.emergency_contact),
        height: form.height,
        weight: form.weight,
        body_fat: form.body_fat,
        subscription_type: subscription.plan(),
        subscription_start: subscription.start(),
        subscription_end: subscription.end(),
        payment_status: form.payment_status,
    })
}

/// Subscription changes on a stored member record.
pub trait ChangeSubscription {
    /// Switch the plan, recomputing the end from the stored start.
    fn with_plan_type(&self, plan: PlanType) -> Self;

    /// Move the start, recomputing the end with the stored plan.
    fn with_start_date(&self, start: NaiveDate) -> Self;

    /// Check that the stored end matches start and plan.
    fn has_derived_end(&self) -> bool;
}

impl ChangeSubscription for Member {
    fn with_plan_type(&self, plan: PlanType) -> Self {
        Member {
            subscription_type: plan,
            subscription_end: on_plan_type_changed(self.subscription_start, plan),
            ..self.clone()
        }
    }

    fn with_start_date(&self, start: NaiveDate) -> Self {
        Member {
            subscription_start: start,
            subscription_end: on_start_date_changed(start, self.subscription_type),
            ..self.clone()
        }
    }

    fn has_derived_end(&self) -> bool {
        self.subscription_end == derive_end_date(self.subscription_start, self.subscription_type)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration};
    use fithub_domain::PaymentStatus;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_derive_end_date() {
        assert_eq!(derive_end_date(date(2025, 3, 1), PlanType::Monthly), date(2025, 4, 1));
        assert_eq!(derive_end_date(date(2025, 2, 15), PlanType::Quarterly), date(2025, 5, 15));
        assert_eq!(derive_end_date(date(2025, 1, 10), PlanType::Annual), date(2026, 1, 10));
        assert_eq!(derive_end_date(date(2024, 12, 20), PlanType::Quarterly), date(2025, 3, 20));
    }

    #[test]
    fn test_derive_end_date_month_end() {
        assert_eq!(derive_end_date(date(2025, 1, 31), PlanType::Monthly), date(2025, 2, 28));
        assert_eq!(derive_end_date(date(2024, 1, 31), PlanType::Monthly), date(2024, 2, 29));
        assert_eq!(derive_end_date(date(2025, 11, 30), PlanType::Quarterly), date(2026, 2, 28));
        assert_eq!(derive_end_date(date(2024, 2, 29), PlanType::Annual), date(2025, 2, 28));
    }

    #[test]
    fn test_derive_end_date_gap() {
        let mut start = date(2023, 1, 1);
        let last = date(2025, 1, 1);
        while start < last {
            for plan in PlanType::ALL {
                let end = derive_end_date(start, plan);
                assert!(end > start, "{} {} -> {}", start, plan, end);
                let months = (end.year() - start.year()) * 12 + end.month() as i32
                    - start.month() as i32;
                assert_eq!(months, plan.months() as i32);
                assert!(end.day() <= start.day());
            }
            start += Duration::days(1);
        }
    }

    #[test]
    fn test_derive_end_date_str() {
        assert_eq!(
            derive_end_date_str("2025-01-31", PlanType::Monthly).unwrap(),
            "2025-02-28"
        );
        assert!(derive_end_date_str("31.01.2025", PlanType::Monthly).is_err());
    }

    #[test]
    fn test_subscription_form_recomputes() {
        let mut form = SubscriptionForm::new(date(2025, 3, 1), PlanType::Monthly);
        assert_eq!(form.end(), date(2025, 4, 1));

        form.set_plan_type(PlanType::Annual);
        assert_eq!(form.end(), date(2026, 3, 1));

        form.set_start_date(date(2025, 1, 31));
        assert_eq!(form.plan(), PlanType::Annual);
        assert_eq!(form.end(), date(2026, 1, 31));

        form.set_plan_type(PlanType::Monthly);
        assert_eq!(form.start(), date(2025, 1, 31));
        assert_eq!(form.end(), date(2025, 2, 28));
    }

    #[test]
    fn test_create_member() {
        let form = NewMember {
            name: "  Emma Wilson ".to_string(),
            phone: Some("   ".to_string()),
            email: Some("emma@example.com".to_string()),
            height: Some(165.0),
            subscription_type: PlanType::Quarterly,
            subscription_start: date(2025, 2, 15),
            payment_status: PaymentStatus::Paid,
            ..Default::default()
        };
        let member = create_member(form, date(2025, 3, 1)).unwrap();
        assert_eq!(member.name, "Emma Wilson");
        assert_eq!(member.phone, None);
        assert_eq!(member.email.as_deref(), Some("emma@example.com"));
        assert_eq!(member.subscription_end, date(2025, 5, 15));
        assert!(member.has_derived_end());
    }

    #[test]
    fn test_create_member_invalid() {
        let form = NewMember {
            name: "E".to_string(),
            subscription_start: date(2025, 2, 15),
            ..Default::default()
        };
        assert_eq!(
            create_member(form, date(2025, 3, 1)),
            Err(ValidationError::NameTooShort)
        );
    }

    #[test]
    fn test_change_plan_keeps_start() {
        let member = Member {
            subscription_type: PlanType::Monthly,
            subscription_start: date(2024, 12, 20),
            subscription_end: date(2025, 1, 20),
            ..Default::default()
        };
        let changed = member.with_plan_type(PlanType::Annual);
        assert_eq!(changed.subscription_start, date(2024, 12, 20));
        assert_eq!(changed.subscription_end, date(2025, 12, 20));
        assert_eq!(changed.subscription_type, PlanType::Annual);
        assert!(changed.has_derived_end());

        let moved = changed.with_start_date(date(2025, 1, 31));
        assert_eq!(moved.subscription_type, PlanType::Annual);
        assert_eq!(moved.subscription_end, date(2026, 1, 31));
    }
}
