use std::fmt;

use serde::Serialize;

use fithub_domain::{PaymentStatus, PlanType, ProgressLog};

/// Body mass index of a member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Bmi {
    Value(f64),
    NotAvailable,
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bmi::Value(bmi) => write!(f, "{:.1}", bmi),
            Bmi::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Compute the BMI from weight in kg and height in cm.
/// Without a weight (or a usable height) the BMI is not available.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Bmi {
    let (Some(weight), Some(height)) = (weight_kg, height_cm) else {
        return Bmi::NotAvailable;
    };
    if height <= 0.0 {
        return Bmi::NotAvailable;
    }
    let height_m = height / 100.0;
    Bmi::Value(weight / (height_m * height_m))
}

/// Flat fee per plan. The amounts are independent of each
/// other and not derived from a monthly rate.
pub fn amount_due(plan: PlanType) -> f64 {
    match plan {
        PlanType::Monthly => 50.00,
        PlanType::Quarterly => 135.00,
        PlanType::Annual => 480.00,
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Capitalize the first letter.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeColor {
    Green,
    Yellow,
    Red,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentBadge {
    pub label: String,
    pub color: BadgeColor,
}

/// Badge for a payment status string as it comes from the store.
/// Unknown statuses get a gray badge.
pub fn payment_status_badge(status: &str) -> PaymentBadge {
    let color = match status {
        "paid" => BadgeColor::Green,
        "pending" => BadgeColor::Yellow,
        "overdue" => BadgeColor::Red,
        _ => BadgeColor::Gray,
    };
    PaymentBadge {
        label: capitalize(status),
        color,
    }
}

impl From<PaymentStatus> for PaymentBadge {
    fn from(status: PaymentStatus) -> Self {
        payment_status_badge(status.as_str())
    }
}

/// Change between two consecutive progress logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ProgressDelta {
    /// First entry of a log sequence
    Baseline,
    Change {
        weight_change: Option<f64>,
        body_fat_change: Option<f64>,
    },
}

fn signed(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.1}{}", v, unit),
        Some(v) => format!("{:.1}{}", v, unit),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for ProgressDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressDelta::Baseline => f.write_str("Baseline"),
            ProgressDelta::Change {
                weight_change,
                body_fat_change,
            } => write!(
                f,
                "{} / {}",
                signed(*weight_change, " kg"),
                signed(*body_fat_change, "%")
            ),
        }
    }
}

fn difference(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

pub fn progress_delta(current: &ProgressLog, previous: Option<&ProgressLog>) -> ProgressDelta {
    match previous {
        None => ProgressDelta::Baseline,
        Some(previous) => ProgressDelta::Change {
            weight_change: difference(current.weight, previous.weight),
            body_fat_change: difference(current.body_fat, previous.body_fat),
        },
    }
}

/// Deltas for a chronological log sequence, one per entry.
pub fn progress_deltas(logs: &[ProgressLog]) -> Vec<ProgressDelta> {
    logs.iter()
        .enumerate()
        .map(|(i, log)| progress_delta(log, i.checked_sub(1).map(|p| &logs[p])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(weight: Option<f64>, body_fat: Option<f64>) -> ProgressLog {
        ProgressLog {
            weight,
            body_fat,
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_bmi() {
        assert_eq!(compute_bmi(Some(75.0), Some(178.0)).to_string(), "23.7");
        assert_eq!(compute_bmi(None, Some(178.0)), Bmi::NotAvailable);
        assert_eq!(compute_bmi(None, Some(178.0)).to_string(), "N/A");
        assert_eq!(compute_bmi(Some(75.0), None), Bmi::NotAvailable);
        assert_eq!(compute_bmi(Some(75.0), Some(0.0)), Bmi::NotAvailable);
        assert_eq!(compute_bmi(Some(64.0), Some(160.0)).to_string(), "25.0");
    }

    #[test]
    fn test_amount_due() {
        assert_eq!(amount_due(PlanType::Monthly), 50.00);
        assert_eq!(amount_due(PlanType::Quarterly), 135.00);
        assert_eq!(amount_due(PlanType::Annual), 480.00);
        assert_eq!(format_amount(amount_due(PlanType::Quarterly)), "$135.00");
    }

    #[test]
    fn test_payment_status_badge() {
        assert_eq!(
            payment_status_badge("paid"),
            PaymentBadge {
                label: "Paid".to_string(),
                color: BadgeColor::Green
            }
        );
        assert_eq!(payment_status_badge("pending").color, BadgeColor::Yellow);
        assert_eq!(payment_status_badge("overdue").color, BadgeColor::Red);

        let unknown = payment_status_badge("refunded");
        assert_eq!(unknown.label, "Refunded");
        assert_eq!(unknown.color, BadgeColor::Gray);

        assert_eq!(payment_status_badge("").label, "");
        assert_eq!(PaymentBadge::from(PaymentStatus::Overdue).label, "Overdue");
    }

    #[test]
    fn test_progress_deltas() {
        let logs = vec![
            log(Some(80.0), Some(22.0)),
            log(Some(78.5), Some(21.6)),
            log(Some(79.0), None),
        ];
        let deltas = progress_deltas(&logs);
        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas[0], ProgressDelta::Baseline);
        assert_eq!(deltas[0].to_string(), "Baseline");
        assert_eq!(deltas[1].to_string(), "-1.5 kg / -0.4%");
        assert_eq!(deltas[2].to_string(), "+0.5 kg / N/A");

        // A single entry is always the baseline
        assert_eq!(progress_deltas(&logs[2..]), vec![ProgressDelta::Baseline]);
        assert!(progress_deltas(&[]).is_empty());
    }
}
