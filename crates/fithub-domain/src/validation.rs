use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{ActivityPerformance, Meeting, PaymentStatus, PhysicalDetails, PlanType};

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),
    #[error("Age must be a positive number, got {0}")]
    InvalidAge(u32),
    #[error("Height must be a positive number of centimeters, got {0}")]
    InvalidHeight(f64),
    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
    #[error("Body fat must be between 0 and 100 percent, got {0}")]
    InvalidBodyFat(f64),
    #[error("Date of birth {0} is not between 1900-01-01 and today")]
    InvalidDateOfBirth(NaiveDate),
    #[error("{0} must be a positive number of centimeters, got {1}")]
    InvalidMeasurement(&'static str, f64),
    #[error("{0} must be between 0 and 100 percent, got {1}")]
    InvalidPercentage(&'static str, f64),
    #[error("Meeting title must not be empty")]
    EmptyTitle,
    #[error("Meeting must end after it starts")]
    EndBeforeStart,
}

/// Input for creating a member. There is no end date:
/// it is derived from the start date and the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMember {
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
    pub payment_status: PaymentStatus,
}

/// Accepts `local@domain.tld` without whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Blank optional text counts as not provided.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewMember {
    /// Check all form rules. `today` bounds the date of birth.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.name.trim().chars().count() < 2 {
            return Err(ValidationError::NameTooShort);
        }
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !is_valid_email(email) {
                return Err(ValidationError::InvalidEmail(email.to_string()));
            }
        }
        if let Some(age) = self.age {
            if age == 0 {
                return Err(ValidationError::InvalidAge(age));
            }
        }
        if let Some(height) = self.height {
            if !(height > 0.0) {
                return Err(ValidationError::InvalidHeight(height));
            }
        }
        if let Some(weight) = self.weight {
            if !(weight > 0.0) {
                return Err(ValidationError::InvalidWeight(weight));
            }
        }
        if let Some(body_fat) = self.body_fat {
            if !(0.0..=100.0).contains(&body_fat) {
                return Err(ValidationError::InvalidBodyFat(body_fat));
            }
        }
        if let Some(dob) = self.date_of_birth {
            let earliest = NaiveDate::from_ymd_opt(1900, 1, 1)
                .unwrap_or(NaiveDate::MIN);
            if dob > today || dob < earliest {
                return Err(ValidationError::InvalidDateOfBirth(dob));
            }
        }
        Ok(())
    }
}

impl PhysicalDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let m = &self.measurements;
        let values = [
            ("Chest", m.chest),
            ("Waist", m.waist),
            ("Hips", m.hips),
            ("Arms", m.arms),
            ("Legs", m.legs),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                if !(value > 0.0) {
                    return Err(ValidationError::InvalidMeasurement(name, value));
                }
            }
        }
        Ok(())
    }
}

impl ActivityPerformance {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let values = [
            ("Attendance", self.attendance),
            ("Goal achievement", self.goal_achievement),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                if !(0.0..=100.0).contains(&value) {
                    return Err(ValidationError::InvalidPercentage(name, value));
                }
            }
        }
        Ok(())
    }
}

impl Meeting {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.end_time <= self.start_time {
            return Err(ValidationError::EndBeforeStart);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::{BodyMeasurements, MeetingType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn valid() -> NewMember {
        NewMember {
            name: "John Doe".to_string(),
            email: Some("john@example.com".to_string()),
            height: Some(178.0),
            weight: Some(75.0),
            subscription_start: today(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_member() {
        assert_eq!(valid().validate(today()), Ok(()));
    }

    #[test]
    fn test_name_too_short() {
        let member = NewMember {
            name: " J ".to_string(),
            ..valid()
        };
        assert_eq!(member.validate(today()), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@c.de"));

        // An empty email means not provided
        let member = NewMember {
            email: Some("".to_string()),
            ..valid()
        };
        assert_eq!(member.validate(today()), Ok(()));

        let member = NewMember {
            email: Some("john.example.com".to_string()),
            ..valid()
        };
        assert_eq!(
            member.validate(today()),
            Err(ValidationError::InvalidEmail("john.example.com".to_string()))
        );
    }

    #[test]
    fn test_body_values() {
        let member = NewMember {
            height: Some(0.0),
            ..valid()
        };
        assert_eq!(member.validate(today()), Err(ValidationError::InvalidHeight(0.0)));

        let member = NewMember {
            weight: Some(-3.0),
            ..valid()
        };
        assert_eq!(member.validate(today()), Err(ValidationError::InvalidWeight(-3.0)));

        let member = NewMember {
            body_fat: Some(101.0),
            ..valid()
        };
        assert_eq!(member.validate(today()), Err(ValidationError::InvalidBodyFat(101.0)));
    }

    #[test]
    fn test_date_of_birth() {
        let future = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let member = NewMember {
            date_of_birth: Some(future),
            ..valid()
        };
        assert_eq!(
            member.validate(today()),
            Err(ValidationError::InvalidDateOfBirth(future))
        );

        let ancient = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
        let member = NewMember {
            date_of_birth: Some(ancient),
            ..valid()
        };
        assert!(member.validate(today()).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_meeting_validate() {
        let mut meeting = Meeting {
            id: 0,
            title: "Spin class".to_string(),
            date: today(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            attendees: vec!["Emma Wilson".to_string()],
            meeting_type: MeetingType::InPerson,
            link: None,
            description: None,
        };
        assert_eq!(meeting.validate(), Ok(()));

        meeting.end_time = meeting.start_time;
        assert_eq!(meeting.validate(), Err(ValidationError::EndBeforeStart));

        meeting.title = "   ".to_string();
        assert_eq!(meeting.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_physical_details_validate() {
        let mut details = PhysicalDetails {
            member_id: 1,
            measurements: BodyMeasurements {
                chest: Some(92.0),
                waist: Some(70.5),
                ..Default::default()
            },
            fitness_level: Some("beginner".to_string()),
        };
        assert_eq!(details.validate(), Ok(()));

        details.measurements.hips = Some(0.0);
        assert_eq!(
            details.validate(),
            Err(ValidationError::InvalidMeasurement("Hips", 0.0))
        );
    }

    #[test]
    fn test_activity_validate() {
        let mut activity = ActivityPerformance {
            member_id: 1,
            attendance: Some(100.0),
            goal_achievement: Some(0.0),
            ..Default::default()
        };
        assert_eq!(activity.validate(), Ok(()));

        activity.goal_achievement = Some(120.0);
        let err = activity.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Goal achievement must be between 0 and 100 percent, got 120"
        );
    }
}
