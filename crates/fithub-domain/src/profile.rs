use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Member, ParseEnumError};

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub legs: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PhysicalDetails {
    pub member_id: u32,
    #[sqlx(flatten)]
    pub measurements: BodyMeasurements,
    pub fitness_level: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT")]
pub enum Timeline {
    #[serde(rename = "short term")]
    #[sqlx(rename = "short term")]
    ShortTerm,
    #[serde(rename = "long term")]
    #[sqlx(rename = "long term")]
    LongTerm,
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeline::ShortTerm => f.write_str("short term"),
            Timeline::LongTerm => f.write_str("long term"),
        }
    }
}

impl FromStr for Timeline {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "short term" => Ok(Timeline::ShortTerm),
            "long term" => Ok(Timeline::LongTerm),
            _ => Err(ParseEnumError {
                kind: "timeline",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsPreferences {
    pub member_id: u32,
    pub goals: Vec<String>,
    pub timeline: Option<Timeline>,
    pub workout_frequency: Option<u32>,
    pub workout_styles: Vec<String>,
    pub diet_preference: Option<String>,
    pub diet_remarks: Option<String>,
}

/// A single entry of a member's workout history.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: u32,
    pub member_id: u32,
    pub date: NaiveDate,
    pub workout: String,
    /// Duration in minutes
    pub duration: u32,
}

/// A body composition measurement at a point in time.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProgressLog {
    pub id: u32,
    pub member_id: u32,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPerformance {
    pub member_id: u32,
    /// Attendance in percent
    pub attendance: Option<f64>,
    /// Goal achievement in percent
    pub goal_achievement: Option<f64>,
    pub workout_history: Vec<WorkoutEntry>,
    /// Progress logs in chronological order
    pub progress_logs: Vec<ProgressLog>,
}

/// The optional sections a member fills in over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Physical,
    Goals,
    Activity,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Physical => "Physical Details",
            Section::Goals => "Goals & Preferences",
            Section::Activity => "Activity & Performance",
        }
    }

    /// Message shown while the member has not provided the section.
    pub fn missing_message(&self) -> &'static str {
        match self {
            Section::Physical => {
                "The member has not updated their physical details yet."
            }
            Section::Goals => {
                "The member has not updated their goals and preferences yet."
            }
            Section::Activity => {
                "The member has not recorded any activity or performance data yet."
            }
        }
    }
}

/// A member together with the sections stored alongside
/// the membership record. An absent section means the
/// member has not submitted that data yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub member: Member,
    pub physical: Option<PhysicalDetails>,
    pub goals: Option<GoalsPreferences>,
    pub activity: Option<ActivityPerformance>,
}

impl MemberProfile {
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::Physical => self.physical.is_some(),
            Section::Goals => self.goals.is_some(),
            Section::Activity => self.activity.is_some(),
        }
    }
}
