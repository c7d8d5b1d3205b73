use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
pub enum MeetingType {
    #[default]
    InPerson,
    Zoom,
    GoogleMeet,
    Teams,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::InPerson => "in-person",
            MeetingType::Zoom => "zoom",
            MeetingType::GoogleMeet => "google-meet",
            MeetingType::Teams => "teams",
        }
    }

    /// Video meetings are joined through an external link.
    pub fn is_remote(&self) -> bool {
        !matches!(self, MeetingType::InPerson)
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MeetingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "in-person" => Ok(MeetingType::InPerson),
            "zoom" => Ok(MeetingType::Zoom),
            "google-meet" | "meet" => Ok(MeetingType::GoogleMeet),
            "teams" | "microsoft-teams" => Ok(MeetingType::Teams),
            _ => Err(ParseEnumError {
                kind: "meeting type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MeetingFilter {
    pub date: Option<NaiveDate>,
    pub date_after: Option<NaiveDate>,
}

/// A scheduled class or meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub attendees: Vec<String>,
    pub meeting_type: MeetingType,
    pub link: Option<String>,
    pub description: Option<String>,
}

impl Meeting {
    /// A remote meeting without a link can not be joined.
    pub fn is_missing_link(&self) -> bool {
        self.meeting_type.is_remote()
            && self.link.as_deref().map_or(true, |l| l.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(meeting_type: MeetingType, link: Option<&str>) -> Meeting {
        Meeting {
            id: 0,
            title: "Morning HIIT".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            attendees: vec![],
            meeting_type,
            link: link.map(str::to_string),
            description: None,
        }
    }

    #[test]
    fn test_meeting_type_parse() {
        assert_eq!("in person".parse::<MeetingType>().unwrap(), MeetingType::InPerson);
        assert_eq!("Google_Meet".parse::<MeetingType>().unwrap(), MeetingType::GoogleMeet);
        assert_eq!("zoom".parse::<MeetingType>().unwrap(), MeetingType::Zoom);
        assert!("carrier pigeon".parse::<MeetingType>().is_err());
    }

    #[test]
    fn test_meeting_missing_link() {
        assert!(!meeting(MeetingType::InPerson, None).is_missing_link());
        assert!(meeting(MeetingType::Zoom, None).is_missing_link());
        assert!(meeting(MeetingType::Teams, Some("  ")).is_missing_link());
        assert!(!meeting(MeetingType::Zoom, Some("https://zoom.us/j/1")).is_missing_link());
    }
}
