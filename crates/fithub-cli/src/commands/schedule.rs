use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};

use fithub_db::Connection;
use fithub_domain::{non_blank, Insert, Meeting, MeetingFilter, MeetingType, Query};
use fithub_membership::datetime;

use crate::commands::{confirm, store_failure};
use crate::formatting::PrintFormatted;

/// Times of day are given as `HH:MM`.
pub fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
}

#[derive(Subcommand, Debug)]
pub enum Schedule {
    /// Schedule a class or meeting
    #[clap(name = "add")]
    Add(AddMeeting),
    /// List scheduled classes and meetings
    #[clap(name = "list")]
    List(ListMeetings),
}

impl Schedule {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Schedule::Add(cmd) => cmd.run(db).await,
            Schedule::List(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddMeeting {
    #[clap(short, long)]
    pub title: String,
    #[clap(short, long)]
    pub date: NaiveDate,
    /// Start time, HH:MM
    #[clap(short, long, value_parser = parse_time)]
    pub start: NaiveTime,
    /// End time, HH:MM
    #[clap(short, long, value_parser = parse_time)]
    pub end: NaiveTime,
    /// Attendee names, comma separated or repeated
    #[clap(short, long, value_delimiter = ',')]
    pub attendees: Vec<String>,
    /// in-person, zoom, google-meet or teams
    #[clap(short = 'k', long = "type", default_value_t = MeetingType::InPerson)]
    pub meeting_type: MeetingType,
    #[clap(short, long)]
    pub link: Option<String>,
    #[clap(long)]
    pub description: Option<String>,
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMeeting {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let meeting = Meeting {
            id: 0,
            title: self.title.trim().to_string(),
            date: self.date,
            start_time: self.start,
            end_time: self.end,
            attendees: self
                .attendees
                .into_iter()
                .filter_map(|a| non_blank(Some(a)))
                .collect(),
            meeting_type: self.meeting_type,
            link: non_blank(self.link),
            description: non_blank(self.description),
        };
        meeting.validate()?;
        if meeting.is_missing_link() {
            tracing::warn!(
                meeting_type = %meeting.meeting_type,
                "scheduling a remote meeting without a link"
            );
        }

        println!();
        vec![meeting.clone()].print_formatted();
        println!();
        if !confirm("Schedule meeting?", self.yes)? {
            return Ok(());
        }

        let meeting: Meeting = db
            .insert(meeting)
            .await
            .map_err(store_failure("schedule meeting"))?;
        println!("{} scheduled for {}.", meeting.title, meeting.date);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMeetings {
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    /// Only today and later
    #[clap(short, long)]
    pub upcoming: bool,
}

impl ListMeetings {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MeetingFilter {
            date: self.date,
            date_after: self.upcoming.then(datetime::today),
        };
        let meetings: Vec<Meeting> = db
            .query(&filter)
            .await
            .map_err(store_failure("load meetings"))?;
        println!("{} meetings.", meetings.len());
        meetings.print_formatted();
        Ok(())
    }
}
