use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, QueryBuilder, Sqlite};

use fithub_domain::{Insert, Meeting, MeetingFilter, MeetingType, Query};

use crate::Connection;

#[derive(Debug, FromRow)]
struct MeetingRow {
    id: u32,
    title: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    attendees: String,
    meeting_type: MeetingType,
    link: Option<String>,
    description: Option<String>,
}

impl TryFrom<MeetingRow> for Meeting {
    type Error = serde_json::Error;

    fn try_from(row: MeetingRow) -> Result<Self, Self::Error> {
        Ok(Meeting {
            id: row.id,
            title: row.title,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            attendees: serde_json::from_str(&row.attendees)?,
            meeting_type: row.meeting_type,
            link: row.link,
            description: row.description,
        })
    }
}

#[async_trait]
impl Query<Meeting> for Connection {
    type Filter = MeetingFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Meeting>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                title,
                date,
                start_time,
                end_time,
                attendees,
                meeting_type,
                link,
                description
            FROM meetings
            WHERE 1
            "#,
        );
        if let Some(date) = filter.date {
            qry.push(" AND date = ").push_bind(date);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND date >= ").push_bind(date_after);
        }
        qry.push(" ORDER BY date, start_time, id");

        let rows: Vec<MeetingRow> = qry.build_query_as().fetch_all(&mut *conn).await?;
        let meetings = rows
            .into_iter()
            .map(Meeting::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meetings)
    }
}

#[async_trait]
impl Insert<Meeting> for Connection {
    async fn insert(&self, meeting: Meeting) -> Result<Meeting> {
        let attendees = serde_json::to_string(&meeting.attendees)?;
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"INSERT INTO meetings (
                title,
                date,
                start_time,
                end_time,
                attendees,
                meeting_type,
                link,
                description
            ) VALUES (
            "#,
        );
        qry.separated(", ")
            .push_bind(&meeting.title)
            .push_bind(meeting.date)
            .push_bind(meeting.start_time)
            .push_bind(meeting.end_time)
            .push_bind(attendees)
            .push_bind(meeting.meeting_type)
            .push_bind(&meeting.link)
            .push_bind(&meeting.description);
        qry.push(
            r#") RETURNING
                id,
                title,
                date,
                start_time,
                end_time,
                attendees,
                meeting_type,
                link,
                description
            "#,
        );
        let row: MeetingRow = qry.build_query_as().fetch_one(&mut *conn).await?;
        tracing::info!(meeting_id = row.id, "meeting scheduled");
        Ok(Meeting::try_from(row)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn meeting(title: &str, day: NaiveDate, start: NaiveTime) -> Meeting {
        Meeting {
            id: 0,
            title: title.to_string(),
            date: day,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            attendees: vec!["John Doe".to_string(), "Emma Wilson".to_string()],
            meeting_type: MeetingType::Zoom,
            link: Some("https://zoom.us/j/123".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_meeting_insert() {
        let (_handle, db) = Connection::open_test().await;
        let m = meeting("Nutrition Q&A", date(2025, 4, 3), time(17, 30));
        let stored = db.insert(m.clone()).await.unwrap();

        assert!(stored.id > 0);
        assert_eq!(Meeting { id: 0, ..stored }, m);
    }

    #[tokio::test]
    async fn test_meeting_query() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(meeting("Late", date(2025, 4, 3), time(18, 0))).await.unwrap();
        db.insert(meeting("Early", date(2025, 4, 3), time(7, 0))).await.unwrap();
        db.insert(meeting("Past", date(2025, 3, 1), time(9, 0))).await.unwrap();

        let all: Vec<Meeting> = db.query(&MeetingFilter::default()).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Past", "Early", "Late"]);

        let upcoming: Vec<Meeting> = db
            .query(&MeetingFilter {
                date_after: Some(date(2025, 4, 1)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].attendees.len(), 2);
    }
}
