use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteConnection, FromRow, QueryBuilder, Sqlite};

use fithub_domain::{
    ActivityPerformance,
    GoalsPreferences,
    Insert,
    Member,
    MemberProfile,
    PhysicalDetails,
    ProgressLog,
    Retrieve,
    Timeline,
    WorkoutEntry,
};

use crate::Connection;

/// Goals as stored, with the lists as JSON text.
#[derive(Debug, FromRow)]
struct GoalsRow {
    member_id: u32,
    goals: String,
    timeline: Option<Timeline>,
    workout_frequency: Option<u32>,
    workout_styles: String,
    diet_preference: Option<String>,
    diet_remarks: Option<String>,
}

impl TryFrom<GoalsRow> for GoalsPreferences {
    type Error = serde_json::Error;

    fn try_from(row: GoalsRow) -> Result<Self, Self::Error> {
        Ok(GoalsPreferences {
            member_id: row.member_id,
            goals: serde_json::from_str(&row.goals)?,
            timeline: row.timeline,
            workout_frequency: row.workout_frequency,
            workout_styles: serde_json::from_str(&row.workout_styles)?,
            diet_preference: row.diet_preference,
            diet_remarks: row.diet_remarks,
        })
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    member_id: u32,
    attendance: Option<f64>,
    goal_achievement: Option<f64>,
}

async fn fetch_physical(
    conn: &mut SqliteConnection,
    member_id: u32,
) -> Result<Option<PhysicalDetails>> {
    let details = sqlx::query_as::<_, PhysicalDetails>(
        r#"
        SELECT member_id, chest, waist, hips, arms, legs, fitness_level
        FROM physical_details
        WHERE member_id = ?
        "#,
    )
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(details)
}

async fn fetch_goals(
    conn: &mut SqliteConnection,
    member_id: u32,
) -> Result<Option<GoalsPreferences>> {
    let row = sqlx::query_as::<_, GoalsRow>(
        r#"
        SELECT
            member_id,
            goals,
            timeline,
            workout_frequency,
            workout_styles,
            diet_preference,
            diet_remarks
        FROM goals_preferences
        WHERE member_id = ?
        "#,
    )
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(GoalsPreferences::try_from).transpose()?)
}

async fn fetch_activity(
    conn: &mut SqliteConnection,
    member_id: u32,
) -> Result<Option<ActivityPerformance>> {
    let row = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT member_id, attendance, goal_achievement
        FROM activity_performance
        WHERE member_id = ?
        "#,
    )
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let workout_history = sqlx::query_as::<_, WorkoutEntry>(
        r#"
        SELECT id, member_id, date, workout, duration
        FROM workout_history
        WHERE member_id = ?
        ORDER BY date, id
        "#,
    )
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await?;

    let progress_logs = sqlx::query_as::<_, ProgressLog>(
        r#"
        SELECT id, member_id, date, weight, body_fat
        FROM progress_logs
        WHERE member_id = ?
        ORDER BY date, id
        "#,
    )
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(ActivityPerformance {
        member_id: row.member_id,
        attendance: row.attendance,
        goal_achievement: row.goal_achievement,
        workout_history,
        progress_logs,
    }))
}

/// Recording workouts or progress starts the activity section.
async fn ensure_activity(conn: &mut SqliteConnection, member_id: u32) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO activity_performance (member_id) VALUES (?)")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[async_trait]
impl Retrieve<MemberProfile> for Connection {
    type Key = u32;

    /// Fetch a member with all sections provided so far.
    async fn retrieve(&self, member_id: Self::Key) -> Result<MemberProfile> {
        let member: Member = self.retrieve(member_id).await?;
        let mut conn = self.lock().await;
        let physical = fetch_physical(&mut conn, member_id).await?;
        let goals = fetch_goals(&mut conn, member_id).await?;
        let activity = fetch_activity(&mut conn, member_id).await?;
        Ok(MemberProfile {
            member,
            physical,
            goals,
            activity,
        })
    }
}

#[async_trait]
impl Insert<PhysicalDetails> for Connection {
    /// Store the physical details, replacing earlier ones.
    async fn insert(&self, details: PhysicalDetails) -> Result<PhysicalDetails> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"INSERT INTO physical_details (
                member_id, chest, waist, hips, arms, legs, fitness_level
            ) VALUES (
            "#,
        );
        let m = &details.measurements;
        qry.separated(", ")
            .push_bind(details.member_id)
            .push_bind(m.chest)
            .push_bind(m.waist)
            .push_bind(m.hips)
            .push_bind(m.arms)
            .push_bind(m.legs)
            .push_bind(&details.fitness_level);
        qry.push(
            r#") ON CONFLICT (member_id) DO UPDATE SET
                chest = excluded.chest,
                waist = excluded.waist,
                hips = excluded.hips,
                arms = excluded.arms,
                legs = excluded.legs,
                fitness_level = excluded.fitness_level,
                updated_at = CURRENT_TIMESTAMP
            RETURNING member_id, chest, waist, hips, arms, legs, fitness_level
            "#,
        );
        let details: PhysicalDetails = qry.build_query_as().fetch_one(&mut *conn).await?;
        tracing::info!(member_id = details.member_id, "physical details stored");
        Ok(details)
    }
}

#[async_trait]
impl Insert<GoalsPreferences> for Connection {
    /// Store goals and preferences, replacing earlier ones.
    async fn insert(&self, goals: GoalsPreferences) -> Result<GoalsPreferences> {
        let goal_tags = serde_json::to_string(&goals.goals)?;
        let workout_styles = serde_json::to_string(&goals.workout_styles)?;
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"INSERT INTO goals_preferences (
                member_id,
                goals,
                timeline,
                workout_frequency,
                workout_styles,
                diet_preference,
                diet_remarks
            ) VALUES (
            "#,
        );
        qry.separated(", ")
            .push_bind(goals.member_id)
            .push_bind(goal_tags)
            .push_bind(goals.timeline)
            .push_bind(goals.workout_frequency)
            .push_bind(workout_styles)
            .push_bind(&goals.diet_preference)
            .push_bind(&goals.diet_remarks);
        qry.push(
            r#") ON CONFLICT (member_id) DO UPDATE SET
                goals = excluded.goals,
                timeline = excluded.timeline,
                workout_frequency = excluded.workout_frequency,
                workout_styles = excluded.workout_styles,
                diet_preference = excluded.diet_preference,
                diet_remarks = excluded.diet_remarks,
                updated_at = CURRENT_TIMESTAMP
            RETURNING
                member_id,
                goals,
                timeline,
                workout_frequency,
                workout_styles,
                diet_preference,
                diet_remarks
            "#,
        );
        let row: GoalsRow = qry.build_query_as().fetch_one(&mut *conn).await?;
        tracing::info!(member_id = row.member_id, "goals and preferences stored");
        Ok(GoalsPreferences::try_from(row)?)
    }
}

#[async_trait]
impl Insert<ActivityPerformance> for Connection {
    /// Store attendance and goal achievement. Workout history
    /// and progress logs are recorded entry by entry.
    async fn insert(&self, activity: ActivityPerformance) -> Result<ActivityPerformance> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            "INSERT INTO activity_performance (member_id, attendance, goal_achievement) VALUES (",
        );
        qry.separated(", ")
            .push_bind(activity.member_id)
            .push_bind(activity.attendance)
            .push_bind(activity.goal_achievement);
        qry.push(
            r#") ON CONFLICT (member_id) DO UPDATE SET
                attendance = excluded.attendance,
                goal_achievement = excluded.goal_achievement,
                updated_at = CURRENT_TIMESTAMP
            "#,
        );
        qry.build().execute(&mut *conn).await?;

        let stored = fetch_activity(&mut conn, activity.member_id)
            .await?
            .unwrap_or(activity);
        tracing::info!(member_id = stored.member_id, "activity stored");
        Ok(stored)
    }
}

#[async_trait]
impl Insert<WorkoutEntry> for Connection {
    async fn insert(&self, entry: WorkoutEntry) -> Result<WorkoutEntry> {
        let mut conn = self.lock().await;
        ensure_activity(&mut conn, entry.member_id).await?;

        let mut qry = QueryBuilder::<Sqlite>::new(
            "INSERT INTO workout_history (member_id, date, workout, duration) VALUES (",
        );
        qry.separated(", ")
            .push_bind(entry.member_id)
            .push_bind(entry.date)
            .push_bind(&entry.workout)
            .push_bind(entry.duration);
        qry.push(") RETURNING id, member_id, date, workout, duration");
        let entry: WorkoutEntry = qry.build_query_as().fetch_one(&mut *conn).await?;
        tracing::info!(member_id = entry.member_id, "workout recorded");
        Ok(entry)
    }
}

#[async_trait]
impl Insert<ProgressLog> for Connection {
    async fn insert(&self, log: ProgressLog) -> Result<ProgressLog> {
        let mut conn = self.lock().await;
        ensure_activity(&mut conn, log.member_id).await?;

        let mut qry = QueryBuilder::<Sqlite>::new(
            "INSERT INTO progress_logs (member_id, date, weight, body_fat) VALUES (",
        );
        qry.separated(", ")
            .push_bind(log.member_id)
            .push_bind(log.date)
            .push_bind(log.weight)
            .push_bind(log.body_fat);
        qry.push(") RETURNING id, member_id, date, weight, body_fat");
        let log: ProgressLog = qry.build_query_as().fetch_one(&mut *conn).await?;
        tracing::info!(member_id = log.member_id, "progress logged");
        Ok(log)
    }
}
