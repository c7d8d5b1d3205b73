use anyhow::Result;
use clap::Args;

use fithub_db::Connection;
use fithub_domain::{
    non_blank, ActivityPerformance, BodyMeasurements, GoalsPreferences, Insert, Member,
    PhysicalDetails, Retrieve, Timeline,
};

use crate::commands::{confirm, store_failure};

async fn load_member(db: &Connection, id: u32) -> Result<Member> {
    let member: Member = db
        .retrieve(id)
        .await
        .map_err(store_failure("load member"))?;
    Ok(member)
}

#[derive(Args, Debug)]
pub struct SetPhysical {
    #[clap(short, long)]
    pub id: u32,
    /// Chest in cm
    #[clap(long)]
    pub chest: Option<f64>,
    /// Waist in cm
    #[clap(long)]
    pub waist: Option<f64>,
    /// Hips in cm
    #[clap(long)]
    pub hips: Option<f64>,
    /// Arms in cm
    #[clap(long)]
    pub arms: Option<f64>,
    /// Legs in cm
    #[clap(long)]
    pub legs: Option<f64>,
    #[clap(short, long)]
    pub fitness_level: Option<String>,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetPhysical {
    /// Store the physical details, replacing earlier ones
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member = load_member(db, self.id).await?;
        let details = PhysicalDetails {
            member_id: member.id,
            measurements: BodyMeasurements {
                chest: self.chest,
                waist: self.waist,
                hips: self.hips,
                arms: self.arms,
                legs: self.legs,
            },
            fitness_level: non_blank(self.fitness_level),
        };
        details.validate()?;

        if !confirm(&format!("Store physical details of {}?", member.name), self.yes)? {
            return Ok(());
        }
        let _: PhysicalDetails = db
            .insert(details)
            .await
            .map_err(store_failure("store physical details"))?;
        println!("Physical details of {} stored.", member.name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetGoals {
    #[clap(short, long)]
    pub id: u32,
    /// Goals, comma separated or repeated
    #[clap(short, long, value_delimiter = ',')]
    pub goals: Vec<String>,
    /// short-term or long-term
    #[clap(short, long)]
    pub timeline: Option<Timeline>,
    /// Workouts per week
    #[clap(short, long)]
    pub frequency: Option<u32>,
    /// Workout styles, comma separated or repeated
    #[clap(short = 's', long, value_delimiter = ',')]
    pub workout_styles: Vec<String>,
    #[clap(long)]
    pub diet: Option<String>,
    #[clap(long)]
    pub diet_remarks: Option<String>,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetGoals {
    /// Store goals and preferences, replacing earlier ones
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member = load_member(db, self.id).await?;
        let tags = |values: Vec<String>| -> Vec<String> {
            values.into_iter().filter_map(|v| non_blank(Some(v))).collect()
        };
        let goals = GoalsPreferences {
            member_id: member.id,
            goals: tags(self.goals),
            timeline: self.timeline,
            workout_frequency: self.frequency,
            workout_styles: tags(self.workout_styles),
            diet_preference: non_blank(self.diet),
            diet_remarks: non_blank(self.diet_remarks),
        };

        if !confirm(&format!("Store goals of {}?", member.name), self.yes)? {
            return Ok(());
        }
        let _: GoalsPreferences = db
            .insert(goals)
            .await
            .map_err(store_failure("store goals"))?;
        println!("Goals and preferences of {} stored.", member.name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetActivity {
    #[clap(short, long)]
    pub id: u32,
    /// Attendance in percent
    #[clap(short, long)]
    pub attendance: Option<f64>,
    /// Goal achievement in percent
    #[clap(short, long)]
    pub goal_achievement: Option<f64>,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetActivity {
    /// Store attendance and goal achievement. Workouts and
    /// progress are recorded with their own commands.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member = load_member(db, self.id).await?;
        let activity = ActivityPerformance {
            member_id: member.id,
            attendance: self.attendance,
            goal_achievement: self.goal_achievement,
            ..Default::default()
        };
        activity.validate()?;

        if !confirm(&format!("Store activity of {}?", member.name), self.yes)? {
            return Ok(());
        }
        let activity: ActivityPerformance = db
            .insert(activity)
            .await
            .map_err(store_failure("store activity"))?;
        println!(
            "Activity of {} stored, {} workouts and {} progress logs on record.",
            member.name,
            activity.workout_history.len(),
            activity.progress_logs.len()
        );
        Ok(())
    }
}
