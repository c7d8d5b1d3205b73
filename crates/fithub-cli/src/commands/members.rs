use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use fithub_db::Connection;
use fithub_domain::{
    Delete, Insert, Member, MemberFilter, MemberProfile, NewMember, PaymentStatus, PlanType,
    ProgressLog, Query, Retrieve, Update, WorkoutEntry,
};
use fithub_membership::{datetime, lifecycle::create_member, MemberList};

use crate::commands::{confirm, store_failure};
use crate::commands::{SetActivity, SetGoals, SetPhysical};
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member with BMI, fees and progress
    #[clap(name = "show")]
    Show(ShowMember),
    /// List and search members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Change the subscription plan of a member
    #[clap(name = "set-plan")]
    SetPlan(SetPlan),
    /// Move the subscription start of a member
    #[clap(name = "set-start")]
    SetStart(SetStart),
    /// Record the payment status of a member
    #[clap(name = "set-status")]
    SetStatus(SetStatus),
    /// Delete a member with all recorded data
    #[clap(name = "delete")]
    Delete(DeleteMember),
    /// Log weight and body fat of a member
    #[clap(name = "progress")]
    Progress(LogProgress),
    /// Record a workout of a member
    #[clap(name = "workout")]
    Workout(RecordWorkout),
    /// Store body measurements and fitness level of a member
    #[clap(name = "physical")]
    Physical(SetPhysical),
    /// Store goals and preferences of a member
    #[clap(name = "goals")]
    Goals(SetGoals),
    /// Store attendance and goal achievement of a member
    #[clap(name = "activity")]
    Activity(SetActivity),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::SetPlan(cmd) => cmd.run(db).await,
            Members::SetStart(cmd) => cmd.run(db).await,
            Members::SetStatus(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
            Members::Progress(cmd) => cmd.run(db).await,
            Members::Workout(cmd) => cmd.run(db).await,
            Members::Physical(cmd) => cmd.run(db).await,
            Members::Goals(cmd) => cmd.run(db).await,
            Members::Activity(cmd) => cmd.run(db).await,
        }
    }
}

/// Load the single member a command works on as working set.
async fn working_set(db: &Connection, id: u32) -> Result<MemberList> {
    let members: Vec<Member> = db
        .query(&MemberFilter {
            id: Some(id),
            ..Default::default()
        })
        .await
        .map_err(store_failure("load member"))?;
    if members.is_empty() {
        bail!("Member {} not found.", id);
    }
    Ok(MemberList::new(members))
}

/// Show the change, ask, and store the updated member.
async fn store_change(db: &Connection, before: Member, update: Member, yes: bool) -> Result<()> {
    println!();
    (before, update.clone()).print_formatted();
    println!();
    if !confirm("Update member?", yes)? {
        return Ok(());
    }
    let _: Member = db
        .update(update)
        .await
        .map_err(store_failure("update member"))?;
    println!("Member updated.");
    Ok(())
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let profile: MemberProfile = db
            .retrieve(self.id)
            .await
            .map_err(store_failure("load member"))?;
        println!();
        profile.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Search name, email and unique id
    #[clap(short, long)]
    pub query: Option<String>,
    #[clap(short, long)]
    pub status: Option<PaymentStatus>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            payment_status: self.status,
            ..Default::default()
        };
        let members: Vec<Member> = db
            .query(&filter)
            .await
            .map_err(store_failure("load members"))?;
        let list = MemberList::new(members);

        let members = list.search(self.query.as_deref().unwrap_or(""));
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(long)]
    pub age: Option<u32>,
    #[clap(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[clap(long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(long)]
    pub address: Option<String>,
    #[clap(long)]
    pub emergency_contact: Option<String>,
    /// Height in cm
    #[clap(long)]
    pub height: Option<f64>,
    /// Weight in kg
    #[clap(long)]
    pub weight: Option<f64>,
    /// Body fat in percent
    #[clap(long)]
    pub body_fat: Option<f64>,
    #[clap(short, long, default_value_t = PlanType::Monthly)]
    pub plan: PlanType,
    /// Subscription start, defaults to today
    #[clap(long)]
    pub start: Option<NaiveDate>,
    #[clap(long, default_value_t = PaymentStatus::Pending)]
    pub status: PaymentStatus,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    fn into_form(self, today: NaiveDate) -> NewMember {
        NewMember {
            name: self.name,
            age: self.age,
            date_of_birth: self.date_of_birth,
            phone: self.phone,
            email: self.email,
            address: self.address,
            emergency_contact: self.emergency_contact,
            height: self.height,
            weight: self.weight,
            body_fat: self.body_fat,
            subscription_type: self.plan,
            subscription_start: self.start.unwrap_or(today),
            payment_status: self.status,
        }
    }

    /// Run the command and add a member to the database
    pub async fn run(self, db: &Connection) -> Result<()> {
        let today = datetime::today();
        let yes = self.yes;
        let member = create_member(self.into_form(today), today).map_err(|err| {
            tracing::warn!(%err, "member form rejected");
            err
        })?;

        // Check if a member with this email already exists
        if let Some(email) = member.email.clone() {
            let members: Vec<Member> = db
                .query(&MemberFilter {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .await
                .map_err(store_failure("check member email"))?;
            if !members.is_empty() {
                bail!("Member with email {} already exists.", email);
            }
        }

        println!();
        member.print_formatted();
        println!();

        if !confirm("Add member?", yes)? {
            return Ok(());
        }

        let name = member.name.clone();
        let member: Member = db
            .insert(member)
            .await
            .map_err(store_failure("add member"))?;
        println!("{} has been added as {}.", name, member.unique_id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetPlan {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub plan: PlanType,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetPlan {
    /// Switch the plan. The end date follows from the
    /// stored start date.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let mut list = working_set(db, self.id).await?;
        let before = list
            .get(self.id)
            .cloned()
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        let update = list
            .change_subscription_type(self.id, self.plan)
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        store_change(db, before, update, self.yes).await
    }
}

#[derive(Args, Debug)]
pub struct SetStart {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub start: NaiveDate,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetStart {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let mut list = working_set(db, self.id).await?;
        let before = list
            .get(self.id)
            .cloned()
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        let update = list
            .change_subscription_start(self.id, self.start)
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        store_change(db, before, update, self.yes).await
    }
}

#[derive(Args, Debug)]
pub struct SetStatus {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub status: PaymentStatus,
    #[clap(short, long)]
    pub yes: bool,
}

impl SetStatus {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let mut list = working_set(db, self.id).await?;
        let before = list
            .get(self.id)
            .cloned()
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        let update = list
            .change_payment_status(self.id, self.status)
            .ok_or_else(|| anyhow!("Member {} not found.", self.id))?;
        store_change(db, before, update, self.yes).await
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db
            .retrieve(self.id)
            .await
            .map_err(store_failure("load member"))?;
        println!();
        member.print_formatted();
        println!();
        if !confirm("Delete member and all recorded data?", self.yes)? {
            return Ok(());
        }
        db.delete(member)
            .await
            .map_err(store_failure("delete member"))?;
        println!("Member has been deleted.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct LogProgress {
    #[clap(short, long)]
    pub id: u32,
    /// Defaults to today
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    /// Weight in kg
    #[clap(short, long)]
    pub weight: Option<f64>,
    /// Body fat in percent
    #[clap(short, long)]
    pub body_fat: Option<f64>,
}

impl LogProgress {
    pub async fn run(self, db: &Connection) -> Result<()> {
        if self.weight.is_none() && self.body_fat.is_none() {
            bail!("Provide a weight, a body fat percentage or both.");
        }
        if let Some(weight) = self.weight {
            if !(weight > 0.0) {
                bail!("Weight must be a positive number of kilograms.");
            }
        }
        if let Some(body_fat) = self.body_fat {
            if !(0.0..=100.0).contains(&body_fat) {
                bail!("Body fat must be between 0 and 100 percent.");
            }
        }
        let member: Member = db
            .retrieve(self.id)
            .await
            .map_err(store_failure("load member"))?;
        let log = ProgressLog {
            member_id: member.id,
            date: self.date.unwrap_or_else(datetime::today),
            weight: self.weight,
            body_fat: self.body_fat,
            ..Default::default()
        };
        let log: ProgressLog = db
            .insert(log)
            .await
            .map_err(store_failure("log progress"))?;
        println!("Progress of {} logged for {}.", member.name, log.date);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RecordWorkout {
    #[clap(short, long)]
    pub id: u32,
    /// Defaults to today
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    #[clap(short, long)]
    pub workout: String,
    /// Duration in minutes
    #[clap(short = 'm', long)]
    pub duration: u32,
}

impl RecordWorkout {
    pub async fn run(self, db: &Connection) -> Result<()> {
        if self.workout.trim().is_empty() {
            bail!("Workout must not be empty.");
        }
        let member: Member = db
            .retrieve(self.id)
            .await
            .map_err(store_failure("load member"))?;
        let entry = WorkoutEntry {
            member_id: member.id,
            date: self.date.unwrap_or_else(datetime::today),
            workout: self.workout.trim().to_string(),
            duration: self.duration,
            ..Default::default()
        };
        let entry: WorkoutEntry = db
            .insert(entry)
            .await
            .map_err(store_failure("record workout"))?;
        println!(
            "{} min of {} recorded for {}.",
            entry.duration, entry.workout, member.name
        );
        Ok(())
    }
}
