use fithub_domain::{Meeting, Member, MemberProfile, Section};
use fithub_membership::{
    datetime,
    display::{or_not_provided, truncate_display},
    metrics::{amount_due, compute_bmi, format_amount, progress_deltas, PaymentBadge},
    payments::{total_due, PendingPayment},
};

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

fn optional<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn badge(member: &Member) -> String {
    PaymentBadge::from(member.payment_status).label
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let address = or_not_provided(self.address.as_deref());
        println!("ID:\t\t\t{}", self.unique_id);
        println!("Name:\t\t\t{}", self.name);
        println!("Age:\t\t\t{}", optional(self.age));
        println!("Email:\t\t\t{}", or_not_provided(self.email.as_deref()));
        println!("Phone:\t\t\t{}", or_not_provided(self.phone.as_deref()));
        println!("Address:\t\t{}", truncate_display(address, 20));
        println!(
            "Emergency Contact:\t{}",
            or_not_provided(self.emergency_contact.as_deref())
        );
        println!("BMI:\t\t\t{}", compute_bmi(self.weight, self.height));
        println!("Plan:\t\t\t{}", self.subscription_type);
        println!("Start:\t\t\t{}", self.subscription_start);
        println!("End:\t\t\t{}", self.subscription_end);
        println!("Payment:\t\t{}", badge(self));
        println!(
            "Fee:\t\t\t{}",
            format_amount(amount_due(self.subscription_type))
        );
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let phone_old = or_not_provided(old.phone.as_deref());
        let phone_new = or_not_provided(new.phone.as_deref());
        let email_old = or_not_provided(old.email.as_deref());
        let email_new = or_not_provided(new.email.as_deref());
        let status_old = badge(old);
        let status_new = badge(new);
        let fee_old = format_amount(amount_due(old.subscription_type));
        let fee_new = format_amount(amount_due(new.subscription_type));

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_email = next_attr!(email_old, email_new);
        println!("Email:\t\t\t{}{}", email_old, next_email);
        let next_phone = next_attr!(phone_old, phone_new);
        println!("Phone:\t\t\t{}{}", phone_old, next_phone);
        let next_plan = next_attr!(old, new, subscription_type);
        println!("Plan:\t\t\t{}{}", old.subscription_type, next_plan);
        let next_start = next_attr!(old, new, subscription_start);
        println!("Start:\t\t\t{}{}", old.subscription_start, next_start);
        let next_end = next_attr!(old, new, subscription_end);
        println!("End:\t\t\t{}{}", old.subscription_end, next_end);
        let next_status = next_attr!(status_old, status_new);
        println!("Payment:\t\t{}{}", status_old, next_status);
        let next_fee = next_attr!(fee_old, fee_new);
        println!("Fee:\t\t\t{}{}", fee_old, next_fee);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        let today = datetime::today();
        println!(
            "{:>4}\t{:<8}\t{:<24}\t{:<30}\t{:<10}\t{:<10}\t{:<10}\t{:>6}\t{}",
            "ID", "Member", "Name", "Email", "Plan", "End", "Payment", "BMI", "Expired"
        );
        println!("{:-<140}", "-");

        for member in self {
            let expired = if member.is_active(today) { "" } else { "*" };
            println!(
                "{:>4}\t{:<8}\t{:<24}\t{:<30}\t{:<10}\t{:<10}\t{:<10}\t{:>6}\t{}",
                member.id,
                member.unique_id,
                member.name,
                or_not_provided(member.email.as_deref()),
                member.subscription_type,
                member.subscription_end.to_string(),
                badge(member),
                compute_bmi(member.weight, member.height).to_string(),
                expired
            );
        }
    }
}

impl PrintFormatted for MemberProfile {
    fn print_formatted(&self) {
        self.member.print_formatted();

        println!();
        println!("{}", Section::Physical.title());
        match &self.physical {
            Some(physical) => {
                let m = &physical.measurements;
                println!(
                    "Fitness Level:\t\t{}",
                    optional(physical.fitness_level.as_deref())
                );
                println!("Chest:\t\t\t{}", optional(m.chest));
                println!("Waist:\t\t\t{}", optional(m.waist));
                println!("Hips:\t\t\t{}", optional(m.hips));
                println!("Arms:\t\t\t{}", optional(m.arms));
                println!("Legs:\t\t\t{}", optional(m.legs));
            }
            None => println!("{}", Section::Physical.missing_message()),
        }

        println!();
        println!("{}", Section::Goals.title());
        match &self.goals {
            Some(goals) => {
                println!("Goals:\t\t\t{}", goals.goals.join(", "));
                println!("Timeline:\t\t{}", optional(goals.timeline));
                println!("Workouts per Week:\t{}", optional(goals.workout_frequency));
                println!("Workout Styles:\t\t{}", goals.workout_styles.join(", "));
                println!("Diet:\t\t\t{}", optional(goals.diet_preference.as_deref()));
                println!("Diet Remarks:\t\t{}", optional(goals.diet_remarks.as_deref()));
            }
            None => println!("{}", Section::Goals.missing_message()),
        }

        println!();
        println!("{}", Section::Activity.title());
        match &self.activity {
            Some(activity) => {
                println!(
                    "Attendance:\t\t{}",
                    optional(activity.attendance.map(|a| format!("{:.0}%", a)))
                );
                println!(
                    "Goal Achievement:\t{}",
                    optional(activity.goal_achievement.map(|a| format!("{:.0}%", a)))
                );
                println!();
                println!("{:<10}\t{:<24}\t{:>8}", "Date", "Workout", "Minutes");
                for entry in &activity.workout_history {
                    println!(
                        "{:<10}\t{:<24}\t{:>8}",
                        entry.date.to_string(),
                        entry.workout,
                        entry.duration
                    );
                }
                println!();
                println!("{:<10}\t{:>8}\t{:>8}\t{}", "Date", "Weight", "Body Fat", "Change");
                let deltas = progress_deltas(&activity.progress_logs);
                for (log, delta) in activity.progress_logs.iter().zip(deltas) {
                    println!(
                        "{:<10}\t{:>8}\t{:>8}\t{}",
                        log.date.to_string(),
                        optional(log.weight),
                        optional(log.body_fat),
                        delta
                    );
                }
            }
            None => println!("{}", Section::Activity.missing_message()),
        }
    }
}

impl PrintFormatted for Vec<PendingPayment> {
    fn print_formatted(&self) {
        println!(
            "{:<8}\t{:<24}\t{:<10}\t{:<10}\t{:<10}\t{:>10}",
            "Member", "Name", "Plan", "Due", "Status", "Amount"
        );
        println!("{:-<100}", "-");
        for payment in self {
            println!(
                "{:<8}\t{:<24}\t{:<10}\t{:<10}\t{:<10}\t{:>10}",
                payment.unique_id,
                payment.name,
                payment.subscription_type,
                payment.subscription_end.to_string(),
                payment.badge.label,
                format_amount(payment.amount_due),
            );
        }
        println!("{:-<100}", "-");
        println!("Total due:\t{}", format_amount(total_due(self)));
    }
}

impl PrintFormatted for Vec<Meeting> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<10}\t{:<11}\t{:<32}\t{:<12}\t{}",
            "ID", "Date", "Time", "Title", "Type", "Attendees"
        );
        println!("{:-<120}", "-");
        for meeting in self {
            let time = format!(
                "{}-{}",
                meeting.start_time.format("%H:%M"),
                meeting.end_time.format("%H:%M")
            );
            println!(
                "{:>4}\t{:<10}\t{:<11}\t{:<32}\t{:<12}\t{}",
                meeting.id,
                meeting.date.to_string(),
                time,
                meeting.title,
                meeting.meeting_type,
                meeting.attendees.join(", "),
            );
            if let Some(link) = &meeting.link {
                println!("\t\t\t\t\t{}", link);
            }
        }
    }
}
