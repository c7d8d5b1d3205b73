use clap::{Parser, Subcommand};

use crate::commands::{Members, Payments, Schedule};

#[derive(Parser, Debug)]
#[clap(name = "fithub", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// SQLite database holding members and the schedule
    #[clap(long, env = "FITHUB_DB", default_value = "members.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage members
    #[clap(subcommand)]
    Members(Members),

    /// Outstanding subscription fees
    #[clap(subcommand)]
    Payments(Payments),

    /// Classes and meetings
    #[clap(subcommand)]
    Schedule(Schedule),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use fithub_domain::Timeline;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_plan() {
        let cli = Cli::try_parse_from([
            "fithub", "--db", "gym.sqlite3",
            "members", "set-plan", "--id", "5", "--plan", "annual",
        ])
        .unwrap();
        assert_eq!(cli.db, "gym.sqlite3");
        assert!(matches!(cli.command, Command::Members(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_plan() {
        let result = Cli::try_parse_from([
            "fithub", "members", "set-plan", "--id", "5", "--plan", "weekly",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_goals() {
        let cli = Cli::try_parse_from([
            "fithub", "members", "goals", "--id", "2",
            "--goals", "weight loss,endurance", "--timeline", "short-term",
            "-s", "hiit", "-s", "yoga", "--yes",
        ])
        .unwrap();
        let Command::Members(Members::Goals(cmd)) = cli.command else {
            panic!("not a goals command");
        };
        assert_eq!(cmd.goals, vec!["weight loss", "endurance"]);
        assert_eq!(cmd.timeline, Some(Timeline::ShortTerm));
        assert_eq!(cmd.workout_styles, vec!["hiit", "yoga"]);
        assert!(cmd.yes);
    }

    #[test]
    fn test_parse_activity() {
        let cli = Cli::try_parse_from([
            "fithub", "members", "activity", "-i", "2", "-a", "85", "-g", "60",
        ])
        .unwrap();
        let Command::Members(Members::Activity(cmd)) = cli.command else {
            panic!("not an activity command");
        };
        assert_eq!(cmd.attendance, Some(85.0));
        assert_eq!(cmd.goal_achievement, Some(60.0));
        assert!(!cmd.yes);
    }
}
