mod members;
pub use members::*;

mod profile;
pub use profile::*;

mod payments;
pub use payments::*;

mod schedule;
pub use schedule::*;

use anyhow::{anyhow, Error, Result};
use inquire::Confirm;

use fithub_db::results::QueryError;

/// Ask before changing the database, unless told not to.
pub fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new(message).with_default(true).prompt()?)
}

/// Log a failed store operation and replace the cause with a
/// generic message. Missing records are reported as they are.
pub fn store_failure(action: &'static str) -> impl Fn(Error) -> Error {
    move |err| {
        if err.downcast_ref::<QueryError>().is_some() {
            return err;
        }
        tracing::error!(error = ?err, "failed to {}", action);
        anyhow!("Failed to {}. Please try again.", action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_message() {
        let err = store_failure("log progress")(anyhow!("FOREIGN KEY constraint failed"));
        assert_eq!(err.to_string(), "Failed to log progress. Please try again.");
    }

    #[test]
    fn test_store_failure_keeps_missing_record() {
        let err = store_failure("load member")(QueryError::MissingRecord("member", 7).into());
        assert_eq!(err.to_string(), "member with id 7 not found");
    }

    #[test]
    fn test_confirm_yes() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
