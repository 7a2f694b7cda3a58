use serde::Serialize;
use thiserror::Error;

/// Non-fatal diagnostics raised while converging.
///
/// None of these abort a run; each one is logged through `tracing` and
/// returned in the run's report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvergenceWarning {
    #[error(
        "A round_limit of {round_limit} will not wait for any pending actions to settle. \
         Specify a value of at least 2"
    )]
    RoundLimitTooLow { round_limit: u32 },

    #[error(
        "The store has no side channel named '{store_name}'. It must be created by the wait \
         enhancer under the same name"
    )]
    SideChannelMissing { store_name: String },

    #[error(
        "Render completed with {abandoned} unresolved action(s) after round {round}. Raise \
         round_limit or reduce the depth of chained async actions"
    )]
    UnresolvedWork { round: u32, abandoned: usize },
}

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Store name cannot be empty")]
    EmptyStoreName,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages_name_the_cause() {
        let low = ConvergenceWarning::RoundLimitTooLow { round_limit: 1 };
        assert!(low.to_string().contains("round_limit of 1"));

        let missing = ConvergenceWarning::SideChannelMissing {
            store_name: "wait_store".to_string(),
        };
        assert!(missing.to_string().contains("'wait_store'"));

        let unresolved = ConvergenceWarning::UnresolvedWork {
            round: 5,
            abandoned: 2,
        };
        assert!(unresolved.to_string().contains("2 unresolved"));
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let value = serde_json::to_value(ConvergenceWarning::UnresolvedWork {
            round: 3,
            abandoned: 1,
        })
        .unwrap();
        assert_eq!(value["kind"], "unresolved_work");
        assert_eq!(value["round"], 3);
    }
}
