//! Error types for the cellgrid front end

use thiserror::Error;

/// Problems with a command line typed by the user.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{command}` requires {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("No cell selected (use `select <ID>` first)")]
    NoSelection,
}
