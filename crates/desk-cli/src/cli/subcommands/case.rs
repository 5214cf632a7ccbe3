use clap::{Args, Subcommand};

use crate::cli::root_commands::PageArgs;

/// Case commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CaseCommands {
    /// List cases.
    List(CaseListArgs),
    /// Show a case with its lock, files, comments and history.
    Show { code: String },
    /// Delete a case.
    Delete { code: String },
    /// Lock a case for editing.
    Lock { code: String },
    /// Release the lock on a case.
    Unlock { code: String },
    /// Show who holds the lock and whether it can be released.
    #[command(name = "lock-status")]
    LockStatus { code: String },
    /// Approve a case.
    Approve { code: String },
    /// Reject a case.
    Reject { code: String },
    /// Set a custom status.
    #[command(name = "set-status")]
    SetStatus { code: String, status: String },
}

#[derive(Clone, Debug, Args)]
pub struct CaseListArgs {
    #[command(flatten)]
    pub paging: PageArgs,
    /// Sort as `field,asc|desc` (`doctor` and `patient` are accepted aliases).
    #[arg(long)]
    pub sort: Option<String>,
    /// Free-text search.
    #[arg(long)]
    pub q: Option<String>,
}

