use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuthCommands, CaseCommands, CommentCommands, FileCommands, InvitationCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Cases: listing, detail, locks and status workflow.
    Case {
        #[command(subcommand)]
        action: CaseCommands,
    },
    /// Files attached to a case.
    File {
        #[command(subcommand)]
        action: FileCommands,
    },
    /// Comments on a case.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Audit history of a case.
    History(HistoryArgs),
    /// User invitations.
    Invitation {
        #[command(subcommand)]
        action: InvitationCommands,
    },
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Dump JSON schema for an API record.
    Schema(SchemaArgs),
    /// Print the effective configuration as TOML.
    Config,
}

/// Arguments for `desk history`.
#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Case code.
    pub code: String,
    #[command(flatten)]
    pub paging: PageArgs,
    /// Sort as `field,asc|desc`, sent as given.
    #[arg(long)]
    pub sort: Option<String>,
}

/// Offset paging shared by list commands.
#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Page size (defaults to --limit, then configuration).
    #[arg(long)]
    pub size: Option<u32>,
}

/// Arguments for `desk schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record name (e.g. `case`, `invitation`). Lists the names when omitted.
    pub entity: Option<String>,
}
