use clap::Subcommand;

use crate::cli::root_commands::PageArgs;

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// List comments on a case.
    List {
        code: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Add a comment.
    Add { code: String, content: String },
    /// Delete a comment.
    Delete { code: String, uid: String },
}
