use clap::Subcommand;

/// Invitation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InvitationCommands {
    /// List invitations, newest first.
    List {
        /// Follow cursors until the last page.
        #[arg(long)]
        all: bool,
        /// Continue from a cursor returned by a previous page.
        #[arg(long, conflicts_with = "all")]
        cursor: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// pending, accepted, expired or cancelled.
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one invitation.
    Get { uid: String },
    /// Invite a user by email.
    Send { email: String },
    /// Send the invitation email again.
    Resend { email: String },
    /// Accept a pending invitation by choosing a password.
    Accept {
        uid: String,
        #[arg(long)]
        password: String,
        /// Repeat the password.
        #[arg(long)]
        confirm: String,
    },
}
