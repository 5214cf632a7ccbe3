use std::path::PathBuf;

use clap::Subcommand;

use crate::cli::root_commands::PageArgs;

/// Case file commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FileCommands {
    /// List files attached to a case.
    List {
        code: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Upload local files to a case (locks the case for the duration).
    Upload {
        code: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Download files; pending files are skipped.
    Download {
        code: String,
        /// File UIDs. Every file on the selected page when omitted.
        uids: Vec<String>,
        /// Target directory.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Print a presigned download URL.
    #[command(name = "download-url")]
    DownloadUrl { code: String, uid: String },
    /// Delete files, one at a time, stopping at the first failure.
    Delete {
        code: String,
        #[arg(required = true)]
        uids: Vec<String>,
    },
}
