//! Records returned by the case management API.

mod case;
mod case_file;
mod comment;
mod history;
mod invitation;

pub use case::{Case, CaseLockState};
pub use case_file::{CaseFile, FileDownloadUrl, PresignedUpload};
pub use comment::{Comment, NewComment};
pub use history::HistoryEntry;
pub use invitation::Invitation;
