pub mod auth;
pub mod case;
pub mod comment;
pub mod file;
pub mod invitation;

pub use auth::AuthCommands;
pub use case::CaseCommands;
pub use comment::CommentCommands;
pub use file::FileCommands;
pub use invitation::InvitationCommands;
