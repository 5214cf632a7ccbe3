pub mod auth;
pub mod case;
pub mod comment;
pub mod config;
pub mod dispatch;
pub mod file;
pub mod history;
pub mod invitation;
pub mod schema;
pub mod shared;
