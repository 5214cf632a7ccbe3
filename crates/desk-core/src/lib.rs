//! # desk-core
//!
//! Records mirrored from the case management API, shared by every casedesk crate:
//! - Entity structs (cases, files, comments, history entries, invitations)
//! - Offset and cursor page envelopes plus the request-side page/sort types
//! - Status enums, including the single case-status classification
//! - User display helpers
//! - Cross-cutting error types
//!
//! Nothing in here is authoritative: every value is a copy of the most recent
//! server response for its key.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod page;
