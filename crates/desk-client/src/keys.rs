//! Query scopes and the invalidations each write triggers.

/// Case list pages.
pub const CASES: &str = "cases";
pub const CASE: &str = "case";
pub const CASE_LOCK: &str = "case-lock";
pub const CASE_FILES: &str = "case-files";
pub const CASE_COMMENTS: &str = "case-comments";
pub const CASE_HISTORY: &str = "case-history";
/// Invitation list pages, keyed by cursor and filters.
pub const INVITATIONS: &str = "invitations";
pub const INVITATION: &str = "invitation";

/// A successful write, named by what it changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<'a> {
    Lock(&'a str),
    Unlock(&'a str),
    StatusChange(&'a str),
    Upload(&'a str),
    FileDelete(&'a str),
    CommentAdd(&'a str),
    CommentDelete(&'a str),
    CaseDelete(&'a str),
    InvitationSend,
    InvitationAccept(&'a str),
}

/// One invalidation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation<'a> {
    /// Entries in `scope`, narrowed to one case when `case` is set.
    Scope {
        scope: &'static str,
        case: Option<&'a str>,
    },
    /// Every entry belonging to the case.
    Case(&'a str),
}

const fn scoped<'a>(scope: &'static str, case: &'a str) -> Invalidation<'a> {
    Invalidation::Scope {
        scope,
        case: Some(case),
    }
}

const fn global(scope: &'static str) -> Invalidation<'static> {
    Invalidation::Scope { scope, case: None }
}

impl<'a> Mutation<'a> {
    #[must_use]
    pub fn invalidations(self) -> Vec<Invalidation<'a>> {
        match self {
            Self::Lock(code) | Self::Unlock(code) => vec![
                scoped(CASE, code),
                scoped(CASE_LOCK, code),
                scoped(CASE_HISTORY, code),
            ],
            Self::StatusChange(code) => vec![scoped(CASE, code), scoped(CASE_HISTORY, code)],
            Self::Upload(code) | Self::FileDelete(code) => {
                vec![scoped(CASE_FILES, code), scoped(CASE_HISTORY, code)]
            }
            Self::CommentAdd(code) | Self::CommentDelete(code) => {
                vec![scoped(CASE_COMMENTS, code), scoped(CASE_HISTORY, code)]
            }
            Self::CaseDelete(code) => vec![global(CASES), Invalidation::Case(code)],
            Self::InvitationSend => vec![global(INVITATIONS)],
            Self::InvitationAccept(_) => vec![global(INVITATIONS), global(INVITATION)],
        }
    }
}
