use std::any::TypeId;
use std::fmt::Display;

/// Logical identity of a cached read.
///
/// `scope` names the resource (`case-files`), `case_code` ties the entry to
/// one case for targeted invalidation, and `params` carry page, sort and
/// filter values. The value type is part of the key so two reads of the same
/// scope with different result types never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: String,
    case_code: Option<String>,
    params: Vec<String>,
    type_id: TypeId,
}

impl QueryKey {
    #[must_use]
    pub fn new<T: 'static>(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            case_code: None,
            params: Vec::new(),
            type_id: TypeId::of::<T>(),
        }
    }

    #[must_use]
    pub fn for_case(mut self, code: impl Into<String>) -> Self {
        self.case_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn param(mut self, value: impl Display) -> Self {
        self.params.push(value.to_string());
        self
    }

    /// Adds the parameter, or an empty marker when absent, so `None` and
    /// `Some("")` stay distinct from a missing position.
    #[must_use]
    pub fn opt_param(mut self, value: Option<impl Display>) -> Self {
        self.params
            .push(value.map_or_else(|| "\u{0}".to_string(), |v| v.to_string()));
        self
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub fn case_code(&self) -> Option<&str> {
        self.case_code.as_deref()
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub(crate) fn holds<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}
