/// Title of the view a command renders.
///
/// Built by dispatch for each command and passed down explicitly; handlers
/// use it for table headings and spinner text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    title: String,
}

impl PageContext {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Title for a view scoped to one case, e.g. `Files · C-1001`.
    #[must_use]
    pub fn for_case(section: &str, code: &str) -> Self {
        Self::new(format!("{section} · {code}"))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Spinner text while the view loads.
    #[must_use]
    pub fn loading(&self) -> String {
        format!("Loading {}…", self.title)
    }
}
