mod app_context;
mod page;

pub use app_context::{AppContext, effective_limit, identity_provider};
pub use page::PageContext;
