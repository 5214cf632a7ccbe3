use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    storage: String,
}

pub fn handle(flags: &GlobalFlags, config: &desk_config::DeskConfig) -> anyhow::Result<()> {
    let storage = desk_auth::storage::from_config(&config.auth)?;
    desk_auth::logout(storage.as_ref())?;
    output(
        &AuthLogoutResponse {
            cleared: true,
            storage: storage.describe(),
        },
        flags.format,
    )
}
