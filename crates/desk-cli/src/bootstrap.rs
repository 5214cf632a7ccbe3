use std::path::{Path, PathBuf};

use anyhow::Context;
use desk_config::{DeskConfig, PROJECT_DIR};

/// Load `.env` (project first) and then the layered configuration.
pub fn load_config() -> anyhow::Result<DeskConfig> {
    load_project_dotenv()?;
    DeskConfig::load().context("failed to load configuration")
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    if let Some(project_root) = find_project_root(&cwd) {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}

/// Nearest ancestor of `start` (inclusive) containing a `.casedesk` directory.
fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}
