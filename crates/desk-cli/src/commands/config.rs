use anyhow::Context;
use desk_config::DeskConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `desk config`: TOML by default, JSON when asked for.
pub fn handle(config: &DeskConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => {
            let rendered =
                toml::to_string_pretty(config).context("failed to render configuration")?;
            println!("{}", rendered.trim_end());
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(config, flags.format),
    }
}
