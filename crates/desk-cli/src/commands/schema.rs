use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Records `desk schema` can describe.
const ENTITIES: &[&str] = &[
    "case",
    "case-lock",
    "case-file",
    "download-url",
    "presigned-upload",
    "comment",
    "history-entry",
    "invitation",
    "user",
];

fn schema(entity: &str) -> anyhow::Result<serde_json::Value> {
    use desk_core::entities::{
        Case, CaseFile, CaseLockState, Comment, FileDownloadUrl, HistoryEntry, Invitation,
        PresignedUpload,
    };
    use desk_core::identity::UserProfile;

    let schema = match entity {
        "case" => schema_for!(Case),
        "case-lock" => schema_for!(CaseLockState),
        "case-file" => schema_for!(CaseFile),
        "download-url" => schema_for!(FileDownloadUrl),
        "presigned-upload" => schema_for!(PresignedUpload),
        "comment" => schema_for!(Comment),
        "history-entry" => schema_for!(HistoryEntry),
        "invitation" => schema_for!(Invitation),
        "user" => schema_for!(UserProfile),
        other => anyhow::bail!(
            "unknown entity '{other}' (expected one of: {})",
            ENTITIES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `desk schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    match args.entity.as_deref() {
        Some(entity) => output(&schema(&entity.to_ascii_lowercase())?, flags.format),
        None => output(&ENTITIES, flags.format),
    }
}
