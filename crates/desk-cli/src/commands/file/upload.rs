use std::path::PathBuf;

use anyhow::Context;
use desk_client::uploads::local_files;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::notify;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct UploadResponse<'a> {
    code: &'a str,
    uploaded: Vec<String>,
}

pub async fn run(
    code: &str,
    paths: &[PathBuf],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let files = local_files(paths)?;
    for file in &files {
        if !file.path.is_file() {
            anyhow::bail!("'{}' is not a readable file", file.path.display());
        }
    }

    let bar = Progress::bar(files.len() as u64, "uploading");
    let result = ctx
        .desk
        .upload_files(code, &files, &|name: &str| bar.step(name))
        .await;

    let uploaded = match result {
        Ok(uids) => {
            bar.finish_ok("done");
            uids
        }
        Err(error) => {
            bar.finish_err("upload failed");
            return Err(error).with_context(|| format!("Failed to upload files to case {code}"));
        }
    };

    notify::success(&format!("Uploaded {} file(s) to case {code}", uploaded.len()));
    output(&UploadResponse { code, uploaded }, flags.format)
}
