//! Batch upload of local files to a case.
//!
//! ```text
//! lock ─▶ presigned-urls ─▶ PUT × n (concurrent) ─▶ complete
//!   └──────────────── unlock (always, once) ◀──────────┘
//! ```
//!
//! The batch is all-or-nothing from the client's point of view: the first
//! failed PUT aborts it and `complete` is never sent. There are no retries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use desk_core::entities::PresignedUpload;
use desk_core::errors::CoreError;
use futures::future::try_join_all;
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, ApiError, seg};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    file_paths: Vec<&'a str>,
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
    uids: &'a [String],
}

/// A local file queued for upload, keyed by its base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub path: PathBuf,
}

/// Map paths to upload names, rejecting names that would collide.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for an empty batch, a path without a
/// file name, or two paths sharing a file name.
pub fn local_files(paths: &[PathBuf]) -> Result<Vec<LocalFile>, CoreError> {
    if paths.is_empty() {
        return Err(CoreError::Validation("no files to upload".into()));
    }
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::Validation(format!("'{}' has no file name", path.display())))?;
        if let Some(previous) = seen.insert(name, path) {
            return Err(CoreError::Validation(format!(
                "'{}' and '{}' would both upload as '{name}'",
                previous.display(),
                path.display()
            )));
        }
        files.push(LocalFile {
            name: name.to_string(),
            path: path.clone(),
        });
    }
    Ok(files)
}

impl ApiClient {
    /// `POST /cases/{code}/uploads/presigned-urls` with `{filePaths}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn presign_uploads(
        &self,
        code: &str,
        file_paths: &[&str],
    ) -> Result<Vec<PresignedUpload>, ApiError> {
        let body = PresignRequest {
            file_paths: file_paths.to_vec(),
        };
        self.post(&format!("/cases/{}/uploads/presigned-urls", seg(code)), &body)
            .await
    }

    /// `POST /cases/{code}/uploads/complete` with `{uids}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn complete_uploads(&self, code: &str, uids: &[String]) -> Result<(), ApiError> {
        self.execute(
            Method::POST,
            &format!("/cases/{}/uploads/complete", seg(code)),
            Some(&CompleteRequest { uids }),
        )
        .await
    }

    /// Upload `files` to case `code` and return the completed uids.
    ///
    /// `on_uploaded` is called with each file name as its PUT succeeds.
    ///
    /// The lock is released exactly once whatever happens after the lock
    /// attempt, including when the lock itself was refused. If the batch
    /// failed, its error wins and an unlock failure is only logged; if only
    /// the unlock failed, that error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] of the batch, or of the unlock.
    pub async fn upload_case_files(
        &self,
        code: &str,
        files: &[LocalFile],
        on_uploaded: &(dyn Fn(&str) + Sync),
    ) -> Result<Vec<String>, ApiError> {
        let outcome = self.upload_while_locked(code, files, on_uploaded).await;
        let unlocked = self.unlock_case(code).await;

        match (outcome, unlocked) {
            (Ok(uids), Ok(())) => Ok(uids),
            (Ok(_), Err(unlock_error)) => Err(unlock_error),
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(unlock_error)) => {
                tracing::warn!(case = code, %unlock_error, "failed to release case lock after failed upload");
                Err(error)
            }
        }
    }

    async fn upload_while_locked(
        &self,
        code: &str,
        files: &[LocalFile],
        on_uploaded: &(dyn Fn(&str) + Sync),
    ) -> Result<Vec<String>, ApiError> {
        self.lock_case(code).await?;

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        let targets = self.presign_uploads(code, &names).await?;
        tracing::debug!(case = code, count = targets.len(), "received presigned upload targets");

        let by_name: HashMap<&str, &Path> =
            files.iter().map(|f| (f.name.as_str(), f.path.as_path())).collect();

        let uids = try_join_all(targets.iter().map(|target| {
            let local = by_name.get(target.file_path.as_str()).copied();
            async move {
                let local =
                    local.ok_or_else(|| ApiError::UnknownUploadPath(target.file_path.clone()))?;
                self.put_object(target, local).await?;
                on_uploaded(&target.file_path);
                Ok::<_, ApiError>(target.uid.clone())
            }
        }))
        .await?;

        self.complete_uploads(code, &uids).await?;
        Ok(uids)
    }

    async fn put_object(&self, target: &PresignedUpload, local: &Path) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(local).await.map_err(|source| ApiError::Io {
            path: local.display().to_string(),
            source,
        })?;
        let resp = self.storage.put(&target.url).body(bytes).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Upload {
                path: target.file_path.clone(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }
}
