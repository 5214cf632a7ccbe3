//! Case file endpoints and downloads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use desk_core::entities::{CaseFile, FileDownloadUrl};
use desk_core::errors::CoreError;
use desk_core::page::{OffsetPage, PageRequest};
use reqwest::Method;
use tokio::io::AsyncWriteExt;

use crate::{ApiClient, ApiError, Query, seg};

/// Local file name for a download: last segment of `file_path`, else the uid.
#[must_use]
pub fn download_name(link: &FileDownloadUrl) -> &str {
    link.file_path
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(link.uid.as_str())
}

impl ApiClient {
    /// `GET /cases/{code}/files`. The response names its list `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn list_case_files(
        &self,
        code: &str,
        page: PageRequest,
    ) -> Result<OffsetPage<CaseFile>, ApiError> {
        let query = Query::new()
            .with("page", page.api_page())
            .with("size", page.size);
        self.get(&format!("/cases/{}/files", seg(code)), &query)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn file_download_url(
        &self,
        code: &str,
        uid: &str,
    ) -> Result<FileDownloadUrl, ApiError> {
        self.get(
            &format!("/cases/{}/files/{}/download-url", seg(code), seg(uid)),
            &Query::new(),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn delete_case_file(&self, code: &str, uid: &str) -> Result<(), ApiError> {
        self.execute::<()>(
            Method::DELETE,
            &format!("/cases/{}/files/{}", seg(code), seg(uid)),
            None,
        )
        .await
    }

    /// Resolve the presigned URL for `uid` and stream the object into `dir`,
    /// one response chunk at a time.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if either request fails or the file cannot be written.
    pub async fn download_case_file(
        &self,
        code: &str,
        uid: &str,
        dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        let link = self.file_download_url(code, uid).await?;
        let target = dir.join(download_name(&link));

        let mut resp = self.storage.get(&link.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: format!("Failed to download {}", link.file_path),
            });
        }
        let io_error = |source| ApiError::Io {
            path: target.display().to_string(),
            source,
        };
        let mut out = tokio::fs::File::create(&target).await.map_err(io_error)?;
        let mut written = 0;
        while let Some(chunk) = resp.chunk().await? {
            out.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len();
        }
        out.flush().await.map_err(io_error)?;
        tracing::debug!(path = %target.display(), bytes = written, "downloaded case file");
        Ok(target)
    }
}

/// Keep downloadable files, reporting how many pending ones were skipped.
#[must_use]
pub fn downloadable(files: &[CaseFile]) -> (Vec<&CaseFile>, usize) {
    let (ready, pending): (Vec<&CaseFile>, Vec<&CaseFile>) =
        files.iter().partition(|f| f.status.is_downloadable());
    (ready, pending.len())
}

/// Reject a batch in which two files would be written under the same name.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming both uids and the shared name.
pub fn check_download_names(files: &[&CaseFile]) -> Result<(), CoreError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for file in files {
        let name = file.file_name();
        if let Some(previous) = seen.insert(name, file.uid.as_str()) {
            return Err(CoreError::Validation(format!(
                "files {previous} and {} would both download as '{name}'",
                file.uid
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use desk_core::enums::CaseFileStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    fn link(uid: &str, path: &str) -> FileDownloadUrl {
        FileDownloadUrl {
            uid: uid.into(),
            file_path: path.into(),
            url: "https://bucket.example/x".into(),
            expires_in: 60,
        }
    }

    #[test]
    fn download_name_uses_last_segment_or_uid() {
        assert_eq!(download_name(&link("f-1", "scans/upper.stl")), "upper.stl");
        assert_eq!(download_name(&link("f-1", "photo.jpg")), "photo.jpg");
        assert_eq!(download_name(&link("f-1", "scans/")), "f-1");
        assert_eq!(download_name(&link("f-1", "")), "f-1");
    }

    #[test]
    fn pending_files_are_skipped() {
        let file = |uid: &str, status| CaseFile {
            uid: uid.into(),
            key: format!("{uid}.stl"),
            status,
            case_code: "C-1".into(),
            created_at: chrono_epoch(),
            updated_at: chrono_epoch(),
        };
        let files = vec![
            file("a", CaseFileStatus::Uploaded),
            file("b", CaseFileStatus::Pending),
            file("c", CaseFileStatus::Reupload),
        ];
        let (ready, skipped) = downloadable(&files);
        assert_eq!(ready.iter().map(|f| f.uid.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn colliding_download_names_are_rejected() {
        let file = |uid: &str, key: &str| CaseFile {
            uid: uid.into(),
            key: key.into(),
            status: CaseFileStatus::Uploaded,
            case_code: "C-1".into(),
            created_at: chrono_epoch(),
            updated_at: chrono_epoch(),
        };
        let upper = file("a", "scans/upper.stl");
        let lower = file("b", "scans/lower.stl");
        let again = file("c", "rescans/upper.stl");

        assert!(check_download_names(&[&upper, &lower]).is_ok());
        let err = check_download_names(&[&upper, &lower, &again]).unwrap_err();
        assert_eq!(
            err.to_string(),
            CoreError::Validation("files a and c would both download as 'upper.stl'".into())
                .to_string()
        );
    }

    fn chrono_epoch() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
    }
}
