//! Shared HTTP response helpers.
//!
//! Non-success statuses become [`ApiError::Api`] carrying the server's
//! `{message}` so endpoint modules stay focused on request construction.

use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Return the response unchanged on success, otherwise read the error body.
///
/// The message is the body's `message` field when present, else a generic
/// "Request failed with status code N".
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(204, "")).await.is_ok());
    }

    #[tokio::test]
    async fn message_is_taken_from_body() {
        let err = check_response(mock_response(404, r#"{"message":"Case not found"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Case not found (Not Found)");
    }

    #[tokio::test]
    async fn missing_message_falls_back_to_status() {
        let err = check_response(mock_response(502, "<html>bad gateway</html>"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Request failed with status code 502 (Bad Gateway)"
        );
        assert!(matches!(err, ApiError::Api { status: 502, .. }));
    }
}
