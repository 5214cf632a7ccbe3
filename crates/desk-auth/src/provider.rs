//! OAuth2 client for the hosted identity provider's token endpoint.

use serde::Deserialize;

use crate::error::AuthError;
use crate::tokens::TokenSet;

/// Successful `/oauth2/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<TokenResponse> for TokenSet {
    fn from(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token endpoint client for one app client.
#[derive(Debug, Clone)]
pub struct IdentityProvider {
    http: reqwest::Client,
    domain: String,
    client_id: String,
}

impl IdentityProvider {
    /// `domain` may be given with or without a scheme; `https://` is assumed.
    #[must_use]
    pub fn new(http: reqwest::Client, domain: &str, client_id: &str) -> Self {
        let domain = domain.trim_end_matches('/');
        let domain = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        };
        Self {
            http,
            domain,
            client_id: client_id.to_string(),
        }
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Hosted UI authorize URL for the authorization-code flow with PKCE.
    #[must_use]
    pub fn authorize_url(
        &self,
        redirect_uri: &str,
        scopes: &str,
        state: &str,
        code_challenge: &str,
    ) -> String {
        format!(
            "{}/oauth2/authorize?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}&code_challenge_method=S256&code_challenge={}",
            self.domain,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(scopes),
            urlencoding::encode(state),
            urlencoding::encode(code_challenge),
        )
    }

    /// Exchange a refresh token for a fresh access (and ID) token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider rejects the grant and
    /// [`AuthError::Http`] when it cannot be reached.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", &self.client_id),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    /// Redeem an authorization code from the browser callback.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider rejects the code and
    /// [`AuthError::Http`] when it cannot be reached.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, AuthError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("client_id", &self.client_id),
            ("code", code),
            ("code_verifier", code_verifier),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let body = form_encode(params);
        let resp = self
            .http
            .post(format!("{}/oauth2/token", self.domain))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OAuthErrorBody>(&text).map_or(text, |e| {
                e.error_description
                    .map_or_else(|| e.error.clone(), |d| format!("{}: {d}", e.error))
            });
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}

fn form_encode(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn domain_without_scheme_gets_https() {
        let idp = IdentityProvider::new(reqwest::Client::new(), "auth.portal.io/", "c1");
        assert!(
            idp.authorize_url("http://localhost:3000/callback", "openid email", "s", "ch")
                .starts_with("https://auth.portal.io/oauth2/authorize?response_type=code&client_id=c1&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback&scope=openid%20email")
        );
    }

    #[test]
    fn form_encoding_escapes_values() {
        assert_eq!(
            form_encode(&[("a", "x y"), ("b", "1+2=3")]),
            "a=x%20y&b=1%2B2%3D3"
        );
    }

    #[tokio::test]
    async fn refresh_posts_form_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "id_token": "new-id",
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let idp = IdentityProvider::new(reqwest::Client::new(), &server.uri(), "c1");
        let tokens: TokenSet = idp.refresh("r-1").await.unwrap().into();
        assert_eq!(tokens.access_token, "new-access");
        assert_eq!(tokens.refresh_token, None);
    }

    #[tokio::test]
    async fn provider_errors_carry_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Refresh Token has expired"
            })))
            .mount(&server)
            .await;

        let idp = IdentityProvider::new(reqwest::Client::new(), &server.uri(), "c1");
        let err = idp.refresh("r-1").await.unwrap_err();
        match err {
            AuthError::Provider { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid_grant: Refresh Token has expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
