use std::time::{Duration, Instant};

use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::storage::TokenStorage;
use crate::tokens::TokenSet;

/// Parameters for one browser login.
#[derive(Debug, Clone)]
pub struct LoginRequest<'a> {
    pub callback_port: u16,
    pub redirect_uri: &'a str,
    pub scopes: &'a str,
    pub timeout: Duration,
}

/// Execute the hosted-UI login flow.
///
/// 1. Start `tiny_http` on `127.0.0.1:{callback_port}`
/// 2. Open the browser at the provider's authorize URL (PKCE S256)
/// 3. Wait for `/callback?code=..&state=..` (in `spawn_blocking`; `recv` blocks)
/// 4. Exchange the code at the token endpoint
/// 5. Persist the tokens
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the
/// callback times out or carries an error, or the state does not match; and
/// the provider or storage error if the exchange or store fails.
pub async fn login(
    provider: &IdentityProvider,
    storage: &dyn TokenStorage,
    request: &LoginRequest<'_>,
) -> Result<TokenSet, AuthError> {
    let server = tiny_http::Server::http(("127.0.0.1", request.callback_port))
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;

    let state = hex_nonce()?;
    let pkce = Pkce::generate()?;
    let authorize_url =
        provider.authorize_url(request.redirect_uri, request.scopes, &state, &pkce.challenge);

    eprintln!("Opening browser to: {authorize_url}");
    if let Err(error) = open::that(&authorize_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let timeout = request.timeout;
    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    let tokens: TokenSet = provider
        .exchange_code(&code, &pkce.verifier, request.redirect_uri)
        .await?
        .into();
    storage.store(&tokens)?;
    tracing::info!(subject = ?tokens.subject(), "signed in");
    Ok(tokens)
}

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` if the OS RNG is unavailable.
    pub fn generate() -> Result<Self, AuthError> {
        let mut bytes = [0u8; 32];
        getrandom::fill(&mut bytes)
            .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate verifier: {e}")))?;
        let verifier = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
        Ok(Self::from_verifier(verifier))
    }

    #[must_use]
    pub fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        let challenge = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        Self {
            verifier,
            challenge,
        }
    }
}

fn hex_nonce() -> Result<String, AuthError> {
    let mut nonce_bytes = [0u8; 16];
    getrandom::fill(&mut nonce_bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate CSRF nonce: {e}")))?;
    Ok(nonce_bytes.iter().map(|b| format!("{b:02x}")).collect())
}

enum Callback {
    Code(String),
    Denied(String),
    Incomplete,
}

fn parse_callback(query: &str, expected_state: &str) -> Result<Callback, AuthError> {
    let mut code = None;
    let mut state = None;
    let mut error = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error" | "error_description" => {
                error = Some(error.map_or(value.clone(), |prev| format!("{prev}: {value}")));
            }
            _ => {}
        }
    }

    if let Some(error) = error {
        return Ok(Callback::Denied(error));
    }
    let Some(code) = code else {
        return Ok(Callback::Incomplete);
    };
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::BrowserFlowFailed(
            "state mismatch, possible CSRF".into(),
        ));
    }
    Ok(Callback::Code(code))
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes("Content-Type", "text/html") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Block until the callback server receives the authorization code.
///
/// Requests for other paths (favicon, preflight) get a 204 and are ignored.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let (route, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
        if route != "/callback" {
            let _ = request.respond(tiny_http::Response::empty(204));
            continue;
        }

        match parse_callback(query, expected_state) {
            Ok(Callback::Code(code)) => {
                let _ = request.respond(html(
                    "<h1>Signed in</h1><p>You can close this tab and return to the terminal.</p>",
                ));
                return Ok(code);
            }
            Ok(Callback::Denied(reason)) => {
                let _ = request.respond(html("<h1>Sign-in failed</h1><p>Check CLI output.</p>"));
                return Err(AuthError::BrowserFlowFailed(reason));
            }
            Ok(Callback::Incomplete) => {
                let _ = request.respond(html("<h1>Waiting for sign-in…</h1>"));
            }
            Err(err) => {
                let _ = request.respond(html("<h1>Sign-in failed</h1><p>Check CLI output.</p>"));
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpStream;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pkce_challenge_matches_rfc7636_vector() {
        let pkce = Pkce::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".into());
        assert_eq!(pkce.challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn generated_verifier_is_43_chars() {
        let pkce = Pkce::generate().unwrap();
        assert_eq!(pkce.verifier.len(), 43);
        assert_ne!(pkce.verifier, pkce.challenge);
    }

    #[test]
    fn parse_callback_variants() {
        assert!(matches!(
            parse_callback("code=abc&state=s1", "s1").unwrap(),
            Callback::Code(c) if c == "abc"
        ));
        assert!(matches!(
            parse_callback("error=access_denied&error_description=User+cancelled", "s1").unwrap(),
            Callback::Denied(r) if r == "access_denied: User cancelled"
        ));
        assert!(matches!(
            parse_callback("", "s1").unwrap(),
            Callback::Incomplete
        ));
        assert!(parse_callback("code=abc&state=evil", "s1").is_err());
        assert!(parse_callback("code=abc", "s1").is_err());
    }

    fn send(port: u16, path: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
        write!(stream, "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").unwrap();
        let mut out = String::new();
        let _ = stream.read_to_string(&mut out);
        out
    }

    fn bound_server() -> (tiny_http::Server, u16) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        (server, port)
    }

    #[test]
    fn callback_ignores_other_paths_then_returns_code() {
        let (server, port) = bound_server();
        let client = std::thread::spawn(move || {
            let favicon = send(port, "/favicon.ico");
            let callback = send(port, "/callback?code=the-code&state=s1");
            (favicon, callback)
        });

        let code = wait_for_callback(&server, Duration::from_secs(5), "s1").unwrap();
        assert_eq!(code, "the-code");

        let (favicon, callback) = client.join().unwrap();
        assert!(favicon.starts_with("HTTP/1.1 204"));
        assert!(callback.contains("Signed in"));
    }

    #[test]
    fn callback_rejects_state_mismatch() {
        let (server, port) = bound_server();
        let client = std::thread::spawn(move || send(port, "/callback?code=c&state=other"));

        let err = wait_for_callback(&server, Duration::from_secs(5), "s1").unwrap_err();
        assert!(err.to_string().contains("state mismatch"));
        client.join().unwrap();
    }

    #[test]
    fn callback_times_out() {
        let (server, _port) = bound_server();
        let err = wait_for_callback(&server, Duration::from_millis(50), "s1").unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
