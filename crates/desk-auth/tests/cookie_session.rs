//! Cookie jar session refreshed through the token endpoint.

use base64::Engine as _;
use desk_auth::storage::CookieJarStorage;
use desk_auth::{AccessTokenSource, IdentityProvider, TokenManager, TokenSet, TokenStorage};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn jwt(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"RS256"}"#),
        engine.encode(payload),
        engine.encode("sig")
    )
}

#[tokio::test]
async fn expired_cookie_session_refreshes_and_rewrites_jar() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let jar_path = tmp.path().join("cookies.txt");
    let jar = CookieJarStorage::new(jar_path.clone(), "portal.io", "client123", false);

    let now = chrono::Utc::now().timestamp();
    jar.store(&TokenSet {
        access_token: jwt(&format!(r#"{{"sub":"u-1","exp":{}}}"#, now - 5)),
        id_token: None,
        refresh_token: Some("refresh-1".into()),
    })
    .expect("seed jar");

    let renewed = jwt(&format!(r#"{{"sub":"u-1","exp":{}}}"#, now + 3600));
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": renewed,
                "token_type": "Bearer",
                "expires_in": 3600
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = IdentityProvider::new(reqwest::Client::new(), &server.uri(), "client123");
    let manager = TokenManager::new(Box::new(jar), Some(provider));

    assert_eq!(manager.access_token().await.unwrap(), Some(renewed.clone()));

    let reread = CookieJarStorage::new(jar_path.clone(), "portal.io", "client123", false)
        .load()
        .unwrap()
        .expect("session");
    assert_eq!(reread.access_token, renewed);
    assert_eq!(reread.refresh_token.as_deref(), Some("refresh-1"));

    let content = std::fs::read_to_string(&jar_path).unwrap();
    assert!(content.contains(".portal.io\tTRUE\t/\tFALSE\t"));
}

#[tokio::test]
async fn logout_empties_the_jar() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let jar = CookieJarStorage::new(tmp.path().join("cookies.txt"), "portal.io", "c", true);
    jar.store(&TokenSet::from_access_token(jwt(r#"{"sub":"u-2"}"#)))
        .expect("store");

    desk_auth::logout(&jar).expect("logout");
    assert!(jar.load().unwrap().is_none());
}
