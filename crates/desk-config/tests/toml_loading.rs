//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use desk_config::{DeskConfig, TokenStorageKind};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.example.com"
timeout_secs = 20
"#,
        )?;

        let config: DeskConfig = Figment::from(Serialized::defaults(DeskConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 20);
        assert_eq!(config.api.connect_timeout_secs, 5);
        assert!(config.api.is_configured());
        Ok(())
    });
}

#[test]
fn loads_auth_and_cookie_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
domain = "https://auth.example.com"
client_id = "abc123"
storage = "cookie"
callback_port = 4000

[auth.cookie]
domain = "portal.io"
jar_path = "/tmp/desk-cookies.txt"
secure = false
"#,
        )?;

        let config: DeskConfig = Figment::from(Serialized::defaults(DeskConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.auth.is_configured());
        assert_eq!(config.auth.storage, TokenStorageKind::Cookie);
        assert_eq!(config.auth.redirect_uri(), "http://localhost:4000/callback");
        assert_eq!(config.auth.cookie.domain, "portal.io");
        assert_eq!(
            config.auth.cookie.jar_path.as_deref(),
            Some(std::path::Path::new("/tmp/desk-cookies.txt"))
        );
        assert!(!config.auth.cookie.secure);
        Ok(())
    });
}

#[test]
fn unknown_storage_kind_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
storage = "browser"
"#,
        )?;

        let result: Result<DeskConfig, _> =
            Figment::from(Serialized::defaults(DeskConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".casedesk")?;
        jail.create_file(
            ".casedesk/config.toml",
            r#"
[general]
page_size = 25
"#,
        )?;

        let config = DeskConfig::load().expect("config loads");
        assert_eq!(config.general.page_size, 25);
        assert_eq!(config.general.history_page_size, 50);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://from-toml.example.com"
"#,
        )?;
        jail.set_env("DESK_API__BASE_URL", "https://from-env.example.com");
        jail.set_env("DESK_AUTH__COOKIE__DOMAIN", "portal.io");

        let config: DeskConfig = Figment::from(Serialized::defaults(DeskConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("DESK_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://from-env.example.com");
        assert_eq!(config.auth.cookie.domain, "portal.io");
        Ok(())
    });
}
