//! Netscape cookie jar adapter.
//!
//! Writes the session the way the hosted UI's cookie storage lays it out so a
//! local proxy (or `curl -b`) can reuse it. Lines that are not ours are kept.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use super::{TokenStorage, write_private};
use crate::error::AuthError;
use crate::tokens::TokenSet;

const JAR_HEADER: &str = "# Netscape HTTP Cookie File";
const COOKIE_PREFIX: &str = "CognitoIdentityServiceProvider";

const ACCESS_TTL_SECS: i64 = 600;
const ID_TTL_SECS: i64 = 3600;
const LAST_USER_TTL_SECS: i64 = 3600;
const LONG_TTL_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cookie {
    domain: String,
    path: String,
    secure: bool,
    /// Unix seconds; `0` marks a session cookie.
    expires: i64,
    name: String,
    value: String,
}

impl Cookie {
    fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [domain, _subdomains, path, secure, expires, name, value] = fields.as_slice() else {
            return None;
        };
        Some(Self {
            domain: (*domain).to_string(),
            path: (*path).to_string(),
            secure: secure.eq_ignore_ascii_case("TRUE"),
            expires: expires.parse().ok()?,
            name: (*name).to_string(),
            value: (*value).to_string(),
        })
    }

    fn to_line(&self) -> String {
        let flag = |b: bool| if b { "TRUE" } else { "FALSE" };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.domain,
            flag(self.domain.starts_with('.')),
            self.path,
            flag(self.secure),
            self.expires,
            self.name,
            self.value
        )
    }

    fn is_live(&self, now: i64) -> bool {
        self.expires == 0 || self.expires > now
    }
}

/// Token storage backed by a cookie jar file.
#[derive(Debug, Clone)]
pub struct CookieJarStorage {
    path: PathBuf,
    domain: String,
    client_id: String,
    secure: bool,
}

impl CookieJarStorage {
    #[must_use]
    pub fn new(path: PathBuf, domain: &str, client_id: &str, secure: bool) -> Self {
        Self {
            path,
            domain: format!(".{}", domain.trim_start_matches('.')),
            client_id: client_id.to_string(),
            secure,
        }
    }

    fn client_prefix(&self) -> String {
        format!("{COOKIE_PREFIX}.{}.", self.client_id)
    }

    fn read_lines(&self) -> Result<Vec<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Jar lines minus the header and every cookie this client owns.
    fn foreign_lines(&self) -> Result<Vec<String>, AuthError> {
        let prefix = self.client_prefix();
        Ok(self
            .read_lines()?
            .into_iter()
            .filter(|line| line.trim() != JAR_HEADER)
            .filter(|line| Cookie::parse(line).is_none_or(|c| !c.name.starts_with(&prefix)))
            .collect())
    }

    fn write_jar(&self, mut lines: Vec<String>) -> Result<(), AuthError> {
        lines.insert(0, JAR_HEADER.to_string());
        let mut contents = lines.join("\n");
        contents.push('\n');
        write_private(&self.path, &contents)
    }

    fn cookie(&self, name: String, value: &str, ttl_secs: i64, now: i64) -> Cookie {
        Cookie {
            domain: self.domain.clone(),
            path: "/".into(),
            secure: self.secure,
            expires: now + ttl_secs,
            name,
            value: value.to_string(),
        }
    }
}

impl TokenStorage for CookieJarStorage {
    fn load(&self) -> Result<Option<TokenSet>, AuthError> {
        let now = Utc::now().timestamp();
        let prefix = self.client_prefix();
        let cookies: Vec<Cookie> = self
            .read_lines()?
            .iter()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| Cookie::parse(line))
            .filter(|c| c.name.starts_with(&prefix) && c.is_live(now))
            .collect();

        let value_of = |name: &str| {
            cookies
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.value.clone())
                .filter(|v| !v.is_empty())
        };

        let Some(sub) = value_of(&format!("{prefix}LastAuthUser")) else {
            return Ok(None);
        };
        let user_prefix = format!("{prefix}{sub}");
        let access_token = value_of(&format!("{user_prefix}.accessToken"));
        let refresh_token = value_of(&format!("{user_prefix}.refreshToken"));
        if access_token.is_none() && refresh_token.is_none() {
            return Ok(None);
        }

        Ok(Some(TokenSet {
            access_token: access_token.unwrap_or_default(),
            id_token: value_of(&format!("{user_prefix}.idToken")),
            refresh_token,
        }))
    }

    fn store(&self, tokens: &TokenSet) -> Result<(), AuthError> {
        let sub = tokens
            .subject()
            .ok_or_else(|| AuthError::InvalidToken("token has no `sub` claim".into()))?;
        let now = Utc::now().timestamp();
        let user_prefix = format!("{}{sub}", self.client_prefix());

        let mut ours = vec![self.cookie(
            format!("{user_prefix}.accessToken"),
            &tokens.access_token,
            ACCESS_TTL_SECS,
            now,
        )];
        if let Some(refresh) = &tokens.refresh_token {
            ours.push(self.cookie(
                format!("{user_prefix}.refreshToken"),
                refresh,
                LONG_TTL_SECS,
                now,
            ));
        }
        if let Some(id) = &tokens.id_token {
            ours.push(self.cookie(format!("{user_prefix}.idToken"), id, ID_TTL_SECS, now));
        }
        ours.push(self.cookie(format!("{user_prefix}.clockDrift"), "0", LONG_TTL_SECS, now));
        ours.push(self.cookie(
            format!("{}LastAuthUser", self.client_prefix()),
            &sub,
            LAST_USER_TTL_SECS,
            now,
        ));

        let mut lines = self.foreign_lines()?;
        lines.extend(ours.iter().map(Cookie::to_line));
        self.write_jar(lines)
    }

    fn clear(&self) -> Result<(), AuthError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.write_jar(self.foreign_lines()?)
    }

    fn describe(&self) -> String {
        format!("cookie jar ({})", self.path.display())
    }
}
