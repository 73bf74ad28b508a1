//! `.edgerc` credential file loading
//!
//! The file is INI-formatted: `[section]` headers followed by `key = value`
//! lines. Lines starting with `#` or `;` are comments.
//!
//! ```ini
//! [default]
//! host = akab-xxxxxxxx.luna.akamaiapis.net
//! client_token = akab-client-token
//! client_secret = secret
//! access_token = akab-access-token
//! max-body = 131072
//! ```

use crate::config::{secret_string, SecretString};
use crate::domain::{AwpError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const REQUIRED_KEYS: [&str; 4] = ["host", "client_token", "client_secret", "access_token"];

/// Credentials of one `.edgerc` section
#[derive(Debug, Clone)]
pub struct EdgeRc {
    /// API host, e.g. `akab-xxxxxxxx.luna.akamaiapis.net`
    pub host: String,

    /// Client token
    pub client_token: SecretString,

    /// Client secret used to derive the signing key
    pub client_secret: SecretString,

    /// Access token
    pub access_token: SecretString,

    /// Signature body limit from the `max-body` (or `max_body`) entry
    pub max_body: Option<usize>,
}

impl EdgeRc {
    /// Loads `section` from the `.edgerc` file at `path`
    ///
    /// A leading `~` in `path` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`AwpError::Credentials`] if the file cannot be read, the
    /// section does not exist, or a required key is missing or empty.
    pub fn from_file(path: &str, section: &str) -> Result<Self> {
        let resolved = expand_home(path);
        let contents = fs::read_to_string(&resolved).map_err(|e| {
            AwpError::Credentials(format!(
                "Failed to read credentials file {}: {}",
                resolved.display(),
                e
            ))
        })?;

        Self::parse(&contents, section).map_err(|e| match e {
            AwpError::Credentials(msg) => {
                AwpError::Credentials(format!("{msg} in {}", resolved.display()))
            }
            other => other,
        })
    }

    /// Parses `section` from `.edgerc` contents
    ///
    /// # Errors
    ///
    /// Returns [`AwpError::Credentials`] if the section or a required key is missing.
    pub fn parse(contents: &str, section: &str) -> Result<Self> {
        let sections = parse_ini(contents);
        let mut values = sections.get(section).cloned().ok_or_else(|| {
            AwpError::Credentials(format!("Section [{section}] not found"))
        })?;

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| values.get(*key).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(AwpError::Credentials(format!(
                "Section [{section}] is missing: {}",
                missing.join(", ")
            )));
        }

        let max_body = match values.get("max-body").or_else(|| values.get("max_body")) {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                AwpError::Credentials(format!(
                    "Section [{section}] has an invalid max-body value: {raw}"
                ))
            })?),
            None => None,
        };

        let mut take = |key: &str| values.remove(key).unwrap_or_default();
        let host = normalize_host(&take("host"));

        Ok(Self {
            host,
            client_token: secret_string(take("client_token")),
            client_secret: secret_string(take("client_secret")),
            access_token: secret_string(take("access_token")),
            max_body,
        })
    }

    /// Base URL requests are sent to
    ///
    /// A host carrying an explicit scheme is kept as-is; otherwise `https` is used.
    pub fn base_url(&self) -> String {
        if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        }
    }
}

/// Expands a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            Path::new(&home).join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(path),
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

fn parse_ini(contents: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some(section) = &current else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) {
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    sections
}
