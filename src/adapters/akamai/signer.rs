//! EdgeGrid `EG1-HMAC-SHA256` request signing
//!
//! Every request carries an `Authorization` header of the form
//!
//! ```text
//! EG1-HMAC-SHA256 client_token=..;access_token=..;timestamp=..;nonce=..;signature=..
//! ```
//!
//! The signature is an HMAC-SHA256 over the request line, a hash of the body
//! (POST only) and the header prefix itself, keyed with a per-request key
//! derived from the client secret and the timestamp.

use super::edgerc::EdgeRc;
use crate::config::SecretString;
use crate::domain::{AwpError, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Formats a timestamp the way EdgeGrid expects it
pub fn eg_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H:%M:%S+0000").to_string()
}

/// Signs requests with the credentials of one `.edgerc` section
#[derive(Debug, Clone)]
pub struct EdgeGridSigner {
    client_token: SecretString,
    client_secret: SecretString,
    access_token: SecretString,
    max_body: usize,
}

impl EdgeGridSigner {
    /// Creates a signer; the section's `max-body` wins over `default_max_body`
    pub fn new(edgerc: &EdgeRc, default_max_body: usize) -> Self {
        Self {
            client_token: edgerc.client_token.clone(),
            client_secret: edgerc.client_secret.clone(),
            access_token: edgerc.access_token.clone(),
            max_body: edgerc.max_body.unwrap_or(default_max_body),
        }
    }

    /// Number of body bytes covered by the content hash
    pub fn max_body(&self) -> usize {
        self.max_body
    }

    /// Builds the `Authorization` header for a request sent now
    ///
    /// # Errors
    ///
    /// Returns [`AwpError::Credentials`] if the URL has no host or the signing key
    /// cannot be created.
    pub fn authorization(&self, method: &Method, url: &Url, body: Option<&[u8]>) -> Result<String> {
        let timestamp = eg_timestamp(Utc::now());
        let nonce = uuid::Uuid::new_v4().to_string();
        self.authorization_at(method, url, body, &timestamp, &nonce)
    }

    /// Builds the `Authorization` header for a fixed timestamp and nonce
    pub fn authorization_at(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String> {
        let auth_prefix = format!(
            "{ALGORITHM} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
            self.client_token.expose_secret().as_ref(),
            self.access_token.expose_secret().as_ref(),
        );

        let data_to_sign = self.data_to_sign(method, url, body, &auth_prefix)?;
        let signing_key = hmac_base64(self.client_secret.expose_secret().as_bytes(), timestamp.as_bytes())?;
        let signature = hmac_base64(signing_key.as_bytes(), data_to_sign.as_bytes())?;

        Ok(format!("{auth_prefix}signature={signature}"))
    }

    fn data_to_sign(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        auth_prefix: &str,
    ) -> Result<String> {
        let host = url
            .host_str()
            .ok_or_else(|| AwpError::Credentials(format!("Cannot sign a URL without host: {url}")))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let mut relative_url = url.path().to_string();
        if let Some(query) = url.query() {
            relative_url.push('?');
            relative_url.push_str(query);
        }

        let fields = [
            method.as_str().to_uppercase(),
            url.scheme().to_string(),
            host,
            relative_url,
            String::new(),
            self.content_hash(method, body),
            auth_prefix.to_string(),
        ];
        Ok(fields.join("\t"))
    }

    fn content_hash(&self, method: &Method, body: Option<&[u8]>) -> String {
        match body {
            Some(body) if *method == Method::POST && !body.is_empty() => {
                let end = body.len().min(self.max_body);
                general_purpose::STANDARD.encode(Sha256::digest(&body[..end]))
            }
            _ => String::new(),
        }
    }
}

fn hmac_base64(key: &[u8], data: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AwpError::Credentials(format!("Invalid signing key: {e}")))?;
    mac.update(data);
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TIMESTAMP: &str = "20140321T19:34:21+0000";
    const NONCE: &str = "nonce-xx-xxxx-xxxx-xxxx-xxxxxxxxxxxx";

    fn signer(max_body: Option<usize>) -> EdgeGridSigner {
        let contents = "[default]\n\
            host = akaa-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net\n\
            client_token = akab-client-token-xxx-xxxxxxxxxxxxxxxx\n\
            client_secret = SOMESECRET\n\
            access_token = akab-access-token-xxx-xxxxxxxxxxxxxxxx\n";
        let mut edgerc = EdgeRc::parse(contents, "default").unwrap();
        edgerc.max_body = max_body;
        EdgeGridSigner::new(&edgerc, 131_072)
    }

    fn url(path: &str) -> Url {
        Url::parse(&format!(
            "https://akaa-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net{path}"
        ))
        .unwrap()
    }

    fn signature_of(header: &str) -> &str {
        header.rsplit_once("signature=").unwrap().1
    }

    #[test]
    fn test_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2014, 3, 21, 19, 34, 21).unwrap();
        assert_eq!(eg_timestamp(now), TIMESTAMP);
    }

    #[test]
    fn test_header_layout() {
        let header = signer(None)
            .authorization_at(&Method::GET, &url("/papi/v1/groups"), None, TIMESTAMP, NONCE)
            .unwrap();

        assert!(header.starts_with(
            "EG1-HMAC-SHA256 client_token=akab-client-token-xxx-xxxxxxxxxxxxxxxx;\
             access_token=akab-access-token-xxx-xxxxxxxxxxxxxxxx;\
             timestamp=20140321T19:34:21+0000;\
             nonce=nonce-xx-xxxx-xxxx-xxxx-xxxxxxxxxxxx;signature="
        ));
        let signature = general_purpose::STANDARD.decode(signature_of(&header)).unwrap();
        assert_eq!(signature.len(), 32);
    }

    #[test]
    fn test_signature_matches_manual_computation() {
        let s = signer(None);
        let target = url("/papi/v1/properties?contractId=ctr_1&groupId=grp_1");
        let header = s
            .authorization_at(&Method::GET, &target, None, TIMESTAMP, NONCE)
            .unwrap();

        let prefix = header.rsplit_once("signature=").unwrap().0;
        let data = format!(
            "GET\thttps\takaa-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net\t\
             /papi/v1/properties?contractId=ctr_1&groupId=grp_1\t\t\t{prefix}"
        );
        let signing_key = hmac_base64(b"SOMESECRET", TIMESTAMP.as_bytes()).unwrap();
        let expected = hmac_base64(signing_key.as_bytes(), data.as_bytes()).unwrap();

        assert_eq!(signature_of(&header), expected);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let s = signer(None);
        let target = url("/papi/v1/groups");
        let a = s.authorization_at(&Method::GET, &target, None, TIMESTAMP, NONCE).unwrap();
        let b = s.authorization_at(&Method::GET, &target, None, TIMESTAMP, NONCE).unwrap();
        assert_eq!(a, b);

        let c = s
            .authorization_at(&Method::GET, &target, None, TIMESTAMP, "other-nonce")
            .unwrap();
        assert_ne!(signature_of(&a), signature_of(&c));
    }

    #[test]
    fn test_body_is_hashed_for_post_only() {
        let s = signer(None);
        let target = url("/papi/v1/search/find-by-value");
        let body = br#"{"propertyName":"www.example.com"}"#;

        let post_without = s
            .authorization_at(&Method::POST, &target, None, TIMESTAMP, NONCE)
            .unwrap();
        let post_with = s
            .authorization_at(&Method::POST, &target, Some(body), TIMESTAMP, NONCE)
            .unwrap();
        assert_ne!(signature_of(&post_without), signature_of(&post_with));

        for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
            let without = s
                .authorization_at(&method, &target, None, TIMESTAMP, NONCE)
                .unwrap();
            let with = s
                .authorization_at(&method, &target, Some(body), TIMESTAMP, NONCE)
                .unwrap();
            assert_eq!(signature_of(&without), signature_of(&with), "{method}");
        }
    }

    #[test]
    fn test_body_hash_truncated_to_max_body() {
        let s = signer(Some(4));
        assert_eq!(s.max_body(), 4);
        let target = url("/papi/v1/search/find-by-value");

        let a = s
            .authorization_at(&Method::POST, &target, Some(b"abcdXXXX"), TIMESTAMP, NONCE)
            .unwrap();
        let b = s
            .authorization_at(&Method::POST, &target, Some(b"abcdYYYY"), TIMESTAMP, NONCE)
            .unwrap();
        assert_eq!(signature_of(&a), signature_of(&b));
    }

    #[test]
    fn test_port_is_part_of_signed_host() {
        let s = signer(None);
        let plain = Url::parse("http://127.0.0.1/papi/v1/groups").unwrap();
        let with_port = Url::parse("http://127.0.0.1:8080/papi/v1/groups").unwrap();

        let a = s.authorization_at(&Method::GET, &plain, None, TIMESTAMP, NONCE).unwrap();
        let b = s
            .authorization_at(&Method::GET, &with_port, None, TIMESTAMP, NONCE)
            .unwrap();
        assert_ne!(signature_of(&a), signature_of(&b));
    }
}
