//! External system integrations for awp.
//!
//! - [`akamai`] - EdgeGrid-signed access to the Akamai management APIs
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core engine can
//! be tested with in-memory implementations. The core only sees
//! [`SignedApiClient`](akamai::SignedApiClient):
//!
//! ```rust,no_run
//! use awp::adapters::akamai::{EdgeGridClient, EdgeRc, SignedApiClient};
//! use awp::config::HttpConfig;
//! use std::sync::Arc;
//!
//! # fn example() -> awp::domain::Result<()> {
//! let edgerc = EdgeRc::from_file("~/.edgerc", "default")?;
//! let client: Arc<dyn SignedApiClient> =
//!     Arc::new(EdgeGridClient::new(&edgerc, &HttpConfig::default(), None)?);
//! # Ok(())
//! # }
//! ```

pub mod akamai;
