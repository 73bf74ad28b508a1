//! Akamai API integration
//!
//! - [`edgerc`] loads credentials from an `.edgerc` file
//! - [`signer`] computes EdgeGrid request signatures
//! - [`client`] defines the [`SignedApiClient`] seam and its HTTP implementation
//! - [`models`] holds the wire types of the endpoints awp reads

pub mod client;
pub mod edgerc;
pub mod models;
pub mod signer;

pub use client::{parse_query, EdgeGridClient, QueryParams, SignedApiClient};
pub use edgerc::{expand_home, EdgeRc};
pub use signer::EdgeGridSigner;
