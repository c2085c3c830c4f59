//! Networking modules for the remote campus API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns request/response interception over a pluggable transport,
//! `api` maps each remote endpoint to a typed helper, and `types` defines the
//! wire schema. `transport` is the browser `fetch` implementation.

pub mod api;
pub mod http;
#[cfg(feature = "csr")]
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod mock_transport;
