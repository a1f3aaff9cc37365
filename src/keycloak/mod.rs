//! Keycloak collaborators
//!
//! The transport, the credential source and the client context that binds
//! them to the resource tables.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer token providers (static token, password grant)
//! - [`client`] - Shared context and the admin client
//! - [`http`] - Transport trait and its `reqwest` implementation
//!
//! # Example
//!
//! ```ignore
//! use kcadm::{Config, KeycloakAdminClient};
//!
//! async fn example() -> kcadm::Result<()> {
//!     let client = KeycloakAdminClient::from_config(&Config::load())?;
//!     let users = client.users.find.call(&Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;
