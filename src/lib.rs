//! Typed client for the Keycloak admin REST API
//!
//! Each remote operation is declared as an [`EndpointDescriptor`]: method,
//! path template, which input fields are path parameters, query parameters or
//! the body, key renames, and whether "not found" is an absent result. A
//! [`resource::Resource`] binds descriptors to a base path and realm, and the
//! resulting [`BoundOperation`]s compile and dispatch requests at call time.
//!
//! # Module Structure
//!
//! - [`request`] - Descriptor compiler and executor
//! - [`resource`] - Resource base and the Users / Roles / Clients tables
//! - [`defs`] - Wire representations
//! - [`keycloak`] - Transport, credentials and the admin client
//! - [`config`] - Connection settings
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use kcadm::resource::ById;
//! use kcadm::{Config, KeycloakAdminClient};
//!
//! async fn example() -> kcadm::Result<()> {
//!     let client = KeycloakAdminClient::from_config(&Config::load())?;
//!     match client.users.find_one.call(&ById::new("abc")).await? {
//!         Some(user) => println!("{:?}", user.username),
//!         None => println!("no such user"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod defs;
pub mod error;
pub mod keycloak;
pub mod request;
pub mod resource;

pub use config::{Config, Credentials};
pub use error::{Error, Result, TransportError};
pub use keycloak::auth::{PasswordGrant, StaticToken, TokenProvider};
pub use keycloak::client::{ClientContext, KeycloakAdminClient};
pub use keycloak::http::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use request::{EndpointDescriptor, Method, ResolvedRequest};
pub use resource::{BoundOperation, Resource, UpdateOperation};
