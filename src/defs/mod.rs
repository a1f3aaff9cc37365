//! Admin API representations
//!
//! Wire types exchanged with the admin endpoints. Field names follow the
//! server's camelCase JSON; every field is optional because the server omits
//! what it does not know or the caller did not set.

mod client;
mod mappings;
mod required_action;
mod role;
mod user;

pub use client::ClientRepresentation;
pub use mappings::{ClientMappingsRepresentation, MappingsRepresentation};
pub use required_action::RequiredActionAlias;
pub use role::{Composites, RoleMappingPayload, RoleRepresentation};
pub use user::{CredentialRepresentation, FederatedIdentityRepresentation, UserRepresentation};
