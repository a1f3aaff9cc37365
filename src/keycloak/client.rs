//! Keycloak Admin Client
//!
//! Owns the shared context (base URL, realm, transport, credentials) and the
//! resource tables bound to it.

use std::sync::Arc;

use super::auth::{PasswordGrant, StaticToken, TokenProvider};
use super::http::{ReqwestTransport, Transport};
use crate::config::Config;
use crate::error::Result;
use crate::resource::{Clients, Roles, Users};

/// State shared by reference among every resource of one client
pub struct ClientContext {
    base_url: String,
    realm_name: String,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn TokenProvider>,
}

impl ClientContext {
    pub fn new(
        base_url: &str,
        realm_name: &str,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            realm_name: realm_name.to_string(),
            transport,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn credentials(&self) -> &dyn TokenProvider {
        self.credentials.as_ref()
    }
}

/// Main admin API client
#[derive(Clone)]
pub struct KeycloakAdminClient {
    context: Arc<ClientContext>,
    pub users: Users,
    pub roles: Roles,
    pub clients: Clients,
}

impl KeycloakAdminClient {
    /// Create a client for `realm_name` over explicit collaborators
    pub fn new(
        base_url: &str,
        realm_name: &str,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn TokenProvider>,
    ) -> Self {
        Self::from_context(Arc::new(ClientContext::new(base_url, realm_name, transport, credentials)))
    }

    /// Client authenticating with the configured password grant
    ///
    /// Tokens are requested from the configured realm.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        let credentials = PasswordGrant::new(
            transport.client().clone(),
            &config.base_url,
            &config.realm_name,
            config.credentials.clone(),
        );

        Ok(Self::new(
            &config.base_url,
            &config.realm_name,
            Arc::new(transport),
            Arc::new(credentials),
        ))
    }

    /// Client sending a fixed bearer token
    pub fn with_token(config: &Config, token: &str) -> Result<Self> {
        Ok(Self::new(
            &config.base_url,
            &config.realm_name,
            Arc::new(ReqwestTransport::new()?),
            Arc::new(StaticToken::new(token)),
        ))
    }

    fn from_context(context: Arc<ClientContext>) -> Self {
        Self {
            users: Users::new(&context),
            roles: Roles::new(&context),
            clients: Clients::new(&context),
            context,
        }
    }

    /// A client addressing `realm_name`, sharing transport and credentials
    pub fn for_realm(&self, realm_name: &str) -> Self {
        Self::from_context(Arc::new(ClientContext::new(
            &self.context.base_url,
            realm_name,
            Arc::clone(&self.context.transport),
            Arc::clone(&self.context.credentials),
        )))
    }

    pub fn base_url(&self) -> &str {
        self.context.base_url()
    }

    pub fn realm_name(&self) -> &str {
        self.context.realm_name()
    }

    pub fn context(&self) -> &Arc<ClientContext> {
        &self.context
    }
}
