//! Resource abstraction layer
//!
//! A [`Resource`] fixes a base path template and its base parameters (the
//! realm, typically) and turns [`EndpointDescriptor`]s into typed, callable
//! operations. Resource modules are tables of `const` descriptors bound once
//! when the client is built; adding an endpoint means adding a descriptor, not
//! code.
//!
//! # Resources
//!
//! - [`users`] - `/admin/realms/{realm}/users`
//! - [`roles`] - `/admin/realms/{realm}/roles` and `/roles-by-id`
//! - [`clients`] - `/admin/realms/{realm}/clients`
//!
//! # Example
//!
//! ```ignore
//! let user = client.users.find_one.call(&ById::new("abc")).await?;
//! ```

pub mod clients;
pub mod roles;
pub mod users;

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::keycloak::client::ClientContext;
use crate::request::{compile, compile_update, execute, to_call_input, EndpointDescriptor, ResolvedRequest};

pub use clients::Clients;
pub use roles::Roles;
pub use users::Users;

/// Input addressing a single entity by its `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ById {
    pub id: String,
}

impl ById {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Base path, base params and the shared context, frozen at construction
struct Binding {
    context: Arc<ClientContext>,
    base_path: &'static str,
    base_params: BTreeMap<String, String>,
}

/// Factory for operations under one base path
#[derive(Clone)]
pub struct Resource {
    binding: Arc<Binding>,
}

impl Resource {
    pub fn new<K, V>(
        context: Arc<ClientContext>,
        base_path: &'static str,
        base_params: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            binding: Arc::new(Binding {
                context,
                base_path,
                base_params: base_params
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            }),
        }
    }

    pub fn base_path(&self) -> &'static str {
        self.binding.base_path
    }

    pub fn base_params(&self) -> &BTreeMap<String, String> {
        &self.binding.base_params
    }

    /// Operation whose path, query and body are all drawn from one input
    pub fn bind<I, O>(&self, descriptor: EndpointDescriptor) -> BoundOperation<I, O> {
        BoundOperation {
            binding: Arc::clone(&self.binding),
            descriptor,
            _types: PhantomData,
        }
    }

    /// Operation taking path/query params and the body as separate inputs
    pub fn bind_update<Q, P, O>(&self, descriptor: EndpointDescriptor) -> UpdateOperation<Q, P, O> {
        UpdateOperation {
            binding: Arc::clone(&self.binding),
            descriptor,
            _types: PhantomData,
        }
    }
}

/// A descriptor closed over its resource's base path and params
///
/// `I` is the call input, `O` the decoded result. Descriptors that catch
/// "not found" are bound with `O = Option<T>`.
pub struct BoundOperation<I, O> {
    binding: Arc<Binding>,
    descriptor: EndpointDescriptor,
    _types: PhantomData<fn(&I) -> O>,
}

impl<I, O> Clone for BoundOperation<I, O> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
            descriptor: self.descriptor,
            _types: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for BoundOperation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundOperation")
            .field("base_path", &self.binding.base_path)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl<I, O> BoundOperation<I, O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    /// Compile the request for `input` without sending it
    pub fn resolve(&self, input: &I) -> Result<ResolvedRequest> {
        compile(
            self.binding.base_path,
            &self.binding.base_params,
            &self.descriptor,
            to_call_input(input)?,
        )
    }

    pub async fn call(&self, input: &I) -> Result<O> {
        let request = self.resolve(input)?;
        dispatch(&self.binding, &request, self.descriptor.catch_not_found).await
    }

    /// Like [`call`](Self::call), abandoning the request once `cancel` fires
    pub async fn call_cancellable(&self, input: &I, cancel: &CancellationToken) -> Result<O> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.call(input) => result,
        }
    }
}

/// Update-style operation: `Q` supplies path/query fields, `P` is the body
pub struct UpdateOperation<Q, P, O> {
    binding: Arc<Binding>,
    descriptor: EndpointDescriptor,
    _types: PhantomData<fn(&Q, &P) -> O>,
}

impl<Q, P, O> Clone for UpdateOperation<Q, P, O> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
            descriptor: self.descriptor,
            _types: PhantomData,
        }
    }
}

impl<Q, P, O> fmt::Debug for UpdateOperation<Q, P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateOperation")
            .field("base_path", &self.binding.base_path)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl<Q, P, O> UpdateOperation<Q, P, O>
where
    Q: Serialize,
    P: Serialize,
    O: DeserializeOwned,
{
    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    pub fn resolve(&self, query: &Q, payload: &P) -> Result<ResolvedRequest> {
        let payload = serde_json::to_value(payload).map_err(|e| Error::InvalidInput(e.to_string()))?;
        compile_update(
            self.binding.base_path,
            &self.binding.base_params,
            &self.descriptor,
            to_call_input(query)?,
            payload,
        )
    }

    pub async fn call(&self, query: &Q, payload: &P) -> Result<O> {
        let request = self.resolve(query, payload)?;
        dispatch(&self.binding, &request, self.descriptor.catch_not_found).await
    }
}

async fn dispatch<O: DeserializeOwned>(binding: &Binding, request: &ResolvedRequest, catch_not_found: bool) -> Result<O> {
    let context = &binding.context;
    execute(
        context.transport(),
        context.credentials(),
        context.base_url(),
        request,
        catch_not_found,
    )
    .await
}
