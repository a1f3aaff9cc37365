//! Clients
//!
//! Descriptor table for `/admin/realms/{realm}/clients`. Client endpoints are
//! addressed by the internal id, not the public `clientId`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{BoundOperation, ById, Resource, UpdateOperation};
use crate::defs::{ClientRepresentation, RoleRepresentation, UserRepresentation};
use crate::keycloak::client::ClientContext;
use crate::request::EndpointDescriptor;

const BASE_PATH: &str = "/admin/realms/{realm}/clients";

const FIND: EndpointDescriptor = EndpointDescriptor::get("");
const CREATE: EndpointDescriptor = EndpointDescriptor::post("");

const FIND_ONE: EndpointDescriptor = EndpointDescriptor::get("/{id}")
    .url_params(&["id"])
    .catch_not_found();
const UPDATE: EndpointDescriptor = EndpointDescriptor::put("/{id}").url_params(&["id"]);
const DEL: EndpointDescriptor = EndpointDescriptor::delete("/{id}").url_params(&["id"]);

const CREATE_ROLE: EndpointDescriptor = EndpointDescriptor::post("/{id}/roles")
    .url_params(&["id"])
    .payload_key("role");
const LIST_ROLES: EndpointDescriptor = EndpointDescriptor::get("/{id}/roles").url_params(&["id"]);
const FIND_ROLE: EndpointDescriptor = EndpointDescriptor::get("/{id}/roles/{roleName}")
    .url_params(&["id", "roleName"])
    .catch_not_found();
const UPDATE_ROLE: EndpointDescriptor =
    EndpointDescriptor::put("/{id}/roles/{roleName}").url_params(&["id", "roleName"]);
const DEL_ROLE: EndpointDescriptor =
    EndpointDescriptor::delete("/{id}/roles/{roleName}").url_params(&["id", "roleName"]);

const GET_SERVICE_ACCOUNT_USER: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/service-account-user").url_params(&["id"]);
const GENERATE_NEW_CLIENT_SECRET: EndpointDescriptor =
    EndpointDescriptor::post("/{id}/client-secret").url_params(&["id"]);
const GET_CLIENT_SECRET: EndpointDescriptor = EndpointDescriptor::get("/{id}/client-secret").url_params(&["id"]);

/// Filters for [`Clients::find`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    /// Public client identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewable_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClientRole {
    pub id: String,
    pub role: RoleRepresentation,
}

/// A client (by internal id) and one of its roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRole {
    pub id: String,
    pub role_name: String,
}

/// Secret of a confidential client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialValue {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Operations on the clients of one realm
#[derive(Clone)]
pub struct Clients {
    pub find: BoundOperation<ClientQuery, Vec<ClientRepresentation>>,
    pub create: BoundOperation<ClientRepresentation, ()>,

    pub find_one: BoundOperation<ById, Option<ClientRepresentation>>,
    pub update: UpdateOperation<ById, ClientRepresentation, ()>,
    pub del: BoundOperation<ById, ()>,

    pub create_role: BoundOperation<NewClientRole, ()>,
    pub list_roles: BoundOperation<ById, Vec<RoleRepresentation>>,
    pub find_role: BoundOperation<ClientRole, Option<RoleRepresentation>>,
    pub update_role: UpdateOperation<ClientRole, RoleRepresentation, ()>,
    pub del_role: BoundOperation<ClientRole, ()>,

    pub get_service_account_user: BoundOperation<ById, UserRepresentation>,
    pub generate_new_client_secret: BoundOperation<ById, CredentialValue>,
    pub get_client_secret: BoundOperation<ById, CredentialValue>,
}

impl Clients {
    pub fn new(context: &Arc<ClientContext>) -> Self {
        let resource = Resource::new(
            Arc::clone(context),
            BASE_PATH,
            [("realm", context.realm_name())],
        );

        Self {
            find: resource.bind(FIND),
            create: resource.bind(CREATE),
            find_one: resource.bind(FIND_ONE),
            update: resource.bind_update(UPDATE),
            del: resource.bind(DEL),
            create_role: resource.bind(CREATE_ROLE),
            list_roles: resource.bind(LIST_ROLES),
            find_role: resource.bind(FIND_ROLE),
            update_role: resource.bind_update(UPDATE_ROLE),
            del_role: resource.bind(DEL_ROLE),
            get_service_account_user: resource.bind(GET_SERVICE_ACCOUNT_USER),
            generate_new_client_secret: resource.bind(GENERATE_NEW_CLIENT_SECRET),
            get_client_secret: resource.bind(GET_CLIENT_SECRET),
        }
    }
}
