//! Users
//!
//! Descriptor table for `/admin/realms/{realm}/users`.

use serde::Serialize;
use std::sync::Arc;

use super::{BoundOperation, ById, Resource, UpdateOperation};
use crate::defs::{
    CredentialRepresentation, MappingsRepresentation, RequiredActionAlias, RoleMappingPayload,
    RoleRepresentation, UserRepresentation,
};
use crate::keycloak::client::ClientContext;
use crate::request::EndpointDescriptor;

const BASE_PATH: &str = "/admin/realms/{realm}/users";

const FIND: EndpointDescriptor = EndpointDescriptor::get("");
const CREATE: EndpointDescriptor = EndpointDescriptor::post("");
const COUNT: EndpointDescriptor = EndpointDescriptor::get("/count");

const FIND_ONE: EndpointDescriptor = EndpointDescriptor::get("/{id}")
    .url_params(&["id"])
    .catch_not_found();
const UPDATE: EndpointDescriptor = EndpointDescriptor::put("/{id}").url_params(&["id"]);
const DEL: EndpointDescriptor = EndpointDescriptor::delete("/{id}").url_params(&["id"]);

const LIST_ROLE_MAPPINGS: EndpointDescriptor = EndpointDescriptor::get("/{id}/role-mappings").url_params(&["id"]);

const ADD_REALM_ROLE_MAPPINGS: EndpointDescriptor = EndpointDescriptor::post("/{id}/role-mappings/realm")
    .url_params(&["id"])
    .payload_key("roles");
const LIST_REALM_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/role-mappings/realm").url_params(&["id"]);
const DEL_REALM_ROLE_MAPPINGS: EndpointDescriptor = EndpointDescriptor::delete("/{id}/role-mappings/realm")
    .url_params(&["id"])
    .payload_key("roles");
const LIST_AVAILABLE_REALM_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/role-mappings/realm/available").url_params(&["id"]);
const LIST_COMPOSITE_REALM_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/role-mappings/realm/composite").url_params(&["id"]);

const LIST_CLIENT_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/role-mappings/clients/{clientUniqueId}").url_params(&["id", "clientUniqueId"]);
const ADD_CLIENT_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::post("/{id}/role-mappings/clients/{clientUniqueId}")
        .url_params(&["id", "clientUniqueId"])
        .payload_key("roles");
const DEL_CLIENT_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::delete("/{id}/role-mappings/clients/{clientUniqueId}")
        .url_params(&["id", "clientUniqueId"])
        .payload_key("roles");
const LIST_AVAILABLE_CLIENT_ROLE_MAPPINGS: EndpointDescriptor =
    EndpointDescriptor::get("/{id}/role-mappings/clients/{clientUniqueId}/available")
        .url_params(&["id", "clientUniqueId"]);

/// The email carries a link the user follows to perform `actions`
const EXECUTE_ACTIONS_EMAIL: EndpointDescriptor = EndpointDescriptor::put("/{id}/execute-actions-email")
    .url_params(&["id"])
    .payload_key("actions")
    .querystring(&["lifespan", "clientId", "redirectUri"])
    .key_transform(&[("clientId", "client_id"), ("redirectUri", "redirect_uri")]);
const SEND_VERIFY_EMAIL: EndpointDescriptor = EndpointDescriptor::put("/{id}/send-verify-email")
    .url_params(&["id"])
    .querystring(&["clientId", "redirectUri"])
    .key_transform(&[("clientId", "client_id"), ("redirectUri", "redirect_uri")]);
const RESET_PASSWORD: EndpointDescriptor = EndpointDescriptor::put("/{id}/reset-password")
    .url_params(&["id"])
    .payload_key("credential");

/// Search filters for [`Users::find`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A user plus the roles to map or unmap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealmRoleMappings {
    pub id: String,
    pub roles: Vec<RoleMappingPayload>,
}

/// A user and a client (by internal id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClient {
    pub id: String,
    pub client_unique_id: String,
}

/// A user, a client (by internal id) and the client roles to map or unmap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRoleMappings {
    pub id: String,
    pub client_unique_id: String,
    pub roles: Vec<RoleMappingPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteActionsEmail {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Link validity in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<RequiredActionAlias>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerifyEmail {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetPassword {
    pub id: String,
    pub credential: CredentialRepresentation,
}

/// Operations on the users of one realm
#[derive(Clone)]
pub struct Users {
    pub find: BoundOperation<UserQuery, Vec<UserRepresentation>>,
    pub create: BoundOperation<UserRepresentation, ()>,
    pub count: BoundOperation<UserQuery, u64>,

    pub find_one: BoundOperation<ById, Option<UserRepresentation>>,
    pub update: UpdateOperation<ById, UserRepresentation, ()>,
    pub del: BoundOperation<ById, ()>,

    pub list_role_mappings: BoundOperation<ById, MappingsRepresentation>,

    pub add_realm_role_mappings: BoundOperation<RealmRoleMappings, ()>,
    pub list_realm_role_mappings: BoundOperation<ById, Vec<RoleRepresentation>>,
    pub del_realm_role_mappings: BoundOperation<RealmRoleMappings, ()>,
    pub list_available_realm_role_mappings: BoundOperation<ById, Vec<RoleRepresentation>>,
    pub list_composite_realm_role_mappings: BoundOperation<ById, Vec<RoleRepresentation>>,

    pub list_client_role_mappings: BoundOperation<UserClient, Vec<RoleRepresentation>>,
    pub add_client_role_mappings: BoundOperation<ClientRoleMappings, ()>,
    pub del_client_role_mappings: BoundOperation<ClientRoleMappings, ()>,
    pub list_available_client_role_mappings: BoundOperation<UserClient, Vec<RoleRepresentation>>,

    pub execute_actions_email: BoundOperation<ExecuteActionsEmail, ()>,
    pub send_verify_email: BoundOperation<SendVerifyEmail, ()>,
    pub reset_password: BoundOperation<ResetPassword, ()>,
}

impl Users {
    pub fn new(context: &Arc<ClientContext>) -> Self {
        let resource = Resource::new(
            Arc::clone(context),
            BASE_PATH,
            [("realm", context.realm_name())],
        );

        Self {
            find: resource.bind(FIND),
            create: resource.bind(CREATE),
            count: resource.bind(COUNT),
            find_one: resource.bind(FIND_ONE),
            update: resource.bind_update(UPDATE),
            del: resource.bind(DEL),
            list_role_mappings: resource.bind(LIST_ROLE_MAPPINGS),
            add_realm_role_mappings: resource.bind(ADD_REALM_ROLE_MAPPINGS),
            list_realm_role_mappings: resource.bind(LIST_REALM_ROLE_MAPPINGS),
            del_realm_role_mappings: resource.bind(DEL_REALM_ROLE_MAPPINGS),
            list_available_realm_role_mappings: resource.bind(LIST_AVAILABLE_REALM_ROLE_MAPPINGS),
            list_composite_realm_role_mappings: resource.bind(LIST_COMPOSITE_REALM_ROLE_MAPPINGS),
            list_client_role_mappings: resource.bind(LIST_CLIENT_ROLE_MAPPINGS),
            add_client_role_mappings: resource.bind(ADD_CLIENT_ROLE_MAPPINGS),
            del_client_role_mappings: resource.bind(DEL_CLIENT_ROLE_MAPPINGS),
            list_available_client_role_mappings: resource.bind(LIST_AVAILABLE_CLIENT_ROLE_MAPPINGS),
            execute_actions_email: resource.bind(EXECUTE_ACTIONS_EMAIL),
            send_verify_email: resource.bind(SEND_VERIFY_EMAIL),
            reset_password: resource.bind(RESET_PASSWORD),
        }
    }
}
