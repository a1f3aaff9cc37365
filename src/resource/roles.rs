//! Roles
//!
//! Realm roles, addressed by name under `/roles` or by id under `/roles-by-id`.

use serde::Serialize;
use std::sync::Arc;

use super::{BoundOperation, ById, Resource, UpdateOperation};
use crate::defs::{RoleRepresentation, UserRepresentation};
use crate::keycloak::client::ClientContext;
use crate::request::EndpointDescriptor;

const BASE_PATH: &str = "/admin/realms/{realm}";

const FIND: EndpointDescriptor = EndpointDescriptor::get("/roles");
const CREATE: EndpointDescriptor = EndpointDescriptor::post("/roles");

const FIND_ONE_BY_NAME: EndpointDescriptor = EndpointDescriptor::get("/roles/{name}")
    .url_params(&["name"])
    .catch_not_found();
const UPDATE_BY_NAME: EndpointDescriptor = EndpointDescriptor::put("/roles/{name}").url_params(&["name"]);
const DEL_BY_NAME: EndpointDescriptor = EndpointDescriptor::delete("/roles/{name}").url_params(&["name"]);
const FIND_USERS_WITH_ROLE: EndpointDescriptor = EndpointDescriptor::get("/roles/{name}/users")
    .url_params(&["name"])
    .querystring(&["first", "max"]);

const FIND_ONE_BY_ID: EndpointDescriptor = EndpointDescriptor::get("/roles-by-id/{id}")
    .url_params(&["id"])
    .catch_not_found();
const UPDATE_BY_ID: EndpointDescriptor = EndpointDescriptor::put("/roles-by-id/{id}").url_params(&["id"]);
const DEL_BY_ID: EndpointDescriptor = EndpointDescriptor::delete("/roles-by-id/{id}").url_params(&["id"]);

/// Paging and search for [`Roles::find`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_representation: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByName {
    pub name: String,
}

impl ByName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersWithRole {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Operations on the realm roles of one realm
#[derive(Clone)]
pub struct Roles {
    pub find: BoundOperation<RoleQuery, Vec<RoleRepresentation>>,
    pub create: BoundOperation<RoleRepresentation, ()>,

    pub find_one_by_name: BoundOperation<ByName, Option<RoleRepresentation>>,
    pub update_by_name: UpdateOperation<ByName, RoleRepresentation, ()>,
    pub del_by_name: BoundOperation<ByName, ()>,
    pub find_users_with_role: BoundOperation<UsersWithRole, Vec<UserRepresentation>>,

    pub find_one_by_id: BoundOperation<ById, Option<RoleRepresentation>>,
    pub update_by_id: UpdateOperation<ById, RoleRepresentation, ()>,
    pub del_by_id: BoundOperation<ById, ()>,
}

impl Roles {
    pub fn new(context: &Arc<ClientContext>) -> Self {
        let resource = Resource::new(
            Arc::clone(context),
            BASE_PATH,
            [("realm", context.realm_name())],
        );

        Self {
            find: resource.bind(FIND),
            create: resource.bind(CREATE),
            find_one_by_name: resource.bind(FIND_ONE_BY_NAME),
            update_by_name: resource.bind_update(UPDATE_BY_NAME),
            del_by_name: resource.bind(DEL_BY_NAME),
            find_users_with_role: resource.bind(FIND_USERS_WITH_ROLE),
            find_one_by_id: resource.bind(FIND_ONE_BY_ID),
            update_by_id: resource.bind_update(UPDATE_BY_ID),
            del_by_id: resource.bind(DEL_BY_ID),
        }
    }
}
