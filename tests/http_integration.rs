//! Integration tests for bound operations using wiremock
//!
//! These tests drive the full pipeline (descriptor compilation, credential,
//! reqwest transport, response interpretation) against mocked endpoints.

use std::sync::Arc;

use kcadm::defs::{RequiredActionAlias, RoleMappingPayload, UserRepresentation};
use kcadm::resource::roles::ByName;
use kcadm::resource::users::{ExecuteActionsEmail, RealmRoleMappings, UserQuery};
use kcadm::resource::ById;
use kcadm::{
    BoundOperation, Config, Credentials, EndpointDescriptor, Error, KeycloakAdminClient, PasswordGrant, Resource,
    ReqwestTransport, StaticToken, TokenProvider,
};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> KeycloakAdminClient {
    KeycloakAdminClient::new(
        &server.uri(),
        "master",
        Arc::new(ReqwestTransport::new().expect("transport")),
        Arc::new(StaticToken::new("test-token")),
    )
}

/// Test module for the admin resources
mod resource_tests {
    use super::*;

    /// GET with query filters returns parsed users
    #[tokio::test]
    async fn test_find_users_with_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users"))
            .and(query_param("search", "jane"))
            .and(query_param("max", "10"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "u1", "username": "jane", "enabled": true},
                {"id": "u2", "username": "janet", "enabled": false}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let query = UserQuery {
            search: Some("jane".into()),
            max: Some(10),
            ..Default::default()
        };
        let users = client_for(&server).users.find.call(&query).await.expect("find");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username.as_deref(), Some("jane"));
        assert_eq!(users[1].enabled, Some(false));
    }

    /// Users carrying server-specific required actions still decode
    #[tokio::test]
    async fn test_find_users_with_unregistered_required_action() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "u1", "requiredActions": ["webauthn-register", "UPDATE_PASSWORD"]}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let users = client_for(&server)
            .users
            .find
            .call(&UserQuery::default())
            .await
            .expect("find");

        assert_eq!(
            users[0].required_actions,
            Some(vec![
                RequiredActionAlias::Other("webauthn-register".into()),
                RequiredActionAlias::UpdatePassword,
            ])
        );
    }

    /// Role mapping lookup resolves under the realm base path
    #[tokio::test]
    async fn test_list_realm_role_mappings() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users/abc/role-mappings/realm"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "r1", "name": "offline_access"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let roles = client_for(&server)
            .users
            .list_realm_role_mappings
            .call(&ById::new("abc"))
            .await
            .expect("role mappings");

        assert_eq!(roles[0].name.as_deref(), Some("offline_access"));
    }

    /// POST with payload key sends only the role list
    #[tokio::test]
    async fn test_add_realm_role_mappings_sends_role_list() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/realms/master/users/abc/role-mappings/realm"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!([{"id": "r1", "name": "admin"}])))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let input = RealmRoleMappings {
            id: "abc".into(),
            roles: vec![RoleMappingPayload::new("r1", "admin")],
        };
        client_for(&server)
            .users
            .add_realm_role_mappings
            .call(&input)
            .await
            .expect("add mappings");
    }

    /// Query fields are renamed on the wire, the action list is the body
    #[tokio::test]
    async fn test_execute_actions_email() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/admin/realms/master/users/abc/execute-actions-email"))
            .and(query_param("client_id", "account"))
            .and(query_param("lifespan", "3600"))
            .and(body_json(json!(["UPDATE_PASSWORD", "VERIFY_EMAIL"])))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let input = ExecuteActionsEmail {
            id: "abc".into(),
            client_id: Some("account".into()),
            lifespan: Some(3600),
            redirect_uri: None,
            actions: Some(vec![RequiredActionAlias::UpdatePassword, RequiredActionAlias::VerifyEmail]),
        };
        client_for(&server)
            .users
            .execute_actions_email
            .call(&input)
            .await
            .expect("actions email");
    }

    /// 5xx bodies are preserved on the error
    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/clients"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .clients
            .find
            .call(&Default::default())
            .await
            .expect_err("500 must fail");

        assert!(matches!(err, Error::Remote { status: 500, ref body } if body == "boom"));
    }

    /// Create with an empty 201 body decodes as void
    #[tokio::test]
    async fn test_create_user_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/realms/master/users"))
            .and(body_json(json!({"username": "jane", "enabled": true})))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("location", "/admin/realms/master/users/u1"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let user = UserRepresentation {
            username: Some("jane".into()),
            enabled: Some(true),
            ..Default::default()
        };
        client_for(&server).users.create.call(&user).await.expect("create");
    }

    /// findOne catches 404 as an absent user
    #[tokio::test]
    async fn test_find_one_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "User not found"})))
            .expect(1)
            .mount(&server)
            .await;

        let user = client_for(&server)
            .users
            .find_one
            .call(&ById::new("missing"))
            .await
            .expect("absent is not an error");

        assert!(user.is_none());
    }

    /// 404 without catchNotFound surfaces as a remote error with the raw body
    #[tokio::test]
    async fn test_delete_not_found_is_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/admin/realms/master/users/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .users
            .del
            .call(&ById::new("missing"))
            .await
            .expect_err("404 must fail");

        assert!(matches!(err, Error::Remote { status: 404, ref body } if body == "User not found"));
    }

    /// 403 is never converted, even on catching descriptors
    #[tokio::test]
    async fn test_403_returns_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/roles/admin"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "HTTP 403 Forbidden"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .roles
            .find_one_by_name
            .call(&ByName::new("admin"))
            .await
            .expect_err("403 must fail");

        assert_eq!(err.status(), Some(403));
    }

    /// Path parameters with slashes stay a single segment
    #[tokio::test]
    async fn test_path_param_is_percent_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/roles/team%2Fadmins"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "team/admins"})))
            .expect(1)
            .mount(&server)
            .await;

        let role = client_for(&server)
            .roles
            .find_one_by_name
            .call(&ByName::new("team/admins"))
            .await
            .expect("lookup");

        assert_eq!(role.and_then(|r| r.name).as_deref(), Some("team/admins"));
    }

    /// Missing path parameters never reach the network
    #[tokio::test]
    async fn test_missing_param_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let resource = Resource::new(
            Arc::clone(client.context()),
            "/admin/realms/{realm}/users",
            [("realm", "master")],
        );
        let op: BoundOperation<serde_json::Value, Vec<serde_json::Value>> =
            resource.bind(EndpointDescriptor::get("/{id}/groups").url_params(&["id"]));

        let err = op.call(&json!({"id": null})).await.expect_err("id is missing");
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "id"));
    }

    /// Dot segments and empty ids are rejected before they can address a parent
    #[tokio::test]
    async fn test_dot_segment_id_never_escapes_the_user() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "x"})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for id in ["..", ".", ""] {
            let err = client.users.del.call(&ById::new(id)).await.expect_err("must be rejected");
            assert!(matches!(err, Error::InvalidInput(_)), "{id:?}: {err}");
        }
        let err = client
            .roles
            .find_one_by_name
            .call(&ByName::new("."))
            .await
            .expect_err("must be rejected");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    /// Connection failures are transport errors, not remote errors
    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 1
        let client = KeycloakAdminClient::new(
            "http://127.0.0.1:1",
            "master",
            Arc::new(ReqwestTransport::new().expect("transport")),
            Arc::new(StaticToken::new("test-token")),
        );
        let err = client.roles.find.call(&Default::default()).await.expect_err("no server");

        assert!(matches!(err, Error::Transport(_)));
    }

    /// Concurrent calls are independent
    #[tokio::test]
    async fn test_concurrent_calls() {
        let server = MockServer::start().await;

        for id in ["a", "b", "c"] {
            Mock::given(method("GET"))
                .and(path(format!("/admin/realms/master/users/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let (id_a, id_b, id_c) = (ById::new("a"), ById::new("b"), ById::new("c"));
        let (a, b, c) = tokio::join!(
            client.users.find_one.call(&id_a),
            client.users.find_one.call(&id_b),
            client.users.find_one.call(&id_c),
        );

        assert_eq!(a.unwrap().and_then(|u| u.id).as_deref(), Some("a"));
        assert_eq!(b.unwrap().and_then(|u| u.id).as_deref(), Some("b"));
        assert_eq!(c.unwrap().and_then(|u| u.id).as_deref(), Some("c"));
    }
}

/// Test module for the password grant credential
mod auth_tests {
    use super::*;

    fn admin_credentials() -> Credentials {
        Credentials {
            username: Some("admin".into()),
            password: Some("s3cret".into()),
            ..Credentials::default()
        }
    }

    /// The token is fetched once and reused while valid
    #[tokio::test]
    async fn test_token_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=admin"))
            .and(body_string_contains("client_id=admin-cli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "expires_in": 300,
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/roles"))
            .and(bearer_token("fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let config = Config {
            base_url: server.uri(),
            realm_name: "master".into(),
            credentials: admin_credentials(),
        };
        let client = KeycloakAdminClient::from_config(&config).expect("client");

        client.roles.find.call(&Default::default()).await.expect("first call");
        client.roles.find.call(&Default::default()).await.expect("second call");
    }

    /// Refresh drops the cached token
    #[tokio::test]
    async fn test_refresh_fetches_new_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "t",
                "expires_in": 300
            })))
            .expect(2)
            .mount(&server)
            .await;

        let grant = PasswordGrant::new(reqwest::Client::new(), &server.uri(), "master", admin_credentials());
        assert_eq!(grant.token().await.expect("token"), "t");
        assert_eq!(grant.refresh().await.expect("refresh"), "t");
    }

    /// Rejected credentials surface as a credential error and no API call is made
    #[tokio::test]
    async fn test_401_from_token_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid user credentials"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config {
            base_url: server.uri(),
            realm_name: "master".into(),
            credentials: admin_credentials(),
        };
        let client = KeycloakAdminClient::from_config(&config).expect("client");
        let err = client.users.find.call(&UserQuery::default()).await.expect_err("bad credentials");

        assert!(matches!(err, Error::Credential(_)));
    }
}
