//! Request execution
//!
//! Dispatches a [`ResolvedRequest`] through the transport with the current
//! bearer token and interprets the raw status and body. One network call per
//! invocation, never retried.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::compiler::ResolvedRequest;
use crate::error::{Error, Result};
use crate::keycloak::auth::TokenProvider;
use crate::keycloak::http::{Transport, TransportRequest, TransportResponse};

const NOT_FOUND: u16 = 404;

/// Send `request` and decode the response as `O`
pub async fn execute<O>(
    transport: &dyn Transport,
    credentials: &dyn TokenProvider,
    base_url: &str,
    request: &ResolvedRequest,
    catch_not_found: bool,
) -> Result<O>
where
    O: DeserializeOwned,
{
    let token = credentials.token().await?;
    let outgoing = prepare(base_url, request, &token)?;
    let response = transport.send(outgoing).await?;
    interpret(response, catch_not_found)
}

/// Attach the credential and serialize the body
pub fn prepare(base_url: &str, request: &ResolvedRequest, token: &str) -> Result<TransportRequest> {
    let mut headers = vec![("authorization".to_string(), format!("Bearer {token}"))];

    let body = match &request.body {
        Some(body) => {
            headers.push(("content-type".to_string(), "application/json".to_string()));
            Some(serde_json::to_string(body).map_err(|e| Error::InvalidInput(e.to_string()))?)
        },
        None => None,
    };

    Ok(TransportRequest {
        method: request.method,
        url: request.url(base_url),
        headers,
        body,
    })
}

/// Map a raw response onto the declared result type
///
/// An empty 2xx body decodes like JSON `null`, so `()` and `Option<T>`
/// results accept it. A 404 on a catching descriptor decodes the same way.
pub fn interpret<O>(response: TransportResponse, catch_not_found: bool) -> Result<O>
where
    O: DeserializeOwned,
{
    let status = response.status;

    if (200..300).contains(&status) {
        return decode(status, &response.body);
    }

    if status == NOT_FOUND && catch_not_found {
        return serde_json::from_value(Value::Null).map_err(|source| Error::Decode { status, source });
    }

    Err(Error::Remote {
        status,
        body: response.body,
    })
}

fn decode<O: DeserializeOwned>(status: u16, body: &str) -> Result<O> {
    let decoded = if body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(body)
    };
    decoded.map_err(|source| Error::Decode { status, source })
}
