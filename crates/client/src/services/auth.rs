//! Authentication operations

use dmart_domain::{ApiResponse, DmartError, LoginResponse, ProfileResponse, Result};
use serde_json::{Map, Value};

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Log in with an arbitrary set of identifying properties plus a password.
///
/// The login request itself never carries an Authorization header.
pub async fn login_by(
    transport: &Transport,
    endpoints: &Endpoints,
    credentials: &Value,
    password: &str,
) -> Result<LoginResponse> {
    let mut body = match credentials {
        Value::Object(map) => map.clone(),
        _ => {
            return Err(DmartError::Serialization(
                "login credentials must be a JSON object".to_string(),
            ))
        }
    };
    body.insert("password".to_string(), Value::String(password.to_string()));

    let path = endpoints.login.render(&[]);
    transport.post(&path, &Value::Object(body), None).await
}

/// Log in by shortname and password.
pub async fn login(
    transport: &Transport,
    endpoints: &Endpoints,
    shortname: &str,
    password: &str,
) -> Result<LoginResponse> {
    let mut credentials = Map::new();
    credentials.insert("shortname".to_string(), Value::String(shortname.to_string()));
    login_by(transport, endpoints, &Value::Object(credentials), password).await
}

/// Fetch the authenticated user's profile.
pub async fn get_profile(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
) -> Result<ProfileResponse> {
    let path = endpoints.profile.render(&[]);
    transport.get(&path, token).await
}

/// End the current session on the backend.
pub async fn logout(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
) -> Result<ApiResponse> {
    let path = endpoints.logout.render(&[]);
    transport.post(&path, &Value::Object(Map::new()), token).await
}

/// Register a new user record.
pub async fn create_user(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    request: &Value,
) -> Result<ApiResponse> {
    let path = endpoints.create_user.render(&[]);
    transport.post(&path, request, token).await
}

/// Update the authenticated user's profile record.
pub async fn update_user(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    request: &Value,
) -> Result<ApiResponse> {
    let path = endpoints.profile.render(&[]);
    transport.post(&path, request, token).await
}
