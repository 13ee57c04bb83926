//! Authentication API client.
//!
//! Talks to the backend's register/login endpoints. Authentication is an
//! external collaborator of the map core, so this lives in the CLI glue
//! rather than in `campusmap-lib`.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use campusmap_lib::SessionToken;

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Create an account on the backend.
pub fn register(api_url: &str, name: &str, email: &str, password: &str) -> Result<()> {
    let url = endpoint(api_url, REGISTER_PATH);
    debug!(%url, "registering account");
    let response = client()?
        .post(&url)
        .json(&RegisterRequest {
            name,
            email,
            password,
        })
        .send()
        .context("failed to reach the authentication API")?;

    if !response.status().is_success() {
        return Err(anyhow!("signup failed: {}", error_message(response)));
    }
    Ok(())
}

/// Exchange credentials for a session token.
pub fn login(api_url: &str, email: &str, password: &str) -> Result<SessionToken> {
    let url = endpoint(api_url, LOGIN_PATH);
    debug!(%url, "logging in");
    let response = client()?
        .post(&url)
        .json(&LoginRequest { email, password })
        .send()
        .context("failed to reach the authentication API")?;

    if !response.status().is_success() {
        return Err(anyhow!("login failed: {}", error_message(response)));
    }

    let body: LoginResponse = response
        .json()
        .context("failed to decode the login response")?;
    Ok(SessionToken::new(body.token))
}

fn client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), path)
}

fn error_message(response: reqwest::blocking::Response) -> String {
    let status = response.status();
    response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .map(|err| err.message)
        .unwrap_or_else(|| format!("unexpected status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_trailing_slashes() {
        assert_eq!(
            endpoint("http://localhost:5000/", LOGIN_PATH),
            "http://localhost:5000/api/auth/login"
        );
    }

    #[test]
    fn login_response_decodes() {
        let body: LoginResponse = serde_json::from_str(r#"{"token": "jwt-abc"}"#).unwrap();
        assert_eq!(body.token, "jwt-abc");
    }
}
