//! Location directory service client.
//!
//! The directory service is the remote owner of location records: it
//! assigns identifiers and is the authority on uniqueness. The core only
//! talks to it through the [`DirectoryService`] trait so tests and other
//! frontends can substitute their own store.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{LocationRecord, NewLocation};
use crate::session::SessionToken;

/// Remote store of location records.
pub trait DirectoryService {
    /// Fetch every record visible to the session.
    fn list(&self, token: &SessionToken) -> Result<Vec<LocationRecord>>;

    /// Create a record and return it with its server-assigned identifier.
    ///
    /// The service's rejection (for example a concurrent duplicate name) is
    /// authoritative; callers must not mutate local state on failure.
    fn create(&self, token: &SessionToken, submission: &NewLocation) -> Result<LocationRecord>;
}

const LOCATIONS_PATH: &str = "/api/location/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the campus map backend.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    base_url: String,
    client: Client,
}

impl HttpDirectory {
    /// Build a client for the directory service rooted at `base_url`.
    pub fn new<T: Into<String>>(base_url: T) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn locations_url(&self) -> String {
        format!("{}{}", self.base_url, LOCATIONS_PATH)
    }
}

impl DirectoryService for HttpDirectory {
    fn list(&self, token: &SessionToken) -> Result<Vec<LocationRecord>> {
        let url = self.locations_url();
        debug!(%url, "fetching location directory");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(service_error(status, &body));
        }

        let listing = decode_listing(&body)?;
        debug!(count = listing.len(), "location directory fetched");
        Ok(listing)
    }

    fn create(&self, token: &SessionToken, submission: &NewLocation) -> Result<LocationRecord> {
        let url = self.locations_url();
        debug!(%url, name = %submission.name, "creating location");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(submission)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(%status, name = %submission.name, "directory rejected location");
            return Err(service_error(status, &body));
        }

        decode_created(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ListingBody {
    locations: Vec<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    location: LocationRecord,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn decode_listing(body: &str) -> Result<Vec<LocationRecord>> {
    let listing: ListingBody =
        serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
            message: err.to_string(),
        })?;
    Ok(listing.locations)
}

fn decode_created(body: &str) -> Result<LocationRecord> {
    let created: CreatedBody =
        serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
            message: err.to_string(),
        })?;
    Ok(created.location)
}

/// Map a non-ok response to a service error, preferring the backend's own
/// `message` field when the body carries one.
fn service_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| format!("unexpected status {status}"));
    Error::Service { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn listing_decodes_the_backend_envelope() {
        let body = r#"{
            "locations": [
                {"id": "a1", "name": "Main Gate", "x": 12.0, "y": 30.0, "type": "building"},
                {"id": "b2", "name": "Library", "x": 400.0, "y": 220.5, "type": "library"}
            ]
        }"#;

        let records = decode_listing(body).expect("decode listing");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Main Gate");
        assert_eq!(records[1].category, Category::Library);
    }

    #[test]
    fn created_record_decodes_from_its_envelope() {
        let body = r#"{"location": {"id": "c3", "name": "Gym", "x": 1.0, "y": 2.0, "type": "gym"}}"#;
        let record = decode_created(body).expect("decode created");
        assert_eq!(record.id.as_str(), "c3");
        assert_eq!(record.category, Category::Gym);
    }

    #[test]
    fn malformed_listing_is_reported_as_such() {
        let err = decode_listing("{\"nope\": []}").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn service_errors_prefer_the_backend_message() {
        let err = service_error(StatusCode::CONFLICT, r#"{"message": "name taken"}"#);
        match err {
            Error::Service { message } => assert_eq!(message, "name taken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn service_errors_fall_back_to_the_status() {
        let err = service_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match err {
            Error::Service { message } => assert!(message.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
