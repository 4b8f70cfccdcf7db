//! HTTP client for the booking API.
//!
//! # Design
//! `BookingClient` holds a `reqwest::Client` and the backend base URL and
//! carries no other state; concurrent calls share nothing mutable. Every
//! operation runs through [`BookingClient::fetch`]: send the request, require
//! a 2xx status, parse the body as JSON, and on any failure log one
//! diagnostic with the operation label and URL before handing the error back.
//! Responses are returned as raw [`serde_json::Value`] — this client owns no
//! schema and validates nothing beyond "the body is JSON".

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::error::{ApiError, ErrorKind};

/// Asynchronous client for the booking API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookingClient {
    /// Create a client for the backend at `base_url` with default transport
    /// settings. A trailing slash on the base URL is stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing a caller-configured `reqwest::Client`, for
    /// deployments that need timeouts, proxies, or a shared pool.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/businesses` — all businesses.
    pub async fn list_businesses(&self) -> Result<Value, ApiError> {
        let url = self.businesses_url();
        self.fetch("fetch businesses", self.http.get(&url), &url).await
    }

    /// `GET {base}/businesses/{id}` — one business.
    pub async fn get_business(&self, id: &str) -> Result<Value, ApiError> {
        let url = self.business_url(id);
        self.fetch("fetch business", self.http.get(&url), &url).await
    }

    /// `GET {base}/businesses/{business_id}/services` — a business's services.
    pub async fn list_services(&self, business_id: &str) -> Result<Value, ApiError> {
        let url = self.services_url(business_id);
        self.fetch("fetch services", self.http.get(&url), &url).await
    }

    /// `GET {base}/services/{service_id}/slots?date={date}` — open slots for
    /// a service on a date. `date` is passed through verbatim.
    pub async fn list_available_slots(&self, service_id: &str, date: &str) -> Result<Value, ApiError> {
        let url = self.slots_url(service_id, date);
        self.fetch("fetch available slots", self.http.get(&url), &url).await
    }

    /// `POST {base}/appointments` — book an appointment. The payload is
    /// serialized to JSON as-is and the created resource is returned.
    pub async fn create_appointment<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Value, ApiError> {
        const OP: &str = "create appointment";
        let url = self.appointments_url();
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                error!(operation = OP, url = %url, error = %err, "request failed");
                return Err(ApiError::new(OP, ErrorKind::Payload(err)));
            }
        };
        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.fetch(OP, request, &url).await
    }

    /// `GET {base}/appointments` — all appointments.
    pub async fn list_appointments(&self) -> Result<Value, ApiError> {
        let url = self.appointments_url();
        self.fetch("fetch appointments", self.http.get(&url), &url).await
    }

    /// Shared request pipeline: send, require 2xx, parse JSON. Any failure is
    /// logged exactly once with the operation label and URL, then returned
    /// tagged with the operation.
    async fn fetch(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Value, ApiError> {
        match execute(request).await {
            Ok(value) => Ok(value),
            Err(kind) => {
                error!(operation, url, error = %kind, "request failed");
                Err(ApiError::new(operation, kind))
            }
        }
    }

    fn businesses_url(&self) -> String {
        format!("{}/businesses", self.base_url)
    }

    fn business_url(&self, id: &str) -> String {
        format!("{}/businesses/{id}", self.base_url)
    }

    fn services_url(&self, business_id: &str) -> String {
        format!("{}/businesses/{business_id}/services", self.base_url)
    }

    fn slots_url(&self, service_id: &str, date: &str) -> String {
        format!("{}/services/{service_id}/slots?date={date}", self.base_url)
    }

    fn appointments_url(&self) -> String {
        format!("{}/appointments", self.base_url)
    }
}

/// One round-trip: transport fault, non-2xx status, and unparseable body are
/// the three ways to fail.
async fn execute(request: reqwest::RequestBuilder) -> Result<Value, ErrorKind> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ErrorKind::Status { status, body });
    }
    serde_json::from_str(&body).map_err(ErrorKind::Decode)
}
