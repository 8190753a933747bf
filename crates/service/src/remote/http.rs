use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use models::booking::{Booking, NewBooking};
use models::images::{ImagePaths, StoredImage};
use models::rates::ServiceRate;
use models::slots::TimeSlotAvailability;

use super::errors::RemoteError;
use super::repository::BackendActor;

/// JSON-over-HTTP binding of the backend actor.
///
/// Every operation is `POST {base_url}/rpc/{operation}` with the named
/// arguments as a JSON object. The client keeps a cookie store, so the
/// identity granted by `adminLogin` rides along on later calls.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration, request_timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &configs::BackendConfig) -> Result<Self, RemoteError> {
        Self::new(cfg.base_url.clone(), cfg.connect_timeout(), cfg.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, operation: &str, args: Value) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}/rpc/{}", self.base_url, operation);
        debug!(%operation, "backend call");
        let resp = self.client.post(&url).json(&args).send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = resp.text().await.unwrap_or_default();
            warn!(%operation, status = status.as_u16(), "backend refused caller");
            return Err(RemoteError::Unauthorized(message));
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(%operation, status = status.as_u16(), %message, "backend rejected call");
            return Err(RemoteError::Rejected { status: status.as_u16(), message });
        }
        Ok(resp)
    }

    async fn call<T: DeserializeOwned>(&self, operation: &str, args: Value) -> Result<T, RemoteError> {
        let resp = self.send(operation, args).await?;
        resp.json::<T>().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// For operations whose response body carries nothing.
    async fn call_unit(&self, operation: &str, args: Value) -> Result<(), RemoteError> {
        self.send(operation, args).await?;
        Ok(())
    }
}

#[async_trait]
impl BackendActor for HttpBackend {
    async fn is_caller_admin(&self) -> Result<bool, RemoteError> {
        self.call("isCallerAdmin", json!({})).await
    }

    #[instrument(skip(self, password))]
    async fn admin_login(&self, username: &str, password: &str) -> Result<bool, RemoteError> {
        self.call("adminLogin", json!({ "username": username, "password": password })).await
    }

    async fn get_service_rates(&self) -> Result<ServiceRate, RemoteError> {
        self.call("getServiceRates", json!({})).await
    }

    async fn update_service_rates(&self, rates: ServiceRate) -> Result<(), RemoteError> {
        let args = serde_json::to_value(rates).map_err(|e| RemoteError::Decode(e.to_string()))?;
        self.call_unit("updateServiceRates", args).await
    }

    async fn get_time_slot_availability(&self) -> Result<TimeSlotAvailability, RemoteError> {
        self.call("getTimeSlotAvailability", json!({})).await
    }

    async fn update_time_slot_availability(&self, availability: TimeSlotAvailability) -> Result<(), RemoteError> {
        let args = serde_json::to_value(availability).map_err(|e| RemoteError::Decode(e.to_string()))?;
        self.call_unit("updateTimeSlotAvailability", args).await
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RemoteError> {
        let args = serde_json::to_value(booking).map_err(|e| RemoteError::Decode(e.to_string()))?;
        self.call("createBooking", args).await
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RemoteError> {
        self.call("getAllBookings", json!({})).await
    }

    async fn get_image_paths(&self) -> Result<ImagePaths, RemoteError> {
        self.call("getImagePaths", json!({})).await
    }

    async fn update_image_paths(&self, paths: ImagePaths) -> Result<(), RemoteError> {
        let args = serde_json::to_value(paths).map_err(|e| RemoteError::Decode(e.to_string()))?;
        self.call_unit("updateImagePaths", args).await
    }

    async fn upload_image(&self, bytes: Vec<u8>, path: &str) -> Result<StoredImage, RemoteError> {
        self.call("uploadImage", json!({ "path": path, "bytes": bytes })).await
    }
}
