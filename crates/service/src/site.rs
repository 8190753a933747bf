//! Data access for the public pages and the admin dashboard.
//!
//! Reads go through the gate's query cache and fall back to bundled defaults
//! where the page can still render without the backend. Admin mutations that
//! the backend refuses as unauthorized revoke the local session.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, instrument, warn};

use models::booking::{sort_newest_first, Booking, BookingFormInput};
use models::images::{ImagePaths, StoredImage};
use models::rates::ServiceRate;
use models::slots::{TimeSlot, TimeSlotAvailability};

use crate::admin::upload_path;
use crate::booking::validation::prepare_submission;
use crate::cache::{QueryCache, QueryKey};
use crate::errors::ServiceError;
use crate::estimate::{estimate, Estimate};
use crate::remote::{BackendActor, RemoteError};
use crate::session::AdminSessionGate;

pub struct SiteClient {
    backend: Arc<dyn BackendActor>,
    gate: Arc<AdminSessionGate>,
}

impl SiteClient {
    pub fn new(backend: Arc<dyn BackendActor>, gate: Arc<AdminSessionGate>) -> Self {
        Self { backend, gate }
    }

    pub fn gate(&self) -> &Arc<AdminSessionGate> {
        &self.gate
    }

    fn cache(&self) -> &QueryCache {
        self.gate.cache()
    }

    pub async fn service_rates(&self) -> Result<ServiceRate, RemoteError> {
        self.cache().get_or_fetch(self.backend.get_service_rates()).await
    }

    /// Estimate with live rates when the backend answers, catalog defaults otherwise.
    pub async fn estimate(&self, service_id: &str, area_text: &str) -> Option<Estimate> {
        let rates = match self.service_rates().await {
            Ok(rates) => Some(rates),
            Err(e) => {
                warn!(error = %e, "live rates unavailable; estimating from defaults");
                None
            }
        };
        estimate(service_id, area_text, rates.as_ref())
    }

    pub async fn time_slot_availability(&self) -> Result<TimeSlotAvailability, RemoteError> {
        self.cache().get_or_fetch(self.backend.get_time_slot_availability()).await
    }

    /// Slots offered on the booking form; none when availability is unknown.
    pub async fn available_slots(&self) -> Vec<TimeSlot> {
        match self.time_slot_availability().await {
            Ok(availability) => availability.available(),
            Err(e) => {
                warn!(error = %e, "slot availability unavailable");
                Vec::new()
            }
        }
    }

    pub async fn image_paths(&self) -> ImagePaths {
        match self.cache().get_or_fetch(self.backend.get_image_paths()).await {
            Ok(paths) => paths.with_defaults(),
            Err(e) => {
                warn!(error = %e, "image paths unavailable; using bundled images");
                ImagePaths::default()
            }
        }
    }

    pub async fn submit_booking(&self, input: &BookingFormInput) -> Result<Booking, ServiceError> {
        self.submit_booking_on(input, Local::now().date_naive()).await
    }

    /// Validate, then hand the booking to the backend. Nothing is sent for an invalid form.
    #[instrument(skip(self, input), fields(service = %input.service))]
    pub async fn submit_booking_on(&self, input: &BookingFormInput, today: NaiveDate) -> Result<Booking, ServiceError> {
        let submission = prepare_submission(input, today).map_err(ServiceError::Validation)?;
        let booking = self.backend.create_booking(submission).await?;
        self.cache().invalidate(QueryKey::Bookings).await;
        info!(booking_id = %booking.id, "booking submitted");
        Ok(booking)
    }

    /// All bookings, newest first. Admin only.
    pub async fn all_bookings(&self) -> Result<Arc<Vec<Booking>>, ServiceError> {
        let fetched = self
            .cache()
            .get_or_fetch(async {
                let mut bookings = self.backend.get_all_bookings().await?;
                sort_newest_first(&mut bookings);
                Ok::<_, RemoteError>(Arc::new(bookings))
            })
            .await;
        self.admin_result(fetched)
    }

    #[instrument(skip(self))]
    pub async fn update_service_rates(&self, rates: ServiceRate) -> Result<(), ServiceError> {
        rates.validate()?;
        let updated = self.backend.update_service_rates(rates).await;
        self.admin_result(updated)?;
        self.cache().invalidate(QueryKey::ServiceRates).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_time_slot_availability(&self, availability: TimeSlotAvailability) -> Result<(), ServiceError> {
        let updated = self.backend.update_time_slot_availability(availability).await;
        self.admin_result(updated)?;
        self.cache().invalidate(QueryKey::TimeSlotAvailability).await;
        Ok(())
    }

    #[instrument(skip(self, paths))]
    pub async fn update_image_paths(&self, paths: ImagePaths) -> Result<(), ServiceError> {
        let updated = self.backend.update_image_paths(paths).await;
        self.admin_result(updated)?;
        self.cache().invalidate(QueryKey::ImagePaths).await;
        Ok(())
    }

    /// Upload under `/uploads/{millis}_{sanitised name}`.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<StoredImage, ServiceError> {
        let path = upload_path(file_name, Utc::now().timestamp_millis());
        let stored = self.backend.upload_image(bytes, &path).await;
        let stored = self.admin_result(stored)?;
        info!(path = %stored.path, "image uploaded");
        Ok(stored)
    }

    fn admin_result<T>(&self, result: Result<T, RemoteError>) -> Result<T, ServiceError> {
        result.map_err(|e| {
            if e.is_unauthorized() {
                self.gate.revoke();
            }
            ServiceError::Remote(e)
        })
    }
}
