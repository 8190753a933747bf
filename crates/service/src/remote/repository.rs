use async_trait::async_trait;

use models::booking::{Booking, NewBooking};
use models::images::{ImagePaths, StoredImage};
use models::rates::ServiceRate;
use models::slots::TimeSlotAvailability;

use super::errors::RemoteError;

/// Operations the site consumes from the remote backend.
#[async_trait]
pub trait BackendActor: Send + Sync {
    async fn is_caller_admin(&self) -> Result<bool, RemoteError>;
    /// Grants the admin role to the caller on success.
    async fn admin_login(&self, username: &str, password: &str) -> Result<bool, RemoteError>;

    async fn get_service_rates(&self) -> Result<ServiceRate, RemoteError>;
    async fn update_service_rates(&self, rates: ServiceRate) -> Result<(), RemoteError>;

    async fn get_time_slot_availability(&self) -> Result<TimeSlotAvailability, RemoteError>;
    async fn update_time_slot_availability(&self, availability: TimeSlotAvailability) -> Result<(), RemoteError>;

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RemoteError>;
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RemoteError>;

    async fn get_image_paths(&self) -> Result<ImagePaths, RemoteError>;
    async fn update_image_paths(&self, paths: ImagePaths) -> Result<(), RemoteError>;
    async fn upload_image(&self, bytes: Vec<u8>, path: &str) -> Result<StoredImage, RemoteError>;
}
