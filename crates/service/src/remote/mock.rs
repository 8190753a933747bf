//! In-memory backend for tests and doc examples.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use models::booking::{Booking, NewBooking};
use models::images::{ImagePaths, StoredImage};
use models::rates::ServiceRate;
use models::slots::TimeSlotAvailability;

use super::errors::RemoteError;
use super::repository::BackendActor;

#[derive(Default)]
struct MockState {
    caller_is_admin: bool,
    admin_check_failure: Option<RemoteError>,
    admin_check_delay: Option<Duration>,
    bookings_delay: Option<Duration>,
    login_failure: Option<RemoteError>,
    login_grants_admin: bool,
    reads_fail: bool,
    rates: ServiceRate,
    slots: TimeSlotAvailability,
    images: ImagePaths,
    bookings: Vec<Booking>,
    clock: i64,
    calls: HashMap<&'static str, usize>,
}

/// Backend double with scriptable admin checks.
///
/// Admin-only mutations answer `Unauthorized` unless the caller currently
/// holds the admin role, the way the real backend does.
pub struct MockBackend {
    username: String,
    password: String,
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new(username: &str, password: &str) -> Self {
        let state = MockState { login_grants_admin: true, ..MockState::default() };
        Self { username: username.to_string(), password: password.to_string(), state: Mutex::new(state) }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, operation: &'static str) {
        *self.state().calls.entry(operation).or_default() += 1;
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.state().calls.get(operation).copied().unwrap_or_default()
    }

    pub fn set_caller_admin(&self, is_admin: bool) {
        self.state().caller_is_admin = is_admin;
    }

    /// Make `isCallerAdmin` fail with `err` until cleared with `None`.
    pub fn fail_admin_check(&self, err: Option<RemoteError>) {
        self.state().admin_check_failure = err;
    }

    /// Delay applied to each `isCallerAdmin` call started after this point.
    pub fn set_admin_check_delay(&self, delay: Option<Duration>) {
        self.state().admin_check_delay = delay;
    }

    /// Delay applied to `getAllBookings` after the admin check has passed.
    pub fn set_bookings_delay(&self, delay: Option<Duration>) {
        self.state().bookings_delay = delay;
    }

    pub fn fail_login(&self, err: Option<RemoteError>) {
        self.state().login_failure = err;
    }

    /// When false, a correct login answers `true` without granting the role.
    pub fn set_login_grants_admin(&self, grants: bool) {
        self.state().login_grants_admin = grants;
    }

    pub fn set_reads_fail(&self, fail: bool) {
        self.state().reads_fail = fail;
    }

    pub fn set_rates(&self, rates: ServiceRate) {
        self.state().rates = rates;
    }

    pub fn set_slots(&self, slots: TimeSlotAvailability) {
        self.state().slots = slots;
    }

    pub fn set_image_paths(&self, images: ImagePaths) {
        self.state().images = images;
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state().bookings.clone()
    }

    fn read_guard(&self) -> Result<(), RemoteError> {
        if self.state().reads_fail {
            return Err(RemoteError::Network("backend unreachable".into()));
        }
        Ok(())
    }

    fn require_admin(&self) -> Result<(), RemoteError> {
        if !self.state().caller_is_admin {
            return Err(RemoteError::Unauthorized("Only admins can perform this action".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BackendActor for MockBackend {
    async fn is_caller_admin(&self) -> Result<bool, RemoteError> {
        self.record("isCallerAdmin");
        let (delay, failure, is_admin) = {
            let state = self.state();
            (state.admin_check_delay, state.admin_check_failure.clone(), state.caller_is_admin)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(is_admin),
        }
    }

    async fn admin_login(&self, username: &str, password: &str) -> Result<bool, RemoteError> {
        self.record("adminLogin");
        let mut state = self.state();
        if let Some(err) = state.login_failure.clone() {
            return Err(err);
        }
        let ok = username == self.username && password == self.password;
        if ok && state.login_grants_admin {
            state.caller_is_admin = true;
        }
        Ok(ok)
    }

    async fn get_service_rates(&self) -> Result<ServiceRate, RemoteError> {
        self.record("getServiceRates");
        self.read_guard()?;
        Ok(self.state().rates)
    }

    async fn update_service_rates(&self, rates: ServiceRate) -> Result<(), RemoteError> {
        self.record("updateServiceRates");
        self.require_admin()?;
        self.state().rates = rates;
        Ok(())
    }

    async fn get_time_slot_availability(&self) -> Result<TimeSlotAvailability, RemoteError> {
        self.record("getTimeSlotAvailability");
        self.read_guard()?;
        Ok(self.state().slots)
    }

    async fn update_time_slot_availability(&self, availability: TimeSlotAvailability) -> Result<(), RemoteError> {
        self.record("updateTimeSlotAvailability");
        self.require_admin()?;
        self.state().slots = availability;
        Ok(())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, RemoteError> {
        self.record("createBooking");
        self.read_guard()?;
        let mut state = self.state();
        state.clock += 1;
        let created = Booking {
            id: Uuid::new_v4().to_string(),
            full_name: booking.full_name,
            mobile_number: booking.mobile_number,
            location: booking.location,
            property_type: booking.property_type,
            service: booking.service,
            date: booking.date,
            time_slot: booking.time_slot,
            area: booking.area,
            created_at: state.clock,
            owner: None,
        };
        state.bookings.push(created.clone());
        Ok(created)
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, RemoteError> {
        self.record("getAllBookings");
        self.require_admin()?;
        let (delay, bookings) = {
            let state = self.state();
            (state.bookings_delay, state.bookings.clone())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(bookings)
    }

    async fn get_image_paths(&self) -> Result<ImagePaths, RemoteError> {
        self.record("getImagePaths");
        self.read_guard()?;
        Ok(self.state().images.clone())
    }

    async fn update_image_paths(&self, paths: ImagePaths) -> Result<(), RemoteError> {
        self.record("updateImagePaths");
        self.require_admin()?;
        self.state().images = paths;
        Ok(())
    }

    async fn upload_image(&self, bytes: Vec<u8>, path: &str) -> Result<StoredImage, RemoteError> {
        self.record("uploadImage");
        self.require_admin()?;
        if bytes.is_empty() {
            return Err(RemoteError::Rejected { status: 400, message: "empty upload".into() });
        }
        Ok(StoredImage { path: path.to_string(), url: format!("https://blob.example{path}") })
    }
}
