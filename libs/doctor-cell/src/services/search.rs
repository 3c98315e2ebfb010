use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use crate::models::{DoctorProfile, LocationCoords, LocationError};
use crate::services::directory::DoctorDirectory;
use crate::services::location::{LocationResolver, PositionProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchState {
    Idle,
    LocationLoading,
    LocationError,
    Searching,
    ResultsShown,
}

/// Whether a request was carried out or dropped because another one was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Completed,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub state: SearchState,
    pub specialization: Option<String>,
    pub origin: Option<LocationCoords>,
    pub results: Vec<&'static DoctorProfile>,
    pub error: Option<LocationError>,
}

#[derive(Debug)]
struct SearchView {
    state: SearchState,
    specialization: Option<String>,
    origin: Option<LocationCoords>,
    results: Vec<&'static DoctorProfile>,
    error: Option<LocationError>,
}

/// Drives the doctor finder: specialization filter, optional location sort
/// and at most one outstanding request at a time.
pub struct SearchController {
    directory: DoctorDirectory,
    view: Mutex<SearchView>,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DoctorDirectory::default())
    }
}

impl SearchController {
    pub fn new(directory: DoctorDirectory) -> Self {
        Self {
            directory,
            view: Mutex::new(SearchView {
                state: SearchState::Idle,
                specialization: None,
                origin: None,
                results: Vec::new(),
                error: None,
            }),
            busy: AtomicBool::new(false),
        }
    }

    /// Shows the full catalog in its original order.
    pub fn open(&self) {
        let mut view = self.view();
        view.results = self.directory.get_filtered_doctors(None, None);
        view.state = SearchState::ResultsShown;
        debug!("Doctor finder opened with {} doctors", view.results.len());
    }

    pub fn select_specialization(&self, specialization: Option<&str>) {
        let selected = specialization
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self.view().specialization = selected;
    }

    /// Re-runs the filter with the current specialization and any known origin.
    pub fn search(&self) -> RequestOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!("Search ignored while another request is outstanding");
            return RequestOutcome::Ignored;
        };

        let mut view = self.view();
        view.state = SearchState::Searching;
        view.results = self
            .directory
            .get_filtered_doctors(view.specialization.as_deref(), view.origin);
        view.state = SearchState::ResultsShown;

        info!(
            "Doctor search for {:?} returned {} results",
            view.specialization,
            view.results.len()
        );
        RequestOutcome::Completed
    }

    /// Resolves the user's position and re-sorts the current results by distance.
    /// On failure the results are left as they were.
    pub async fn locate<P: PositionProvider>(&self, resolver: &LocationResolver<P>) -> RequestOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!("Location request ignored while another request is outstanding");
            return RequestOutcome::Ignored;
        };

        {
            let mut view = self.view();
            view.state = SearchState::LocationLoading;
            view.error = None;
        }

        let resolved = resolver.get_current_location().await;

        let mut view = self.view();
        match resolved {
            Ok(origin) => {
                view.origin = Some(origin);
                view.results = self
                    .directory
                    .get_filtered_doctors(view.specialization.as_deref(), Some(origin));
                view.state = SearchState::ResultsShown;
            }
            Err(err) => {
                view.error = Some(err);
                view.state = SearchState::LocationError;
            }
        }

        RequestOutcome::Completed
    }

    /// Clears the filter, the location sort and any error.
    pub fn reset(&self) {
        let mut view = self.view();
        view.specialization = None;
        view.origin = None;
        view.error = None;
        view.results = self.directory.get_filtered_doctors(None, None);
        view.state = SearchState::ResultsShown;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let view = self.view();
        SearchSnapshot {
            state: view.state,
            specialization: view.specialization.clone(),
            origin: view.origin,
            results: view.results.clone(),
            error: view.error.clone(),
        }
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    fn view(&self) -> MutexGuard<'_, SearchView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
