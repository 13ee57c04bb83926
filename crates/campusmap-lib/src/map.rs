//! In-memory campus map state and the add-location flow.
//!
//! [`CampusMap`] owns the authoritative client-side view of the location
//! set, the route graph derived from it, and the add-flow phase. Route
//! derivation re-runs only when the location set's contents change (after
//! a load, a successful append, or a clear), never on unrelated state
//! changes such as toggling add mode.

use tracing::{debug, info};

use crate::directory::DirectoryService;
use crate::error::{Error, Result, ValidationError};
use crate::model::{LocationCandidate, LocationId, LocationRecord, MapBounds, NewLocation};
use crate::routes::{derive_routes, RouteEdge};
use crate::session::SessionToken;

/// Phase of the add-location flow.
///
/// `Idle -> Placing -> Validating -> Idle` on every path; the flow never
/// parks in `Placing` or `Validating` regardless of outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPhase {
    #[default]
    Idle,
    Placing,
    Validating,
}

/// Client-side campus map state for one session.
#[derive(Debug, Clone, Default)]
pub struct CampusMap {
    bounds: MapBounds,
    locations: Vec<LocationRecord>,
    routes: Vec<RouteEdge>,
    phase: AddPhase,
}

impl CampusMap {
    /// Empty map with the default 800x600 viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map with an explicit viewport.
    pub fn with_bounds(bounds: MapBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Current location snapshot, in load/append order.
    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// Current derived route snapshot.
    pub fn routes(&self) -> &[RouteEdge] {
        &self.routes
    }

    /// Current add-flow phase.
    pub fn phase(&self) -> AddPhase {
        self.phase
    }

    /// Replace the location set wholesale after a directory fetch.
    ///
    /// No merge or diff semantics; the previous contents are discarded and
    /// the route graph is re-derived in full.
    pub fn load(&mut self, records: Vec<LocationRecord>) {
        self.locations = records;
        self.rederive();
    }

    /// Fetch the directory listing and load it.
    pub fn refresh(&mut self, directory: &dyn DirectoryService, token: &SessionToken) -> Result<()> {
        let records = directory.list(token)?;
        self.load(records);
        Ok(())
    }

    /// Reset to the empty state (session end). Also abandons any add flow.
    pub fn clear(&mut self) {
        self.locations.clear();
        self.routes.clear();
        self.phase = AddPhase::Idle;
    }

    /// Enter add mode (`Idle -> Placing`).
    ///
    /// Add attempts are serialized: starting a second flow while one is
    /// underway fails with [`Error::AddInFlight`] and leaves the pending
    /// flow untouched.
    pub fn begin_add(&mut self) -> Result<()> {
        if self.phase != AddPhase::Idle {
            return Err(Error::AddInFlight);
        }
        self.phase = AddPhase::Placing;
        Ok(())
    }

    /// Abandon the current add flow and return to `Idle`.
    pub fn cancel_add(&mut self) {
        self.phase = AddPhase::Idle;
    }

    /// Submit a captured candidate (`Placing -> Validating -> Idle`).
    ///
    /// Local checks run first and reject without any directory call; on a
    /// local pass the directory's `create` decides, and its rejection is
    /// authoritative (no local mutation). Every outcome ends in `Idle`.
    pub fn place(
        &mut self,
        candidate: LocationCandidate,
        directory: &dyn DirectoryService,
        token: &SessionToken,
    ) -> Result<LocationRecord> {
        if self.phase != AddPhase::Placing {
            return Err(Error::FlowOutOfPhase {
                expected: "placing",
            });
        }
        self.phase = AddPhase::Validating;
        let outcome = self.validate_and_commit(candidate, directory, token);
        self.phase = AddPhase::Idle;
        outcome
    }

    /// Drive the whole add flow from `Idle` in one call.
    pub fn add_location(
        &mut self,
        candidate: LocationCandidate,
        directory: &dyn DirectoryService,
        token: &SessionToken,
    ) -> Result<LocationRecord> {
        self.begin_add()?;
        self.place(candidate, directory, token)
    }

    /// First edge connecting the two given locations, in either order.
    ///
    /// `None` is the explicit "no such edge" answer; it never reaches the
    /// directory service.
    pub fn find_route_between(&self, a: &LocationId, b: &LocationId) -> Option<&RouteEdge> {
        self.routes.iter().find(|edge| edge.connects(a, b))
    }

    /// Case-insensitive exact name lookup.
    ///
    /// First match wins should duplicates ever slip in; the lookup itself
    /// never fails.
    pub fn find_location_by_name(&self, query: &str) -> Option<&LocationRecord> {
        self.locations
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(query))
    }

    fn validate_and_commit(
        &mut self,
        candidate: LocationCandidate,
        directory: &dyn DirectoryService,
        token: &SessionToken,
    ) -> Result<LocationRecord> {
        self.validate(&candidate)?;

        let record = directory.create(token, &NewLocation::from(candidate))?;
        info!(id = %record.id, name = %record.name, "location committed");
        self.locations.push(record.clone());
        self.rederive();
        Ok(record)
    }

    /// Local checks; runs before the directory round trip so a doomed
    /// candidate costs no network call. Category membership is already
    /// enforced by the `Category` type at the parse boundary.
    fn validate(&self, candidate: &LocationCandidate) -> Result<()> {
        if candidate.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self
            .locations
            .iter()
            .any(|record| record.name.eq_ignore_ascii_case(&candidate.name))
        {
            return Err(ValidationError::DuplicateName {
                name: candidate.name.clone(),
            }
            .into());
        }
        if !self.bounds.contains(candidate.position) {
            return Err(ValidationError::OutOfBounds {
                x: candidate.position.x,
                y: candidate.position.y,
            }
            .into());
        }
        Ok(())
    }

    fn rederive(&mut self) {
        self.routes = derive_routes(&self.locations);
        debug!(
            locations = self.locations.len(),
            routes = self.routes.len(),
            "route graph rebuilt"
        );
    }
}
