//! Common test utilities and fixture helpers.
//!
//! Provides an in-memory [`DirectoryService`] double so tests can drive
//! the full add/refresh flow without a backend, plus record builders.

use std::cell::{Cell, RefCell};

use campusmap_lib::{
    Category, DirectoryService, Error, LocationId, LocationRecord, NewLocation, Position, Result,
    SessionToken,
};

#[allow(dead_code)]
pub fn token() -> SessionToken {
    SessionToken::new("test-token")
}

#[allow(dead_code)]
pub fn record(id: &str, name: &str, x: f64, y: f64, category: Category) -> LocationRecord {
    LocationRecord {
        id: LocationId::new(id),
        name: name.to_string(),
        position: Position::new(x, y),
        category,
    }
}

/// In-memory directory service double.
///
/// Assigns `srv-N` identifiers on create and counts create calls so tests
/// can assert that rejected candidates never reach the service.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    records: RefCell<Vec<LocationRecord>>,
    next_id: Cell<u32>,
    create_rejection: RefCell<Option<String>>,
    create_calls: Cell<usize>,
}

#[allow(dead_code)]
impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: Vec<LocationRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Make every subsequent create fail with the given service message.
    pub fn reject_creates_with(&self, message: &str) {
        *self.create_rejection.borrow_mut() = Some(message.to_string());
    }

    /// Number of create calls that reached the service.
    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }
}

impl DirectoryService for FakeDirectory {
    fn list(&self, _token: &SessionToken) -> Result<Vec<LocationRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn create(&self, _token: &SessionToken, submission: &NewLocation) -> Result<LocationRecord> {
        self.create_calls.set(self.create_calls.get() + 1);

        if let Some(message) = self.create_rejection.borrow().clone() {
            return Err(Error::Service { message });
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let record = LocationRecord {
            id: LocationId::new(format!("srv-{id}")),
            name: submission.name.clone(),
            position: submission.position,
            category: submission.category,
        };
        self.records.borrow_mut().push(record.clone());
        Ok(record)
    }
}
