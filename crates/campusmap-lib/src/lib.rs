//! Campus map library entry points.
//!
//! This crate exposes the client-side core of the campus map: the
//! in-memory location set, complete-graph route derivation, name/route
//! lookup, the add-location validation flow, and trait seams for the
//! session credential and the remote location directory. Higher-level
//! consumers (the CLI map view) should only depend on the types exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod directory;
pub mod error;
pub mod map;
pub mod model;
pub mod routes;
pub mod session;

pub use directory::{DirectoryService, HttpDirectory};
pub use error::{Error, Result, ValidationError};
pub use map::{AddPhase, CampusMap};
pub use model::{
    Category, LocationCandidate, LocationId, LocationRecord, MapBounds, NewLocation, Position,
};
pub use routes::{derive_routes, RouteEdge, Segment};
pub use session::{require_token, FileSession, SessionProvider, SessionToken, StaticSession};
