//! Asteroid impact simulation viewer.
//!
//! The workspace splits the viewer core into a service client, a session
//! store that owns the lifecycle of one simulation at a time, and pure
//! projectors that turn a session into map and orbital-scene view-models.
//! This crate re-exports them so front-ends (the `simulate` CLI, a GUI, a
//! web shell) depend on a single library.

pub use impact_client as client;
pub use impact_config as config;
pub use impact_core as primitives;
pub use impact_export as export;
pub use impact_projection as projection;
pub use impact_session as session;
