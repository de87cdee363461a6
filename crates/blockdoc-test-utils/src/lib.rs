//! Shared test fixtures for the blockdoc workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`features`]: probe tools and tunes with controllable failures
//! - [`router`]: [`RecordingRouter`] for start-up hook assertions
//! - [`payloads`]: transport JSON documents used across suites

pub mod features;
pub mod payloads;
pub mod router;

pub use features::{ClassTune, HookedTool, ProbeTool, WrapTune, probe_registry};
pub use router::{RecordedRoute, RecordingRouter};
