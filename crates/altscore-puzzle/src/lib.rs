//! Puzzle state for the `AltScore` relay.
//!
//! The puzzle is a two-step workflow played against the relay itself:
//!
//! 1. `GET /status` picks one of five ship systems at random and reports it
//!    as damaged.
//! 2. `GET /repair-bay` renders an HTML page carrying the repair code for
//!    whichever system was last reported.
//!
//! This crate owns the closed set of [`SystemCode`]s, the
//! [`DamagedSystemState`] holder, and the repair page markup. It has no
//! knowledge of HTTP; the gateway crate maps [`PuzzleError`] onto responses.

pub mod error;
pub mod repair;
pub mod state;
pub mod system;

pub use error::PuzzleError;
pub use repair::render_repair_page;
pub use state::{DamagedSystemReport, DamagedSystemState};
pub use system::SystemCode;
