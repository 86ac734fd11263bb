//! Core state for the Synth3sis front-end: the observable store, the timed
//! loading sequence and the screen router that ties them together.

pub mod error;
pub mod loading;
pub mod router;
pub mod store;

pub use error::CoreError;
pub use loading::{LoadTracker, LoadingCoordinator};
pub use router::{RouterEvent, ScreenRouter, Transition};
pub use store::{Store, StoreAction, StoreEvent, StoreState};

use shared::loading::LOADING_STEPS;

/// Coordinator for the standard boot sequence.
pub fn boot_sequence() -> Result<LoadingCoordinator, CoreError> {
    LoadingCoordinator::new(&LOADING_STEPS)
}
