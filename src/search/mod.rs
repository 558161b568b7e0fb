//! Search: alpha-beta minimax and the controller that drives it.

pub mod controller;
pub mod diagnostics;
pub mod iterative;
pub mod mate;
pub mod minimax;
pub mod ordering;
pub mod parallel;
pub mod stop;

pub use controller::{find_best_move, find_best_move_with, Collaborators, SearchOptions, SearchOutcome};
pub use diagnostics::{Diagnostics, DiagnosticsReport};
pub use stop::{SearchTimer, StopControl};
