//! Link range engine.
//!
//! Pure numeric core that turns a link budget into a maximum communication
//! distance. It integrates:
//! - Link budget reduction to a maximum allowable path loss
//! - Log-distance path loss inversion (1 m and 1 km reference models)
//! - Distance unit conversions
//! - Path loss exponent sweeps for plotting
//!
//! ## Module Organization
//!
//! - `link_budget`: Link parameters and the budget reducer
//! - `path_loss`: Reference models, forward model and distance solver
//! - `units`: Kilometer to meter/mile/foot conversions
//! - `sweep`: Exponent domain and series generation
//! - `evaluation`: Validated single-call evaluation used by front-ends
//! - `error`: Configuration errors raised before the solver runs
//!
//! Every function here is synchronous and side-effect free apart from
//! diagnostic logging in `evaluation`.

pub mod error;
pub mod evaluation;
pub mod link_budget;
pub mod path_loss;
pub mod sweep;
pub mod units;

pub use evaluation::{Evaluation, evaluate};
pub use link_budget::LinkParameters;
pub use path_loss::{DistanceResult, PathLossModel};
pub use sweep::SweepDomain;

/// Smallest legal path loss exponent (free space).
pub const MIN_PATH_LOSS_EXPONENT: f64 = 2.0;
/// Largest legal path loss exponent.
pub const MAX_PATH_LOSS_EXPONENT: f64 = 10.0;
