//! Immunobot Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use immunobot_runtime::prelude::*;
//! ```

pub use crate::types::{Position, RobotId};
pub use crate::body::{BodyState, SimulatedBody};
pub use crate::radio::{CalibratedEstimator, Measurement, RadioConfig, Reception, SimRadio};
pub use crate::swarm::{
    RobotSnapshot, Swarm, SwarmConfig, SwarmError, SwarmEvent, SwarmSnapshot, SwarmStats,
};
