//! # Immunobot
//!
//! A distributed immune-response protocol for swarms of small robots.
//!
//! Every robot is assigned one immune-system role. Robots broadcast a
//! tiny five-byte message to their neighbours and relay how long ago two
//! key contacts happened somewhere in the swarm: a T-cell touching an
//! antibody, and an antibody binding a compatible antigen. When both
//! contacts are recent, target cells enter a kill sequence and, if the
//! response is strong enough, die after a fixed latency.
//!
//! ## Quick Start
//!
//! ```rust
//! use immunobot::prelude::*;
//!
//! let config = SwarmConfig {
//!     radio: RadioConfig { range_mm: 60.0, ..Default::default() },
//!     ..Default::default()
//! };
//! let mut swarm = Swarm::from_config(config).unwrap();
//!
//! swarm.spawn(Role::TCellStrong, Position::new(0.0, 0.0));
//! swarm.spawn(Role::AntibodyCancer, Position::new(50.0, 0.0));
//! swarm.spawn(Role::AntigenCancer, Position::new(100.0, 0.0));
//! let cell = swarm.spawn(Role::CancerInterior, Position::new(150.0, 0.0));
//!
//! swarm.run(250);
//! assert_eq!(swarm.status(cell), Some(CellStatus::Dead));
//! ```
//!
//! ## Architecture
//!
//! - [`immunobot_core`] - Roles, wire message, event-age tracker, kill
//!   switch, effector mapping and the platform traits
//! - [`immunobot_runtime`] - Simulated bodies, lossy radio and the swarm
//!   tick loop
//!
//! ## Roles
//!
//! | Id | Role | Biological Analog |
//! |----|------|-------------------|
//! | 1-3 | T1, T2, T3 | T-cells of weak, medium, strong response |
//! | 4-6 | ABC, ABH, AB2 | Antibodies for cancer, healthy, both |
//! | 7-8 | AGC, AGH | Cancer / healthy surface antigens |
//! | 9-10 | CI, HI | Cancer / healthy cell interiors (targets) |
//! | 11 | TN | T-cell nucleus, relay only |
//!
//! ## Timing
//!
//! - Contacts older than 64 ticks disarm the chain
//! - A latched cell dies 192 ticks later under a medium or strong response
//! - A weak response holds the cell in the killing state indefinitely

pub use immunobot_core as core;
pub use immunobot_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use immunobot::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use immunobot_core::types::{
        CellStatus, ColorCode, EventAges, Response, Tick, MAX_AGE,
    };
    pub use immunobot_core::role::{compatible, Role};

    // Protocol
    pub use immunobot_core::config::ProtocolConfig;
    pub use immunobot_core::message::{Message, FRAME_LEN, PAYLOAD_LEN};
    pub use immunobot_core::tracker::{EventAgeTracker, Evidence, TrackerUpdate};
    pub use immunobot_core::lifecycle::{KillSwitch, Transition};
    pub use immunobot_core::effector::{EffectorInput, EffectorOutput, Shade};

    // Core traits
    pub use immunobot_core::agent::{Agent, AgentSnapshot, ImmuneAgent};
    pub use immunobot_core::platform::{DistanceEstimator, Platform};

    // Error types
    pub use immunobot_core::error::{ImmunobotError, Result};

    // Runtime
    pub use immunobot_runtime::types::{Position, RobotId};
    pub use immunobot_runtime::body::SimulatedBody;
    pub use immunobot_runtime::radio::{CalibratedEstimator, RadioConfig};
    pub use immunobot_runtime::swarm::{
        Swarm, SwarmConfig, SwarmError, SwarmEvent, SwarmSnapshot, SwarmStats,
    };
}
