//! # Immunobot Core
//!
//! The per-robot immune-response protocol.
//!
//! Every robot in the swarm runs the same [`agent::ImmuneAgent`],
//! parameterized only by its [`role::Role`]. Robots gossip how long ago
//! they (or a neighbour) saw two events:
//!
//! - a **T-cell touching an antibody**,
//! - a **compatible antibody binding an antigen**,
//!
//! and a target cell that hears both are fresh latches a kill signal.
//! If the relayed T-cell response is medium or strong and the chain
//! stays fresh for the death latency, the cell dies.
//!
//! ## Quick Start
//!
//! ```rust
//! use immunobot_core::prelude::*;
//!
//! let config = ProtocolConfig::default();
//! let mut cell = ImmuneAgent::new(Role::CancerInterior, config);
//!
//! // A neighbouring antigen reports a fresh, armed chain and a strong T-cell.
//! let heard = Message::new(Role::AntigenCancer, EventAges::new(0, 0, 0), Role::TCellStrong.id());
//! let transition = cell.on_receive(&heard, 40.0, 100);
//!
//! assert_eq!(transition, Some(Transition::Armed { at: 100 }));
//! assert_eq!(cell.status(), CellStatus::Killing);
//! ```

pub mod types;
pub mod role;
pub mod error;
pub mod config;
pub mod message;
pub mod tracker;
pub mod lifecycle;
pub mod effector;
pub mod platform;
pub mod agent;
pub mod prelude;
