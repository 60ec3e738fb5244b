//! # Immunobot Runtime
//!
//! A host-side swarm simulator.
//!
//! The core agent deliberately knows nothing about scheduling, radios or
//! motors. The runtime supplies all three in software so that whole
//! swarms can be run, inspected and tested on a workstation: simulated
//! bodies implement the platform contract, a simulated radio carries
//! checksummed frames between robots in range, and the swarm drives the
//! tick loop.

pub mod types;
pub mod body;
pub mod radio;
pub mod swarm;
pub mod prelude;
