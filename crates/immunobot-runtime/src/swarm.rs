//! Swarm — a host-side arena of simulated robots.
//!
//! The swarm plays the part of the hardware and the air between robots.
//! It never reads or writes agent state directly: robots only learn
//! about each other through broadcast frames.
//!
//! Each tick:
//! 1. Every robot due to transmit is asked for its frame
//! 2. Frames are delivered to every other robot in range
//! 3. Every robot runs its behavior loop once
//! 4. The tick counter advances

use crate::body::{BodyState, SimulatedBody};
use crate::radio::{CalibratedEstimator, RadioConfig, Reception, SimRadio};
use crate::types::{Position, RobotId};
use immunobot_core::agent::{Agent, AgentSnapshot, ImmuneAgent};
use immunobot_core::config::ProtocolConfig;
use immunobot_core::error::ImmunobotError;
use immunobot_core::lifecycle::Transition;
use immunobot_core::message::FRAME_LEN;
use immunobot_core::platform::DistanceEstimator;
use immunobot_core::role::Role;
use immunobot_core::types::{CellStatus, Tick};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by swarm management.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Robot not found: {0}")]
    RobotNotFound(RobotId),
    #[error(transparent)]
    Protocol(#[from] ImmunobotError),
    #[error("Invalid radio setting {field}: {reason}")]
    InvalidRadio { field: &'static str, reason: String },
}

/// Event emitted by the swarm during simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SwarmEvent {
    /// A robot was placed in the arena.
    Spawned { id: RobotId, role: Role },
    /// A robot left the arena.
    Removed { id: RobotId, role: Role },
    /// A robot's kill/death state changed.
    Transitioned { id: RobotId, role: Role, transition: Transition },
    /// A frame failed verification and was discarded.
    FrameDropped { from: RobotId, to: RobotId, reason: String },
    /// A tick completed.
    TickComplete { tick: Tick, delivered: usize, dropped: usize },
}

/// Configuration for a swarm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Seed for every random source in the run.
    pub seed: u64,
    /// Calibration bias subtracted from raw distance measurements.
    pub estimator_offset_mm: f64,
    /// Most recent events kept in the history (default: 10000).
    pub history_limit: usize,
    pub protocol: ProtocolConfig,
    pub radio: RadioConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            estimator_offset_mm: 0.0,
            history_limit: 10_000,
            protocol: ProtocolConfig::default(),
            radio: RadioConfig::default(),
        }
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), SwarmError> {
        self.protocol.validate()?;
        let r = &self.radio;
        for (field, p) in [("loss_rate", r.loss_rate), ("corruption_rate", r.corruption_rate)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SwarmError::InvalidRadio {
                    field,
                    reason: format!("{p} is not a probability"),
                });
            }
        }
        if !r.range_mm.is_finite() || r.range_mm <= 0.0 {
            return Err(SwarmError::InvalidRadio {
                field: "range_mm",
                reason: format!("{} is not a positive distance", r.range_mm),
            });
        }
        if !r.distance_jitter_mm.is_finite()
            || r.distance_jitter_mm < 0.0
            || r.distance_jitter_mm > r.range_mm
        {
            return Err(SwarmError::InvalidRadio {
                field: "distance_jitter_mm",
                reason: format!(
                    "{} must be between 0 and the range ({})",
                    r.distance_jitter_mm, r.range_mm
                ),
            });
        }
        if !self.estimator_offset_mm.is_finite() {
            return Err(SwarmError::InvalidRadio {
                field: "estimator_offset_mm",
                reason: format!("{} is not a finite distance", self.estimator_offset_mm),
            });
        }
        if r.transmit_interval == 0 {
            return Err(SwarmError::InvalidRadio {
                field: "transmit_interval",
                reason: "must be at least one tick".to_string(),
            });
        }
        Ok(())
    }
}

/// Statistics about the swarm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwarmStats {
    pub tick: Tick,
    pub robots: usize,
    pub alive: usize,
    pub killing: usize,
    pub dead: usize,
    pub frames_delivered: u64,
    pub frames_lost: u64,
    pub frames_corrupted: u64,
}

/// A serializable snapshot of one robot.
#[derive(Debug, Clone, Serialize)]
pub struct RobotSnapshot {
    pub id: RobotId,
    pub position: Position,
    pub agent: AgentSnapshot,
    pub body: BodyState,
}

/// A complete serializable snapshot of the swarm at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SwarmSnapshot {
    pub tick: Tick,
    pub robots: Vec<RobotSnapshot>,
    pub stats: SwarmStats,
}

struct Robot {
    id: RobotId,
    position: Position,
    agent: ImmuneAgent,
    body: SimulatedBody,
}

/// The swarm — owns the robots and the medium between them.
pub struct Swarm {
    config: SwarmConfig,
    robots: Vec<Robot>,
    radio: SimRadio,
    estimator: CalibratedEstimator,
    tick: Tick,
    event_history: VecDeque<(Tick, SwarmEvent)>,
    total_spawned: u64,
    frames_delivered: u64,
    frames_lost: u64,
    frames_corrupted: u64,
}

impl Swarm {
    /// Create an empty swarm with default configuration.
    pub fn new() -> Self {
        Self::build(SwarmConfig::default())
    }

    /// Create an empty swarm with the specified configuration.
    pub fn from_config(config: SwarmConfig) -> Result<Self, SwarmError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SwarmConfig) -> Self {
        Self {
            radio: SimRadio::new(config.radio.clone(), config.seed),
            estimator: CalibratedEstimator::new(config.estimator_offset_mm),
            config,
            robots: Vec::new(),
            tick: 0,
            event_history: VecDeque::new(),
            total_spawned: 0,
            frames_delivered: 0,
            frames_lost: 0,
            frames_corrupted: 0,
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Place a freshly booted robot in the arena.
    pub fn spawn(&mut self, role: Role, position: Position) -> RobotId {
        let id = RobotId::from_seed(self.total_spawned);
        let body_seed = self.config.seed ^ self.total_spawned.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.total_spawned += 1;

        self.robots.push(Robot {
            id,
            position,
            agent: ImmuneAgent::booted_at(role, self.config.protocol.clone(), self.tick),
            body: SimulatedBody::new(body_seed),
        });
        debug!(%id, %role, x = position.x, y = position.y, "robot spawned");
        self.record(SwarmEvent::Spawned { id, role });
        id
    }

    /// Take a robot out of the arena (powered off, carried away).
    pub fn remove(&mut self, id: RobotId) -> Result<Role, SwarmError> {
        let idx = self.index_of(id)?;
        let robot = self.robots.remove(idx);
        let role = robot.agent.role();
        self.record(SwarmEvent::Removed { id, role });
        Ok(role)
    }

    /// Move a robot to a new position.
    pub fn move_robot(&mut self, id: RobotId, position: Position) -> Result<(), SwarmError> {
        let idx = self.index_of(id)?;
        self.robots[idx].position = position;
        Ok(())
    }

    pub fn position(&self, id: RobotId) -> Option<Position> {
        self.robot(id).map(|r| r.position)
    }

    pub fn agent(&self, id: RobotId) -> Option<&ImmuneAgent> {
        self.robot(id).map(|r| &r.agent)
    }

    pub fn body(&self, id: RobotId) -> Option<&SimulatedBody> {
        self.robot(id).map(|r| &r.body)
    }

    pub fn status(&self, id: RobotId) -> Option<CellStatus> {
        self.robot(id).map(|r| r.agent.status())
    }

    pub fn robot_ids(&self) -> Vec<RobotId> {
        self.robots.iter().map(|r| r.id).collect()
    }

    /// Run a single simulation tick.
    pub fn tick(&mut self) -> Vec<SwarmEvent> {
        let now = self.tick;
        let mut events = Vec::new();
        let mut delivered = 0;
        let mut dropped = 0;

        // Phase 1: every robot due to talk composes its frame before
        // anyone hears anything this tick.
        let outgoing: Vec<(usize, Position, [u8; FRAME_LEN])> =
            if self.radio.is_transmit_tick(now) {
                self.robots
                    .iter()
                    .enumerate()
                    .map(|(idx, r)| (idx, r.position, r.agent.transmit(now).encode_frame()))
                    .collect()
            } else {
                Vec::new()
            };

        // Phase 2: deliver
        for (from, from_pos, frame) in &outgoing {
            for to in 0..self.robots.len() {
                if to == *from {
                    continue;
                }
                let to_pos = self.robots[to].position;
                match self.radio.transmit(frame, *from_pos, to_pos) {
                    Reception::Delivered(message, measurement) => {
                        let distance = self.estimator.estimate_distance(&measurement);
                        let robot = &mut self.robots[to];
                        if let Some(transition) = robot.agent.on_receive(&message, distance, now) {
                            events.push(SwarmEvent::Transitioned {
                                id: robot.id,
                                role: robot.agent.role(),
                                transition,
                            });
                        }
                        delivered += 1;
                    }
                    Reception::OutOfRange => {}
                    Reception::Lost => {
                        self.frames_lost += 1;
                    }
                    Reception::Corrupted(error) => {
                        let (from_id, to_id) = (self.robots[*from].id, self.robots[to].id);
                        trace!(from = %from_id, to = %to_id, %error, "corrupted frame");
                        events.push(SwarmEvent::FrameDropped {
                            from: from_id,
                            to: to_id,
                            reason: error.to_string(),
                        });
                        self.frames_corrupted += 1;
                        dropped += 1;
                    }
                }
            }
        }
        self.frames_delivered += delivered as u64;

        // Phase 3: behavior loop
        for robot in &mut self.robots {
            robot.body.set_tick(now);
            if let Some(transition) = robot.agent.on_tick(&mut robot.body) {
                events.push(SwarmEvent::Transitioned {
                    id: robot.id,
                    role: robot.agent.role(),
                    transition,
                });
            }
        }

        for event in &events {
            if let SwarmEvent::Transitioned { id, role, transition } = event {
                debug!(%id, %role, ?transition, tick = now, "state changed");
            }
        }

        events.push(SwarmEvent::TickComplete {
            tick: now,
            delivered,
            dropped,
        });
        self.event_history
            .extend(events.iter().cloned().map(|e| (now, e)));
        self.trim_history();
        self.tick += 1;
        events
    }

    /// Run the simulation for N ticks.
    pub fn run(&mut self, ticks: u64) -> Vec<Vec<SwarmEvent>> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Run until `pred` holds or `max_ticks` elapse. Returns whether it held.
    pub fn run_until(&mut self, max_ticks: u64, mut pred: impl FnMut(&Swarm) -> bool) -> bool {
        for _ in 0..max_ticks {
            if pred(self) {
                return true;
            }
            self.tick();
        }
        pred(self)
    }

    /// The most recent events, oldest first, tagged with their tick.
    pub fn event_history(&self) -> &VecDeque<(Tick, SwarmEvent)> {
        &self.event_history
    }

    /// Transitions of one robot still in the history, in order.
    pub fn transitions_of(&self, id: RobotId) -> Vec<Transition> {
        self.event_history
            .iter()
            .filter_map(|(_, e)| match e {
                SwarmEvent::Transitioned { id: who, transition, .. } if *who == id => {
                    Some(*transition)
                }
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> SwarmStats {
        let count = |s: CellStatus| self.robots.iter().filter(|r| r.agent.status() == s).count();
        SwarmStats {
            tick: self.tick,
            robots: self.robots.len(),
            alive: count(CellStatus::Alive),
            killing: count(CellStatus::Killing),
            dead: count(CellStatus::Dead),
            frames_delivered: self.frames_delivered,
            frames_lost: self.frames_lost,
            frames_corrupted: self.frames_corrupted,
        }
    }

    pub fn snapshot(&self) -> SwarmSnapshot {
        SwarmSnapshot {
            tick: self.tick,
            robots: self
                .robots
                .iter()
                .map(|r| RobotSnapshot {
                    id: r.id,
                    position: r.position,
                    agent: r.agent.snapshot(self.tick),
                    body: r.body.state(),
                })
                .collect(),
            stats: self.stats(),
        }
    }

    fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == id)
    }

    fn index_of(&self, id: RobotId) -> Result<usize, SwarmError> {
        self.robots
            .iter()
            .position(|r| r.id == id)
            .ok_or(SwarmError::RobotNotFound(id))
    }

    fn record(&mut self, event: SwarmEvent) {
        self.event_history.push_back((self.tick, event));
        self.trim_history();
    }

    fn trim_history(&mut self) {
        let excess = self
            .event_history
            .len()
            .saturating_sub(self.config.history_limit);
        self.event_history.drain(..excess);
    }
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new()
    }
}
