//! Agent — the program every robot runs.
//!
//! An agent has two entry points, matching the two ways the hardware
//! calls into it:
//!
//! - [`Agent::on_receive`] whenever the radio delivers a verified frame,
//! - [`Agent::on_tick`] once per behavior-loop iteration,
//!
//! plus [`Agent::transmit`], which the radio pulls right before each
//! broadcast. The platform guarantees these never overlap; `&mut self`
//! makes the borrow checker enforce the same.

use crate::config::ProtocolConfig;
use crate::effector::{render, EffectorInput, EffectorOutput, Shade};
use crate::lifecycle::{KillSwitch, Transition};
use crate::message::Message;
use crate::platform::{MotorDriver, Platform, Sparkler};
use crate::role::Role;
use crate::tracker::EventAgeTracker;
use crate::types::{CellStatus, EventAges, Response, Tick};
use serde::{Deserialize, Serialize};

/// A robot's program, independent of how it is scheduled.
pub trait Agent {
    /// The role this agent was flashed with.
    fn role(&self) -> Role;

    /// Fold a verified inbound message into local state.
    fn on_receive(&mut self, message: &Message, distance_mm: f64, now: Tick) -> Option<Transition>;

    /// Advance the state machine and drive the effectors.
    fn on_tick(&mut self, platform: &mut dyn Platform) -> Option<Transition>;

    /// Produce the next broadcast. Must not block.
    fn transmit(&self, now: Tick) -> Message;

    fn status(&self) -> CellStatus;

    /// A serializable view of the agent's state at `now`.
    fn snapshot(&self, now: Tick) -> AgentSnapshot;
}

/// A serializable snapshot of an agent's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub role: Role,
    pub status: CellStatus,
    pub ages: EventAges,
    pub strength: u8,
    pub armed: bool,
    pub ready: bool,
    pub kill_time: Option<Tick>,
}

/// The immune-response agent.
#[derive(Debug, Clone)]
pub struct ImmuneAgent {
    role: Role,
    config: ProtocolConfig,
    tracker: EventAgeTracker,
    switch: KillSwitch,
    motors: MotorDriver,
    sparkler: Sparkler,
    last_output: Option<EffectorOutput>,
}

impl ImmuneAgent {
    /// An agent booted at tick 0.
    pub fn new(role: Role, config: ProtocolConfig) -> Self {
        Self::booted_at(role, config, 0)
    }

    /// An agent booted at `now`. All its counters start out 255 ticks old.
    pub fn booted_at(role: Role, config: ProtocolConfig, now: Tick) -> Self {
        Self {
            role,
            config,
            tracker: EventAgeTracker::new(role, now),
            switch: KillSwitch::new(),
            motors: MotorDriver::new(),
            sparkler: Sparkler::new(),
            last_output: None,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn tracker(&self) -> &EventAgeTracker {
        &self.tracker
    }

    pub fn kill_switch(&self) -> &KillSwitch {
        &self.switch
    }

    pub fn armed(&self, now: Tick) -> bool {
        self.tracker.armed(now, &self.config)
    }

    pub fn ready(&self, now: Tick) -> bool {
        self.tracker.ready(now, &self.config)
    }

    /// The response strength this agent currently relays.
    pub fn response(&self) -> Response {
        Response::from_byte(self.tracker.strength_value())
    }

    /// Effector requests computed on the last tick.
    pub fn last_output(&self) -> Option<EffectorOutput> {
        self.last_output
    }

    fn effector_input(&self, now: Tick) -> EffectorInput {
        EffectorInput {
            role: self.role,
            armed: self.armed(now),
            ready: self.ready(now),
            kill: self.switch.kill(),
            dead: self.switch.dead(),
            response: self.response(),
            kill_time: self.switch.kill_time(),
            tick: now,
        }
    }
}

impl Agent for ImmuneAgent {
    fn role(&self) -> Role {
        self.role
    }

    fn on_receive(&mut self, message: &Message, distance_mm: f64, now: Tick) -> Option<Transition> {
        self.tracker
            .on_message_received(message, distance_mm, now, &self.config);
        let armed = self.armed(now);
        self.switch.latch(self.role, armed, now)
    }

    fn on_tick(&mut self, platform: &mut dyn Platform) -> Option<Transition> {
        let now = platform.current_tick();
        let transition = self
            .switch
            .update(self.armed(now), self.response(), now, &self.config);

        let output = render(&self.effector_input(now), &self.config);
        let color = match output.shade {
            Shade::Solid(color) => color,
            Shade::Sparkle => {
                self.sparkler
                    .color(platform, self.config.sparkle_period, self.config.sparkle_mask)
            }
        };
        platform.set_color(color);
        self.motors
            .drive(platform, output.motor_speed, output.motor_speed);
        self.last_output = Some(output);

        transition
    }

    fn transmit(&self, now: Tick) -> Message {
        Message::new(self.role, self.tracker.ages(now), self.tracker.strength_value())
    }

    fn status(&self) -> CellStatus {
        self.switch.status()
    }

    fn snapshot(&self, now: Tick) -> AgentSnapshot {
        AgentSnapshot {
            role: self.role,
            status: self.status(),
            ages: self.tracker.ages(now),
            strength: self.tracker.strength_value(),
            armed: self.armed(now),
            ready: self.ready(now),
            kill_time: self.switch.kill_time(),
        }
    }
}
