//! Kill/death state machine of a target cell.
//!
//! ```text
//!            armed               lethal response held for death_ticks
//!   Alive ----------> Killing ------------------------------------> Dead
//!     ^                  |                                            |
//!     +------------------+--------------------------------------------+
//!                           armed lapsed (revival)
//! ```
//!
//! Only target-cell roles ever leave `Alive`. Death is not terminal:
//! when the attack chain disarms, even a dead cell comes back.

use crate::config::ProtocolConfig;
use crate::role::Role;
use crate::types::{CellStatus, Response, Tick};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Internal phase. Encoding death inside the killing branch keeps
/// `dead ⇒ kill` true by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Alive,
    Killing { since: Tick },
    Dead { since: Tick },
}

/// A state change worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Kill signal latched.
    Armed { at: Tick },
    /// Armed lapsed before death; the cell is untouched.
    Aborted { at: Tick },
    /// Death latency elapsed under a lethal response.
    Died { at: Tick },
    /// Armed lapsed after death; the cell is alive again.
    Revived { at: Tick },
}

impl Transition {
    /// Status after the transition.
    pub fn status(&self) -> CellStatus {
        match self {
            Transition::Armed { .. } => CellStatus::Killing,
            Transition::Died { .. } => CellStatus::Dead,
            Transition::Aborted { .. } | Transition::Revived { .. } => CellStatus::Alive,
        }
    }
}

/// The kill latch and death flag of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillSwitch {
    phase: Phase,
}

impl Default for KillSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl KillSwitch {
    pub fn new() -> Self {
        Self { phase: Phase::Alive }
    }

    pub fn status(&self) -> CellStatus {
        match self.phase {
            Phase::Alive => CellStatus::Alive,
            Phase::Killing { .. } => CellStatus::Killing,
            Phase::Dead { .. } => CellStatus::Dead,
        }
    }

    /// Kill signal latched (true while killing or dead).
    pub fn kill(&self) -> bool {
        !matches!(self.phase, Phase::Alive)
    }

    pub fn dead(&self) -> bool {
        matches!(self.phase, Phase::Dead { .. })
    }

    /// Tick at which the kill signal was latched.
    pub fn kill_time(&self) -> Option<Tick> {
        match self.phase {
            Phase::Alive => None,
            Phase::Killing { since } | Phase::Dead { since } => Some(since),
        }
    }

    /// Latch the kill signal if a target cell has just become armed.
    ///
    /// Called after every received message, since that is the only
    /// moment `armed` can turn true.
    pub fn latch(&mut self, role: Role, armed: bool, now: Tick) -> Option<Transition> {
        if !role.is_target_cell() || self.kill() || !armed {
            return None;
        }
        self.phase = Phase::Killing { since: now };
        debug!(%role, tick = now, "kill signal latched");
        Some(Transition::Armed { at: now })
    }

    /// Advance the death sequence. Called once per tick.
    pub fn update(
        &mut self,
        armed: bool,
        response: Response,
        now: Tick,
        config: &ProtocolConfig,
    ) -> Option<Transition> {
        match self.phase {
            Phase::Alive => None,
            Phase::Killing { .. } | Phase::Dead { .. } if !armed => {
                let transition = if self.dead() {
                    Transition::Revived { at: now }
                } else {
                    Transition::Aborted { at: now }
                };
                self.phase = Phase::Alive;
                debug!(tick = now, ?transition, "kill signal removed");
                Some(transition)
            }
            Phase::Killing { since }
                if response.is_lethal()
                    && now >= since.saturating_add(config.death_ticks) =>
            {
                self.phase = Phase::Dead { since };
                debug!(tick = now, ?response, killed_at = since, "cell died");
                Some(Transition::Died { at: now })
            }
            Phase::Killing { .. } | Phase::Dead { .. } => None,
        }
    }
}
