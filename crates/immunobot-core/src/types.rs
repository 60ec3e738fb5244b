//! Shared types used across the immune protocol and its effectors.

use serde::{Deserialize, Serialize};

/// The current tick of an agent's behavior loop.
///
/// Ticks are local to each robot: two robots never share a clock, so
/// only differences between ticks travel over the radio.
pub type Tick = u64;

/// Largest age that fits in a transmitted counter. Also the age every
/// counter starts at ("unknown").
pub const MAX_AGE: u8 = u8::MAX;

/// A discrete LED color: two bits per channel, packed as `r | g << 2 | b << 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorCode(pub u8);

impl ColorCode {
    /// LED off.
    pub const OFF: ColorCode = ColorCode(0);

    /// Pack a color from channel intensities in `0..=3`. Higher bits are masked off.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r & 0x3) | ((g & 0x3) << 2) | ((b & 0x3) << 4))
    }

    /// Red channel intensity (0-3).
    pub fn red(&self) -> u8 {
        self.0 & 0x3
    }

    /// Green channel intensity (0-3).
    pub fn green(&self) -> u8 {
        (self.0 >> 2) & 0x3
    }

    /// Blue channel intensity (0-3).
    pub fn blue(&self) -> u8 {
        (self.0 >> 4) & 0x3
    }

    pub fn is_off(&self) -> bool {
        self.0 == 0
    }
}

/// Severity of the T-cell response relayed to a target cell.
///
/// Carried on the wire as the role id of the T-cell that originated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Response {
    /// No T-cell has reported yet (or the byte is not a T-cell id).
    #[default]
    None,
    Weak,
    Medium,
    Strong,
}

impl Response {
    /// Interpret a relayed strength byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Response::Weak,
            2 => Response::Medium,
            3 => Response::Strong,
            _ => Response::None,
        }
    }

    /// Whether this response is severe enough to complete a death sequence.
    pub fn is_lethal(&self) -> bool {
        matches!(self, Response::Medium | Response::Strong)
    }
}

/// Externally visible life status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Alive,
    /// Kill signal latched; death sequence running.
    Killing,
    Dead,
}

/// The three ages an agent gossips, already saturated for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventAges {
    /// Ticks since a T-cell touched an antibody.
    pub t_ab: u8,
    /// Ticks since a compatible antibody bound an antigen.
    pub ab_ag: u8,
    /// Ticks since the response strength was last relayed.
    pub strength: u8,
}

impl EventAges {
    /// Ages of an agent that has heard nothing yet.
    pub const UNKNOWN: EventAges = EventAges {
        t_ab: MAX_AGE,
        ab_ag: MAX_AGE,
        strength: MAX_AGE,
    };

    pub fn new(t_ab: u8, ab_ag: u8, strength: u8) -> Self {
        Self { t_ab, ab_ag, strength }
    }
}

/// Saturate an unbounded tick delay to a transmittable age.
pub fn saturate_age(delay: u64) -> u8 {
    u8::try_from(delay).unwrap_or(MAX_AGE)
}
