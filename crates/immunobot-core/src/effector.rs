//! Effector mapper — what the LED and the motors show.
//!
//! Pure functions from agent state to outputs. Randomness is kept out:
//! the mapper only says *when* to sparkle, the agent owns the random
//! source that decides the color.

use crate::config::ProtocolConfig;
use crate::role::Role;
use crate::types::{ColorCode, Response, Tick};
use serde::{Deserialize, Serialize};

const TCELL: ColorCode = ColorCode::rgb(3, 1, 0);
const NUCLEUS_DIM: ColorCode = ColorCode::rgb(0, 0, 1);
const NUCLEUS_BRIGHT: ColorCode = ColorCode::rgb(0, 0, 3);
const ANTIBODY: ColorCode = ColorCode::rgb(0, 1, 0);
const ANTIGEN_CANCER: ColorCode = ColorCode::rgb(1, 0, 1);
const ANTIGEN_HEALTHY: ColorCode = ColorCode::rgb(1, 1, 1);
const CANCER_DIM: ColorCode = ColorCode::rgb(1, 0, 0);
const CANCER_BRIGHT: ColorCode = ColorCode::rgb(2, 0, 0);
const HEALTHY_DIM: ColorCode = ColorCode::rgb(2, 1, 1);
const HEALTHY_BRIGHT: ColorCode = ColorCode::rgb(3, 1, 1);
const DYING: ColorCode = ColorCode::rgb(3, 0, 0);

/// Everything the mapper looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectorInput {
    pub role: Role,
    pub armed: bool,
    pub ready: bool,
    pub kill: bool,
    pub dead: bool,
    pub response: Response,
    pub kill_time: Option<Tick>,
    pub tick: Tick,
}

/// LED request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shade {
    Solid(ColorCode),
    /// A random color, redrawn by the agent's sparkle generator.
    Sparkle,
}

/// Both effector requests for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectorOutput {
    pub shade: Shade,
    /// Speed for both drive outputs.
    pub motor_speed: u8,
}

/// Map state to effector requests.
pub fn render(input: &EffectorInput, config: &ProtocolConfig) -> EffectorOutput {
    EffectorOutput {
        shade: shade(input, config),
        motor_speed: motor_speed(input, config),
    }
}

/// Alternate between `c0` for `t0` ticks and `c1` for `t1` ticks.
pub fn color_cycle(tick: Tick, c0: ColorCode, t0: u64, c1: ColorCode, t1: u64) -> ColorCode {
    if tick % (t0 + t1) < t0 {
        c0
    } else {
        c1
    }
}

/// LED request for the current state.
pub fn shade(input: &EffectorInput, config: &ProtocolConfig) -> Shade {
    let t = input.tick;
    let blink = |on: bool, c: ColorCode, steady: ColorCode| {
        if on {
            color_cycle(t, c, 8, ColorCode::OFF, 8)
        } else {
            steady
        }
    };

    let color = match input.role {
        r if r.is_tcell() => blink(input.ready, TCELL, TCELL),
        Role::TNucleus => {
            if input.ready {
                color_cycle(t, NUCLEUS_DIM, 16, NUCLEUS_BRIGHT, 16)
            } else {
                ColorCode::OFF
            }
        }
        r if r.is_antibody() => blink(input.ready, ANTIBODY, ANTIBODY),
        Role::AntigenCancer => blink(input.armed, ANTIGEN_CANCER, ANTIGEN_CANCER),
        Role::AntigenHealthy => blink(input.armed, ANTIGEN_HEALTHY, ANTIGEN_HEALTHY),
        role => return target_shade(role, input, config),
    };
    Shade::Solid(color)
}

fn target_shade(role: Role, input: &EffectorInput, config: &ProtocolConfig) -> Shade {
    let t = input.tick;
    if !input.kill {
        let color = if role == Role::CancerInterior {
            color_cycle(t, CANCER_DIM, 32, CANCER_BRIGHT, 32)
        } else {
            color_cycle(t, HEALTHY_DIM, 32, HEALTHY_BRIGHT, 32)
        };
        return Shade::Solid(color);
    }
    if input.dead {
        return Shade::Solid(ColorCode::OFF);
    }

    let first_half = input
        .kill_time
        .is_some_and(|since| t <= since.saturating_add(config.death_ticks / 2));
    if input.response == Response::Weak || first_half {
        Shade::Sparkle
    } else {
        Shade::Solid(color_cycle(t, DYING, 4, ColorCode::OFF, 4))
    }
}

/// Drive speed: only a dying cell under a lethal response moves.
pub fn motor_speed(input: &EffectorInput, config: &ProtocolConfig) -> u8 {
    if !input.kill || input.dead {
        return 0;
    }
    match input.response {
        Response::Medium => config.medium_speed,
        Response::Strong => config.strong_speed,
        Response::None | Response::Weak => 0,
    }
}
