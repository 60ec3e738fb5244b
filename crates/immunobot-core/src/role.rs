//! Role classifier — which cell type a robot plays.
//!
//! A role is flashed once per robot and never changes. The predicates
//! here partition the role space into the capability groups the
//! protocol reasons about: T-cells present the attack, antibodies
//! bridge T-cells to antigens, antigens mark a target, and the target
//! cell interior is what eventually dies.

use crate::error::ImmunobotError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eleven cell types. The discriminant is the wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Role {
    TCellWeak = 1,
    TCellMedium = 2,
    TCellStrong = 3,
    AntibodyCancer = 4,
    AntibodyHealthy = 5,
    /// Binds both antigen types.
    AntibodyDual = 6,
    AntigenCancer = 7,
    AntigenHealthy = 8,
    CancerInterior = 9,
    HealthyInterior = 10,
    TNucleus = 11,
}

impl Role {
    /// Every role, in wire-id order.
    pub const ALL: [Role; 11] = [
        Role::TCellWeak,
        Role::TCellMedium,
        Role::TCellStrong,
        Role::AntibodyCancer,
        Role::AntibodyHealthy,
        Role::AntibodyDual,
        Role::AntigenCancer,
        Role::AntigenHealthy,
        Role::CancerInterior,
        Role::HealthyInterior,
        Role::TNucleus,
    ];

    /// Decode a wire id. Ids outside the closed set yield `None`.
    pub fn from_id(id: u8) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.id() == id)
    }

    /// The wire id carried in byte 0 of every message.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn is_tcell(self) -> bool {
        matches!(self, Role::TCellWeak | Role::TCellMedium | Role::TCellStrong)
    }

    pub fn is_antibody(self) -> bool {
        matches!(
            self,
            Role::AntibodyCancer | Role::AntibodyHealthy | Role::AntibodyDual
        )
    }

    pub fn is_antigen(self) -> bool {
        matches!(self, Role::AntigenCancer | Role::AntigenHealthy)
    }

    pub fn is_target_cell(self) -> bool {
        matches!(self, Role::CancerInterior | Role::HealthyInterior)
    }

    /// Short label used in logs and tables.
    pub fn label(self) -> &'static str {
        match self {
            Role::TCellWeak => "T1",
            Role::TCellMedium => "T2",
            Role::TCellStrong => "T3",
            Role::AntibodyCancer => "ABC",
            Role::AntibodyHealthy => "ABH",
            Role::AntibodyDual => "AB2",
            Role::AntigenCancer => "AGC",
            Role::AntigenHealthy => "AGH",
            Role::CancerInterior => "CI",
            Role::HealthyInterior => "HI",
            Role::TNucleus => "TN",
        }
    }

    /// Capability group name.
    pub fn group(self) -> &'static str {
        if self.is_tcell() {
            "t-cell"
        } else if self.is_antibody() {
            "antibody"
        } else if self.is_antigen() {
            "antigen"
        } else if self.is_target_cell() {
            "target-cell"
        } else {
            "solo"
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Role {
    type Error = ImmunobotError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Role::from_id(id).ok_or(ImmunobotError::UnknownRole(id))
    }
}

/// Whether `antibody` binds `antigen`.
///
/// Order matters: the first argument must be the antibody. Callers
/// checking an unordered pair test both directions.
pub fn compatible(antibody: Role, antigen: Role) -> bool {
    matches!(
        (antibody, antigen),
        (Role::AntibodyCancer, Role::AntigenCancer)
            | (Role::AntibodyHealthy, Role::AntigenHealthy)
            | (Role::AntibodyDual, Role::AntigenCancer | Role::AntigenHealthy)
    )
}

/// Whether a T-cell and an antibody are on opposite ends of this pair.
pub fn is_tcell_antibody_pair(a: Role, b: Role) -> bool {
    (a.is_tcell() && b.is_antibody()) || (a.is_antibody() && b.is_tcell())
}

/// Whether a compatible antibody/antigen pair is formed, in either order.
pub fn is_binding_pair(a: Role, b: Role) -> bool {
    compatible(a, b) || compatible(b, a)
}
