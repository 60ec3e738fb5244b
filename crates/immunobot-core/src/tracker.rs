//! Event-age tracker — how long ago did anyone nearby see it?
//!
//! Each agent keeps one clock per tracked event. A clock remembers the
//! tick at which the event was last known to be true; its age is
//! derived lazily from the current tick and saturated only when sent.
//!
//! Clocks are refreshed two ways:
//!
//! - **Direct evidence**: the received message itself proves the event
//!   (the right pair of roles is in radio contact). The clock resets to
//!   the current tick.
//! - **Relay evidence**: the sender reports its own age for the event.
//!   If that is fresher than ours, we adopt the sender's timeline. Ties
//!   and staler reports are ignored, so repeating a message is a no-op.
//!
//! The result is epidemic propagation of the *minimum* known age: an
//! agent never believes an event is older than a neighbour says it is,
//! and never resets to zero on hearsay.

use crate::config::ProtocolConfig;
use crate::message::Message;
use crate::role::{is_binding_pair, is_tcell_antibody_pair, Role};
use crate::types::{saturate_age, EventAges, Tick, MAX_AGE};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How a clock was affected by one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evidence {
    /// The message proved the event; age reset to zero.
    Direct,
    /// The sender knew of a fresher occurrence; its timeline was adopted.
    Relayed,
    /// Nothing new.
    Ignored,
}

/// Last-known tick of one event.
///
/// Stored signed so that an agent which has just booted can still hold
/// "this happened 255 ticks ago".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EventClock {
    refreshed_at: i64,
}

impl EventClock {
    /// A clock that reports the maximum age at `now`.
    fn unknown(now: Tick) -> Self {
        Self {
            refreshed_at: signed(now) - i64::from(MAX_AGE),
        }
    }

    /// A clock pinned to `now`, permanently fresh for as long as it is re-pinned.
    fn fresh(now: Tick) -> Self {
        Self {
            refreshed_at: signed(now),
        }
    }

    fn age(&self, now: Tick) -> u64 {
        u64::try_from(signed(now) - self.refreshed_at).unwrap_or(0)
    }

    fn observe(&mut self, now: Tick) {
        self.refreshed_at = signed(now);
    }

    /// Adopt the sender's timeline if it is strictly fresher than ours.
    fn relay(&mut self, now: Tick, reported: u8) -> bool {
        if self.age(now) > u64::from(reported) {
            self.refreshed_at = signed(now) - i64::from(reported);
            true
        } else {
            false
        }
    }
}

fn signed(tick: Tick) -> i64 {
    i64::try_from(tick).unwrap_or(i64::MAX)
}

/// Outcome of feeding one message to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerUpdate {
    pub t_ab: Evidence,
    pub ab_ag: Evidence,
    pub strength: Evidence,
}

/// The three decaying counters of one agent, plus the relayed strength.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAgeTracker {
    role: Role,
    t_ab: EventClock,
    ab_ag: EventClock,
    strength: EventClock,
    /// Raw response byte relayed in our own broadcasts.
    strength_value: u8,
}

impl EventAgeTracker {
    /// A tracker that has heard nothing, booted at `now`.
    ///
    /// T-cells are the authority on their own strength: they report it
    /// with age zero forever and never relay anyone else's.
    pub fn new(role: Role, now: Tick) -> Self {
        let (strength, strength_value) = if role.is_tcell() {
            (EventClock::fresh(now), role.id())
        } else {
            (EventClock::unknown(now), 0)
        };
        Self {
            role,
            t_ab: EventClock::unknown(now),
            ab_ag: EventClock::unknown(now),
            strength,
            strength_value,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Fold one received message into the clocks.
    ///
    /// `distance_mm` is the estimated distance to the sender; it only
    /// matters for antibody/antigen binding, which requires contact.
    pub fn on_message_received(
        &mut self,
        message: &Message,
        distance_mm: f64,
        now: Tick,
        config: &ProtocolConfig,
    ) -> TrackerUpdate {
        let sender = message.sender_role();
        let me = self.role;

        let t_ab = if sender.is_some_and(|s| is_tcell_antibody_pair(me, s)) {
            self.t_ab.observe(now);
            Evidence::Direct
        } else if self.t_ab.relay(now, message.ages.t_ab) {
            Evidence::Relayed
        } else {
            Evidence::Ignored
        };

        let binds = sender.is_some_and(|s| is_binding_pair(me, s))
            && distance_mm < config.binding_distance_mm;
        let ab_ag = if binds {
            self.ab_ag.observe(now);
            Evidence::Direct
        } else if self.ab_ag.relay(now, message.ages.ab_ag) {
            Evidence::Relayed
        } else {
            Evidence::Ignored
        };

        let strength = if me.is_tcell() {
            Evidence::Ignored
        } else if self.strength.relay(now, message.ages.strength) {
            self.strength_value = message.strength;
            Evidence::Relayed
        } else {
            Evidence::Ignored
        };

        let update = TrackerUpdate {
            t_ab,
            ab_ag,
            strength,
        };
        trace!(role = %me, sender = message.sender, ?update, tick = now, "message folded");
        update
    }

    /// Unbounded ticks since the T-cell/antibody contact.
    pub fn t_ab_age(&self, now: Tick) -> u64 {
        self.t_ab.age(now)
    }

    /// Unbounded ticks since the antibody/antigen binding.
    pub fn ab_ag_age(&self, now: Tick) -> u64 {
        self.ab_ag.age(now)
    }

    /// Unbounded ticks since the strength was relayed. Always 0 for T-cells.
    pub fn strength_age(&self, now: Tick) -> u64 {
        if self.role.is_tcell() {
            0
        } else {
            self.strength.age(now)
        }
    }

    /// Raw strength byte to relay.
    pub fn strength_value(&self) -> u8 {
        self.strength_value
    }

    /// Saturated ages as they go on the air.
    pub fn ages(&self, now: Tick) -> EventAges {
        EventAges {
            t_ab: saturate_age(self.t_ab_age(now)),
            ab_ag: saturate_age(self.ab_ag_age(now)),
            strength: saturate_age(self.strength_age(now)),
        }
    }

    /// A T-cell has recently touched an antibody.
    pub fn ready(&self, now: Tick, config: &ProtocolConfig) -> bool {
        self.t_ab_age(now) < config.disarm_ticks
    }

    /// Both links of the T-cell → antibody → antigen chain are fresh.
    pub fn armed(&self, now: Tick, config: &ProtocolConfig) -> bool {
        self.ready(now, config) && self.ab_ag_age(now) < config.disarm_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: Role, t_ab: u8, ab_ag: u8, strength_age: u8, strength: u8) -> Message {
        Message::new(sender, EventAges::new(t_ab, ab_ag, strength_age), strength)
    }

    #[test]
    fn fresh_tracker_reports_unknown() {
        let t = EventAgeTracker::new(Role::AntibodyCancer, 0);
        assert_eq!(t.ages(0), EventAges::UNKNOWN);
        assert_eq!(t.ages(1000), EventAges::UNKNOWN);
        assert!(!t.ready(0, &ProtocolConfig::default()));
    }

    #[test]
    fn tcell_reports_own_strength_at_age_zero() {
        let t = EventAgeTracker::new(Role::TCellMedium, 0);
        assert_eq!(t.ages(500).strength, 0);
        assert_eq!(t.strength_value(), 2);
    }

    #[test]
    fn direct_tcell_contact_resets_age() {
        let cfg = ProtocolConfig::default();
        let mut ab = EventAgeTracker::new(Role::AntibodyDual, 0);
        let contact = msg(Role::TCellWeak, 255, 255, 0, 1);
        let update = ab.on_message_received(&contact, 500.0, 40, &cfg);
        assert_eq!(update.t_ab, Evidence::Direct);
        assert_eq!(ab.t_ab_age(40), 0);
        assert_eq!(ab.t_ab_age(50), 10);
    }

    #[test]
    fn relay_adopts_sender_timeline() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenCancer, 0);
        let update = ag.on_message_received(&msg(Role::TNucleus, 10, 255, 255, 0), 20.0, 50, &cfg);
        assert_eq!(update.t_ab, Evidence::Relayed);
        assert_eq!(ag.t_ab_age(50), 10);
        assert_eq!(ag.t_ab_age(55), 15);
    }

    #[test]
    fn staler_relay_is_ignored() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenCancer, 0);
        ag.on_message_received(&msg(Role::TNucleus, 5, 255, 255, 0), 20.0, 50, &cfg);
        let update = ag.on_message_received(&msg(Role::TNucleus, 30, 255, 255, 0), 20.0, 52, &cfg);
        assert_eq!(update.t_ab, Evidence::Ignored);
        assert_eq!(ag.t_ab_age(52), 7);
    }

    #[test]
    fn tie_does_not_update() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenHealthy, 0);
        ag.on_message_received(&msg(Role::TNucleus, 10, 255, 255, 0), 20.0, 50, &cfg);
        let update = ag.on_message_received(&msg(Role::TNucleus, 10, 255, 255, 0), 20.0, 50, &cfg);
        assert_eq!(update.t_ab, Evidence::Ignored);
    }

    #[test]
    fn binding_requires_contact_distance() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenCancer, 0);
        let unknown = msg(Role::AntibodyCancer, 255, 255, 255, 0);

        // At boot the clock is exactly 255 old, so "unknown" is a tie.
        let far = ag.on_message_received(&unknown, 80.0, 0, &cfg);
        assert_eq!(far.ab_ag, Evidence::Ignored);
        assert_eq!(ag.ab_ag_age(0), 255);

        let near = ag.on_message_received(&unknown, 40.0, 1, &cfg);
        assert_eq!(near.ab_ag, Evidence::Direct);
        assert_eq!(ag.ab_ag_age(1), 0);
    }

    #[test]
    fn saturated_relay_repins_an_older_clock() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenCancer, 0);
        let unknown = msg(Role::AntibodyCancer, 255, 255, 255, 0);

        let far = ag.on_message_received(&unknown, 80.0, 10, &cfg);
        assert_eq!(far.ab_ag, Evidence::Relayed);
        assert_eq!(ag.ab_ag_age(10), 255);
    }

    #[test]
    fn binding_distance_is_strict() {
        let cfg = ProtocolConfig::default();
        let unknown = msg(Role::AntibodyCancer, 255, 255, 255, 0);

        let mut touching = EventAgeTracker::new(Role::AntigenCancer, 0);
        let update = touching.on_message_received(&unknown, 75.0, 0, &cfg);
        assert_ne!(update.ab_ag, Evidence::Direct);
        assert_eq!(touching.ab_ag_age(0), 255);

        let mut inside = EventAgeTracker::new(Role::AntigenCancer, 0);
        let update = inside.on_message_received(&unknown, 74.9, 0, &cfg);
        assert_eq!(update.ab_ag, Evidence::Direct);
        assert_eq!(inside.ab_ag_age(0), 0);
    }

    #[test]
    fn distant_binding_partner_still_relays() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenCancer, 0);
        let relayed = msg(Role::AntibodyCancer, 255, 3, 255, 0);
        let update = ag.on_message_received(&relayed, 120.0, 10, &cfg);
        assert_eq!(update.ab_ag, Evidence::Relayed);
        assert_eq!(ag.ab_ag_age(10), 3);
    }

    #[test]
    fn incompatible_pair_is_not_direct() {
        let cfg = ProtocolConfig::default();
        let mut ag = EventAgeTracker::new(Role::AntigenHealthy, 0);
        let unknown = msg(Role::AntibodyCancer, 255, 255, 255, 0);
        let update = ag.on_message_received(&unknown, 10.0, 0, &cfg);
        assert_eq!(update.ab_ag, Evidence::Ignored);
        assert_eq!(ag.ab_ag_age(0), 255);
    }

    #[test]
    fn strength_relay_copies_value() {
        let cfg = ProtocolConfig::default();
        let mut ab = EventAgeTracker::new(Role::AntibodyCancer, 0);
        let update = ab.on_message_received(&msg(Role::TCellStrong, 255, 255, 0, 3), 30.0, 7, &cfg);
        assert_eq!(update.strength, Evidence::Relayed);
        assert_eq!(ab.strength_value(), 3);
        assert_eq!(ab.strength_age(9), 2);
    }

    #[test]
    fn tcells_never_relay_strength() {
        let cfg = ProtocolConfig::default();
        let mut t = EventAgeTracker::new(Role::TCellWeak, 0);
        let update = t.on_message_received(&msg(Role::TCellStrong, 255, 255, 0, 3), 30.0, 7, &cfg);
        assert_eq!(update.strength, Evidence::Ignored);
        assert_eq!(t.strength_value(), 1);
    }

    #[test]
    fn unknown_sender_is_relay_only() {
        let cfg = ProtocolConfig::default();
        let mut ab = EventAgeTracker::new(Role::AntibodyCancer, 0);
        let m = Message::from_payload([99, 4, 255, 255, 0]);
        let update = ab.on_message_received(&m, 1.0, 20, &cfg);
        assert_eq!(update.t_ab, Evidence::Relayed);
        assert_eq!(ab.t_ab_age(20), 4);
    }

    #[test]
    fn relay_before_boot_horizon_is_representable() {
        let cfg = ProtocolConfig::default();
        let mut ab = EventAgeTracker::new(Role::AntibodyCancer, 0);
        ab.on_message_received(&msg(Role::TNucleus, 30, 255, 255, 0), 1.0, 5, &cfg);
        assert_eq!(ab.t_ab_age(5), 30);
    }

    #[test]
    fn armed_needs_both_links() {
        let cfg = ProtocolConfig::default();
        let mut ci = EventAgeTracker::new(Role::CancerInterior, 0);
        ci.on_message_received(&msg(Role::AntigenCancer, 0, 255, 255, 0), 30.0, 100, &cfg);
        assert!(ci.ready(100, &cfg));
        assert!(!ci.armed(100, &cfg));

        ci.on_message_received(&msg(Role::AntigenCancer, 0, 0, 255, 0), 30.0, 101, &cfg);
        assert!(ci.armed(101, &cfg));
        assert!(ci.armed(100 + 63, &cfg));
        assert!(!ci.armed(101 + 64, &cfg));
    }
}
