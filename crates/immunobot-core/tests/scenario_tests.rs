//! End-to-end behavior of a single agent fed scripted radio traffic.

use immunobot_core::prelude::*;

/// A recording stand-in for robot hardware.
#[derive(Default)]
struct Bench {
    tick: Tick,
    seed: u64,
    color: ColorCode,
    colors: Vec<ColorCode>,
    motors: (u8, u8),
    motor_writes: Vec<(Tick, u8, u8)>,
}

impl Platform for Bench {
    fn current_tick(&self) -> Tick {
        self.tick
    }

    fn random_byte(&mut self) -> u8 {
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.seed >> 33) as u8
    }

    fn set_color(&mut self, color: ColorCode) {
        self.color = color;
        self.colors.push(color);
    }

    fn set_motor_speeds(&mut self, left: u8, right: u8) {
        self.motors = (left, right);
        self.motor_writes.push((self.tick, left, right));
    }
}

/// What an antigen touching an armed antibody broadcasts.
fn armed_chain(strength: Role) -> Message {
    Message::new(Role::AntigenCancer, EventAges::new(0, 0, 0), strength.id())
}

const CONTACT_MM: f64 = 40.0;

#[test]
fn scenario_a_untouched_target_idles_forever() {
    let mut cell = ImmuneAgent::new(Role::CancerInterior, ProtocolConfig::default());
    let mut bench = Bench::default();

    for tick in 0..5_000 {
        bench.tick = tick;
        assert_eq!(cell.on_tick(&mut bench), None);
        assert_eq!(cell.status(), CellStatus::Alive);
    }

    let dim = ColorCode::rgb(1, 0, 0);
    let bright = ColorCode::rgb(2, 0, 0);
    assert!(bench.colors.iter().all(|c| *c == dim || *c == bright));
    assert!(bench.colors.contains(&dim) && bench.colors.contains(&bright));
    assert!(bench.motor_writes.is_empty(), "motors must stay at 0");
}

#[test]
fn scenario_b_medium_response_kills_after_death_latency() {
    let mut cell = ImmuneAgent::new(Role::CancerInterior, ProtocolConfig::default());
    let mut bench = Bench::default();
    let mut died_at = None;

    for tick in 0..=400 {
        bench.tick = tick;
        if (100..=400).contains(&tick) {
            let t = cell.on_receive(&armed_chain(Role::TCellMedium), CONTACT_MM, tick);
            if tick == 100 {
                assert_eq!(t, Some(Transition::Armed { at: 100 }));
            } else {
                assert_eq!(t, None);
            }
        }
        if let Some(Transition::Died { at }) = cell.on_tick(&mut bench) {
            died_at = Some(at);
        }

        match tick {
            0..=99 => assert_eq!(cell.status(), CellStatus::Alive),
            100..=291 => {
                assert_eq!(cell.status(), CellStatus::Killing, "tick {tick}");
                assert_eq!(bench.motors, (60, 60), "tick {tick}");
            }
            _ => {
                assert_eq!(cell.status(), CellStatus::Dead, "tick {tick}");
                assert_eq!(bench.motors, (0, 0));
                assert_eq!(bench.color, ColorCode::OFF);
            }
        }
    }

    assert_eq!(died_at, Some(292));
    assert_eq!(bench.motor_writes, vec![(100, 60, 60), (292, 0, 0)]);
}

#[test]
fn scenario_c_disarm_before_death_restores_the_cell() {
    let mut cell = ImmuneAgent::new(Role::CancerInterior, ProtocolConfig::default());
    let mut bench = Bench::default();
    let mut transitions = Vec::new();

    for tick in 0..=400 {
        bench.tick = tick;
        if tick == 100 {
            transitions.extend(cell.on_receive(&armed_chain(Role::TCellMedium), CONTACT_MM, tick));
        }
        transitions.extend(cell.on_tick(&mut bench));
    }

    assert_eq!(
        transitions,
        vec![Transition::Armed { at: 100 }, Transition::Aborted { at: 164 }]
    );
    assert_eq!(cell.status(), CellStatus::Alive);
    assert!(!cell.kill_switch().kill());
    assert!(!cell.kill_switch().dead());
    assert_eq!(bench.motors, (0, 0));
}

#[test]
fn scenario_d_weak_response_never_kills() {
    let mut cell = ImmuneAgent::new(Role::HealthyInterior, ProtocolConfig::default());
    let mut bench = Bench::default();

    for tick in 0..2_000 {
        bench.tick = tick;
        cell.on_receive(&armed_chain(Role::TCellWeak), CONTACT_MM, tick);
        let t = cell.on_tick(&mut bench);
        assert!(!matches!(t, Some(Transition::Died { .. })));
        assert_eq!(cell.status(), CellStatus::Killing);
    }

    assert!(bench.motor_writes.is_empty());
    assert_eq!(cell.last_output().map(|o| o.shade), Some(Shade::Sparkle));
}

#[test]
fn scenario_e_relay_keeps_the_original_event_time() {
    let config = ProtocolConfig::default();
    let mut a = ImmuneAgent::new(Role::TNucleus, config.clone());
    let mut b = ImmuneAgent::new(Role::TNucleus, config.clone());
    let mut c = ImmuneAgent::new(Role::CancerInterior, config);

    let heard = Message::new(Role::TNucleus, EventAges::new(10, 255, 255), 0);
    a.on_receive(&heard, 30.0, 50);
    b.on_receive(&heard, 30.0, 50);

    // A and B keep echoing each other without ever refreshing the event.
    for tick in 51..=55 {
        let from_a = a.transmit(tick);
        let from_b = b.transmit(tick);
        b.on_receive(&from_a, 30.0, tick);
        a.on_receive(&from_b, 30.0, tick);
    }

    c.on_receive(&a.transmit(55), 30.0, 55);
    assert_eq!(c.tracker().t_ab_age(55), 15, "event happened at tick 40");
    assert_eq!(a.tracker().t_ab_age(55), 15);
    assert_eq!(b.tracker().t_ab_age(55), 15);
}

#[test]
fn duplicate_delivery_is_idempotent() {
    let config = ProtocolConfig::default();
    let messages = [
        armed_chain(Role::TCellStrong),
        Message::new(Role::TCellMedium, EventAges::new(255, 255, 0), 2),
        Message::new(Role::AntibodyDual, EventAges::new(3, 40, 7), 3),
        Message::from_payload([0xEE, 12, 0, 255, 1]),
    ];

    for role in Role::ALL {
        for m in &messages {
            let mut once = ImmuneAgent::new(role, config.clone());
            let mut twice = ImmuneAgent::new(role, config.clone());
            once.on_receive(m, CONTACT_MM, 30);
            twice.on_receive(m, CONTACT_MM, 30);
            twice.on_receive(m, CONTACT_MM, 30);
            assert_eq!(once.snapshot(30), twice.snapshot(30), "{role} / {m:?}");
            assert_eq!(once.snapshot(90), twice.snapshot(90), "{role} / {m:?}");
        }
    }
}

#[test]
fn gossip_never_makes_knowledge_older() {
    let config = ProtocolConfig::default();
    let mut agent = ImmuneAgent::new(Role::AntigenHealthy, config);
    let mut rng = 7u64;
    let mut next = || {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (rng >> 33) as u32
    };

    // Freshest event tick implied by anything heard so far, per counter.
    let mut implied: [Option<i64>; 3] = [None; 3];
    let mut tick: Tick = 0;

    for _ in 0..2_000 {
        tick += u64::from(next() % 5);
        let ages = EventAges::new(next() as u8, next() as u8, next() as u8);
        // A T-nucleus never gives direct evidence to an antigen.
        let m = Message::new(Role::TNucleus, ages, 0);
        agent.on_receive(&m, 500.0, tick);

        for (slot, reported) in implied.iter_mut().zip([ages.t_ab, ages.ab_ag, ages.strength]) {
            let at = tick as i64 - i64::from(reported);
            *slot = Some(slot.map_or(at, |prev| prev.max(at)));
        }

        for later in [tick, tick + 17, tick + 300] {
            let tracker = agent.tracker();
            let recorded = [
                tracker.t_ab_age(later),
                tracker.ab_ag_age(later),
                tracker.strength_age(later),
            ];
            for (age, at) in recorded.iter().zip(implied) {
                let bound = (later as i64 - at.unwrap()) as u64;
                assert!(*age <= bound, "age {age} older than heard bound {bound}");
            }
        }
    }
}

#[test]
fn transmitted_ages_saturate() {
    let mut ab = ImmuneAgent::new(Role::AntibodyHealthy, ProtocolConfig::default());
    ab.on_receive(&Message::new(Role::TCellStrong, EventAges::new(0, 0, 0), 3), 10.0, 10);
    assert_eq!(ab.transmit(10).ages.t_ab, 0);
    assert_eq!(ab.transmit(264).ages.t_ab, 254);
    assert_eq!(ab.transmit(265).ages.t_ab, 255);
    assert_eq!(ab.transmit(1_000_000).ages, EventAges::UNKNOWN);
    assert_eq!(ab.tracker().t_ab_age(1_000_000), 999_990);
}

#[test]
fn dead_always_implies_kill() {
    let config = ProtocolConfig {
        death_ticks: 20,
        disarm_ticks: 10,
        ..Default::default()
    };
    let mut cell = ImmuneAgent::new(Role::CancerInterior, config);
    let mut bench = Bench::default();
    let mut rng = 99u64;
    let strengths = [Role::TCellWeak, Role::TCellMedium, Role::TCellStrong];

    for tick in 0..5_000 {
        bench.tick = tick;
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
        if (rng >> 60) < 9 {
            let strength = strengths[(rng >> 40) as usize % 3];
            cell.on_receive(&armed_chain(strength), CONTACT_MM, tick);
        }
        cell.on_tick(&mut bench);
        let ks = cell.kill_switch();
        assert!(!ks.dead() || ks.kill());
        assert_eq!(ks.kill(), ks.kill_time().is_some());
    }
}

#[test]
fn dead_cell_revives_when_attack_withdraws() {
    let mut cell = ImmuneAgent::new(Role::CancerInterior, ProtocolConfig::default());
    let mut bench = Bench::default();
    let mut transitions = Vec::new();

    for tick in 0..=600 {
        bench.tick = tick;
        if tick <= 300 {
            transitions.extend(cell.on_receive(&armed_chain(Role::TCellStrong), CONTACT_MM, tick));
        }
        transitions.extend(cell.on_tick(&mut bench));
    }

    assert_eq!(
        transitions,
        vec![
            Transition::Armed { at: 0 },
            Transition::Died { at: 192 },
            Transition::Revived { at: 364 },
        ]
    );
    assert_eq!(cell.status(), CellStatus::Alive);
}

#[test]
fn antibody_blinks_while_tcell_is_near() {
    let mut ab = ImmuneAgent::new(Role::AntibodyCancer, ProtocolConfig::default());
    let mut bench = Bench::default();
    let green = ColorCode::rgb(0, 1, 0);

    bench.tick = 0;
    ab.on_tick(&mut bench);
    bench.tick = 9;
    ab.on_tick(&mut bench);
    assert_eq!(bench.color, green, "steady green when idle");

    ab.on_receive(&Message::new(Role::TCellStrong, EventAges::UNKNOWN, 3), 60.0, 9);
    ab.on_tick(&mut bench);
    assert_eq!(bench.color, ColorCode::OFF, "blinking, tick 9 is an off phase");
}
