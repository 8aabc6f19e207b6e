use super::*;
use crate::status;

#[test]
fn delayed_damage_detonates_at_its_trigger() {
    let mut unit = bare_unit(2, 10);
    status::attach(&mut unit, &combo_status("crimson-bloom-detonation"), 1000);

    status::process_unit(&mut unit, 3400);
    assert_eq!(unit.health, 10);
    assert_eq!(unit.statuses.len(), 1);

    // trigger and expiry land on the same timestamp; the blast wins
    status::process_unit(&mut unit, 3500);
    assert_eq!(unit.health, 6);
    assert!(unit.statuses.is_empty());
}

#[test]
fn rupture_amplifies_hits_one_stack_at_a_time() {
    let mut unit = bare_unit(2, 20);
    status::attach(&mut unit, &combo_status("tempest-rupture-dance"), 0);

    status::apply_damage(&mut unit, 3);
    assert_eq!(unit.health, 15);
    assert_eq!(unit.statuses.len(), 1);

    status::apply_damage(&mut unit, 3);
    assert_eq!(unit.health, 10);
    assert!(unit.statuses.is_empty());

    status::apply_damage(&mut unit, 3);
    assert_eq!(unit.health, 7);
}

#[test]
fn damage_over_time_catches_up_in_one_batch() {
    let mut unit = bare_unit(2, 10);
    status::attach(&mut unit, &combo_status("fire-dragon-tornado"), 1000);

    // ticks due at 2000, 3000, 4000
    status::process_unit(&mut unit, 4600);
    assert_eq!(unit.health, 7);
    assert_eq!(unit.statuses.len(), 1);

    // expires at 5000
    status::process_unit(&mut unit, 5000);
    assert!(unit.statuses.is_empty());
}

#[test]
fn shield_pulse_stacks_up_to_its_cap() {
    let mut unit = bare_unit(2, 10);
    status::attach(&mut unit, &combo_status("celestial-ward-bloom"), 1000);

    // four intervals elapsed, but the pulse caps at three stacks of two
    status::process_unit(&mut unit, 5900);
    assert_eq!(unit.shields, 6);
}

#[test]
fn aura_scales_then_subtracts() {
    let mut unit = bare_unit(2, 20);
    status::attach(&mut unit, &combo_status("guardian-spirit-anthem"), 0);

    // 10 * (1 - 0.35) - 1 = 5.5, rounded once to 6
    status::apply_damage(&mut unit, 10);
    assert_eq!(unit.health, 14);
}

#[test]
fn vulnerability_amplifies_incoming_damage() {
    let mut unit = bare_unit(2, 20);
    status::attach(&mut unit, &combo_status("berserker-fury"), 0);

    status::apply_damage(&mut unit, 4);
    assert_eq!(unit.health, 15);
}

#[test]
fn shields_absorb_oldest_first_and_reflect() {
    let mut unit = bare_unit(2, 10);
    status::attach(&mut unit, &combo_status("earth-wall-fortress"), 0);
    status::attach(
        &mut unit,
        &StatusTemplate {
            id: "late-shield".into(),
            duration_ms: None,
            kind: StatusKind::Shield {
                remaining: 2,
                reflect: 0.0,
            },
        },
        100,
    );

    let reflected = status::apply_damage(&mut unit, 5);
    assert_eq!(reflected, 1);
    assert_eq!(unit.health, 10);
    assert_eq!(unit.statuses.len(), 1);
    assert!(matches!(
        unit.statuses[0].kind,
        StatusKind::Shield { remaining: 1, .. }
    ));
}

#[test]
fn effective_attack_applies_buffs_and_crowd_control() {
    let mut unit = bare_unit(3, 10);
    status::attach(&mut unit, &combo_status("berserker-fury"), 0);
    assert_eq!(status::effective_attack(&unit), 9);

    status::attach(&mut unit, &combo_status("genjutsu-trap"), 0);
    assert_eq!(status::effective_attack(&unit), 0);
}

#[test]
fn ambush_is_spent_on_the_first_swing() {
    let mut unit = bare_unit(4, 10);
    unit.statuses.push(status::keyword_status(
        &Keyword::Ambush {
            multiplier: 2.0,
            terrain_multiplier: 3.0,
            favored_terrain: Some(LaneId::River),
        },
        0,
    ));
    assert_eq!(status::resolve_outgoing_attack(&mut unit, LaneId::River), 12);
    assert!(unit.statuses.is_empty());
    assert_eq!(status::resolve_outgoing_attack(&mut unit, LaneId::River), 4);

    let mut off_terrain = bare_unit(4, 10);
    off_terrain.statuses.push(status::keyword_status(
        &Keyword::Ambush {
            multiplier: 2.0,
            terrain_multiplier: 3.0,
            favored_terrain: Some(LaneId::River),
        },
        0,
    ));
    assert_eq!(
        status::resolve_outgoing_attack(&mut off_terrain, LaneId::Mountain),
        8
    );
}

#[test]
fn regen_keyword_heals_on_its_interval() {
    let mut unit = bare_unit(2, 8);
    unit.health = 3;
    unit.statuses.push(status::keyword_status(
        &Keyword::Regen {
            magnitude: 1,
            tick_interval_ms: 1000,
        },
        1000,
    ));

    status::process_unit(&mut unit, 4000);
    assert_eq!(unit.health, 6);

    // healing never exceeds max health
    status::process_unit(&mut unit, 10_000);
    assert_eq!(unit.health, 8);
}

#[test]
fn heal_adjacent_feeds_both_neighbors() {
    let mut units = vec![bare_unit(2, 5), bare_unit(1, 5), bare_unit(2, 5)];
    units[0].health = 2;
    units[2].health = 4;
    units[1]
        .statuses
        .push(status::keyword_status(&Keyword::HealAdjacent { value: 2 }, 0));

    status::heal_adjacent(&mut units);
    assert_eq!(units[0].health, 4);
    assert_eq!(units[1].health, 5);
    assert_eq!(units[2].health, 5);
}

#[test]
fn zero_tick_interval_is_clamped() {
    let mut unit = bare_unit(2, 10);
    status::attach(
        &mut unit,
        &StatusTemplate {
            id: "bad-burn".into(),
            duration_ms: Some(10),
            kind: StatusKind::DamageOverTime {
                magnitude: 1,
                tick_interval_ms: 0,
                next_tick_at: 0,
            },
        },
        0,
    );

    // the clamped 1ms interval ticks at 1..=5 and terminates
    status::process_unit(&mut unit, 5);
    assert_eq!(unit.health, 5);
}

#[test]
fn expired_statuses_are_dropped() {
    let mut unit = bare_unit(2, 10);
    status::attach(&mut unit, &combo_status("berserker-fury"), 1000);

    status::process_unit(&mut unit, 4999);
    assert_eq!(unit.statuses.len(), 1);

    status::process_unit(&mut unit, 5000);
    assert!(unit.statuses.is_empty());
}
