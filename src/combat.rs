//! The 1-second-cadence combat resolver
//!
//! Per lane and per resolution: run the status pipeline on both sides,
//! honor any smoke screen, exchange front-unit damage simultaneously (or
//! strike the exposed stronghold), sweep the dead, then run post-combat
//! heal-adjacent pulses. Stronghold hits land at face value; no armor is
//! applied.

use log::debug;

use crate::events::{self, CombatEvent};
use crate::reactive;
use crate::state::*;
use crate::status;
use crate::types::*;

/// Resolve one combat pass across all lanes
pub(crate) fn resolve(state: &mut MatchState, now: u64) {
    if state.phase != Phase::Battle {
        return;
    }
    debug!("resolving combat at {now}");
    for lane in LaneId::ALL {
        resolve_lane(state, lane, now);
    }
}

fn resolve_lane(state: &mut MatchState, lane: LaneId, now: u64) {
    process_side(state, lane, Side::Player, now);
    process_side(state, lane, Side::Ai, now);

    // an unexpired smoke screen swallows exactly one exchange
    let smoked = {
        let lane_state = state.battlefield.lane_mut(lane);
        match lane_state.smoke.take() {
            Some(smoke) => now < smoke.expires_at,
            None => false,
        }
    };

    if !smoked {
        let player_front = !state.battlefield.lane(lane).player.is_empty();
        let ai_front = !state.battlefield.lane(lane).ai.is_empty();
        match (player_front, ai_front) {
            (true, true) => exchange(state, lane, now),
            (true, false) => strike_stronghold(state, lane, Side::Player, now),
            (false, true) => strike_stronghold(state, lane, Side::Ai, now),
            (false, false) => {}
        }
    }

    sweep_dead(state, lane, Side::Player, now);
    sweep_dead(state, lane, Side::Ai, now);

    status::heal_adjacent(&mut state.battlefield.lane_mut(lane).player);
    status::heal_adjacent(&mut state.battlefield.lane_mut(lane).ai);
}

/// Run the status pipeline on one side and sweep anything it killed
fn process_side(state: &mut MatchState, lane: LaneId, side: Side, now: u64) {
    {
        let units = state.battlefield.lane_mut(lane).side_mut(side);
        for unit in units.iter_mut() {
            status::process_unit(unit, now);
        }
    }
    sweep_dead(state, lane, side, now);
}

fn sweep_dead(state: &mut MatchState, lane: LaneId, side: Side, now: u64) {
    let dead: Vec<String> = {
        let units = state.battlefield.lane_mut(lane).side_mut(side);
        let dead = units
            .iter()
            .filter(|u| !u.is_alive())
            .map(|u| u.name.clone())
            .collect();
        units.retain(|u| u.is_alive());
        dead
    };
    for name in dead {
        events::record(
            &mut state.events,
            now,
            CombatEvent::UnitDied {
                unit: name,
                lane,
                owner: side,
            },
        );
    }
}

/// Pull a consumable substitution off the unit, if armed
fn take_substitution(unit: &mut Unit) -> Option<f64> {
    let index = unit
        .statuses
        .iter()
        .position(|s| matches!(s.kind, StatusKind::Substitution { .. }))?;
    match unit.statuses.remove(index).kind {
        StatusKind::Substitution { counter_multiplier } => Some(counter_multiplier),
        _ => None,
    }
}

/// Pull a consumable counter-strike off the unit, if armed
fn take_counter_strike(unit: &mut Unit) -> Option<f64> {
    let index = unit
        .statuses
        .iter()
        .position(|s| matches!(s.kind, StatusKind::CounterStrike { .. }))?;
    match unit.statuses.remove(index).kind {
        StatusKind::CounterStrike { damage_multiplier } => Some(damage_multiplier),
        _ => None,
    }
}

/// Simultaneous front-unit exchange
///
/// Both swings are computed from pre-exchange state, then applied. A
/// substitution cancels the incoming hit and multiplies the defender's own
/// swing; a counter-strike adds an extra hit against the attacker; shield
/// reflect damage lands after the exchange.
fn exchange(state: &mut MatchState, lane: LaneId, now: u64) {
    let front_id = state.battlefield.lane(lane).player.first().map(|u| u.id);
    reactive::maybe_open_window(state, ReactiveTrigger::BeforeCombat, lane, front_id, now);

    let terrain = state.active_terrain;
    let mut player = state.battlefield.lane_mut(lane).player.remove(0);
    let mut ai = state.battlefield.lane_mut(lane).ai.remove(0);

    let player_attack = status::resolve_outgoing_attack(&mut player, terrain);
    let ai_attack = status::resolve_outgoing_attack(&mut ai, terrain);

    let mut damage_to_player = ai_attack;
    let mut damage_to_ai = player_attack;

    if let Some(mult) = take_substitution(&mut player) {
        damage_to_player = 0;
        damage_to_ai = (player_attack as f64 * mult).round() as i32;
    }
    if let Some(mult) = take_substitution(&mut ai) {
        damage_to_ai = 0;
        damage_to_player = (ai_attack as f64 * mult).round() as i32;
    }

    if damage_to_player > 0 {
        if let Some(mult) = take_counter_strike(&mut player) {
            damage_to_ai += (player_attack as f64 * mult).round() as i32;
        }
    }
    if damage_to_ai > 0 {
        if let Some(mult) = take_counter_strike(&mut ai) {
            damage_to_player += (ai_attack as f64 * mult).round() as i32;
        }
    }

    let reflected_to_ai = status::apply_damage(&mut player, damage_to_player);
    let reflected_to_player = status::apply_damage(&mut ai, damage_to_ai);
    if reflected_to_player > 0 {
        player.health = (player.health - reflected_to_player).max(0);
    }
    if reflected_to_ai > 0 {
        ai.health = (ai.health - reflected_to_ai).max(0);
    }

    if damage_to_player > 0 {
        events::record(
            &mut state.events,
            now,
            CombatEvent::Damage {
                target: player.name.clone(),
                amount: damage_to_player,
                lane,
            },
        );
    }
    if damage_to_ai > 0 {
        events::record(
            &mut state.events,
            now,
            CombatEvent::Damage {
                target: ai.name.clone(),
                amount: damage_to_ai,
                lane,
            },
        );
    }

    let player_damaged = damage_to_player > 0 || reflected_to_player > 0;
    let player_id = player.id;

    let player_alive = player.is_alive();
    if player_alive {
        state.battlefield.lane_mut(lane).player.insert(0, player);
    } else {
        events::record(
            &mut state.events,
            now,
            CombatEvent::UnitDied {
                unit: player.name.clone(),
                lane,
                owner: Side::Player,
            },
        );
    }
    if ai.is_alive() {
        state.battlefield.lane_mut(lane).ai.insert(0, ai);
    } else {
        events::record(
            &mut state.events,
            now,
            CombatEvent::UnitDied {
                unit: ai.name.clone(),
                lane,
                owner: Side::Ai,
            },
        );
    }

    if player_damaged && player_alive {
        reactive::maybe_open_window(
            state,
            ReactiveTrigger::UnitDamaged,
            lane,
            Some(player_id),
            now,
        );
    }
}

/// An uncontested front unit strikes the opposing stronghold
///
/// Uses plain effective attack; ambush applies only to unit exchanges.
fn strike_stronghold(state: &mut MatchState, lane: LaneId, attacker: Side, now: u64) {
    let attack = state
        .battlefield
        .lane(lane)
        .side(attacker)
        .first()
        .map(status::effective_attack)
        .unwrap_or(0);
    if attack > 0 {
        apply_stronghold_damage(state, lane, attacker.opponent(), attack, now);
    }
}

/// Damage a stronghold, counting destructions
///
/// Only AI-owned stronghold destructions feed the player's
/// `strongholds_destroyed` stat; a destroyed stronghold stays at zero and
/// is never counted twice.
pub(crate) fn apply_stronghold_damage(
    state: &mut MatchState,
    lane: LaneId,
    owner: Side,
    damage: i32,
    now: u64,
) {
    let (dealt, remaining, destroyed) = {
        let Some(target) = state
            .strongholds
            .iter_mut()
            .find(|s| s.lane == lane && s.owner == owner)
        else {
            return;
        };
        let previous = target.health;
        target.health = (target.health - damage).max(0);
        (
            previous - target.health,
            target.health,
            previous > 0 && target.health == 0,
        )
    };

    if dealt > 0 {
        events::record(
            &mut state.events,
            now,
            CombatEvent::StrongholdDamaged {
                lane,
                owner,
                amount: dealt,
                remaining,
            },
        );
    }
    if destroyed {
        events::record(
            &mut state.events,
            now,
            CombatEvent::StrongholdDestroyed { lane, owner },
        );
        if owner == Side::Ai {
            state.stats.strongholds_destroyed += 1;
        }
    }
}
