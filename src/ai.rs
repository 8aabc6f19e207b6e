//! The scripted opponent
//!
//! Each time its spawn timer elapses the opponent first looks for a combo
//! it can finish off its own recent plays, then spawns a unit into a
//! scored lane. Combos are scored by urgency and filtered by a flat
//! chakra budget rather than a live pool.

use log::debug;

use crate::combo;
use crate::events::{self, CombatEvent};
use crate::rng::BattleRng;
use crate::state::*;
use crate::types::*;

struct ComboOpportunity {
    combo: ComboDefinition,
    lane: LaneId,
    urgency: f64,
}

/// Run one AI turn: attempt a combo, then spawn a unit
pub(crate) fn take_turn(state: &mut MatchState, now: u64) {
    try_combo(state, now);
    spawn_unit(state, now);
}

/// Fire the best available combo off the AI's recent plays, if any
///
/// A combo is available when the AI's trailing plays in a lane already
/// spell out all but the last school of its sequence. The spawn that
/// follows this call supplies the missing play in spirit; the combo fires
/// now.
fn try_combo(state: &mut MatchState, now: u64) {
    state
        .ai
        .recent_plays
        .retain(|p| now - p.timestamp <= COMBO_HISTORY_WINDOW_MS);

    let opportunities = combo_opportunities(state, now);
    if opportunities.is_empty() {
        return;
    }

    let Some(choice) = select_opportunity(state, opportunities) else {
        return;
    };

    debug!("ai combo: {} in {:?}", choice.combo.id, choice.lane);
    let effect = adapt_effect(&choice.combo.effect);
    combo::apply_effect(
        state,
        &effect,
        &choice.combo.id,
        &choice.combo.name,
        choice.lane,
        now,
    );
    state.ai.last_executed = Some(AiComboRecord {
        combo_id: choice.combo.id.clone(),
        lane: choice.lane,
        timestamp: now,
    });
    events::record(
        &mut state.events,
        now,
        CombatEvent::ComboTriggered {
            combo_id: choice.combo.id,
            name: choice.combo.name,
            lane: choice.lane,
            owner: Side::Ai,
        },
    );
}

fn combo_opportunities(state: &MatchState, now: u64) -> Vec<ComboOpportunity> {
    let mut opportunities = Vec::new();
    for combo in &state.combos {
        if combo.sequence.len() < 2 || combo.cost > AI_CHAKRA_BUDGET {
            continue;
        }
        let needed = combo.sequence.len() - 1;
        for lane in LaneId::ALL {
            let lane_plays: Vec<&ComboPlay> = state
                .ai
                .recent_plays
                .iter()
                .filter(|p| p.lane == lane)
                .collect();
            if lane_plays.len() < needed {
                continue;
            }
            let candidate = &lane_plays[lane_plays.len() - needed..];
            if candidate.is_empty() {
                continue;
            }
            let prefix_matches = combo.sequence[..needed]
                .iter()
                .zip(candidate.iter())
                .all(|(school, play)| play.school == *school);
            if !prefix_matches {
                continue;
            }
            if now - candidate[0].timestamp > combo::window_of(combo) {
                continue;
            }
            opportunities.push(ComboOpportunity {
                combo: combo.clone(),
                lane,
                urgency: score_urgency(state, combo, lane),
            });
        }
    }
    opportunities.sort_by(|a, b| b.urgency.total_cmp(&a.urgency));
    opportunities
}

fn score_urgency(state: &MatchState, combo: &ComboDefinition, lane: LaneId) -> f64 {
    let player_units = state.battlefield.lane(lane).player.len() as i32;
    let ai_units = state.battlefield.lane(lane).ai.len() as i32;
    let damaged_ai = state
        .battlefield
        .lane(lane)
        .ai
        .iter()
        .filter(|u| u.health < u.max_health)
        .count() as f64;

    let mut urgency = 50.0;
    if player_units > ai_units + 1 {
        urgency += 30.0;
    }
    if combo
        .effect
        .terrain_bonus_lane()
        .map_or(false, |t| t == state.active_terrain)
    {
        urgency += 25.0;
    }
    match &combo.effect {
        ComboEffect::DamageLane { .. } => urgency += 15.0 * player_units as f64,
        ComboEffect::Summon { .. } => urgency += if ai_units < 2 { 20.0 } else { 5.0 },
        ComboEffect::StatusFront { .. } | ComboEffect::StatusAll { .. } => {
            if player_units > 0 {
                urgency += 25.0;
            }
        }
        ComboEffect::HealLane { .. } => urgency += 10.0 * damaged_ai,
        _ => {}
    }
    if combo.cost > 8 {
        urgency -= 15.0;
    }
    if combo.cost > 12 {
        urgency -= 20.0;
    }
    urgency
}

fn select_opportunity(
    state: &mut MatchState,
    mut opportunities: Vec<ComboOpportunity>,
) -> Option<ComboOpportunity> {
    match state.ai.strategy {
        AiStrategy::Aggressive => {
            let index = opportunities.iter().position(|o| {
                matches!(
                    o.combo.effect,
                    ComboEffect::DamageLane { .. } | ComboEffect::Summon { .. }
                )
            });
            Some(opportunities.swap_remove(index.unwrap_or(0)))
        }
        AiStrategy::Defensive => {
            let index = opportunities.iter().position(|o| {
                matches!(
                    o.combo.effect,
                    ComboEffect::HealLane { .. }
                        | ComboEffect::StatusFront { .. }
                        | ComboEffect::FortifyStronghold { .. }
                )
            });
            Some(opportunities.swap_remove(index.unwrap_or(0)))
        }
        AiStrategy::Balanced => {
            opportunities.truncate(3);
            let priorities: Vec<f64> = opportunities.iter().map(|o| o.urgency).collect();
            let index = weighted_index(&mut state.rng, &priorities, 10.0)?;
            Some(opportunities.swap_remove(index))
        }
    }
}

/// Point a player-recipe effect at the player instead
fn adapt_effect(effect: &ComboEffect) -> ComboEffect {
    let mut adapted = effect.clone();
    match &mut adapted {
        ComboEffect::Summon { owner, .. } => *owner = Side::Ai,
        ComboEffect::DamageLane { target, .. }
        | ComboEffect::StatusFront { target, .. }
        | ComboEffect::StatusAll { target, .. } => *target = Side::Player,
        ComboEffect::HealLane { target, .. }
        | ComboEffect::BuffLane { target, .. }
        | ComboEffect::StealthLane { target, .. }
        | ComboEffect::FortifyStronghold { target, .. } => *target = Side::Ai,
    }
    adapted
}

/// Spawn one AI unit and reschedule the spawn timer
fn spawn_unit(state: &mut MatchState, now: u64) {
    let card = next_card(state);
    let lane = select_lane(state, card.school);

    // delay adapts to the board as it stands before this unit lands
    let delay = spawn_delay(state);

    let id = state.generate_unit_id();
    let unit = Unit {
        id,
        card_id: card.id.clone(),
        name: card.name.clone(),
        owner: Side::Ai,
        attack: card.attack,
        health: card.health,
        max_health: card.health,
        shields: 0,
        statuses: vec![],
        played_at: now,
    };
    events::record(
        &mut state.events,
        now,
        CombatEvent::UnitSpawned {
            unit: unit.name.clone(),
            lane,
            owner: Side::Ai,
        },
    );
    state.battlefield.lane_mut(lane).ai.push(unit);

    state
        .ai
        .recent_plays
        .retain(|p| now - p.timestamp <= COMBO_HISTORY_WINDOW_MS);
    state.ai.recent_plays.push(ComboPlay {
        card_id: card.id,
        school: card.school,
        lane,
        timestamp: now,
    });

    state.ai.next_spawn_at = now + delay;
}

/// Pick the AI's next card: deck first, then discard, then the player's
/// hand as a mirror, falling back to a stock token
fn next_card(state: &mut MatchState) -> Card {
    if !state.deck.is_empty() {
        let index = state.rng.gen_range(state.deck.len());
        return state.deck[index].clone();
    }
    if !state.discard.is_empty() {
        let index = state.rng.gen_range(state.discard.len());
        return state.discard[index].clone();
    }
    if !state.hand.is_empty() {
        let index = state.rng.gen_range(state.hand.len());
        return state.hand[index].clone();
    }
    Card::new("shadow-stand-in", "Shadow Stand-In", School::Ninjutsu, 2, 2, 2)
}

fn lane_synergy(school: School) -> LaneId {
    match school {
        School::Taijutsu => LaneId::Mountain,
        School::Ninjutsu => LaneId::Forest,
        School::Genjutsu => LaneId::River,
    }
}

fn select_lane(state: &mut MatchState, school: School) -> LaneId {
    let mut scored: Vec<(LaneId, f64)> = LaneId::ALL
        .iter()
        .map(|&lane| {
            let player_units = state.battlefield.lane(lane).player.len() as i32;
            let ai_units = state.battlefield.lane(lane).ai.len() as i32;
            let mut priority = state.rng.next_f64() * 10.0;
            if player_units > ai_units {
                priority += 30.0;
            }
            priority += (3 - ai_units).max(0) as f64 * 5.0;
            if lane_synergy(school) == lane {
                priority += 15.0;
            }
            (lane, priority)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let priorities: Vec<f64> = scored.iter().map(|(_, p)| *p).collect();
    match weighted_index(&mut state.rng, &priorities, 5.0) {
        Some(index) => scored[index].0,
        None => LaneId::Mountain,
    }
}

/// Delay until the next spawn, scaled by who is ahead on total units
fn spawn_delay(state: &MatchState) -> u64 {
    let player_total = state.battlefield.total_units(Side::Player) as i32;
    let ai_total = state.battlefield.total_units(Side::Ai) as i32;
    let mut delay = AI_BASE_SPAWN_DELAY_MS as f64;
    if player_total > ai_total + 2 {
        delay *= 0.7;
    } else if ai_total > player_total + 2 {
        delay *= 1.3;
    }
    delay as u64
}

/// Weighted pick over descending priorities
///
/// Each entry weighs its priority minus a per-rank step, floored at one,
/// so lower-ranked entries stay possible but unlikely.
fn weighted_index<R: BattleRng>(rng: &mut R, priorities: &[f64], step: f64) -> Option<usize> {
    if priorities.is_empty() {
        return None;
    }
    let weights: Vec<f64> = priorities
        .iter()
        .enumerate()
        .map(|(i, p)| (p - i as f64 * step).max(1.0))
        .collect();
    let total: f64 = weights.iter().sum();
    let mut roll = rng.next_f64() * total;
    for (i, weight) in weights.iter().enumerate() {
        if roll < *weight {
            return Some(i);
        }
        roll -= weight;
    }
    Some(weights.len() - 1)
}
