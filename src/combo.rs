//! Sliding-window combo detection and combo effect dispatch
//!
//! Plays are remembered per lane for ten seconds. After each play the
//! recipes are checked longest-sequence-first against that lane's trailing
//! plays; matches fire immediately when affordable, otherwise they park as
//! pending entries that fire from the tick loop once chakra catches up.

use log::debug;

use crate::combat;
use crate::events::{self, CombatEvent};
use crate::state::*;
use crate::status;
use crate::types::*;

/// A recipe without a window falls back to the default
pub(crate) fn window_of(combo: &ComboDefinition) -> u64 {
    if combo.window_ms == 0 {
        DEFAULT_COMBO_WINDOW_MS
    } else {
        combo.window_ms
    }
}

/// Record a player card play and fire or park any matched combos
pub(crate) fn register_play(
    state: &mut MatchState,
    card_id: &str,
    school: School,
    lane: LaneId,
    now: u64,
) {
    {
        let cs = &mut state.combo_state;
        cs.pending.retain(|p| p.expires_at > now);
        cs.recent_plays
            .retain(|p| now - p.timestamp <= COMBO_HISTORY_WINDOW_MS);
        cs.recent_plays.push(ComboPlay {
            card_id: card_id.to_string(),
            school,
            lane,
            timestamp: now,
        });
    }

    let mut combos = state.combos.clone();
    combos.sort_by(|a, b| b.sequence.len().cmp(&a.sequence.len()));

    let mut matches: Vec<(ComboDefinition, u64)> = Vec::new();
    for combo in combos {
        if combo.sequence.is_empty() {
            continue;
        }
        let lane_plays: Vec<&ComboPlay> = state
            .combo_state
            .recent_plays
            .iter()
            .filter(|p| p.lane == lane)
            .collect();
        if lane_plays.len() < combo.sequence.len() {
            continue;
        }
        let candidate = &lane_plays[lane_plays.len() - combo.sequence.len()..];
        let sequence_matches = combo
            .sequence
            .iter()
            .zip(candidate.iter())
            .all(|(school, play)| play.school == *school);
        if !sequence_matches {
            continue;
        }

        let window_start = candidate[0].timestamp;
        let window = window_of(&combo);
        if now - window_start > window {
            continue;
        }
        let expires_at = window_start + window;

        if state.chakra.current < combo.cost as f64 {
            merge_pending(
                &mut state.combo_state.pending,
                PendingCombo {
                    combo_id: combo.id.clone(),
                    lane,
                    cost: combo.cost,
                    expires_at,
                },
            );
            continue;
        }
        matches.push((combo, expires_at));
    }

    for (combo, expires_at) in matches {
        // an earlier match this play may have drained the pool
        if state.chakra.current < combo.cost as f64 {
            merge_pending(
                &mut state.combo_state.pending,
                PendingCombo {
                    combo_id: combo.id.clone(),
                    lane,
                    cost: combo.cost,
                    expires_at,
                },
            );
            continue;
        }
        execute(state, &combo, lane, now);
    }
}

/// Merge a pending entry, deduplicating on (combo, lane)
///
/// A re-match extends the expiry to the later window and refreshes the cost.
fn merge_pending(pending: &mut Vec<PendingCombo>, entry: PendingCombo) {
    if let Some(existing) = pending
        .iter_mut()
        .find(|p| p.combo_id == entry.combo_id && p.lane == entry.lane)
    {
        existing.expires_at = existing.expires_at.max(entry.expires_at);
        existing.cost = entry.cost;
    } else {
        pending.push(entry);
    }
}

/// Per-tick combo maintenance: prune history, expire or fire pending combos
///
/// Expired entries vanish silently. Affordable entries fire in insertion
/// order.
pub(crate) fn process_tick(state: &mut MatchState, now: u64) {
    state
        .combo_state
        .recent_plays
        .retain(|p| now - p.timestamp <= COMBO_HISTORY_WINDOW_MS);

    if state.combo_state.pending.is_empty() {
        return;
    }

    let pending = std::mem::take(&mut state.combo_state.pending);
    let mut remaining = Vec::new();
    for entry in pending {
        if now >= entry.expires_at {
            continue;
        }
        let Some(combo) = state.combos.iter().find(|c| c.id == entry.combo_id).cloned() else {
            continue;
        };
        if state.chakra.current >= entry.cost as f64 {
            execute(state, &combo, entry.lane, now);
        } else {
            remaining.push(entry);
        }
    }
    remaining.append(&mut state.combo_state.pending);
    state.combo_state.pending = remaining;
}

/// Fire a combo for the player: apply the effect, spend chakra, bookkeep
pub(crate) fn execute(state: &mut MatchState, combo: &ComboDefinition, lane: LaneId, now: u64) {
    debug!("combo fired: {} in {:?}", combo.id, lane);
    apply_effect(state, &combo.effect, &combo.id, &combo.name, lane, now);
    state.chakra.current = (state.chakra.current - combo.cost as f64).max(0.0);

    let record = ComboRecord {
        combo_id: combo.id.clone(),
        name: combo.name.clone(),
        lane,
        timestamp: now,
    };
    let cs = &mut state.combo_state;
    cs.pending
        .retain(|p| !(p.combo_id == combo.id && p.lane == lane));
    cs.last_triggered = Some(record.clone());
    cs.history.push(record);
    if cs.history.len() > COMBO_HISTORY_LIMIT {
        cs.history.remove(0);
    }
    state.stats.combos += 1;
    events::record(
        &mut state.events,
        now,
        CombatEvent::ComboTriggered {
            combo_id: combo.id.clone(),
            name: combo.name.clone(),
            lane,
            owner: Side::Player,
        },
    );
}

fn terrain_bonus(bonus: &Option<TerrainBonus>, active: LaneId) -> i32 {
    match bonus {
        Some(b) if b.terrain == active => b.extra,
        _ => 0,
    }
}

/// Apply a combo effect payload to the battlefield
///
/// Also used for AI combos (with flipped targets) and card on-play effects.
pub(crate) fn apply_effect(
    state: &mut MatchState,
    effect: &ComboEffect,
    source_id: &str,
    source_name: &str,
    lane: LaneId,
    now: u64,
) {
    match effect {
        ComboEffect::Summon {
            owner,
            count,
            stats,
            status,
        } => {
            let label = match owner {
                Side::Player => "Clone",
                Side::Ai => "Spirit",
            };
            for i in 0..*count {
                let id = state.generate_unit_id();
                let mut unit = Unit {
                    id,
                    card_id: source_id.to_string(),
                    name: format!("{} {} {}", source_name, label, i + 1),
                    owner: *owner,
                    attack: stats.attack,
                    health: stats.health,
                    max_health: stats.health,
                    shields: 0,
                    statuses: vec![],
                    played_at: now,
                };
                if let Some(template) = status {
                    status::attach(&mut unit, template, now);
                }
                events::record(
                    &mut state.events,
                    now,
                    CombatEvent::UnitSpawned {
                        unit: unit.name.clone(),
                        lane,
                        owner: *owner,
                    },
                );
                state.battlefield.lane_mut(lane).side_mut(*owner).push(unit);
            }
        }
        ComboEffect::DamageLane {
            target,
            damage,
            bonus_when_terrain,
            status,
        } => {
            let total = damage + terrain_bonus(bonus_when_terrain, state.active_terrain);
            let units = std::mem::take(state.battlefield.lane_mut(lane).side_mut(*target));
            let mut survivors = Vec::with_capacity(units.len());
            let mut hits: Vec<(String, i32)> = Vec::new();
            let mut deaths: Vec<String> = Vec::new();
            for mut unit in units {
                let before = unit.health;
                status::apply_damage(&mut unit, total);
                hits.push((unit.name.clone(), before - unit.health));
                if unit.is_alive() {
                    if let Some(template) = status {
                        status::attach(&mut unit, template, now);
                    }
                    survivors.push(unit);
                } else {
                    deaths.push(unit.name.clone());
                }
            }
            let lane_cleared = survivors.is_empty();
            *state.battlefield.lane_mut(lane).side_mut(*target) = survivors;
            for (name, amount) in hits {
                if amount > 0 {
                    events::record(
                        &mut state.events,
                        now,
                        CombatEvent::Damage {
                            target: name,
                            amount,
                            lane,
                        },
                    );
                }
            }
            for name in deaths {
                events::record(
                    &mut state.events,
                    now,
                    CombatEvent::UnitDied {
                        unit: name,
                        lane,
                        owner: *target,
                    },
                );
            }
            if lane_cleared {
                combat::apply_stronghold_damage(state, lane, *target, total, now);
            }
        }
        ComboEffect::HealLane {
            target,
            healing,
            bonus_when_terrain,
            status,
        } => {
            let total = healing + terrain_bonus(bonus_when_terrain, state.active_terrain);
            let mut heals: Vec<(String, i32)> = Vec::new();
            {
                let units = state.battlefield.lane_mut(lane).side_mut(*target);
                for unit in units.iter_mut() {
                    let before = unit.health;
                    unit.health = (unit.health + total).min(unit.max_health);
                    if unit.health > before {
                        heals.push((unit.name.clone(), unit.health - before));
                    }
                    if let Some(template) = status {
                        status::attach(unit, template, now);
                    }
                }
            }
            for (name, amount) in heals {
                events::record(
                    &mut state.events,
                    now,
                    CombatEvent::Heal {
                        target: name,
                        amount,
                        lane,
                    },
                );
            }
        }
        ComboEffect::StatusFront { target, status } => {
            let units = state.battlefield.lane_mut(lane).side_mut(*target);
            if let Some(front) = units.first_mut() {
                crate::status::attach(front, status, now);
            }
        }
        ComboEffect::StatusAll { target, status }
        | ComboEffect::BuffLane { target, status }
        | ComboEffect::StealthLane { target, status } => {
            let units = state.battlefield.lane_mut(lane).side_mut(*target);
            for unit in units.iter_mut() {
                crate::status::attach(unit, status, now);
            }
        }
        ComboEffect::FortifyStronghold {
            target,
            fortification,
            bonus_when_terrain,
            status,
        } => {
            let total = fortification + terrain_bonus(bonus_when_terrain, state.active_terrain);
            if let Some(s) = state
                .strongholds
                .iter_mut()
                .find(|s| s.lane == lane && s.owner == *target)
            {
                s.health += total;
                s.max_health = s.max_health.max(s.health);
            }
            if let Some(template) = status {
                let units = state.battlefield.lane_mut(lane).side_mut(*target);
                for unit in units.iter_mut() {
                    crate::status::attach(unit, template, now);
                }
            }
        }
    }
}
