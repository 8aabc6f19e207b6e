//! The public engine surface
//!
//! Every entry point takes the current state by reference and returns the
//! next state. Hosts own the clock: they call [`apply_tick`] with wall
//! time and the engine catches up chakra, terrain, combos, the AI, and
//! combat from wherever it left off. Calling `apply_tick` twice with the
//! same timestamp returns the same state.

use log::info;

use crate::ai;
use crate::combat;
use crate::combo;
use crate::data;
use crate::error::ReactiveResult;
use crate::events::{self, CombatEvent};
use crate::reactive;
use crate::rng::BattleRng;
use crate::state::*;
use crate::status;
use crate::types::*;

/// Begin a battle from any state
///
/// Shuffles a fresh deck, deals the opening hand, resets the board and all
/// subsystem clocks. Stronghold layout and RNG carry over from the input
/// state.
pub fn start_match(state: &MatchState, now: u64) -> MatchState {
    let mut next = state.clone();
    info!("match started at {now}");

    next.phase = Phase::Battle;
    next.active_terrain = LaneId::Mountain;
    next.next_terrain_at = now + TERRAIN_ROTATION_SECONDS * 1000;

    next.deck = data::starter_deck();
    next.rng.shuffle(&mut next.deck);
    next.hand = next
        .deck
        .drain(..INITIAL_HAND_SIZE.min(next.deck.len()))
        .collect();
    next.discard.clear();

    next.chakra = ChakraPool {
        current: MAX_CHAKRA,
        max: MAX_CHAKRA,
        overflow_max: OVERFLOW_CHAKRA,
        regen_per_second: CHAKRA_REGEN_PER_SECOND,
        last_tick: now,
        overheat_penalty: 0,
        last_meditate_at: None,
    };

    next.battlefield = Battlefield::default();
    next.combos = data::combo_pool();
    next.combo_state = ComboState::default();
    next.stats = MatchStats::default();
    next.clock = MatchClock {
        duration_seconds: MATCH_DURATION_SECONDS,
        started_at: Some(now),
        remaining_seconds: MATCH_DURATION_SECONDS as f64,
    };
    next.combat = CombatClock {
        last_resolved_at: now,
    };
    next.ai = AiState {
        next_spawn_at: now + AI_FIRST_SPAWN_DELAY_MS,
        strategy: next.ai.strategy,
        recent_plays: vec![],
        last_executed: None,
    };
    next.reactive = ReactiveState {
        jutsu: data::reactive_jutsu(),
        ..ReactiveState::default()
    };
    next.events.clear();

    next
}

/// Advance the match to `now`
///
/// Subsystems run in a fixed order: chakra regen, terrain rotation, the
/// countdown clock, reactive window upkeep, pending combos, the AI turn,
/// then combat on its 1-second cadence. Finally the match ends when the
/// clock hits zero.
pub fn apply_tick(state: &MatchState, now: u64) -> MatchState {
    let mut next = state.clone();
    if next.phase != Phase::Battle {
        return next;
    }

    if now > next.chakra.last_tick {
        let elapsed = (now - next.chakra.last_tick) as f64 / 1000.0;
        next.chakra.current = (next.chakra.current
            + elapsed * next.chakra.regen_per_second)
            .min(next.chakra.overflow_max);
        next.chakra.last_tick = now;
    }

    if now >= next.next_terrain_at {
        next.active_terrain = next.active_terrain.next_in_rotation();
        next.next_terrain_at = now + TERRAIN_ROTATION_SECONDS * 1000;
        events::record(
            &mut next.events,
            now,
            CombatEvent::TerrainRotated {
                terrain: next.active_terrain,
            },
        );
    }

    if let Some(started_at) = next.clock.started_at {
        let elapsed = now.saturating_sub(started_at) as f64 / 1000.0;
        next.clock.remaining_seconds = (next.clock.duration_seconds as f64 - elapsed).max(0.0);
    }

    reactive::expire_windows(&mut next, now);
    reactive::process_activations(&mut next, now);

    combo::process_tick(&mut next, now);

    if now >= next.ai.next_spawn_at {
        ai::take_turn(&mut next, now);
    }

    if now.saturating_sub(next.combat.last_resolved_at) >= COMBAT_RESOLVE_INTERVAL_MS {
        combat::resolve(&mut next, now);
        next.combat.last_resolved_at = now;
    }

    if next.clock.started_at.is_some() && next.clock.remaining_seconds <= 0.0 {
        next.phase = Phase::Ended;
        info!("match ended at {now}");
    }

    next
}

/// Whether a card in hand is playable right now
pub fn can_play_card(state: &MatchState, card_id: &str) -> bool {
    if state.phase != Phase::Battle {
        return false;
    }
    state.hand.iter().any(|c| {
        c.id == card_id && state.chakra.current >= (c.cost + state.chakra.overheat_penalty) as f64
    })
}

/// Play a card from hand into a lane
///
/// Spends chakra (plus any overheat surcharge), spawns the unit with its
/// keyword statuses, runs the card's on-play effect, and feeds the combo
/// detector. Unplayable requests return the state unchanged.
pub fn play_card(state: &MatchState, card_id: &str, lane: LaneId, now: u64) -> MatchState {
    let mut next = state.clone();
    if next.phase != Phase::Battle {
        return next;
    }
    let Some(index) = next.hand.iter().position(|c| c.id == card_id) else {
        return next;
    };
    let cost = (next.hand[index].cost + next.chakra.overheat_penalty).max(0);
    if next.chakra.current < cost as f64 {
        return next;
    }

    let card = next.hand.remove(index);
    next.chakra.current = (next.chakra.current - cost as f64).max(0.0);
    next.stats.actions += 1;

    let id = next.generate_unit_id();
    let mut unit = Unit {
        id,
        card_id: card.id.clone(),
        name: card.name.clone(),
        owner: Side::Player,
        attack: card.attack,
        health: card.health,
        max_health: card.health,
        shields: 0,
        statuses: vec![],
        played_at: now,
    };
    for keyword in &card.keywords {
        unit.statuses.push(status::keyword_status(keyword, now));
    }
    events::record(
        &mut next.events,
        now,
        CombatEvent::UnitSpawned {
            unit: unit.name.clone(),
            lane,
            owner: Side::Player,
        },
    );
    next.battlefield.lane_mut(lane).player.push(unit);

    if let Some(effect) = &card.on_play {
        apply_on_play(&mut next, effect, lane, now);
    }

    combo::register_play(&mut next, &card.id, card.school, lane, now);
    next.discard.push(card);

    next
}

fn apply_on_play(state: &mut MatchState, effect: &OnPlayEffect, lane: LaneId, now: u64) {
    match effect {
        OnPlayEffect::DrawCard { count } => {
            for _ in 0..*count {
                if !draw_into(state) {
                    break;
                }
            }
        }
        OnPlayEffect::DamageLane { damage } => {
            combo::apply_effect(
                state,
                &ComboEffect::DamageLane {
                    target: Side::Ai,
                    damage: *damage,
                    bonus_when_terrain: None,
                    status: None,
                },
                "on-play",
                "On Play",
                lane,
                now,
            );
        }
        OnPlayEffect::DamageAll { damage } => {
            // board-wide burst, no stronghold fallthrough
            for lane in LaneId::ALL {
                let units = std::mem::take(&mut state.battlefield.lane_mut(lane).ai);
                let mut survivors = Vec::with_capacity(units.len());
                let mut deaths = Vec::new();
                for mut unit in units {
                    status::apply_damage(&mut unit, *damage);
                    if unit.is_alive() {
                        survivors.push(unit);
                    } else {
                        deaths.push(unit.name.clone());
                    }
                }
                state.battlefield.lane_mut(lane).ai = survivors;
                for name in deaths {
                    events::record(
                        &mut state.events,
                        now,
                        CombatEvent::UnitDied {
                            unit: name,
                            lane,
                            owner: Side::Ai,
                        },
                    );
                }
            }
        }
        OnPlayEffect::FreezeAll { duration_ms } => {
            let template = StatusTemplate {
                id: "deep-freeze".into(),
                duration_ms: Some(*duration_ms),
                kind: StatusKind::CrowdControl {
                    control: CrowdControl::Freeze,
                },
            };
            for lane in LaneId::ALL {
                let units = &mut state.battlefield.lane_mut(lane).ai;
                for unit in units.iter_mut() {
                    status::attach(unit, &template, now);
                }
            }
        }
    }
}

/// Draw one card into the hand
pub fn draw_card(state: &MatchState) -> MatchState {
    let mut next = state.clone();
    draw_into(&mut next);
    next
}

/// Draw one card, reshuffling the discard pile when the deck runs dry
fn draw_into(state: &mut MatchState) -> bool {
    if state.hand.len() >= HAND_LIMIT {
        return false;
    }
    if state.deck.is_empty() {
        if state.discard.is_empty() {
            return false;
        }
        let mut recycled = std::mem::take(&mut state.discard);
        state.rng.shuffle(&mut recycled);
        state.deck = recycled;
    }
    let card = state.deck.remove(0);
    state.hand.push(card);
    state.stats.cards_drawn += 1;
    true
}

/// Whether a meditation is legal right now
pub fn can_meditate(state: &MatchState, now: u64) -> bool {
    state.phase == Phase::Battle
        && !state.hand.is_empty()
        && state
            .chakra
            .last_meditate_at
            .map_or(true, |at| now.saturating_sub(at) >= MEDITATE_COOLDOWN_MS)
}

/// Discard a card from hand for one chakra
pub fn meditate(state: &MatchState, card_id: &str, now: u64) -> MatchState {
    let mut next = state.clone();
    if !can_meditate(&next, now) {
        return next;
    }
    let Some(index) = next.hand.iter().position(|c| c.id == card_id) else {
        return next;
    };
    let card = next.hand.remove(index);
    next.chakra.current = (next.chakra.current + 1.0).min(next.chakra.overflow_max);
    next.chakra.last_meditate_at = Some(now);
    events::record(
        &mut next.events,
        now,
        CombatEvent::Meditated {
            card_id: card.id.clone(),
        },
    );
    next.discard.push(card);
    next
}

/// Activate a reactive jutsu inside an open window
pub fn play_reactive_jutsu(
    state: &MatchState,
    window_id: u32,
    jutsu_id: &str,
    now: u64,
) -> ReactiveResult<MatchState> {
    reactive::activate(state, window_id, jutsu_id, now)
}

/// Reactive windows currently awaiting a decision
pub fn active_reactive_windows(state: &MatchState) -> &[ReactiveWindow] {
    &state.reactive.windows
}
