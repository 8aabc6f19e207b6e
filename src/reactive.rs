//! Reactive jutsu windows
//!
//! Combat moments open short windows offering the affordable jutsu that
//! answer them. Activating one deducts chakra immediately, closes the
//! window, and queues the effect to land a beat later from the tick loop.

use log::debug;

use crate::error::{ReactiveError, ReactiveResult};
use crate::events::{self, CombatEvent};
use crate::state::*;
use crate::status;
use crate::types::*;

/// Open a window for a trigger, unless one is already live for it
///
/// Only jutsu that answer the trigger and fit the current chakra pool are
/// offered. No offers, no window.
pub(crate) fn maybe_open_window(
    state: &mut MatchState,
    trigger: ReactiveTrigger,
    lane: LaneId,
    target_unit: Option<UnitId>,
    now: u64,
) {
    let already_open = state
        .reactive
        .windows
        .iter()
        .any(|w| w.trigger == trigger && w.lane == lane && now < w.expires_at);
    if already_open {
        return;
    }

    let jutsu_ids: Vec<String> = state
        .reactive
        .jutsu
        .iter()
        .filter(|j| j.triggers.contains(&trigger) && state.chakra.current >= j.cost as f64)
        .map(|j| j.id.clone())
        .collect();
    if jutsu_ids.is_empty() {
        return;
    }

    let id = state.reactive.next_window_id;
    state.reactive.next_window_id += 1;
    state.reactive.windows.push(ReactiveWindow {
        id,
        trigger,
        lane,
        target_unit,
        jutsu_ids,
        opened_at: now,
        expires_at: now + REACTIVE_WINDOW_MS,
    });
    events::record(
        &mut state.events,
        now,
        CombatEvent::ReactiveWindowOpened { window_id: id, lane },
    );
}

/// Drop windows that ran out
pub(crate) fn expire_windows(state: &mut MatchState, now: u64) {
    state.reactive.windows.retain(|w| now < w.expires_at);
}

/// Activate a jutsu inside a live window
///
/// Chakra is spent up front and the window closes; the effect itself is
/// queued and lands a short beat later.
pub(crate) fn activate(
    state: &MatchState,
    window_id: u32,
    jutsu_id: &str,
    now: u64,
) -> ReactiveResult<MatchState> {
    let window = state
        .reactive
        .windows
        .iter()
        .find(|w| w.id == window_id && now < w.expires_at)
        .ok_or(ReactiveError::WindowExpired)?;
    if !window.jutsu_ids.iter().any(|id| id == jutsu_id) {
        return Err(ReactiveError::JutsuNotAvailable);
    }
    let jutsu = state
        .reactive
        .jutsu
        .iter()
        .find(|j| j.id == jutsu_id)
        .ok_or(ReactiveError::JutsuNotAvailable)?;
    if state.chakra.current < jutsu.cost as f64 {
        return Err(ReactiveError::InsufficientChakra);
    }

    let mut next = state.clone();
    next.chakra.current -= jutsu.cost as f64;
    next.reactive.windows.retain(|w| w.id != window_id);
    next.reactive.activations.push(PendingActivation {
        jutsu_id: jutsu_id.to_string(),
        trigger: window.trigger,
        lane: window.lane,
        target_unit: window.target_unit,
        execute_at: now + REACTIVE_EXECUTE_DELAY_MS,
    });
    debug!("reactive queued: {jutsu_id} in {:?}", window.lane);
    Ok(next)
}

/// Land any queued activations that are due
pub(crate) fn process_activations(state: &mut MatchState, now: u64) {
    if state.reactive.activations.is_empty() {
        return;
    }
    let activations = std::mem::take(&mut state.reactive.activations);
    let mut waiting = Vec::new();
    for activation in activations {
        if now >= activation.execute_at {
            execute(state, &activation, now);
        } else {
            waiting.push(activation);
        }
    }
    waiting.append(&mut state.reactive.activations);
    state.reactive.activations = waiting;
}

fn execute(state: &mut MatchState, activation: &PendingActivation, now: u64) {
    let Some(jutsu) = state
        .reactive
        .jutsu
        .iter()
        .find(|j| j.id == activation.jutsu_id)
        .cloned()
    else {
        return;
    };

    match jutsu.effect {
        ReactiveEffect::Substitution { counter_multiplier } => {
            attach_to_target(state, activation, StatusTemplate {
                id: jutsu.id.clone(),
                duration_ms: None,
                kind: StatusKind::Substitution { counter_multiplier },
            }, now);
        }
        ReactiveEffect::CounterStrike { damage_multiplier } => {
            attach_to_target(state, activation, StatusTemplate {
                id: jutsu.id.clone(),
                duration_ms: None,
                kind: StatusKind::CounterStrike { damage_multiplier },
            }, now);
        }
        ReactiveEffect::SkipCombat { duration_ms } => {
            state.battlefield.lane_mut(activation.lane).smoke = Some(SmokeScreen {
                applied_at: now,
                expires_at: now + duration_ms,
            });
        }
        ReactiveEffect::ShieldWall {
            shield_value,
            duration_ms,
        } => {
            let template = StatusTemplate {
                id: jutsu.id.clone(),
                duration_ms: Some(duration_ms),
                kind: StatusKind::Shield {
                    remaining: shield_value,
                    reflect: 0.0,
                },
            };
            let units = &mut state.battlefield.lane_mut(activation.lane).player;
            for unit in units.iter_mut() {
                status::attach(unit, &template, now);
            }
        }
    }

    events::record(
        &mut state.events,
        now,
        CombatEvent::ReactiveResolved {
            jutsu_id: jutsu.id,
            lane: activation.lane,
        },
    );
}

fn attach_to_target(
    state: &mut MatchState,
    activation: &PendingActivation,
    template: StatusTemplate,
    now: u64,
) {
    let units = &mut state.battlefield.lane_mut(activation.lane).player;
    let target = match activation.target_unit {
        Some(id) => units.iter_mut().find(|u| u.id == id),
        None => units.first_mut(),
    };
    if let Some(unit) = target {
        status::attach(unit, &template, now);
    }
}
