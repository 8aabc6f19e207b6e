use super::*;

/// Two 2/10 fronts in the mountain lane, one exchange already resolved.
/// The player took damage, so both trigger windows are open.
fn dueling_state() -> MatchState {
    let mut state = battle_state(1000);
    state.ai.next_spawn_at = u64::MAX;
    place_unit(&mut state, LaneId::Mountain, Side::Player, 2, 10);
    place_unit(&mut state, LaneId::Mountain, Side::Ai, 2, 10);
    apply_tick(&state, 2000)
}

fn window_for(state: &MatchState, trigger: ReactiveTrigger) -> &ReactiveWindow {
    state
        .reactive
        .windows
        .iter()
        .find(|w| w.trigger == trigger)
        .unwrap()
}

#[test]
fn combat_opens_windows_with_affordable_jutsu() {
    let state = dueling_state();
    assert_eq!(state.reactive.windows.len(), 2);

    let before = window_for(&state, ReactiveTrigger::BeforeCombat);
    assert_eq!(
        before.jutsu_ids,
        vec!["substitution-jutsu", "smoke-bomb", "earth-wall"]
    );
    assert_eq!(before.expires_at, 2000 + REACTIVE_WINDOW_MS);

    let damaged = window_for(&state, ReactiveTrigger::UnitDamaged);
    assert_eq!(
        damaged.jutsu_ids,
        vec!["substitution-jutsu", "lightning-counter", "earth-wall"]
    );
    assert!(damaged.target_unit.is_some());
}

#[test]
fn open_windows_are_not_duplicated() {
    let state = dueling_state();
    let again = apply_tick(&state, 3000);
    assert_eq!(again.reactive.windows.len(), 2);
}

#[test]
fn broke_player_gets_no_window() {
    let mut state = battle_state(1000);
    state.ai.next_spawn_at = u64::MAX;
    state.chakra.current = 0.0;
    state.chakra.regen_per_second = 0.0;
    place_unit(&mut state, LaneId::Mountain, Side::Player, 2, 10);
    place_unit(&mut state, LaneId::Mountain, Side::Ai, 2, 10);

    let fought = apply_tick(&state, 2000);
    assert!(fought.reactive.windows.is_empty());
}

#[test]
fn windows_expire_on_their_own() {
    let mut state = dueling_state();
    // drain the pool so the next exchange cannot open fresh windows
    state.chakra.current = 0.0;
    state.chakra.regen_per_second = 0.0;
    let lapsed = apply_tick(&state, 2000 + REACTIVE_WINDOW_MS);
    assert!(lapsed.reactive.windows.is_empty());
}

#[test]
fn activation_spends_chakra_and_lands_after_a_beat() {
    let state = dueling_state();
    let chakra_before = state.chakra.current;
    let window_id = window_for(&state, ReactiveTrigger::BeforeCombat).id;

    let queued = play_reactive_jutsu(&state, window_id, "earth-wall", 2500).unwrap();
    assert_eq!(queued.chakra.current, chakra_before - 3.0);
    assert_eq!(queued.reactive.windows.len(), 1);
    assert_eq!(queued.reactive.activations.len(), 1);
    assert_eq!(
        queued.reactive.activations[0].execute_at,
        2500 + REACTIVE_EXECUTE_DELAY_MS
    );

    // not due yet
    let waiting = apply_tick(&queued, 2550);
    assert_eq!(waiting.reactive.activations.len(), 1);

    let landed = apply_tick(&queued, 2600);
    assert!(landed.reactive.activations.is_empty());
    assert!(landed.battlefield.mountain.player[0]
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::Shield { remaining: 3, .. })));
    assert!(landed
        .events
        .iter()
        .any(|e| matches!(e.event, CombatEvent::ReactiveResolved { .. })));
}

#[test]
fn expired_or_unknown_windows_are_rejected() {
    let state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::BeforeCombat).id;

    let err = play_reactive_jutsu(&state, window_id, "earth-wall", 2000 + REACTIVE_WINDOW_MS);
    assert_eq!(err.unwrap_err(), ReactiveError::WindowExpired);

    let err = play_reactive_jutsu(&state, 999, "earth-wall", 2500);
    assert_eq!(err.unwrap_err(), ReactiveError::WindowExpired);
}

#[test]
fn jutsu_must_match_the_window_trigger() {
    let state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::BeforeCombat).id;

    // lightning-counter only answers onUnitDamaged
    let err = play_reactive_jutsu(&state, window_id, "lightning-counter", 2500);
    assert_eq!(err.unwrap_err(), ReactiveError::JutsuNotAvailable);

    let err = play_reactive_jutsu(&state, window_id, "no-such-jutsu", 2500);
    assert_eq!(err.unwrap_err(), ReactiveError::JutsuNotAvailable);
}

#[test]
fn activation_requires_chakra_at_activation_time() {
    let mut state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::BeforeCombat).id;
    state.chakra.current = 1.0;

    let err = play_reactive_jutsu(&state, window_id, "substitution-jutsu", 2500);
    assert_eq!(err.unwrap_err(), ReactiveError::InsufficientChakra);
}

#[test]
fn smoke_bomb_skips_the_next_exchange() {
    let state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::BeforeCombat).id;

    let queued = play_reactive_jutsu(&state, window_id, "smoke-bomb", 2500).unwrap();
    let armed = apply_tick(&queued, 2600);
    assert!(armed.battlefield.mountain.smoke.is_some());

    let skipped = apply_tick(&armed, 3000);
    assert_eq!(skipped.battlefield.mountain.player[0].health, 8);
    assert_eq!(skipped.battlefield.mountain.ai[0].health, 8);
    assert!(skipped.battlefield.mountain.smoke.is_none());
}

#[test]
fn substitution_cancels_the_hit_and_amplifies_the_counter() {
    let state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::UnitDamaged).id;

    let queued = play_reactive_jutsu(&state, window_id, "substitution-jutsu", 2500).unwrap();
    let armed = apply_tick(&queued, 2600);
    assert!(armed.battlefield.mountain.player[0]
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::Substitution { .. })));

    let fought = apply_tick(&armed, 3000);
    // the incoming 2 is cancelled; the counter lands for 2 * 1.5 = 3
    assert_eq!(fought.battlefield.mountain.player[0].health, 8);
    assert_eq!(fought.battlefield.mountain.ai[0].health, 5);
    assert!(fought.battlefield.mountain.player[0]
        .statuses
        .iter()
        .all(|s| !matches!(s.kind, StatusKind::Substitution { .. })));
}

#[test]
fn lightning_counter_adds_an_extra_hit() {
    let state = dueling_state();
    let window_id = window_for(&state, ReactiveTrigger::UnitDamaged).id;

    let queued = play_reactive_jutsu(&state, window_id, "lightning-counter", 2500).unwrap();
    let armed = apply_tick(&queued, 2600);

    let fought = apply_tick(&armed, 3000);
    // normal trade plus a 2 * 2.0 counter against the attacker
    assert_eq!(fought.battlefield.mountain.player[0].health, 6);
    assert_eq!(fought.battlefield.mountain.ai[0].health, 2);
}
