use super::*;
use crate::ai;

#[test]
fn first_spawn_lands_on_schedule() {
    let state = battle_state(1000);
    assert_eq!(state.ai.next_spawn_at, 5000);

    let early = apply_tick(&state, 4999);
    assert_eq!(early.battlefield.total_units(Side::Ai), 0);

    let spawned = apply_tick(&early, 5000);
    assert_eq!(spawned.battlefield.total_units(Side::Ai), 1);
    assert_eq!(spawned.ai.recent_plays.len(), 1);
    assert_eq!(spawned.ai.next_spawn_at, 5000 + AI_BASE_SPAWN_DELAY_MS);
    assert!(spawned
        .events
        .iter()
        .any(|e| matches!(e.event, CombatEvent::UnitSpawned { owner: Side::Ai, .. })));
}

#[test]
fn spawn_delay_shortens_when_outnumbered() {
    let mut state = battle_state(1000);
    place_unit(&mut state, LaneId::Mountain, Side::Player, 2, 10);
    place_unit(&mut state, LaneId::Forest, Side::Player, 2, 10);
    place_unit(&mut state, LaneId::River, Side::Player, 2, 10);

    let mut next = state.clone();
    ai::take_turn(&mut next, 5000);
    assert_eq!(next.ai.next_spawn_at, 5000 + 3500);
}

#[test]
fn spawn_delay_stretches_when_ahead() {
    let mut state = battle_state(1000);
    place_unit(&mut state, LaneId::Mountain, Side::Ai, 2, 10);
    place_unit(&mut state, LaneId::Forest, Side::Ai, 2, 10);
    place_unit(&mut state, LaneId::River, Side::Ai, 2, 10);

    let mut next = state.clone();
    ai::take_turn(&mut next, 5000);
    assert_eq!(next.ai.next_spawn_at, 5000 + 6500);
}

#[test]
fn aggressive_ai_finishes_a_damage_combo() {
    let mut state = battle_state(1000);
    state.ai.strategy = AiStrategy::Aggressive;
    state.ai.recent_plays.push(ComboPlay {
        card_id: "seed".into(),
        school: School::Ninjutsu,
        lane: LaneId::Mountain,
        timestamp: 4000,
    });
    place_unit(&mut state, LaneId::Mountain, Side::Player, 2, 10);

    ai::take_turn(&mut state, 5000);

    // fire-dragon-tornado scores highest: terrain synergy plus a live target
    assert_eq!(
        state.ai.last_executed.as_ref().map(|r| r.combo_id.as_str()),
        Some("fire-dragon-tornado")
    );
    // 4 + 2 on the active mountain terrain, aimed at the player
    assert_eq!(state.battlefield.mountain.player[0].health, 4);
    assert!(state.battlefield.mountain.player[0]
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::DamageOverTime { .. })));
    assert!(state.events.iter().any(|e| matches!(
        e.event,
        CombatEvent::ComboTriggered {
            owner: Side::Ai,
            ..
        }
    )));
    // the AI pays no chakra for its combos
    assert_eq!(state.chakra.current, MAX_CHAKRA);
    assert_eq!(state.stats.combos, 0);
}

#[test]
fn defensive_ai_prefers_disruption_and_healing() {
    let mut state = battle_state(1000);
    state.ai.strategy = AiStrategy::Defensive;
    state.ai.recent_plays.push(ComboPlay {
        card_id: "seed".into(),
        school: School::Genjutsu,
        lane: LaneId::River,
        timestamp: 4000,
    });
    place_unit(&mut state, LaneId::River, Side::Player, 2, 10);

    ai::take_turn(&mut state, 5000);

    // [G] completes genjutsu-trap before any aggressive option
    assert_eq!(
        state.ai.last_executed.as_ref().map(|r| r.combo_id.as_str()),
        Some("genjutsu-trap")
    );
    assert!(state.battlefield.river.player[0]
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::CrowdControl { .. })));
}

#[test]
fn balanced_ai_picks_one_of_its_best_options() {
    let mut state = battle_state(1000);
    state.ai.strategy = AiStrategy::Balanced;
    state.ai.recent_plays.push(ComboPlay {
        card_id: "seed".into(),
        school: School::Ninjutsu,
        lane: LaneId::Mountain,
        timestamp: 4000,
    });
    place_unit(&mut state, LaneId::Mountain, Side::Player, 2, 10);

    ai::take_turn(&mut state, 5000);

    let executed = state.ai.last_executed.unwrap();
    assert!([
        "fire-dragon-tornado",
        "shadow-clone-barrage",
        "forest-regeneration"
    ]
    .contains(&executed.combo_id.as_str()));
}

#[test]
fn stale_ai_plays_do_not_complete_combos() {
    let mut state = battle_state(1000);
    state.ai.strategy = AiStrategy::Aggressive;
    state.ai.recent_plays.push(ComboPlay {
        card_id: "seed".into(),
        school: School::Ninjutsu,
        lane: LaneId::Mountain,
        timestamp: 2000,
    });

    // every two-card window off a ninjutsu seed is 6000ms or less
    ai::take_turn(&mut state, 8500);
    assert!(state.ai.last_executed.is_none());
}

#[test]
fn empty_piles_fall_back_to_a_stock_token() {
    let mut state = battle_state(1000);
    state.deck.clear();
    state.discard.clear();
    state.hand.clear();

    ai::take_turn(&mut state, 5000);

    let spawned: Vec<&Unit> = LaneId::ALL
        .iter()
        .flat_map(|lane| state.battlefield.lane(*lane).ai.iter())
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].name, "Shadow Stand-In");
    assert_eq!(spawned[0].attack, 2);
    assert_eq!(spawned[0].health, 2);
}

#[test]
fn summon_combos_spawn_for_the_ai_side() {
    let mut state = battle_state(1000);
    state.ai.strategy = AiStrategy::Aggressive;
    state.active_terrain = LaneId::Forest;
    state.ai.recent_plays.push(ComboPlay {
        card_id: "seed".into(),
        school: School::Ninjutsu,
        lane: LaneId::River,
        timestamp: 4000,
    });

    // off mountain terrain with no targets, the summon outranks the burn
    ai::take_turn(&mut state, 5000);
    assert_eq!(
        state.ai.last_executed.as_ref().map(|r| r.combo_id.as_str()),
        Some("shadow-clone-barrage")
    );
    let spirits: Vec<&Unit> = state
        .battlefield
        .river
        .ai
        .iter()
        .filter(|u| u.name.contains("Spirit"))
        .collect();
    assert_eq!(spirits.len(), 2);
    assert!(spirits.iter().all(|u| u.owner == Side::Ai));
}
