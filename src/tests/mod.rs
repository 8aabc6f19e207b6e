//! Integration-style tests driving the engine through its public surface,
//! plus targeted tests against the internal pipelines.

mod ai;
mod reactive;
mod status;

use crate::*;

/// A battle already underway, started at `now`
pub fn battle_state(now: u64) -> MatchState {
    start_match(&create_initial_state(7), now)
}

/// A plain 2/3 card for combo sequencing
pub fn test_card(id: &str, school: School, cost: i32) -> Card {
    Card::new(id, id, school, cost, 2, 3)
}

/// Drop a plain unit straight onto the board
pub fn place_unit(
    state: &mut MatchState,
    lane: LaneId,
    owner: Side,
    attack: i32,
    health: i32,
) -> UnitId {
    let id = state.generate_unit_id();
    state.battlefield.lane_mut(lane).side_mut(owner).push(Unit {
        id,
        card_id: "test-unit".into(),
        name: format!("Test Unit {id}"),
        owner,
        attack,
        health,
        max_health: health,
        shields: 0,
        statuses: vec![],
        played_at: 0,
    });
    id
}

/// A detached unit for pipeline tests
pub fn bare_unit(attack: i32, health: i32) -> Unit {
    Unit {
        id: 1,
        card_id: "bare".into(),
        name: "Bare".into(),
        owner: Side::Player,
        attack,
        health,
        max_health: health,
        shields: 0,
        statuses: vec![],
        played_at: 0,
    }
}

/// Look up a card from the stock deck
pub fn deck_card(id: &str) -> Card {
    data::starter_deck()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap()
}

/// Look up a combo definition from the stock pool
pub fn combo_def(id: &str) -> ComboDefinition {
    data::combo_pool()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap()
}

/// The status template a combo effect carries, if any
pub fn combo_status(id: &str) -> StatusTemplate {
    match combo_def(id).effect {
        ComboEffect::DamageLane { status, .. }
        | ComboEffect::HealLane { status, .. }
        | ComboEffect::FortifyStronghold { status, .. } => status.unwrap(),
        ComboEffect::StatusFront { status, .. }
        | ComboEffect::StatusAll { status, .. }
        | ComboEffect::BuffLane { status, .. }
        | ComboEffect::StealthLane { status, .. } => status,
        ComboEffect::Summon { status, .. } => status.unwrap(),
    }
}
