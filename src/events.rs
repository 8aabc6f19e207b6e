//! Typed combat event log
//!
//! A bounded, append-only projection of what happened, for replays and UI
//! feeds. The engine never reads it back.

use serde::{Deserialize, Serialize};

use crate::types::{LaneId, Side};

/// Most recent entries kept in the log
pub const EVENT_LOG_LIMIT: usize = 100;

/// Something that happened during a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CombatEvent {
    Damage {
        target: String,
        amount: i32,
        lane: LaneId,
    },
    Heal {
        target: String,
        amount: i32,
        lane: LaneId,
    },
    UnitDied {
        unit: String,
        lane: LaneId,
        owner: Side,
    },
    UnitSpawned {
        unit: String,
        lane: LaneId,
        owner: Side,
    },
    ComboTriggered {
        combo_id: String,
        name: String,
        lane: LaneId,
        owner: Side,
    },
    StrongholdDamaged {
        lane: LaneId,
        owner: Side,
        amount: i32,
        remaining: i32,
    },
    StrongholdDestroyed { lane: LaneId, owner: Side },
    TerrainRotated { terrain: LaneId },
    Meditated { card_id: String },
    ReactiveWindowOpened { window_id: u32, lane: LaneId },
    ReactiveResolved { jutsu_id: String, lane: LaneId },
}

/// A timestamped log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub at: u64,
    pub event: CombatEvent,
}

/// Append an entry, dropping the oldest past the cap
pub fn record(events: &mut Vec<EventRecord>, at: u64, event: CombatEvent) {
    events.push(EventRecord { at, event });
    if events.len() > EVENT_LOG_LIMIT {
        let overflow = events.len() - EVENT_LOG_LIMIT;
        events.drain(..overflow);
    }
}
