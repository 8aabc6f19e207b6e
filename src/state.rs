use serde::{Deserialize, Serialize};

use crate::data;
use crate::events::EventRecord;
use crate::rng::XorShiftRng;
use crate::types::*;

/// Match length in seconds
pub const MATCH_DURATION_SECONDS: u64 = 5 * 60;
/// Terrain rotates to the next lane biome this often
pub const TERRAIN_ROTATION_SECONDS: u64 = 90;
/// Normal chakra ceiling
pub const MAX_CHAKRA: f64 = 12.0;
/// Hard ceiling; regen may bank a little past the normal cap
pub const OVERFLOW_CHAKRA: f64 = 15.0;
/// Passive chakra regeneration
pub const CHAKRA_REGEN_PER_SECOND: f64 = 0.5;
/// Starting health of each stronghold
pub const STRONGHOLD_BASE_HEALTH: i32 = 15;
/// 50% damage reduction vs direct attacks (reserved tuning knob)
pub const STRUCTURE_DAMAGE_MULTIPLIER: f64 = 0.5;
/// Flat damage reduction for better protection (reserved tuning knob)
pub const STRUCTURE_ARMOR: i32 = 3;
/// Minimum delay between meditations
pub const MEDITATE_COOLDOWN_MS: u64 = 5000;
/// Maximum hand size
pub const HAND_LIMIT: usize = 5;
/// Cards dealt when the match starts
pub const INITIAL_HAND_SIZE: usize = 4;
/// Recent plays older than this are forgotten by the combo detector
pub const COMBO_HISTORY_WINDOW_MS: u64 = 10_000;
/// Fallback combo window when a recipe does not specify one
pub const DEFAULT_COMBO_WINDOW_MS: u64 = 6000;
/// Fired combos retained in history
pub const COMBO_HISTORY_LIMIT: usize = 5;
/// Combat resolves at most this often
pub const COMBAT_RESOLVE_INTERVAL_MS: u64 = 1000;
/// Reactive windows stay open this long
pub const REACTIVE_WINDOW_MS: u64 = 3000;
/// Accepted activations execute after this delay, on the next tick
pub const REACTIVE_EXECUTE_DELAY_MS: u64 = 100;
/// Steady-state AI spawn cadence
pub const AI_BASE_SPAWN_DELAY_MS: u64 = 5000;
/// Delay before the AI's first spawn
pub const AI_FIRST_SPAWN_DELAY_MS: u64 = 4000;
/// The AI ignores combos costing more than this virtual budget
pub const AI_CHAKRA_BUDGET: i32 = 15;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Menu,
    Battle,
    Ended,
}

/// The player's chakra pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChakraPool {
    pub current: f64,
    pub max: f64,
    pub overflow_max: f64,
    pub regen_per_second: f64,
    /// Timestamp regen was last accrued to
    pub last_tick: u64,
    /// Surcharge added to every card's cost while positive
    pub overheat_penalty: i32,
    pub last_meditate_at: Option<u64>,
}

/// A smoke screen laid on a lane; the next combat exchange there is skipped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokeScreen {
    pub applied_at: u64,
    pub expires_at: u64,
}

/// Units on one lane, per side, front of the column at index 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneState {
    pub player: Vec<Unit>,
    pub ai: Vec<Unit>,
    pub smoke: Option<SmokeScreen>,
}

impl LaneState {
    pub fn side(&self, side: Side) -> &Vec<Unit> {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Vec<Unit> {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }
}

/// The three lanes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battlefield {
    pub mountain: LaneState,
    pub forest: LaneState,
    pub river: LaneState,
}

impl Battlefield {
    pub fn lane(&self, lane: LaneId) -> &LaneState {
        match lane {
            LaneId::Mountain => &self.mountain,
            LaneId::Forest => &self.forest,
            LaneId::River => &self.river,
        }
    }

    pub fn lane_mut(&mut self, lane: LaneId) -> &mut LaneState {
        match lane {
            LaneId::Mountain => &mut self.mountain,
            LaneId::Forest => &mut self.forest,
            LaneId::River => &mut self.river,
        }
    }

    /// Total unit count for one side across all lanes
    pub fn total_units(&self, side: Side) -> usize {
        LaneId::ALL
            .iter()
            .map(|lane| self.lane(*lane).side(side).len())
            .sum()
    }
}

/// A stronghold at the end of a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stronghold {
    pub id: String,
    pub lane: LaneId,
    pub owner: Side,
    pub health: i32,
    pub max_health: i32,
}

/// Per-match counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub actions: u32,
    pub combos: u32,
    pub strongholds_destroyed: u32,
    pub cards_drawn: u32,
}

/// Match countdown clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchClock {
    pub duration_seconds: u64,
    pub started_at: Option<u64>,
    pub remaining_seconds: f64,
}

/// Combat resolution cadence tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatClock {
    pub last_resolved_at: u64,
}

/// One card play as remembered by the combo detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboPlay {
    pub card_id: String,
    pub school: School,
    pub lane: LaneId,
    pub timestamp: u64,
}

/// A matched combo waiting for chakra to become affordable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCombo {
    pub combo_id: String,
    pub lane: LaneId,
    pub cost: i32,
    pub expires_at: u64,
}

/// A combo that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboRecord {
    pub combo_id: String,
    pub name: String,
    pub lane: LaneId,
    pub timestamp: u64,
}

/// Sliding-window combo detector state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboState {
    pub recent_plays: Vec<ComboPlay>,
    pub pending: Vec<PendingCombo>,
    pub last_triggered: Option<ComboRecord>,
    pub history: Vec<ComboRecord>,
}

/// AI temperament for combo selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AiStrategy {
    Aggressive,
    Defensive,
    Balanced,
}

/// The AI's last executed combo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiComboRecord {
    pub combo_id: String,
    pub lane: LaneId,
    pub timestamp: u64,
}

/// AI opponent state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiState {
    pub next_spawn_at: u64,
    pub strategy: AiStrategy,
    pub recent_plays: Vec<ComboPlay>,
    pub last_executed: Option<AiComboRecord>,
}

/// An open reactive window awaiting the player's decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveWindow {
    pub id: u32,
    pub trigger: ReactiveTrigger,
    pub lane: LaneId,
    pub target_unit: Option<UnitId>,
    /// Jutsu that were affordable when the window opened
    pub jutsu_ids: Vec<String>,
    pub opened_at: u64,
    pub expires_at: u64,
}

/// An accepted activation waiting for its execute timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingActivation {
    pub jutsu_id: String,
    pub trigger: ReactiveTrigger,
    pub lane: LaneId,
    pub target_unit: Option<UnitId>,
    pub execute_at: u64,
}

/// Reactive jutsu subsystem state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveState {
    pub jutsu: Vec<ReactiveJutsu>,
    pub windows: Vec<ReactiveWindow>,
    pub activations: Vec<PendingActivation>,
    pub next_window_id: u32,
}

/// The complete match state
///
/// Everything a match needs lives here, including the RNG, so serializing
/// the state and resuming it replays identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub phase: Phase,
    pub active_terrain: LaneId,
    pub next_terrain_at: u64,
    pub chakra: ChakraPool,
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    pub discard: Vec<Card>,
    pub battlefield: Battlefield,
    pub combos: Vec<ComboDefinition>,
    pub combo_state: ComboState,
    pub strongholds: Vec<Stronghold>,
    pub stats: MatchStats,
    pub clock: MatchClock,
    pub combat: CombatClock,
    pub ai: AiState,
    pub reactive: ReactiveState,
    pub events: Vec<EventRecord>,
    pub rng: XorShiftRng,
    /// Counter for generating unique unit IDs
    pub next_unit_id: UnitId,
}

impl MatchState {
    /// Generate a unique unit ID
    pub fn generate_unit_id(&mut self) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        id
    }

    pub fn stronghold(&self, lane: LaneId, owner: Side) -> Option<&Stronghold> {
        self.strongholds
            .iter()
            .find(|s| s.lane == lane && s.owner == owner)
    }
}

fn stronghold(lane: LaneId, owner: Side) -> Stronghold {
    let side = match owner {
        Side::Player => "player",
        Side::Ai => "ai",
    };
    let biome = match lane {
        LaneId::Mountain => "mountain",
        LaneId::Forest => "forest",
        LaneId::River => "river",
    };
    Stronghold {
        id: format!("{side}-{biome}"),
        lane,
        owner,
        health: STRONGHOLD_BASE_HEALTH,
        max_health: STRONGHOLD_BASE_HEALTH,
    }
}

/// Build a fresh pre-match state
///
/// `now` seeds both clocks and the RNG, so a fixed timestamp gives a fully
/// reproducible match.
pub fn create_initial_state(now: u64) -> MatchState {
    let mut strongholds = Vec::with_capacity(6);
    for owner in [Side::Player, Side::Ai] {
        for lane in LaneId::ALL {
            strongholds.push(stronghold(lane, owner));
        }
    }

    MatchState {
        phase: Phase::Menu,
        active_terrain: LaneId::Mountain,
        next_terrain_at: now + TERRAIN_ROTATION_SECONDS * 1000,
        chakra: ChakraPool {
            current: MAX_CHAKRA,
            max: MAX_CHAKRA,
            overflow_max: OVERFLOW_CHAKRA,
            regen_per_second: CHAKRA_REGEN_PER_SECOND,
            last_tick: now,
            overheat_penalty: 0,
            last_meditate_at: None,
        },
        deck: data::starter_deck(),
        hand: vec![],
        discard: vec![],
        battlefield: Battlefield::default(),
        combos: data::combo_pool(),
        combo_state: ComboState::default(),
        strongholds,
        stats: MatchStats::default(),
        clock: MatchClock {
            duration_seconds: MATCH_DURATION_SECONDS,
            started_at: None,
            remaining_seconds: MATCH_DURATION_SECONDS as f64,
        },
        combat: CombatClock {
            last_resolved_at: now,
        },
        ai: AiState {
            next_spawn_at: now + AI_FIRST_SPAWN_DELAY_MS,
            strategy: AiStrategy::Balanced,
            recent_plays: vec![],
            last_executed: None,
        },
        reactive: ReactiveState {
            jutsu: data::reactive_jutsu(),
            ..ReactiveState::default()
        },
        events: vec![],
        rng: XorShiftRng::seed_from_u64(now),
        next_unit_id: 1,
    }
}
