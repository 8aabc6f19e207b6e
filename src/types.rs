use serde::{Deserialize, Serialize};

/// Unique identifier for units on the battlefield
pub type UnitId = u32;

/// The three jutsu schools cards belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum School {
    Ninjutsu,
    Taijutsu,
    Genjutsu,
}

/// Lane identifiers
///
/// Lanes double as terrain identifiers: the rotating active terrain is
/// always one of the three lane biomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaneId {
    Mountain,
    Forest,
    River,
}

impl LaneId {
    pub const ALL: [LaneId; 3] = [LaneId::Mountain, LaneId::Forest, LaneId::River];

    /// Next terrain in the fixed rotation order
    pub fn next_in_rotation(self) -> LaneId {
        match self {
            LaneId::Mountain => LaneId::Forest,
            LaneId::Forest => LaneId::River,
            LaneId::River => LaneId::Mountain,
        }
    }
}

/// Which side of the battlefield a unit or stronghold belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// Crowd control flavors; both fully disable a unit's attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrowdControl {
    Stun,
    Freeze,
}

/// Status effect payloads
///
/// Variants carry both their tuning fields and their mutable runtime
/// counters (remaining shield, next tick, stacks). Templates are written
/// with the counters at their pre-instantiation values; `status::instantiate`
/// fills them in relative to the application timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum StatusKind {
    /// Absorbs damage before health; optionally reflects a fraction of what
    /// it absorbed back at the attacker
    Shield { remaining: i32, reflect: f64 },
    /// Stun or freeze; attack drops to zero while present
    CrowdControl { control: CrowdControl },
    /// Periodic damage, applied in catch-up batches each resolution
    DamageOverTime {
        magnitude: i32,
        tick_interval_ms: u64,
        next_tick_at: u64,
    },
    /// Periodic healing, capped at max health
    HealOverTime {
        magnitude: i32,
        tick_interval_ms: u64,
        next_tick_at: u64,
    },
    /// Keyword variant of periodic healing
    Regen {
        magnitude: i32,
        tick_interval_ms: u64,
        next_tick_at: u64,
    },
    /// Attack bonus and speed multiplier; `vulnerability` > 1.0 makes the
    /// carrier take amplified damage as a drawback
    Buff {
        attack_bonus: i32,
        speed_bonus: f64,
        vulnerability: f64,
    },
    /// Attack/speed bonus plus incoming-damage mitigation
    Aura {
        attack_bonus: i32,
        speed_bonus: f64,
        damage_reduction: f64,
        flat_reduction: i32,
    },
    /// Untargetable flavor; evasion is advisory data for the host UI
    Stealth { evasion: f64 },
    /// Summons that may phase through hits (advisory, like stealth)
    Ethereal { phase_chance: f64 },
    /// Multiplies the first attack, more on favored terrain, then is consumed
    Ambush {
        multiplier: f64,
        terrain_multiplier: f64,
        favored_terrain: Option<LaneId>,
    },
    /// Detonates once at `trigger_at`; lingers afterwards only when flagged
    DelayedDamage {
        damage: i32,
        delay_ms: u64,
        trigger_at: u64,
        linger: bool,
    },
    /// Bonus damage added to each hit taken; one stack consumed per hit
    Rupture {
        bonus_damage: i32,
        remaining_stacks: u32,
    },
    /// Grants flat shields each interval, up to `max_stacks` grants worth
    ShieldPulse {
        shield_value: i32,
        tick_interval_ms: u64,
        next_tick_at: u64,
        max_stacks: u32,
        granted: i32,
    },
    /// Heals neighbors after each combat resolution
    HealAdjacent { value: i32 },
    /// Cancels the next hit and amplifies the counter-swing, then is consumed
    Substitution { counter_multiplier: f64 },
    /// Extra counter hit against the next attacker, then is consumed
    CounterStrike { damage_multiplier: f64 },
}

/// A status blueprint as it appears in combo and card data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTemplate {
    pub id: String,
    /// None means the status never expires on its own
    pub duration_ms: Option<u64>,
    pub kind: StatusKind,
}

/// A live status effect attached to a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub id: String,
    pub applied_at: u64,
    pub expires_at: Option<u64>,
    pub kind: StatusKind,
}

/// Card keywords that translate into statuses when the unit is played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Keyword {
    Stealth { duration_ms: u64 },
    Shield { value: i32 },
    Ambush {
        multiplier: f64,
        terrain_multiplier: f64,
        favored_terrain: Option<LaneId>,
    },
    Regen { magnitude: i32, tick_interval_ms: u64 },
    HealAdjacent { value: i32 },
    Aura { attack_bonus: i32 },
}

/// Effects that fire the moment a card is played, at zero extra cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum OnPlayEffect {
    DrawCard { count: usize },
    DamageLane { damage: i32 },
    DamageAll { damage: i32 },
    FreezeAll { duration_ms: u64 },
}

/// A playable card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub school: School,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub on_play: Option<OnPlayEffect>,
}

impl Card {
    pub fn new(id: &str, name: &str, school: School, cost: i32, attack: i32, health: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            school,
            cost,
            attack,
            health,
            keywords: vec![],
            on_play: None,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_keyword(self, keyword: Keyword) -> Self {
        self.with_keywords(vec![keyword])
    }

    pub fn with_on_play(mut self, effect: OnPlayEffect) -> Self {
        self.on_play = Some(effect);
        self
    }
}

/// A unit instance on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub card_id: String,
    pub name: String,
    pub owner: Side,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    /// Flat shield pool granted by shield-pulse effects
    pub shields: i32,
    pub statuses: Vec<StatusEffect>,
    pub played_at: u64,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Base stats for combo-summoned units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonStats {
    pub attack: i32,
    pub health: i32,
}

/// Extra magnitude applied while the named terrain is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainBonus {
    pub terrain: LaneId,
    pub extra: i32,
}

/// Combo effect payloads, dispatched when a combo fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ComboEffect {
    Summon {
        owner: Side,
        count: u32,
        stats: SummonStats,
        status: Option<StatusTemplate>,
    },
    /// Damages every unit on the target side of the lane; if none survive
    /// (or none were there), the damage falls through to the stronghold
    DamageLane {
        target: Side,
        damage: i32,
        bonus_when_terrain: Option<TerrainBonus>,
        status: Option<StatusTemplate>,
    },
    HealLane {
        target: Side,
        healing: i32,
        bonus_when_terrain: Option<TerrainBonus>,
        status: Option<StatusTemplate>,
    },
    StatusFront { target: Side, status: StatusTemplate },
    StatusAll { target: Side, status: StatusTemplate },
    BuffLane { target: Side, status: StatusTemplate },
    StealthLane { target: Side, status: StatusTemplate },
    FortifyStronghold {
        target: Side,
        fortification: i32,
        bonus_when_terrain: Option<TerrainBonus>,
        status: Option<StatusTemplate>,
    },
}

impl ComboEffect {
    /// The terrain this effect gets a bonus on, if any
    pub fn terrain_bonus_lane(&self) -> Option<LaneId> {
        match self {
            ComboEffect::DamageLane {
                bonus_when_terrain, ..
            }
            | ComboEffect::HealLane {
                bonus_when_terrain, ..
            }
            | ComboEffect::FortifyStronghold {
                bonus_when_terrain, ..
            } => bonus_when_terrain.as_ref().map(|b| b.terrain),
            _ => None,
        }
    }
}

/// A combo recipe: play the schools in sequence, in one lane, inside the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboDefinition {
    pub id: String,
    pub name: String,
    pub sequence: Vec<School>,
    pub window_ms: u64,
    pub cost: i32,
    pub effect: ComboEffect,
}

/// Combat moments that can open a reactive window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactiveTrigger {
    #[serde(rename = "onBeforeCombat")]
    BeforeCombat,
    #[serde(rename = "onUnitDamaged")]
    UnitDamaged,
}

/// Instant-speed effects playable inside a reactive window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ReactiveEffect {
    /// Cancel the hit on the target unit and amplify its counter-swing
    Substitution { counter_multiplier: f64 },
    /// Lay a smoke screen: the lane skips its next combat exchange
    SkipCombat { duration_ms: u64 },
    /// Arm the target unit with an extra counter hit
    CounterStrike { damage_multiplier: f64 },
    /// Shield every friendly unit in the lane
    ShieldWall { shield_value: i32, duration_ms: u64 },
}

/// A reactive jutsu definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveJutsu {
    pub id: String,
    pub name: String,
    pub school: School,
    pub cost: i32,
    pub triggers: Vec<ReactiveTrigger>,
    pub effect: ReactiveEffect,
}
