//! Static match content: starter deck, combo pool, reactive jutsu
//!
//! Injected by `create_initial_state`/`start_match`; tests override the
//! state fields directly when they need a crafted pool.

use crate::types::*;

fn status(id: &str, duration_ms: Option<u64>, kind: StatusKind) -> StatusTemplate {
    StatusTemplate {
        id: id.to_string(),
        duration_ms,
        kind,
    }
}

/// The starter deck every match begins with
pub fn starter_deck() -> Vec<Card> {
    vec![
        Card::new("academy-student", "Academy Student", School::Taijutsu, 1, 1, 1),
        Card::new("kunai-thrower", "Kunai Thrower", School::Taijutsu, 1, 2, 1),
        Card::new("shadow-genin", "Shadow Genin", School::Ninjutsu, 2, 2, 2)
            .with_keyword(Keyword::Stealth { duration_ms: 3000 }),
        Card::new("swift-striker", "Swift Striker", School::Taijutsu, 2, 3, 1),
        Card::new("healing-spring", "Healing Spring", School::Ninjutsu, 1, 0, 3),
        Card::new("chakra-siphon", "Chakra Siphon", School::Genjutsu, 2, 1, 2)
            .with_on_play(OnPlayEffect::DrawCard { count: 1 }),
        Card::new("forest-scout", "Forest Scout", School::Ninjutsu, 3, 2, 3)
            .with_keyword(Keyword::Regen {
                magnitude: 1,
                tick_interval_ms: 1000,
            }),
        Card::new("chakra-monk", "Chakra Monk", School::Taijutsu, 3, 3, 2)
            .with_keyword(Keyword::Shield { value: 1 }),
        Card::new("storm-barrier", "Storm Barrier", School::Ninjutsu, 4, 0, 1)
            .with_on_play(OnPlayEffect::DamageAll { damage: 2 }),
        Card::new("river-assassin", "River Assassin", School::Genjutsu, 4, 4, 2)
            .with_keyword(Keyword::Ambush {
                multiplier: 2.0,
                terrain_multiplier: 3.0,
                favored_terrain: Some(LaneId::River),
            }),
        Card::new("medical-kunoichi", "Medical Kunoichi", School::Ninjutsu, 4, 1, 3)
            .with_keyword(Keyword::HealAdjacent { value: 2 }),
        Card::new("mind-reader", "Mind Reader", School::Genjutsu, 4, 2, 4)
            .with_on_play(OnPlayEffect::DrawCard { count: 2 }),
        Card::new("berserker-raider", "Berserker Raider", School::Taijutsu, 4, 5, 2),
        Card::new("earth-style-chunin", "Earth Style Chunin", School::Taijutsu, 5, 3, 4)
            .with_keyword(Keyword::Shield { value: 2 }),
        Card::new("ember-adept", "Ember Adept", School::Taijutsu, 5, 4, 4)
            .with_keyword(Keyword::Aura { attack_bonus: 1 }),
        Card::new("shadow-step-assassin", "Shadow Step Assassin", School::Genjutsu, 5, 6, 1)
            .with_keyword(Keyword::Stealth { duration_ms: 5000 }),
        Card::new("frost-archon", "Frost Archon", School::Genjutsu, 6, 2, 7)
            .with_on_play(OnPlayEffect::FreezeAll { duration_ms: 3000 }),
        Card::new("sanctuary-guardian", "Sanctuary Guardian", School::Taijutsu, 6, 1, 9),
        Card::new("forest-guardian", "Forest Guardian", School::Ninjutsu, 7, 5, 6)
            .with_keyword(Keyword::Regen {
                magnitude: 2,
                tick_interval_ms: 1000,
            }),
        Card::new("lightning-jonin", "Lightning Jonin", School::Ninjutsu, 8, 6, 4)
            .with_on_play(OnPlayEffect::DamageLane { damage: 2 }),
        Card::new("grand-master", "Grand Master", School::Taijutsu, 9, 7, 7),
    ]
}

/// Every combo recipe available in a match
pub fn combo_pool() -> Vec<ComboDefinition> {
    vec![
        ComboDefinition {
            id: "shadow-clone-barrage".into(),
            name: "Shadow Clone Barrage".into(),
            sequence: vec![School::Ninjutsu, School::Taijutsu],
            window_ms: 6000,
            cost: 6,
            effect: ComboEffect::Summon {
                owner: Side::Player,
                count: 2,
                stats: SummonStats {
                    attack: 2,
                    health: 2,
                },
                status: Some(status(
                    "clone-aegis",
                    Some(5000),
                    StatusKind::Shield {
                        remaining: 2,
                        reflect: 0.0,
                    },
                )),
            },
        },
        ComboDefinition {
            id: "fire-dragon-tornado".into(),
            name: "Fire Dragon Tornado".into(),
            sequence: vec![School::Ninjutsu, School::Ninjutsu],
            window_ms: 5000,
            cost: 8,
            effect: ComboEffect::DamageLane {
                target: Side::Ai,
                damage: 4,
                bonus_when_terrain: Some(TerrainBonus {
                    terrain: LaneId::Mountain,
                    extra: 2,
                }),
                status: Some(status(
                    "burning-embers",
                    Some(4000),
                    StatusKind::DamageOverTime {
                        magnitude: 1,
                        tick_interval_ms: 1000,
                        next_tick_at: 0,
                    },
                )),
            },
        },
        ComboDefinition {
            id: "genjutsu-trap".into(),
            name: "Genjutsu Trap".into(),
            sequence: vec![School::Genjutsu, School::Ninjutsu],
            window_ms: 7000,
            cost: 7,
            effect: ComboEffect::StatusFront {
                target: Side::Ai,
                status: status(
                    "mind-snare",
                    Some(4000),
                    StatusKind::CrowdControl {
                        control: CrowdControl::Stun,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "lightning-devastation".into(),
            name: "Lightning Devastation".into(),
            sequence: vec![School::Taijutsu, School::Ninjutsu, School::Taijutsu],
            window_ms: 8000,
            cost: 10,
            effect: ComboEffect::DamageLane {
                target: Side::Ai,
                damage: 6,
                bonus_when_terrain: Some(TerrainBonus {
                    terrain: LaneId::Mountain,
                    extra: 3,
                }),
                status: Some(status(
                    "chain-lightning",
                    Some(3200),
                    StatusKind::DamageOverTime {
                        magnitude: 2,
                        tick_interval_ms: 800,
                        next_tick_at: 0,
                    },
                )),
            },
        },
        ComboDefinition {
            id: "forest-regeneration".into(),
            name: "Forest Regeneration".into(),
            sequence: vec![School::Ninjutsu, School::Genjutsu],
            window_ms: 5000,
            cost: 5,
            effect: ComboEffect::HealLane {
                target: Side::Player,
                healing: 3,
                bonus_when_terrain: Some(TerrainBonus {
                    terrain: LaneId::Forest,
                    extra: 2,
                }),
                status: Some(status(
                    "nature-blessing",
                    Some(6000),
                    StatusKind::HealOverTime {
                        magnitude: 1,
                        tick_interval_ms: 1500,
                        next_tick_at: 0,
                    },
                )),
            },
        },
        ComboDefinition {
            id: "water-style-prison".into(),
            name: "Water Style Prison".into(),
            sequence: vec![School::Genjutsu, School::Genjutsu],
            window_ms: 4000,
            cost: 6,
            effect: ComboEffect::StatusAll {
                target: Side::Ai,
                status: status(
                    "water-prison",
                    Some(3000),
                    StatusKind::CrowdControl {
                        control: CrowdControl::Freeze,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "berserker-fury".into(),
            name: "Berserker Fury".into(),
            sequence: vec![School::Taijutsu, School::Taijutsu],
            window_ms: 3000,
            cost: 4,
            effect: ComboEffect::BuffLane {
                target: Side::Player,
                status: status(
                    "fury-rage",
                    Some(4000),
                    StatusKind::Buff {
                        attack_bonus: 3,
                        speed_bonus: 1.5,
                        vulnerability: 1.25,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "mist-concealment".into(),
            name: "Mist Concealment".into(),
            sequence: vec![School::Genjutsu, School::Ninjutsu, School::Genjutsu],
            window_ms: 9000,
            cost: 9,
            effect: ComboEffect::StealthLane {
                target: Side::Player,
                status: status(
                    "hidden-mist",
                    Some(5000),
                    StatusKind::Stealth { evasion: 0.4 },
                ),
            },
        },
        ComboDefinition {
            id: "earth-wall-fortress".into(),
            name: "Earth Wall Fortress".into(),
            sequence: vec![School::Taijutsu, School::Ninjutsu],
            window_ms: 4000,
            cost: 7,
            effect: ComboEffect::FortifyStronghold {
                target: Side::Player,
                fortification: 5,
                bonus_when_terrain: Some(TerrainBonus {
                    terrain: LaneId::Mountain,
                    extra: 3,
                }),
                status: Some(status(
                    "stone-barrier",
                    Some(8000),
                    StatusKind::Shield {
                        remaining: 4,
                        reflect: 0.3,
                    },
                )),
            },
        },
        ComboDefinition {
            id: "spirit-swarm".into(),
            name: "Spirit Swarm".into(),
            sequence: vec![School::Genjutsu, School::Taijutsu, School::Ninjutsu],
            window_ms: 10000,
            cost: 12,
            effect: ComboEffect::Summon {
                owner: Side::Player,
                count: 4,
                stats: SummonStats {
                    attack: 1,
                    health: 1,
                },
                status: Some(status(
                    "ethereal-form",
                    Some(6000),
                    StatusKind::Ethereal { phase_chance: 0.3 },
                )),
            },
        },
        ComboDefinition {
            id: "crimson-bloom-detonation".into(),
            name: "Crimson Bloom Detonation".into(),
            sequence: vec![School::Ninjutsu, School::Genjutsu, School::Ninjutsu],
            window_ms: 8000,
            cost: 9,
            effect: ComboEffect::StatusAll {
                target: Side::Ai,
                status: status(
                    "volatile-blossom",
                    Some(2500),
                    StatusKind::DelayedDamage {
                        damage: 4,
                        delay_ms: 2500,
                        trigger_at: 0,
                        linger: false,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "guardian-spirit-anthem".into(),
            name: "Guardian Spirit Anthem".into(),
            sequence: vec![School::Genjutsu, School::Taijutsu],
            window_ms: 6000,
            cost: 6,
            effect: ComboEffect::BuffLane {
                target: Side::Player,
                status: status(
                    "spirit-ward",
                    Some(5000),
                    StatusKind::Aura {
                        attack_bonus: 1,
                        speed_bonus: 1.1,
                        damage_reduction: 0.35,
                        flat_reduction: 1,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "tempest-rupture-dance".into(),
            name: "Tempest Rupture Dance".into(),
            sequence: vec![School::Ninjutsu, School::Taijutsu, School::Genjutsu],
            window_ms: 8000,
            cost: 9,
            effect: ComboEffect::StatusAll {
                target: Side::Ai,
                status: status(
                    "tempest-rupture",
                    Some(6000),
                    StatusKind::Rupture {
                        bonus_damage: 2,
                        remaining_stacks: 2,
                    },
                ),
            },
        },
        ComboDefinition {
            id: "celestial-ward-bloom".into(),
            name: "Celestial Ward Bloom".into(),
            sequence: vec![School::Genjutsu, School::Ninjutsu, School::Taijutsu],
            window_ms: 9000,
            cost: 8,
            effect: ComboEffect::BuffLane {
                target: Side::Player,
                status: status(
                    "celestial-ward",
                    Some(6000),
                    StatusKind::ShieldPulse {
                        shield_value: 2,
                        tick_interval_ms: 1200,
                        next_tick_at: 0,
                        max_stacks: 3,
                        granted: 0,
                    },
                ),
            },
        },
    ]
}

/// Instant-speed jutsu offered inside reactive windows
pub fn reactive_jutsu() -> Vec<ReactiveJutsu> {
    vec![
        ReactiveJutsu {
            id: "substitution-jutsu".into(),
            name: "Substitution Jutsu".into(),
            school: School::Ninjutsu,
            cost: 2,
            triggers: vec![ReactiveTrigger::UnitDamaged, ReactiveTrigger::BeforeCombat],
            effect: ReactiveEffect::Substitution {
                counter_multiplier: 1.5,
            },
        },
        ReactiveJutsu {
            id: "smoke-bomb".into(),
            name: "Smoke Bomb".into(),
            school: School::Ninjutsu,
            cost: 3,
            triggers: vec![ReactiveTrigger::BeforeCombat],
            effect: ReactiveEffect::SkipCombat { duration_ms: 1000 },
        },
        ReactiveJutsu {
            id: "lightning-counter".into(),
            name: "Lightning Counter".into(),
            school: School::Ninjutsu,
            cost: 4,
            triggers: vec![ReactiveTrigger::UnitDamaged],
            effect: ReactiveEffect::CounterStrike {
                damage_multiplier: 2.0,
            },
        },
        ReactiveJutsu {
            id: "earth-wall".into(),
            name: "Earth Wall".into(),
            school: School::Taijutsu,
            cost: 3,
            triggers: vec![ReactiveTrigger::BeforeCombat, ReactiveTrigger::UnitDamaged],
            effect: ReactiveEffect::ShieldWall {
                shield_value: 3,
                duration_ms: 5000,
            },
        },
    ]
}
