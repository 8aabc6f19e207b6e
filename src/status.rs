//! Status effect instantiation and the per-resolution status pipeline
//!
//! All timed effects run on catch-up loops: a resolution computes how many
//! intervals elapsed since the last one and applies them in a single batch,
//! so a stalled host that resumes late still lands every tick.

use crate::types::*;

/// Instantiate a template into a live effect at `now`
///
/// Tick-driven kinds get their first tick scheduled one interval out.
/// Delayed damage arms its trigger and never expires before it.
pub fn instantiate(template: &StatusTemplate, now: u64) -> StatusEffect {
    let mut expires_at = template.duration_ms.map(|d| now + d);
    let mut kind = template.kind.clone();

    match &mut kind {
        StatusKind::DamageOverTime {
            tick_interval_ms,
            next_tick_at,
            ..
        }
        | StatusKind::HealOverTime {
            tick_interval_ms,
            next_tick_at,
            ..
        }
        | StatusKind::Regen {
            tick_interval_ms,
            next_tick_at,
            ..
        } => {
            // a zero interval would never advance past `now`
            *tick_interval_ms = (*tick_interval_ms).max(1);
            *next_tick_at = now + *tick_interval_ms;
        }
        StatusKind::ShieldPulse {
            tick_interval_ms,
            next_tick_at,
            granted,
            ..
        } => {
            *tick_interval_ms = (*tick_interval_ms).max(200);
            *next_tick_at = now + *tick_interval_ms;
            *granted = 0;
        }
        StatusKind::DelayedDamage {
            delay_ms,
            trigger_at,
            ..
        } => {
            *trigger_at = now + *delay_ms;
            if expires_at.map_or(true, |e| e < *trigger_at) {
                expires_at = Some(*trigger_at);
            }
        }
        _ => {}
    }

    StatusEffect {
        id: template.id.clone(),
        applied_at: now,
        expires_at,
        kind,
    }
}

/// Attach a template to a unit
pub fn attach(unit: &mut Unit, template: &StatusTemplate, now: u64) {
    unit.statuses.push(instantiate(template, now));
}

/// Translate a card keyword into its status effect
pub fn keyword_status(keyword: &Keyword, now: u64) -> StatusEffect {
    let template = match keyword {
        Keyword::Stealth { duration_ms } => StatusTemplate {
            id: "stealth".into(),
            duration_ms: Some(*duration_ms),
            kind: StatusKind::Stealth { evasion: 0.3 },
        },
        Keyword::Shield { value } => StatusTemplate {
            id: "shield".into(),
            duration_ms: None,
            kind: StatusKind::Shield {
                remaining: *value,
                reflect: 0.0,
            },
        },
        Keyword::Ambush {
            multiplier,
            terrain_multiplier,
            favored_terrain,
        } => StatusTemplate {
            id: "ambush".into(),
            duration_ms: None,
            kind: StatusKind::Ambush {
                multiplier: *multiplier,
                terrain_multiplier: *terrain_multiplier,
                favored_terrain: *favored_terrain,
            },
        },
        Keyword::Regen {
            magnitude,
            tick_interval_ms,
        } => StatusTemplate {
            id: "regen".into(),
            duration_ms: None,
            kind: StatusKind::Regen {
                magnitude: *magnitude,
                tick_interval_ms: *tick_interval_ms,
                next_tick_at: 0,
            },
        },
        Keyword::HealAdjacent { value } => StatusTemplate {
            id: "heal-adjacent".into(),
            duration_ms: None,
            kind: StatusKind::HealAdjacent { value: *value },
        },
        Keyword::Aura { attack_bonus } => StatusTemplate {
            id: "aura".into(),
            duration_ms: None,
            kind: StatusKind::Aura {
                attack_bonus: *attack_bonus,
                speed_bonus: 1.0,
                damage_reduction: 0.0,
                flat_reduction: 0,
            },
        },
    };
    instantiate(&template, now)
}

fn advance_ticks(next_tick_at: &mut u64, interval: u64, expires_at: Option<u64>, now: u64) -> u32 {
    let mut ticks = 0;
    while now >= *next_tick_at && expires_at.map_or(true, |e| *next_tick_at <= e) {
        ticks += 1;
        *next_tick_at += interval;
    }
    ticks
}

/// Run the status pipeline on one unit at resolution time
///
/// Expired statuses are dropped, timed effects catch up in batches, and
/// delayed damage detonates. Detonation wins over expiry when the trigger
/// and expiry land on the same timestamp.
pub fn process_unit(unit: &mut Unit, now: u64) {
    if unit.statuses.is_empty() {
        return;
    }

    let mut health = unit.health;
    let mut shields = unit.shields.max(0);
    let max_health = unit.max_health;
    let mut kept = Vec::with_capacity(unit.statuses.len());

    for mut status in unit.statuses.drain(..) {
        if let StatusKind::DelayedDamage {
            damage,
            trigger_at,
            linger,
            ..
        } = status.kind
        {
            if now >= trigger_at {
                health = (health - damage).max(0);
                if linger {
                    kept.push(status);
                }
                continue;
            }
        }

        if status.expires_at.map_or(false, |e| now >= e) {
            continue;
        }

        match &mut status.kind {
            StatusKind::DamageOverTime {
                magnitude,
                tick_interval_ms,
                next_tick_at,
            } => {
                let ticks = advance_ticks(next_tick_at, *tick_interval_ms, status.expires_at, now);
                if ticks > 0 {
                    health = (health - ticks as i32 * *magnitude).max(0);
                }
            }
            StatusKind::HealOverTime {
                magnitude,
                tick_interval_ms,
                next_tick_at,
            }
            | StatusKind::Regen {
                magnitude,
                tick_interval_ms,
                next_tick_at,
            } => {
                let ticks = advance_ticks(next_tick_at, *tick_interval_ms, status.expires_at, now);
                if ticks > 0 {
                    health = (health + ticks as i32 * *magnitude).min(max_health);
                }
            }
            StatusKind::ShieldPulse {
                shield_value,
                tick_interval_ms,
                next_tick_at,
                max_stacks,
                granted,
            } => {
                let ticks = advance_ticks(next_tick_at, *tick_interval_ms, status.expires_at, now);
                if ticks > 0 && *shield_value > 0 {
                    let potential = ticks as i32 * *shield_value;
                    let grant = if *max_stacks == 0 {
                        potential
                    } else {
                        let capacity = *max_stacks as i32 * *shield_value;
                        potential.min((capacity - *granted).max(0))
                    };
                    if grant > 0 {
                        shields += grant;
                        *granted += grant;
                    }
                }
            }
            _ => {}
        }

        kept.push(status);
    }

    unit.health = health;
    unit.shields = shields;
    unit.statuses = kept;
}

/// A unit's attack after buffs, auras, and crowd control
pub fn effective_attack(unit: &Unit) -> i32 {
    let controlled = unit
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::CrowdControl { .. }));
    if controlled {
        return 0;
    }

    let mut attack = unit.attack as f64;
    let mut multiplier = 1.0;
    for status in &unit.statuses {
        match status.kind {
            StatusKind::Buff {
                attack_bonus,
                speed_bonus,
                ..
            }
            | StatusKind::Aura {
                attack_bonus,
                speed_bonus,
                ..
            } => {
                attack += attack_bonus as f64;
                multiplier *= speed_bonus;
            }
            _ => {}
        }
    }

    ((attack * multiplier).round() as i32).max(0)
}

/// Compute the unit's outgoing swing, consuming any ambush statuses
///
/// Ambush multiplies the first attack (more on favored terrain) and is
/// stripped whether or not the hit lands.
pub fn resolve_outgoing_attack(unit: &mut Unit, active_terrain: LaneId) -> i32 {
    let mut attack = effective_attack(unit) as f64;
    unit.statuses.retain(|status| match status.kind {
        StatusKind::Ambush {
            multiplier,
            terrain_multiplier,
            favored_terrain,
        } => {
            attack *= if favored_terrain == Some(active_terrain) {
                terrain_multiplier
            } else {
                multiplier
            };
            false
        }
        _ => true,
    });
    (attack.round() as i32).max(0)
}

/// Apply one hit to a unit through the full damage pipeline
///
/// Order: rupture bonus, vulnerability multiplier, aura mitigation (scaled
/// then flat), shield statuses oldest-first, the flat shield pool, then
/// health (floored at zero). Fractional math is rounded once, after the
/// aura stage. Returns the damage reflected back at the attacker.
pub fn apply_damage(unit: &mut Unit, damage: i32) -> i32 {
    let base = damage.max(0);

    let rupture_bonus: i32 = unit
        .statuses
        .iter()
        .map(|s| match s.kind {
            StatusKind::Rupture {
                bonus_damage,
                remaining_stacks,
            } if remaining_stacks > 0 => bonus_damage,
            _ => 0,
        })
        .sum();

    if base <= 0 && rupture_bonus <= 0 {
        return 0;
    }

    let mut incoming = (base + rupture_bonus) as f64;

    if let Some(mult) = unit.statuses.iter().find_map(|s| match s.kind {
        StatusKind::Buff { vulnerability, .. } if vulnerability != 1.0 => Some(vulnerability),
        _ => None,
    }) {
        incoming *= mult;
    }

    let auras: Vec<(f64, i32)> = unit
        .statuses
        .iter()
        .filter_map(|s| match s.kind {
            StatusKind::Aura {
                damage_reduction,
                flat_reduction,
                ..
            } => Some((damage_reduction, flat_reduction)),
            _ => None,
        })
        .collect();
    if !auras.is_empty() {
        let scale = auras
            .iter()
            .fold(1.0, |acc, (reduction, _)| acc * (1.0 - reduction.clamp(0.0, 0.9)));
        let flat: i32 = auras.iter().map(|(_, f)| (*f).max(0)).sum();
        incoming = (incoming * scale - flat as f64).max(0.0);
    }

    let mut remaining = incoming.round() as i32;
    let mut reflected = 0;
    let mut kept = Vec::with_capacity(unit.statuses.len());

    for mut status in unit.statuses.drain(..) {
        match &mut status.kind {
            StatusKind::Shield { remaining: value, reflect } if remaining > 0 && *value > 0 => {
                let absorbed = (*value).min(remaining);
                remaining -= absorbed;
                if *reflect > 0.0 && absorbed > 0 {
                    reflected += (absorbed as f64 * *reflect).round() as i32;
                }
                if *value > absorbed {
                    *value -= absorbed;
                    kept.push(status);
                }
            }
            StatusKind::Rupture { remaining_stacks, .. } => {
                // one stack per damaging hit; gone at zero
                if *remaining_stacks > 1 {
                    *remaining_stacks -= 1;
                    kept.push(status);
                }
            }
            _ => kept.push(status),
        }
    }

    let mut shields = unit.shields.max(0);
    if remaining > 0 && shields > 0 {
        let absorbed = shields.min(remaining);
        shields -= absorbed;
        remaining -= absorbed;
    }

    unit.shields = shields;
    unit.health = (unit.health - remaining).max(0);
    unit.statuses = kept;
    reflected
}

/// Post-combat heal-adjacent pulse for one side of a lane
///
/// Healer values are read before any healing lands, then applied
/// cumulatively to neighbors, capped at max health.
pub fn heal_adjacent(units: &mut [Unit]) {
    let heals: Vec<i32> = units
        .iter()
        .map(|u| {
            u.statuses
                .iter()
                .find_map(|s| match s.kind {
                    StatusKind::HealAdjacent { value } => Some(value),
                    _ => None,
                })
                .unwrap_or(0)
        })
        .collect();

    for (i, amount) in heals.iter().enumerate() {
        if *amount <= 0 {
            continue;
        }
        if i > 0 {
            let left = &mut units[i - 1];
            left.health = (left.health + amount).min(left.max_health);
        }
        if i + 1 < units.len() {
            let right = &mut units[i + 1];
            right.health = (right.health + amount).min(right.max_health);
        }
    }
}
