//! Weapon model: static combat parameters
//!
//! A weapon is a name, a maximum range compared against Euclidean distance,
//! and an inclusive damage range sampled uniformly on each hit.

use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, ZombsoleError};

/// Immutable combat parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    pub name: &'static str,
    pub max_range: f32,
    /// Inclusive (min, max) damage per hit
    pub damage_range: (i32, i32),
}

impl Weapon {
    fn new(name: &'static str, max_range: f32, damage_range: (i32, i32)) -> Self {
        debug_assert!(max_range > 0.0);
        debug_assert!(damage_range.0 <= damage_range.1);
        Self {
            name,
            max_range,
            damage_range,
        }
    }

    /// Innate zombie melee weapon
    pub fn zombie_claws() -> Self {
        Self::new("claws", 1.5, (5, 10))
    }

    pub fn knife() -> Self {
        Self::new("knife", 1.5, (5, 10))
    }

    pub fn axe() -> Self {
        Self::new("axe", 1.5, (75, 100))
    }

    pub fn gun() -> Self {
        Self::new("gun", 6.0, (10, 50))
    }

    pub fn rifle() -> Self {
        Self::new("rifle", 10.0, (25, 75))
    }

    pub fn shotgun() -> Self {
        Self::new("shotgun", 3.0, (75, 100))
    }

    /// Sample a damage (or heal) amount from this weapon
    pub fn sample_damage(&self, rng: &mut impl Rng) -> i32 {
        rng.gen_range(self.damage_range.0..=self.damage_range.1)
    }
}

/// Resolve a player weapon by case-insensitive name
///
/// `random` picks uniformly among the five real weapons using the supplied
/// generator, so seeded games stay reproducible. Unknown names are a
/// configuration error, never silently defaulted.
pub fn weapon_by_name(name: &str, rng: &mut impl Rng) -> Result<Weapon> {
    match name.to_lowercase().as_str() {
        "knife" => Ok(Weapon::knife()),
        "axe" => Ok(Weapon::axe()),
        "gun" => Ok(Weapon::gun()),
        "rifle" => Ok(Weapon::rifle()),
        "shotgun" => Ok(Weapon::shotgun()),
        "random" => {
            let all = [
                Weapon::knife(),
                Weapon::axe(),
                Weapon::gun(),
                Weapon::rifle(),
                Weapon::shotgun(),
            ];
            Ok(all[rng.gen_range(0..all.len())].clone())
        }
        _ => Err(ZombsoleError::InvalidWeapon(name.to_string())),
    }
}
