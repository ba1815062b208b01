//! Timed or permanent stat modifiers carried by items, perks and characters.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::AttributeName;

/// What an [`Effect`] modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EffectType {
    Strength,
    Perception,
    Endurance,
    Charisma,
    Intelligence,
    Agility,
    Luck,
    Barter,
    EnergyWeapons,
    Explosives,
    Gun,
    Lockpick,
    Medicine,
    MeleeWeapons,
    Repair,
    Science,
    Sneak,
    Speech,
    Survival,
    Unarmed,
    HitPoints,
    ActionPoints,
    DamageResistance,
    RadiationResistance,
    #[default]
    None,
}

impl EffectType {
    pub const ALL: [Self; 25] = [
        Self::Strength,
        Self::Perception,
        Self::Endurance,
        Self::Charisma,
        Self::Intelligence,
        Self::Agility,
        Self::Luck,
        Self::Barter,
        Self::EnergyWeapons,
        Self::Explosives,
        Self::Gun,
        Self::Lockpick,
        Self::Medicine,
        Self::MeleeWeapons,
        Self::Repair,
        Self::Science,
        Self::Sneak,
        Self::Speech,
        Self::Survival,
        Self::Unarmed,
        Self::HitPoints,
        Self::ActionPoints,
        Self::DamageResistance,
        Self::RadiationResistance,
        Self::None,
    ];

    /// The attribute this effect adjusts, if it targets one.
    #[must_use]
    pub const fn attribute(self) -> Option<AttributeName> {
        Some(match self {
            Self::Strength => AttributeName::Strength,
            Self::Perception => AttributeName::Perception,
            Self::Endurance => AttributeName::Endurance,
            Self::Charisma => AttributeName::Charisma,
            Self::Intelligence => AttributeName::Intelligence,
            Self::Agility => AttributeName::Agility,
            Self::Luck => AttributeName::Luck,
            Self::Barter => AttributeName::Barter,
            Self::EnergyWeapons => AttributeName::EnergyWeapons,
            Self::Explosives => AttributeName::Explosives,
            Self::Gun => AttributeName::Gun,
            Self::Lockpick => AttributeName::Lockpick,
            Self::Medicine => AttributeName::Medicine,
            Self::MeleeWeapons => AttributeName::MeleeWeapons,
            Self::Repair => AttributeName::Repair,
            Self::Science => AttributeName::Science,
            Self::Sneak => AttributeName::Sneak,
            Self::Speech => AttributeName::Speech,
            Self::Survival => AttributeName::Survival,
            Self::Unarmed => AttributeName::Unarmed,
            Self::HitPoints
            | Self::ActionPoints
            | Self::DamageResistance
            | Self::RadiationResistance
            | Self::None => return None,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.attribute() {
            Some(name) => name.as_str(),
            None => match self {
                Self::HitPoints => "HitPoints",
                Self::ActionPoints => "ActionPoints",
                Self::DamageResistance => "DamageResistance",
                Self::RadiationResistance => "RadiationResistance",
                _ => "None",
            },
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single modifier. A `duration` of zero means the effect is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Effect {
    pub effect_type: EffectType,
    pub value: i16,
    pub duration: u16,
}

impl Effect {
    #[must_use]
    pub const fn new(effect_type: EffectType, value: i16, duration: u16) -> Self {
        Self {
            effect_type,
            value,
            duration,
        }
    }

    #[must_use]
    pub const fn permanent(effect_type: EffectType, value: i16) -> Self {
        Self::new(effect_type, value, 0)
    }

    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        self.duration == 0
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.effect_type, self.value)?;
        if !self.is_permanent() {
            write!(f, " ({}s)", self.duration)?;
        }
        Ok(())
    }
}

/// Sum of every effect in `effects` that targets `effect_type`.
#[must_use]
pub fn total_for(effects: &[Effect], effect_type: EffectType) -> i32 {
    effects
        .iter()
        .filter(|effect| effect.effect_type == effect_type)
        .map(|effect| i32::from(effect.value))
        .sum()
}
