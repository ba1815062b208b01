//! S.P.E.C.I.A.L. attributes and skills.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{SKILL_MAX, SPECIAL_DEFAULT, SPECIAL_MAX, SPECIAL_MIN};

/// Every named attribute a character can have: the seven S.P.E.C.I.A.L.
/// stats followed by the thirteen skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeName {
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
}

impl AttributeName {
    pub const SPECIAL: [Self; 7] = [
        Self::Strength,
        Self::Perception,
        Self::Endurance,
        Self::Charisma,
        Self::Intelligence,
        Self::Agility,
        Self::Luck,
    ];

    pub const SKILLS: [Self; 13] = [
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
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Perception => "Perception",
            Self::Endurance => "Endurance",
            Self::Charisma => "Charisma",
            Self::Intelligence => "Intelligence",
            Self::Agility => "Agility",
            Self::Luck => "Luck",
            Self::Barter => "Barter",
            Self::EnergyWeapons => "EnergyWeapons",
            Self::Explosives => "Explosives",
            Self::Gun => "Gun",
            Self::Lockpick => "Lockpick",
            Self::Medicine => "Medicine",
            Self::MeleeWeapons => "MeleeWeapons",
            Self::Repair => "Repair",
            Self::Science => "Science",
            Self::Sneak => "Sneak",
            Self::Speech => "Speech",
            Self::Survival => "Survival",
            Self::Unarmed => "Unarmed",
        }
    }

    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::Strength
                | Self::Perception
                | Self::Endurance
                | Self::Charisma
                | Self::Intelligence
                | Self::Agility
                | Self::Luck
        )
    }

    /// The S.P.E.C.I.A.L. stat a skill grows from. S.P.E.C.I.A.L. names govern themselves.
    #[must_use]
    pub const fn governing(self) -> Self {
        match self {
            Self::Barter | Self::Speech => Self::Charisma,
            Self::EnergyWeapons | Self::Explosives | Self::Lockpick => Self::Perception,
            Self::Gun => Self::Agility,
            Self::Medicine | Self::Repair | Self::Science => Self::Intelligence,
            Self::MeleeWeapons => Self::Strength,
            Self::Sneak => Self::Agility,
            Self::Survival | Self::Unarmed => Self::Endurance,
            special => special,
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SPECIAL
            .iter()
            .chain(Self::SKILLS.iter())
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A named attribute with its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: AttributeName,
    pub value: u8,
}

impl Attribute {
    #[must_use]
    pub const fn new(name: AttributeName, value: u8) -> Self {
        Self { name, value }
    }
}

/// The seven S.P.E.C.I.A.L. stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Special {
    pub strength: u8,
    pub perception: u8,
    pub endurance: u8,
    pub charisma: u8,
    pub intelligence: u8,
    pub agility: u8,
    pub luck: u8,
}

impl Default for Special {
    fn default() -> Self {
        Self::uniform(SPECIAL_DEFAULT)
    }
}

impl Special {
    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self {
            strength: value,
            perception: value,
            endurance: value,
            charisma: value,
            intelligence: value,
            agility: value,
            luck: value,
        }
    }

    /// Value of a S.P.E.C.I.A.L. stat; skills resolve to their governing stat.
    #[must_use]
    pub const fn get(&self, name: AttributeName) -> u8 {
        match name.governing() {
            AttributeName::Strength => self.strength,
            AttributeName::Perception => self.perception,
            AttributeName::Endurance => self.endurance,
            AttributeName::Charisma => self.charisma,
            AttributeName::Intelligence => self.intelligence,
            AttributeName::Agility => self.agility,
            _ => self.luck,
        }
    }

    pub fn clamp(&mut self) {
        for value in [
            &mut self.strength,
            &mut self.perception,
            &mut self.endurance,
            &mut self.charisma,
            &mut self.intelligence,
            &mut self.agility,
            &mut self.luck,
        ] {
            *value = (*value).clamp(SPECIAL_MIN, SPECIAL_MAX);
        }
    }

    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        AttributeName::SPECIAL
            .iter()
            .map(|&name| Attribute::new(name, self.get(name)))
            .collect()
    }

    /// Starting value of a skill: `2 + 2 * governing + ceil(luck / 2)`.
    #[must_use]
    pub fn initial_skill(&self, skill: AttributeName) -> u8 {
        let governing = u16::from(self.get(skill));
        let luck_bonus = u16::from(self.luck).div_ceil(2);
        let value = 2 + 2 * governing + luck_bonus;
        u8::try_from(value.min(u16::from(SKILL_MAX))).unwrap_or(SKILL_MAX)
    }

    #[must_use]
    pub fn initial_skills(&self) -> Vec<Attribute> {
        AttributeName::SKILLS
            .iter()
            .map(|&skill| Attribute::new(skill, self.initial_skill(skill)))
            .collect()
    }
}
