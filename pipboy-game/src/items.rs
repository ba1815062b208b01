//! Inventory items: weapons, apparel, ammunition, aid and miscellaneous objects.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::effect::Effect;
use crate::registry::ConcreteType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponType {
    Melee,
    Unarmed,
    #[default]
    Gun,
    Explosive,
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmmoType {
    #[default]
    Bullet,
    Bomb,
    EnergyCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmmoModification {
    #[default]
    Standard,
    HollowPoint,
    ArmorPiercing,
    HandLoad,
    Special,
    Surplus,
    Explosive,
    Incendiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AidType {
    #[default]
    Food,
    Drink,
    Syringe,
    Pill,
    Inhale,
    Smoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MiscType {
    Junk,
    Sellable,
    Crafting,
    Key,
    Package,
    #[default]
    Other,
}

/// Apparel weight class, derived from protection rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Nothing,
    Light,
    Heavy,
}

const HEAVY_DAMAGE_RESISTANCE: u8 = 15;

fn piece_type(damage_resistance: u8, is_powered: bool) -> PieceType {
    if is_powered || damage_resistance >= HEAVY_DAMAGE_RESISTANCE {
        PieceType::Heavy
    } else if damage_resistance == 0 {
        PieceType::Nothing
    } else {
        PieceType::Light
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub weight: f32,
    pub value: u32,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub weapon_type: WeaponType,
    pub strength_requirement: u8,
    pub range: u16,
    pub clip_size: u16,
    pub damage: u16,
}

impl Weapon {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight: f32,
        value: u32,
        effects: Vec<Effect>,
        weapon_type: WeaponType,
        strength_requirement: u8,
        range: u16,
        clip_size: u16,
        damage: u16,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            effects,
            weapon_type,
            strength_requirement,
            range,
            clip_size,
            damage,
        }
    }

    /// Melee and unarmed weapons never need reloading.
    #[must_use]
    pub const fn uses_ammo(&self) -> bool {
        !matches!(self.weapon_type, WeaponType::Melee | WeaponType::Unarmed)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadPiece {
    pub name: String,
    pub weight: f32,
    pub value: u32,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub damage_resistance: u8,
    pub is_powered: bool,
}

impl HeadPiece {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight: f32,
        value: u32,
        effects: Vec<Effect>,
        damage_resistance: u8,
        is_powered: bool,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            effects,
            damage_resistance,
            is_powered,
        }
    }

    #[must_use]
    pub fn piece_type(&self) -> PieceType {
        piece_type(self.damage_resistance, self.is_powered)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TorsoPiece {
    pub name: String,
    pub weight: f32,
    pub value: u32,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub damage_resistance: u8,
    pub is_powered: bool,
}

impl TorsoPiece {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight: f32,
        value: u32,
        effects: Vec<Effect>,
        damage_resistance: u8,
        is_powered: bool,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            effects,
            damage_resistance,
            is_powered,
        }
    }

    #[must_use]
    pub fn piece_type(&self) -> PieceType {
        piece_type(self.damage_resistance, self.is_powered)
    }
}

/// Ammunition is weightless.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ammo {
    pub name: String,
    pub value: u32,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub ammo_type: AmmoType,
    pub modification: AmmoModification,
}

impl Ammo {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: u32,
        effects: Vec<Effect>,
        ammo_type: AmmoType,
        modification: AmmoModification,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            effects,
            ammo_type,
            modification,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aid {
    pub name: String,
    pub weight: f32,
    pub value: u32,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub aid_type: AidType,
}

impl Aid {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight: f32,
        value: u32,
        effects: Vec<Effect>,
        aid_type: AidType,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            effects,
            aid_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Misc {
    pub name: String,
    pub weight: f32,
    pub value: u32,
    pub misc_type: MiscType,
}

impl Misc {
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f32, value: u32, misc_type: MiscType) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            misc_type,
        }
    }
}

/// Any inventory item. Serializes as the wrapped item, without a variant wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Weapon(Weapon),
    HeadPiece(HeadPiece),
    TorsoPiece(TorsoPiece),
    Ammo(Ammo),
    Aid(Aid),
    Misc(Misc),
}

impl Item {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(item) => &item.name,
            Self::HeadPiece(item) => &item.name,
            Self::TorsoPiece(item) => &item.name,
            Self::Ammo(item) => &item.name,
            Self::Aid(item) => &item.name,
            Self::Misc(item) => &item.name,
        }
    }

    #[must_use]
    pub const fn weight(&self) -> f32 {
        match self {
            Self::Weapon(item) => item.weight,
            Self::HeadPiece(item) => item.weight,
            Self::TorsoPiece(item) => item.weight,
            Self::Ammo(_) => 0.0,
            Self::Aid(item) => item.weight,
            Self::Misc(item) => item.weight,
        }
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::Weapon(item) => item.value,
            Self::HeadPiece(item) => item.value,
            Self::TorsoPiece(item) => item.value,
            Self::Ammo(item) => item.value,
            Self::Aid(item) => item.value,
            Self::Misc(item) => item.value,
        }
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Weapon(item) => &item.effects,
            Self::HeadPiece(item) => &item.effects,
            Self::TorsoPiece(item) => &item.effects,
            Self::Ammo(item) => &item.effects,
            Self::Aid(item) => &item.effects,
            Self::Misc(_) => &[],
        }
    }

    #[must_use]
    pub const fn concrete_type(&self) -> ConcreteType {
        match self {
            Self::Weapon(_) => ConcreteType::Weapon,
            Self::HeadPiece(_) => ConcreteType::HeadPiece,
            Self::TorsoPiece(_) => ConcreteType::TorsoPiece,
            Self::Ammo(_) => ConcreteType::Ammo,
            Self::Aid(_) => ConcreteType::Aid,
            Self::Misc(_) => ConcreteType::Misc,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (wt {}, val {})",
            self.name(),
            self.weight(),
            self.value()
        )
    }
}

impl From<Weapon> for Item {
    fn from(value: Weapon) -> Self {
        Self::Weapon(value)
    }
}

impl From<HeadPiece> for Item {
    fn from(value: HeadPiece) -> Self {
        Self::HeadPiece(value)
    }
}

impl From<TorsoPiece> for Item {
    fn from(value: TorsoPiece) -> Self {
        Self::TorsoPiece(value)
    }
}

impl From<Ammo> for Item {
    fn from(value: Ammo) -> Self {
        Self::Ammo(value)
    }
}

impl From<Aid> for Item {
    fn from(value: Aid) -> Self {
        Self::Aid(value)
    }
}

impl From<Misc> for Item {
    fn from(value: Misc) -> Self {
        Self::Misc(value)
    }
}
