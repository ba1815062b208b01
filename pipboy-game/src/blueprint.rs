//! Declarative field lists for building domain objects from user input.
//!
//! Each constructible type publishes the flat fields a user has to supply, in
//! prompt order. Nested composites (effects, skills, limbs) are filled with
//! their defaults.
use std::fmt;

use crate::attributes::Special;
use crate::entities::{
    BloatFly, CombatStats, DeathClaw, Dog, Entity, Feral, Ghoul, Human, NightStalker, Nightkin,
    Player, Robot, RobotModel, SuperMutant,
};
use crate::error::BlueprintError;
use crate::items::{
    Aid, AidType, Ammo, AmmoModification, AmmoType, HeadPiece, Item, Misc, MiscType, TorsoPiece,
    Weapon, WeaponType,
};
use crate::record::DomainObject;
use crate::registry::{ConcreteType, ResolvedType};
use crate::world::{Coordinate, Location, LocationKind, Perk};

/// Shape of a single prompted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    Unsigned { max: u64 },
    Signed { min: i64, max: i64 },
    Decimal,
    Choice(&'static [&'static str]),
}

impl FieldKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "true/false",
            Self::Unsigned { .. } => "whole number",
            Self::Signed { .. } => "signed number",
            Self::Decimal => "decimal",
            Self::Choice(_) => "choice",
        }
    }

    /// Parse raw user input into a value of this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`BlueprintError`] describing why `input` does not fit.
    pub fn parse(&self, field: &'static str, input: &str) -> Result<FieldValue, BlueprintError> {
        let trimmed = input.trim();
        let kind_error = || BlueprintError::Kind {
            field,
            expected: self.label(),
        };
        match *self {
            Self::Text => Ok(FieldValue::Text(input.trim_end_matches(['\r', '\n']).to_string())),
            Self::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" => Ok(FieldValue::Bool(true)),
                "false" | "f" | "no" | "n" | "0" => Ok(FieldValue::Bool(false)),
                _ => Err(kind_error()),
            },
            Self::Unsigned { max } => {
                let value: u64 = trimmed.parse().map_err(|_| kind_error())?;
                if value > max {
                    return Err(BlueprintError::OutOfRange {
                        field,
                        value: i64::try_from(value).unwrap_or(i64::MAX),
                        min: 0,
                        max: i64::try_from(max).unwrap_or(i64::MAX),
                    });
                }
                Ok(FieldValue::Unsigned(value))
            }
            Self::Signed { min, max } => {
                let value: i64 = trimmed.parse().map_err(|_| kind_error())?;
                if !(min..=max).contains(&value) {
                    return Err(BlueprintError::OutOfRange {
                        field,
                        value,
                        min,
                        max,
                    });
                }
                Ok(FieldValue::Signed(value))
            }
            Self::Decimal => {
                let value: f32 = trimmed.parse().map_err(|_| kind_error())?;
                if value.is_finite() {
                    Ok(FieldValue::Decimal(value))
                } else {
                    Err(kind_error())
                }
            }
            Self::Choice(names) => {
                let index = match trimmed.parse::<usize>() {
                    Ok(index) => index,
                    Err(_) => names
                        .iter()
                        .position(|name| name.eq_ignore_ascii_case(trimmed))
                        .ok_or_else(kind_error)?,
                };
                if index >= names.len() {
                    return Err(BlueprintError::Choice { field, index });
                }
                Ok(FieldValue::Choice(index))
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned { max } => write!(f, "{}, Min: 0, Max: {max}", self.label()),
            Self::Signed { min, max } => write!(f, "{}, Min: {min}, Max: {max}", self.label()),
            _ => f.write_str(self.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub help: &'static str,
}

impl FieldDescriptor {
    const fn new(name: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self { name, kind, help }
    }
}

/// A value supplied for one [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Decimal(f32),
    Choice(usize),
}

/// Enumerations offered as numbered choices.
trait Choices: Copy + 'static {
    const VARIANTS: &'static [Self];
    const NAMES: &'static [&'static str];
}

macro_rules! choices {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl Choices for $ty {
            const VARIANTS: &'static [Self] = &[$($ty::$variant),+];
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];
        }
    };
}

choices!(WeaponType { Melee, Unarmed, Gun, Explosive, Energy });
choices!(AmmoType { Bullet, Bomb, EnergyCell });
choices!(AmmoModification {
    Standard,
    HollowPoint,
    ArmorPiercing,
    HandLoad,
    Special,
    Surplus,
    Explosive,
    Incendiary,
});
choices!(AidType { Food, Drink, Syringe, Pill, Inhale, Smoke });
choices!(MiscType { Junk, Sellable, Crafting, Key, Package, Other });
choices!(RobotModel { Protectron, MrHandy, Eyebot, SentryBot, Robobrain });
choices!(LocationKind { Settlement, Vault, Cave, Factory, Military, Monument, Ruins, Camp });

const U8_MAX: u64 = u8::MAX as u64;
const U16_MAX: u64 = u16::MAX as u64;
const U32_MAX: u64 = u32::MAX as u64;

const NAME: FieldDescriptor = FieldDescriptor::new("name", FieldKind::Text, "display name");
const DESCRIPTION: FieldDescriptor =
    FieldDescriptor::new("description", FieldKind::Text, "free text");
const WEIGHT: FieldDescriptor = FieldDescriptor::new("weight", FieldKind::Decimal, "pounds");
const VALUE: FieldDescriptor =
    FieldDescriptor::new("value", FieldKind::Unsigned { max: U32_MAX }, "caps");
const DAMAGE_RESISTANCE: FieldDescriptor = FieldDescriptor::new(
    "damage_resistance",
    FieldKind::Unsigned { max: 100 },
    "percent",
);
const LEVEL: FieldDescriptor =
    FieldDescriptor::new("level", FieldKind::Unsigned { max: U8_MAX }, "character level");
const HEALTH: FieldDescriptor = FieldDescriptor::new("health", FieldKind::Decimal, "hit points");

const fn special(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldKind::Unsigned { max: 10 }, "S.P.E.C.I.A.L. 1-10")
}

const WEAPON_FIELDS: &[FieldDescriptor] = &[
    NAME,
    WEIGHT,
    VALUE,
    FieldDescriptor::new(
        "weapon_type",
        FieldKind::Choice(WeaponType::NAMES),
        "weapon class",
    ),
    FieldDescriptor::new(
        "strength_requirement",
        FieldKind::Unsigned { max: 10 },
        "minimum strength",
    ),
    FieldDescriptor::new("range", FieldKind::Unsigned { max: U16_MAX }, "effective range"),
    FieldDescriptor::new("clip_size", FieldKind::Unsigned { max: U16_MAX }, "rounds per reload"),
    FieldDescriptor::new("damage", FieldKind::Unsigned { max: U16_MAX }, "damage per hit"),
];

const APPAREL_FIELDS: &[FieldDescriptor] = &[
    NAME,
    WEIGHT,
    VALUE,
    DAMAGE_RESISTANCE,
    FieldDescriptor::new("is_powered", FieldKind::Bool, "power armor piece"),
];

const AMMO_FIELDS: &[FieldDescriptor] = &[
    NAME,
    VALUE,
    FieldDescriptor::new("ammo_type", FieldKind::Choice(AmmoType::NAMES), "ammunition class"),
    FieldDescriptor::new(
        "modification",
        FieldKind::Choice(AmmoModification::NAMES),
        "load",
    ),
];

const AID_FIELDS: &[FieldDescriptor] = &[
    NAME,
    WEIGHT,
    VALUE,
    FieldDescriptor::new("aid_type", FieldKind::Choice(AidType::NAMES), "how it is taken"),
];

const MISC_FIELDS: &[FieldDescriptor] = &[
    NAME,
    WEIGHT,
    VALUE,
    FieldDescriptor::new("misc_type", FieldKind::Choice(MiscType::NAMES), "kind of object"),
];

const PLAYER_FIELDS: &[FieldDescriptor] = &[
    NAME,
    special("strength"),
    special("perception"),
    special("endurance"),
    special("charisma"),
    special("intelligence"),
    special("agility"),
    special("luck"),
    FieldDescriptor::new("is_female", FieldKind::Bool, "gender"),
];

macro_rules! npc_fields {
    ($($extra:expr),* $(,)?) => {
        &[NAME, LEVEL, HEALTH, DAMAGE_RESISTANCE, $($extra),*]
    };
}

const HUMAN_FIELDS: &[FieldDescriptor] = npc_fields!(
    FieldDescriptor::new("is_female", FieldKind::Bool, "gender"),
    FieldDescriptor::new("faction", FieldKind::Text, "allegiance"),
);
const ROBOT_FIELDS: &[FieldDescriptor] = npc_fields!(FieldDescriptor::new(
    "model",
    FieldKind::Choice(RobotModel::NAMES),
    "chassis"
));
const GHOUL_FIELDS: &[FieldDescriptor] = npc_fields!(FieldDescriptor::new(
    "rad_regeneration",
    FieldKind::Decimal,
    "health per rad"
));
const FERAL_FIELDS: &[FieldDescriptor] =
    npc_fields!(FieldDescriptor::new("is_glowing", FieldKind::Bool, "glowing one"));
const SUPER_MUTANT_FIELDS: &[FieldDescriptor] =
    npc_fields!(FieldDescriptor::new("is_master", FieldKind::Bool, "master rank"));
const NIGHTKIN_FIELDS: &[FieldDescriptor] = npc_fields!(FieldDescriptor::new(
    "stealth_boys",
    FieldKind::Unsigned { max: U8_MAX },
    "carried stealth boys"
));
const DOG_FIELDS: &[FieldDescriptor] =
    npc_fields!(FieldDescriptor::new("is_companion", FieldKind::Bool, "follows the player"));
const NIGHT_STALKER_FIELDS: &[FieldDescriptor] = npc_fields!(FieldDescriptor::new(
    "venom_damage",
    FieldKind::Unsigned { max: U16_MAX },
    "poison per bite"
));
const BLOAT_FLY_FIELDS: &[FieldDescriptor] = npc_fields!(FieldDescriptor::new(
    "swarm_size",
    FieldKind::Unsigned { max: U8_MAX },
    "flies per swarm"
));
const DEATH_CLAW_FIELDS: &[FieldDescriptor] =
    npc_fields!(FieldDescriptor::new("is_alpha", FieldKind::Bool, "pack leader"));

const PERK_FIELDS: &[FieldDescriptor] = &[
    NAME,
    DESCRIPTION,
    FieldDescriptor::new("max_rank", FieldKind::Unsigned { max: U8_MAX }, "number of ranks"),
];

const LOCATION_FIELDS: &[FieldDescriptor] = &[
    NAME,
    DESCRIPTION,
    FieldDescriptor::new("kind", FieldKind::Choice(LocationKind::NAMES), "map marker"),
    FieldDescriptor::new("x", FieldKind::Unsigned { max: U16_MAX }, "map column"),
    FieldDescriptor::new("y", FieldKind::Unsigned { max: U16_MAX }, "map row"),
];

/// The prompt plan for one concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blueprint {
    pub target: ConcreteType,
    pub fields: &'static [FieldDescriptor],
}

impl Blueprint {
    #[must_use]
    pub const fn for_type(target: ConcreteType) -> Self {
        let fields = match target {
            ConcreteType::Weapon => WEAPON_FIELDS,
            ConcreteType::HeadPiece | ConcreteType::TorsoPiece => APPAREL_FIELDS,
            ConcreteType::Ammo => AMMO_FIELDS,
            ConcreteType::Aid => AID_FIELDS,
            ConcreteType::Misc => MISC_FIELDS,
            ConcreteType::Player => PLAYER_FIELDS,
            ConcreteType::Human => HUMAN_FIELDS,
            ConcreteType::Robot => ROBOT_FIELDS,
            ConcreteType::Ghoul => GHOUL_FIELDS,
            ConcreteType::Feral => FERAL_FIELDS,
            ConcreteType::SuperMutant => SUPER_MUTANT_FIELDS,
            ConcreteType::Nightkin => NIGHTKIN_FIELDS,
            ConcreteType::Dog => DOG_FIELDS,
            ConcreteType::NightStalker => NIGHT_STALKER_FIELDS,
            ConcreteType::BloatFly => BLOAT_FLY_FIELDS,
            ConcreteType::DeathClaw => DEATH_CLAW_FIELDS,
            ConcreteType::Perk => PERK_FIELDS,
            ConcreteType::Location => LOCATION_FIELDS,
        };
        Self { target, fields }
    }

    /// Blueprint for a friendly-name resolution result.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::NotConstructible`] for abstract or
    /// non-persistable categories.
    pub const fn for_resolved(resolved: ResolvedType) -> Result<Self, BlueprintError> {
        match resolved.constructible() {
            Some(target) => Ok(Self::for_type(target)),
            None => Err(BlueprintError::NotConstructible {
                name: resolved.name(),
            }),
        }
    }

    /// Build the target type from one value per field, in field order.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Arity`] for the wrong number of values and
    /// [`BlueprintError::Kind`], [`BlueprintError::OutOfRange`] or
    /// [`BlueprintError::Choice`] for a value that does not fit its field.
    pub fn build(&self, values: &[FieldValue]) -> Result<DomainObject, BlueprintError> {
        if values.len() != self.fields.len() {
            return Err(BlueprintError::Arity {
                type_name: self.target.tag(),
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        let mut reader = ValueReader {
            fields: self.fields,
            values,
            index: 0,
        };
        let object = match self.target {
            ConcreteType::Weapon => Item::Weapon(Weapon {
                name: reader.text()?,
                weight: reader.decimal()?,
                value: reader.unsigned()?,
                effects: Vec::new(),
                weapon_type: reader.choice()?,
                strength_requirement: reader.unsigned()?,
                range: reader.unsigned()?,
                clip_size: reader.unsigned()?,
                damage: reader.unsigned()?,
            })
            .into(),
            ConcreteType::HeadPiece => Item::HeadPiece(HeadPiece::new(
                reader.text()?,
                reader.decimal()?,
                reader.unsigned()?,
                Vec::new(),
                reader.unsigned()?,
                reader.boolean()?,
            ))
            .into(),
            ConcreteType::TorsoPiece => Item::TorsoPiece(TorsoPiece::new(
                reader.text()?,
                reader.decimal()?,
                reader.unsigned()?,
                Vec::new(),
                reader.unsigned()?,
                reader.boolean()?,
            ))
            .into(),
            ConcreteType::Ammo => Item::Ammo(Ammo::new(
                reader.text()?,
                reader.unsigned()?,
                Vec::new(),
                reader.choice()?,
                reader.choice()?,
            ))
            .into(),
            ConcreteType::Aid => Item::Aid(Aid::new(
                reader.text()?,
                reader.decimal()?,
                reader.unsigned()?,
                Vec::new(),
                reader.choice()?,
            ))
            .into(),
            ConcreteType::Misc => Item::Misc(Misc::new(
                reader.text()?,
                reader.decimal()?,
                reader.unsigned()?,
                reader.choice()?,
            ))
            .into(),
            ConcreteType::Player => {
                let name = reader.text()?;
                let special = Special {
                    strength: reader.unsigned()?,
                    perception: reader.unsigned()?,
                    endurance: reader.unsigned()?,
                    charisma: reader.unsigned()?,
                    intelligence: reader.unsigned()?,
                    agility: reader.unsigned()?,
                    luck: reader.unsigned()?,
                };
                let mut player = Player::new(name, special);
                player.is_female = reader.boolean()?;
                Entity::Player(player).into()
            }
            ConcreteType::Human => {
                let (name, combat) = reader.npc()?;
                Entity::Human(Human {
                    name,
                    combat,
                    effects: Vec::new(),
                    is_female: reader.boolean()?,
                    faction: reader.text()?,
                })
                .into()
            }
            ConcreteType::Robot => {
                let (name, combat) = reader.npc()?;
                Entity::Robot(Robot {
                    name,
                    combat,
                    effects: Vec::new(),
                    model: reader.choice()?,
                })
                .into()
            }
            ConcreteType::Ghoul => {
                let (name, combat) = reader.npc()?;
                Entity::Ghoul(Ghoul {
                    name,
                    combat,
                    effects: Vec::new(),
                    rad_regeneration: reader.decimal()?,
                })
                .into()
            }
            ConcreteType::Feral => {
                let (name, combat) = reader.npc()?;
                Entity::Feral(Feral {
                    name,
                    combat,
                    effects: Vec::new(),
                    is_glowing: reader.boolean()?,
                })
                .into()
            }
            ConcreteType::SuperMutant => {
                let (name, combat) = reader.npc()?;
                Entity::SuperMutant(SuperMutant {
                    name,
                    combat,
                    effects: Vec::new(),
                    is_master: reader.boolean()?,
                })
                .into()
            }
            ConcreteType::Nightkin => {
                let (name, combat) = reader.npc()?;
                Entity::Nightkin(Nightkin {
                    name,
                    combat,
                    effects: Vec::new(),
                    stealth_boys: reader.unsigned()?,
                })
                .into()
            }
            ConcreteType::Dog => {
                let (name, combat) = reader.npc()?;
                Entity::Dog(Dog {
                    name,
                    combat,
                    effects: Vec::new(),
                    is_companion: reader.boolean()?,
                })
                .into()
            }
            ConcreteType::NightStalker => {
                let (name, combat) = reader.npc()?;
                Entity::NightStalker(NightStalker {
                    name,
                    combat,
                    effects: Vec::new(),
                    venom_damage: reader.unsigned()?,
                })
                .into()
            }
            ConcreteType::BloatFly => {
                let (name, combat) = reader.npc()?;
                Entity::BloatFly(BloatFly {
                    name,
                    combat,
                    effects: Vec::new(),
                    swarm_size: reader.unsigned()?,
                })
                .into()
            }
            ConcreteType::DeathClaw => {
                let (name, combat) = reader.npc()?;
                Entity::DeathClaw(DeathClaw {
                    name,
                    combat,
                    effects: Vec::new(),
                    is_alpha: reader.boolean()?,
                })
                .into()
            }
            ConcreteType::Perk => DomainObject::Perk(Perk::new(
                reader.text()?,
                reader.text()?,
                reader.unsigned()?,
                Vec::new(),
            )),
            ConcreteType::Location => {
                let name = reader.text()?;
                let description = reader.text()?;
                let kind = reader.choice()?;
                let position = Coordinate::new(reader.unsigned()?, reader.unsigned()?);
                DomainObject::Location(Location::new(name, description, kind, position))
            }
        };
        Ok(object)
    }
}

/// Walks descriptors and values in lockstep, checking each pair.
struct ValueReader<'a> {
    fields: &'static [FieldDescriptor],
    values: &'a [FieldValue],
    index: usize,
}

impl ValueReader<'_> {
    fn next(&mut self) -> Result<(&'static FieldDescriptor, &FieldValue), BlueprintError> {
        let index = self.index;
        self.index += 1;
        match (self.fields.get(index), self.values.get(index)) {
            (Some(field), Some(value)) => Ok((field, value)),
            _ => Err(BlueprintError::Arity {
                type_name: "blueprint",
                expected: self.fields.len(),
                actual: self.values.len(),
            }),
        }
    }

    fn text(&mut self) -> Result<String, BlueprintError> {
        match self.next()? {
            (_, FieldValue::Text(text)) => Ok(text.clone()),
            (field, _) => Err(mismatch(field)),
        }
    }

    fn boolean(&mut self) -> Result<bool, BlueprintError> {
        match self.next()? {
            (_, FieldValue::Bool(value)) => Ok(*value),
            (field, _) => Err(mismatch(field)),
        }
    }

    fn decimal(&mut self) -> Result<f32, BlueprintError> {
        match self.next()? {
            (_, FieldValue::Decimal(value)) => Ok(*value),
            (field, _) => Err(mismatch(field)),
        }
    }

    fn unsigned<T: TryFrom<u64>>(&mut self) -> Result<T, BlueprintError> {
        let (field, value) = self.next()?;
        let &FieldValue::Unsigned(value) = value else {
            return Err(mismatch(field));
        };
        let max = match field.kind {
            FieldKind::Unsigned { max } => max,
            _ => return Err(mismatch(field)),
        };
        if value > max {
            return Err(out_of_range(field, value, max));
        }
        T::try_from(value).map_err(|_| out_of_range(field, value, max))
    }

    fn choice<C: Choices>(&mut self) -> Result<C, BlueprintError> {
        match self.next()? {
            (field, FieldValue::Choice(index)) => {
                C::VARIANTS
                    .get(*index)
                    .copied()
                    .ok_or(BlueprintError::Choice {
                        field: field.name,
                        index: *index,
                    })
            }
            (field, _) => Err(mismatch(field)),
        }
    }

    /// Shared NPC prefix: name, level, health and damage resistance.
    fn npc(&mut self) -> Result<(String, CombatStats), BlueprintError> {
        let name = self.text()?;
        let level = self.unsigned()?;
        let health = self.decimal()?;
        let damage_resistance = self.unsigned()?;
        Ok((name, CombatStats::new(level, health, damage_resistance)))
    }
}

const fn mismatch(field: &FieldDescriptor) -> BlueprintError {
    BlueprintError::Kind {
        field: field.name,
        expected: field.kind.label(),
    }
}

fn out_of_range(field: &FieldDescriptor, value: u64, max: u64) -> BlueprintError {
    BlueprintError::OutOfRange {
        field: field.name,
        value: i64::try_from(value).unwrap_or(i64::MAX),
        min: 0,
        max: i64::try_from(max).unwrap_or(i64::MAX),
    }
}
