//! PIP-Boy Game Core
//!
//! Domain model and persistence for the PIP-Boy wrist computer: a closed
//! registry of storable types, an XML document codec over it, and the session
//! state (inventory, map, radio, quests, factions) the console front end drives.
//! This crate has no terminal dependencies.

pub mod attributes;
pub mod blueprint;
pub mod codec;
pub mod config;
pub mod constants;
pub mod effect;
pub mod entities;
pub mod error;
pub mod inventory;
pub mod items;
pub mod map;
pub mod navigation;
pub mod pipboy;
pub mod radio;
pub mod record;
pub mod registry;
pub mod world;

// Re-export commonly used types
pub use attributes::{Attribute, AttributeName, Special};
pub use blueprint::{Blueprint, FieldDescriptor, FieldKind, FieldValue};
pub use codec::{
    DocumentCodec, decode, decode_any, document_paths, encode, peek_type, storage_key,
    storage_path,
};
pub use config::PipBoyConfig;
pub use effect::{Effect, EffectType};
pub use entities::{
    BloatFly, CombatStats, DeathClaw, Dog, Entity, Feral, Ghoul, Human, Limbs, NightStalker,
    Nightkin, Player, RadiationSicknessLevel, Robot, RobotModel, SuperMutant, Vitals,
};
pub use error::{BlueprintError, PersistError, SessionError};
pub use inventory::{Inventory, ItemsPage};
pub use items::{
    Aid, AidType, Ammo, AmmoModification, AmmoType, HeadPiece, Item, Misc, MiscType, PieceType,
    TorsoPiece, Weapon, WeaponType,
};
pub use map::{Direction, Map};
pub use navigation::{DataPage, Navigation, Page, StatsPage, Tab};
pub use pipboy::{DataNote, NoteKind, PipBoy, QuestLog};
pub use radio::Radio;
pub use record::{DomainObject, Persist, Record};
pub use registry::{
    Category, ConcreteType, ResolvedType, enumerate_leaves, resolve_by_friendly_name,
    resolve_concrete_type,
};
pub use world::{Coordinate, Faction, Location, LocationKind, Perk, Quest, QuestStep};
