//! Traits tying domain types to the registry, and the closed [`DomainObject`] sum type.
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entities::{
    BloatFly, DeathClaw, Dog, Entity, Feral, Ghoul, Human, NightStalker, Nightkin, Player, Robot,
    SuperMutant,
};
use crate::effect::Effect;
use crate::items::{Aid, Ammo, HeadPiece, Item, Misc, TorsoPiece, Weapon};
use crate::registry::ConcreteType;
use crate::world::{Faction, Location, Perk, Quest};

/// Anything the codec can be asked to encode.
pub trait Record: Serialize {
    /// Display name, used as the storage key.
    fn record_name(&self) -> &str;

    /// Runtime type name, used when the name is empty and in error messages.
    fn type_name(&self) -> &'static str;

    /// Registry entry for this value; `None` for types outside the persistable hierarchy.
    fn concrete_type(&self) -> Option<ConcreteType>;
}

/// A concrete registry type that can be decoded from its own document.
pub trait Persist: Record + DeserializeOwned {
    const TYPE: ConcreteType;
}

macro_rules! persistable {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn record_name(&self) -> &str {
                    &self.name
                }

                fn type_name(&self) -> &'static str {
                    ConcreteType::$ty.tag()
                }

                fn concrete_type(&self) -> Option<ConcreteType> {
                    Some(ConcreteType::$ty)
                }
            }

            impl Persist for $ty {
                const TYPE: ConcreteType = ConcreteType::$ty;
            }
        )+
    };
}

persistable!(
    Weapon,
    HeadPiece,
    TorsoPiece,
    Aid,
    Ammo,
    Misc,
    Player,
    Human,
    Robot,
    Ghoul,
    Feral,
    SuperMutant,
    Nightkin,
    Dog,
    NightStalker,
    BloatFly,
    DeathClaw,
    Perk,
    Location,
);

impl Record for Quest {
    fn record_name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "Quest"
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        None
    }
}

impl Record for Faction {
    fn record_name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "Faction"
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        None
    }
}

impl Record for Effect {
    fn record_name(&self) -> &str {
        self.effect_type.as_str()
    }

    fn type_name(&self) -> &'static str {
        "Effect"
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        None
    }
}

/// Any object of the persistable hierarchy, as returned by tag-dispatched decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainObject {
    Item(Item),
    Entity(Entity),
    Perk(Perk),
    Location(Location),
}

impl DomainObject {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Item(item) => item.name(),
            Self::Entity(entity) => entity.name(),
            Self::Perk(perk) => &perk.name,
            Self::Location(location) => &location.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ConcreteType {
        match self {
            Self::Item(item) => item.concrete_type(),
            Self::Entity(entity) => entity.concrete_type(),
            Self::Perk(_) => ConcreteType::Perk,
            Self::Location(_) => ConcreteType::Location,
        }
    }

    #[must_use]
    pub fn into_item(self) -> Option<Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_entity(self) -> Option<Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

impl Record for DomainObject {
    fn record_name(&self) -> &str {
        self.name()
    }

    fn type_name(&self) -> &'static str {
        self.kind().tag()
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        Some(self.kind())
    }
}

impl Record for Item {
    fn record_name(&self) -> &str {
        self.name()
    }

    fn type_name(&self) -> &'static str {
        Item::concrete_type(self).tag()
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        Some(Item::concrete_type(self))
    }
}

impl Record for Entity {
    fn record_name(&self) -> &str {
        self.name()
    }

    fn type_name(&self) -> &'static str {
        Entity::concrete_type(self).tag()
    }

    fn concrete_type(&self) -> Option<ConcreteType> {
        Some(Entity::concrete_type(self))
    }
}

impl From<Item> for DomainObject {
    fn from(value: Item) -> Self {
        Self::Item(value)
    }
}

impl From<Entity> for DomainObject {
    fn from(value: Entity) -> Self {
        Self::Entity(value)
    }
}

impl From<Perk> for DomainObject {
    fn from(value: Perk) -> Self {
        Self::Perk(value)
    }
}

impl From<Location> for DomainObject {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::WeaponType;

    #[test]
    fn concrete_records_report_their_registry_entry() {
        let weapon = Weapon::new("Lucky", 3.0, 1_500, vec![], WeaponType::Gun, 4, 40, 6, 38);
        assert_eq!(weapon.concrete_type(), Some(ConcreteType::Weapon));
        assert_eq!(weapon.type_name(), "Weapon");
        assert_eq!(weapon.record_name(), "Lucky");
        assert_eq!(<Weapon as Persist>::TYPE, ConcreteType::Weapon);
    }

    #[test]
    fn quests_and_factions_are_not_persistable() {
        let quest = Quest::new("Volare!", "", ["Find the flight recorder"]);
        assert_eq!(quest.concrete_type(), None);
        assert_eq!(quest.type_name(), "Quest");
        let faction = Faction::new("Powder Gangers", "");
        assert_eq!(faction.concrete_type(), None);
    }

    #[test]
    fn domain_objects_delegate_to_their_payload() {
        let object: DomainObject = Entity::Dog(Dog {
            name: "Rex".to_string(),
            ..Dog::default()
        })
        .into();
        assert_eq!(object.name(), "Rex");
        assert_eq!(object.kind(), ConcreteType::Dog);
        assert_eq!(Record::concrete_type(&object), Some(ConcreteType::Dog));
        assert!(object.clone().into_item().is_none());
        assert!(object.into_entity().is_some());
    }
}
