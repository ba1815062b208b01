//! Closed catalog of persistable types.
//!
//! Every concrete type that can appear as the root element of a stored
//! document is listed in [`ConcreteType`], grouped under one of the base
//! [`Category`] values. The tag table is a single exhaustive `match`, so adding
//! a variant without giving it a tag does not compile.
use std::fmt;

use crate::error::PersistError;

/// Base categories, in the order friendly-name resolution scans them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Item,
    Entity,
    Perk,
    Location,
    Quest,
    Effect,
    Faction,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Item,
        Self::Entity,
        Self::Perk,
        Self::Location,
        Self::Quest,
        Self::Effect,
        Self::Faction,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Entity => "Entity",
            Self::Perk => "Perk",
            Self::Location => "Location",
            Self::Quest => "Quest",
            Self::Effect => "Effect",
            Self::Faction => "Faction",
        }
    }

    /// Item and Entity only exist through their leaves.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Item | Self::Entity)
    }

    /// Whether objects of this category can be written by the codec.
    #[must_use]
    pub const fn is_persistable(self) -> bool {
        matches!(
            self,
            Self::Item | Self::Entity | Self::Perk | Self::Location
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every type a stored document can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConcreteType {
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
}

impl ConcreteType {
    pub const ALL: [Self; 19] = [
        Self::Weapon,
        Self::HeadPiece,
        Self::TorsoPiece,
        Self::Aid,
        Self::Ammo,
        Self::Misc,
        Self::Player,
        Self::Human,
        Self::Robot,
        Self::Ghoul,
        Self::Feral,
        Self::SuperMutant,
        Self::Nightkin,
        Self::Dog,
        Self::NightStalker,
        Self::BloatFly,
        Self::DeathClaw,
        Self::Perk,
        Self::Location,
    ];

    /// Root element name of documents holding this type.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::HeadPiece => "HeadPiece",
            Self::TorsoPiece => "TorsoPiece",
            Self::Aid => "Aid",
            Self::Ammo => "Ammo",
            Self::Misc => "Misc",
            Self::Player => "Player",
            Self::Human => "Human",
            Self::Robot => "Robot",
            Self::Ghoul => "Ghoul",
            Self::Feral => "Feral",
            Self::SuperMutant => "SuperMutant",
            Self::Nightkin => "Nightkin",
            Self::Dog => "Dog",
            Self::NightStalker => "NightStalker",
            Self::BloatFly => "BloatFly",
            Self::DeathClaw => "DeathClaw",
            Self::Perk => "Perk",
            Self::Location => "Location",
        }
    }

    /// Exact, case-sensitive tag lookup.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "Weapon" => Self::Weapon,
            "HeadPiece" => Self::HeadPiece,
            "TorsoPiece" => Self::TorsoPiece,
            "Aid" => Self::Aid,
            "Ammo" => Self::Ammo,
            "Misc" => Self::Misc,
            "Player" => Self::Player,
            "Human" => Self::Human,
            "Robot" => Self::Robot,
            "Ghoul" => Self::Ghoul,
            "Feral" => Self::Feral,
            "SuperMutant" => Self::SuperMutant,
            "Nightkin" => Self::Nightkin,
            "Dog" => Self::Dog,
            "NightStalker" => Self::NightStalker,
            "BloatFly" => Self::BloatFly,
            "DeathClaw" => Self::DeathClaw,
            "Perk" => Self::Perk,
            "Location" => Self::Location,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Weapon
            | Self::HeadPiece
            | Self::TorsoPiece
            | Self::Aid
            | Self::Ammo
            | Self::Misc => Category::Item,
            Self::Player
            | Self::Human
            | Self::Robot
            | Self::Ghoul
            | Self::Feral
            | Self::SuperMutant
            | Self::Nightkin
            | Self::Dog
            | Self::NightStalker
            | Self::BloatFly
            | Self::DeathClaw => Category::Entity,
            Self::Perk => Category::Perk,
            Self::Location => Category::Location,
        }
    }

    /// `true` for descendants of a category, `false` for types that are the category itself.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        !matches!(self, Self::Perk | Self::Location)
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of friendly-name resolution: a whole category or one concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Category(Category),
    Concrete(ConcreteType),
}

impl ResolvedType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category(category) => category.name(),
            Self::Concrete(concrete) => concrete.tag(),
        }
    }

    /// The concrete type an object of this resolution can be built as.
    #[must_use]
    pub const fn constructible(self) -> Option<ConcreteType> {
        match self {
            Self::Concrete(concrete) => Some(concrete),
            Self::Category(Category::Perk) => Some(ConcreteType::Perk),
            Self::Category(Category::Location) => Some(ConcreteType::Location),
            Self::Category(_) => None,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a document's root tag to its concrete type.
///
/// # Errors
///
/// Returns [`PersistError::UnknownType`] if the tag is not in the registry.
pub fn resolve_concrete_type(tag: &str) -> Result<ConcreteType, PersistError> {
    ConcreteType::from_tag(tag).ok_or_else(|| PersistError::UnknownType {
        tag: tag.to_string(),
    })
}

/// The non-abstract descendants of `category`, in registry order.
pub fn enumerate_leaves(category: Category) -> impl Iterator<Item = ConcreteType> {
    ConcreteType::ALL
        .into_iter()
        .filter(move |concrete| concrete.is_leaf() && concrete.category() == category)
}

/// Resolve a user-supplied type name, case-insensitively.
///
/// Categories are scanned in [`Category::ALL`] order; within each category
/// the category name wins over its leaves.
///
/// # Errors
///
/// Returns [`PersistError::TypeNotFound`] when nothing matches.
pub fn resolve_by_friendly_name(name: &str) -> Result<ResolvedType, PersistError> {
    let wanted = name.trim();
    for category in Category::ALL {
        let leaves: Vec<ConcreteType> = enumerate_leaves(category).collect();
        if category.name().eq_ignore_ascii_case(wanted) {
            log_leaves(category, &leaves);
            return Ok(ResolvedType::Category(category));
        }
        if let Some(&leaf) = leaves
            .iter()
            .find(|leaf| leaf.tag().eq_ignore_ascii_case(wanted))
        {
            log_leaves(category, &leaves);
            return Ok(ResolvedType::Concrete(leaf));
        }
    }
    Err(PersistError::TypeNotFound {
        name: name.to_string(),
    })
}

fn log_leaves(category: Category, leaves: &[ConcreteType]) {
    if leaves.is_empty() {
        log::debug!("no non-abstract subtypes found for '{category}'");
    } else {
        let names: Vec<&str> = leaves.iter().map(|leaf| leaf.tag()).collect();
        log::debug!("subtypes of {category}: {}", names.join(", "));
    }
}
