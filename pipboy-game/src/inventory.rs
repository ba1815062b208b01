//! The player's carried items, grouped into PIP-Boy pages.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{DocumentCodec, decode_any, document_paths};
use crate::entities::Player;
use crate::error::PersistError;
use crate::items::Item;
use crate::navigation::Tab;
use crate::record::DomainObject;

/// ITEMS sub-pages, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ItemsPage {
    #[default]
    Weapons,
    Apparel,
    Aid,
    Ammo,
    Misc,
}

impl ItemsPage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapons => "Weapons",
            Self::Apparel => "Apparel",
            Self::Aid => "Aid",
            Self::Ammo => "Ammo",
            Self::Misc => "Misc",
        }
    }

    /// Page an item is listed on.
    #[must_use]
    pub const fn of(item: &Item) -> Self {
        match item {
            Item::Weapon(_) => Self::Weapons,
            Item::HeadPiece(_) | Item::TorsoPiece(_) => Self::Apparel,
            Item::Aid(_) => Self::Aid,
            Item::Ammo(_) => Self::Ammo,
            Item::Misc(_) => Self::Misc,
        }
    }
}

impl fmt::Display for ItemsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Items carried by the player, backed by one document per item in `directory`.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    directory: PathBuf,
    items: Vec<Item>,
    pub page: ItemsPage,
}

impl Inventory {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            items: Vec::new(),
            page: ItemsPage::default(),
        }
    }

    /// Load every item document in `directory`.
    ///
    /// A missing directory yields an empty inventory. Documents that fail to
    /// decode or hold something other than an item are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the directory cannot be listed.
    pub fn load(directory: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let mut inventory = Self::new(directory);
        let paths = match document_paths(&inventory.directory) {
            Ok(paths) => paths,
            Err(PersistError::DirectoryNotFound { path }) => {
                log::debug!("no inventory at {}", path.display());
                return Ok(inventory);
            }
            Err(err) => return Err(err),
        };
        for path in paths {
            match decode_any(&path).map(DomainObject::into_item) {
                Ok(Some(item)) => inventory.items.push(item),
                Ok(None) => log::warn!("skipping {}: not an item", path.display()),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        log::debug!(
            "loaded {} items from {}",
            inventory.items.len(),
            inventory.directory.display()
        );
        Ok(inventory)
    }

    /// Write every item into the inventory directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns the first [`PersistError`] raised while writing.
    pub fn save(&self, codec: &DocumentCodec) -> Result<Vec<PathBuf>, PersistError> {
        fs::create_dir_all(&self.directory)
            .map_err(|source| PersistError::io(&self.directory, source))?;
        self.items
            .iter()
            .map(|item| codec.encode(&self.directory, item))
            .collect()
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    /// Remove the first item called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.name() == name)?;
        Some(self.items.remove(index))
    }

    pub fn page_items(&self, page: ItemsPage) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| ItemsPage::of(item) == page)
    }

    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.items.iter().map(Item::weight).sum()
    }

    #[must_use]
    pub fn is_over_encumbered(&self, player: &Player) -> bool {
        self.total_weight() > player.carry_capacity()
    }

    /// Move one page left or right, clamped at the ends.
    pub fn change_page(&mut self, right: bool) {
        self.page = self.page.step(right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Special;
    use crate::items::{
        Aid, AidType, Ammo, AmmoModification, AmmoType, HeadPiece, Weapon, WeaponType,
    };

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new("Inventory");
        inventory.add(Weapon::new(
            "Service Rifle",
            9.0,
            100,
            vec![],
            WeaponType::Gun,
            5,
            60,
            24,
            22,
        ));
        inventory.add(HeadPiece::new("Ranger Helmet", 4.0, 150, vec![], 8, false));
        inventory.add(Aid::new("Stimpack", 0.5, 75, vec![], AidType::Syringe));
        inventory.add(Ammo::new(
            "5.56mm Round",
            1,
            vec![],
            AmmoType::Bullet,
            AmmoModification::Standard,
        ));
        inventory
    }

    #[test]
    fn items_are_grouped_into_pages() {
        let inventory = stocked();
        let apparel: Vec<&str> = inventory
            .page_items(ItemsPage::Apparel)
            .map(Item::name)
            .collect();
        assert_eq!(apparel, ["Ranger Helmet"]);
        assert_eq!(inventory.page_items(ItemsPage::Misc).count(), 0);
    }

    #[test]
    fn ammo_has_no_weight() {
        let inventory = stocked();
        assert!((inventory.total_weight() - 13.5).abs() < f32::EPSILON);
    }

    #[test]
    fn encumbrance_follows_strength() {
        let mut inventory = stocked();
        let weak = Player::new("Courier", Special::uniform(1));
        assert!(!inventory.is_over_encumbered(&weak));
        inventory.add(crate::items::Misc::new(
            "Anvil",
            150.0,
            5,
            crate::items::MiscType::Junk,
        ));
        assert!(inventory.is_over_encumbered(&weak));
        let strong = Player::new("Courier", Special::uniform(10));
        assert!(!inventory.is_over_encumbered(&strong));
    }

    #[test]
    fn remove_takes_the_named_item() {
        let mut inventory = stocked();
        let removed = inventory.remove("Stimpack").unwrap();
        assert_eq!(removed.name(), "Stimpack");
        assert_eq!(inventory.len(), 3);
        assert!(inventory.remove("Stimpack").is_none());
    }

    #[test]
    fn page_changes_clamp_at_the_ends() {
        let mut inventory = Inventory::new("Inventory");
        inventory.change_page(false);
        assert_eq!(inventory.page, ItemsPage::Weapons);
        for _ in 0..10 {
            inventory.change_page(true);
        }
        assert_eq!(inventory.page, ItemsPage::Misc);
    }

    #[test]
    fn save_then_load_restores_items() {
        let dir = tempfile::tempdir().unwrap();
        let directory = dir.path().join("Inventory");
        let mut inventory = stocked();
        inventory.directory = directory.clone();

        let written = inventory.save(&DocumentCodec::default()).unwrap();
        assert_eq!(written.len(), 4);

        let loaded = Inventory::load(&directory).unwrap();
        let mut names: Vec<&str> = loaded.items().iter().map(Item::name).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            ["5.56mm Round", "Ranger Helmet", "Service Rifle", "Stimpack"]
        );
    }

    #[test]
    fn missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = Inventory::load(dir.path().join("Inventory")).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn broken_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Broken.xml"), "<Mystery/>").unwrap();
        let inventory = Inventory::load(dir.path()).unwrap();
        assert!(inventory.is_empty());
    }
}
