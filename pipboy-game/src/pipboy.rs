//! A PIP-Boy session over one working directory.
//!
//! Opening a session reads the player document, the inventory, perks, map
//! locations, faction descriptions, songs and data notes from the fixed
//! directory layout; [`PipBoy::shutdown`] writes the mutable parts back.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec::{DocumentCodec, decode, document_paths};
use crate::config::PipBoyConfig;
use crate::constants::{
    DATA_DIR, ENTITIES_DIR, FACTION_EXTENSION, FACTIONS_DIR, INVENTORY_DIR, MAP_LOCATIONS_DIR,
    PERKS_DIR, SONGS_DIR,
};
use crate::entities::Player;
use crate::error::{PersistError, SessionError};
use crate::inventory::Inventory;
use crate::map::{Direction, Map};
use crate::navigation::Navigation;
use crate::radio::Radio;
use crate::record::{DomainObject, Record};
use crate::registry::{Category, ConcreteType};
use crate::world::{Faction, Perk, Quest};

/// Active and finished quests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestLog {
    active: Vec<Quest>,
    finished: Vec<Quest>,
}

impl QuestLog {
    #[must_use]
    pub fn active(&self) -> &[Quest] {
        &self.active
    }

    #[must_use]
    pub fn finished(&self) -> &[Quest] {
        &self.finished
    }

    /// Add a quest; one that is already complete goes straight to the finished list.
    pub fn add(&mut self, quest: Quest) {
        if quest.completed {
            self.finished.push(quest);
        } else {
            self.active.push(quest);
        }
    }

    /// Advance the active quest called `name`, moving it once its last step is done.
    ///
    /// Returns `false` if no active quest has that name.
    pub fn advance(&mut self, name: &str) -> bool {
        let Some(index) = self.active.iter().position(|quest| quest.name == name) else {
            return false;
        };
        self.active[index].advance();
        if self.active[index].completed {
            let quest = self.active.remove(index);
            log::debug!("quest completed: {}", quest.name);
            self.finished.push(quest);
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Text,
    Recording,
    Other,
}

impl NoteKind {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("txt") => Self::Text,
            Some("wav") => Self::Recording,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Text => "📄",
            Self::Recording => "🔊",
            Self::Other => "?",
        }
    }
}

/// An entry of the DATA/Misc page. Only text notes carry their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataNote {
    pub title: String,
    pub kind: NoteKind,
    pub text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PipBoy {
    directory: PathBuf,
    config: PipBoyConfig,
    codec: DocumentCodec,
    player_path: Option<PathBuf>,
    pub player: Player,
    pub inventory: Inventory,
    pub perks: Vec<Perk>,
    pub map: Map,
    pub radio: Radio,
    pub quests: QuestLog,
    pub factions: Vec<Faction>,
    faction_index: usize,
    pub notes: Vec<DataNote>,
    pub navigation: Navigation,
}

impl PipBoy {
    /// Open the session stored in `directory`.
    ///
    /// The first document in the directory, by file name, is the player.
    /// Without one a default player is created. Sub-directories that do not
    /// exist are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WorkingDirectory`] if `directory` does not
    /// exist, [`SessionError::Persist`] if the player document cannot be
    /// decoded, or [`SessionError::Io`] if a sub-directory cannot be read.
    pub fn open(directory: impl Into<PathBuf>, config: PipBoyConfig) -> Result<Self, SessionError> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(SessionError::WorkingDirectory { path: directory });
        }
        let codec = DocumentCodec::new(config.stylesheet_href.clone());

        let player_path = document_paths(&directory)?.into_iter().next();
        let mut player = match &player_path {
            Some(path) => {
                log::info!("loading player from {}", path.display());
                decode::<Player>(path)?
            }
            None => {
                log::info!(
                    "no player document in {}; starting fresh",
                    directory.display()
                );
                Player::default()
            }
        };

        let inventory = Inventory::load(directory.join(INVENTORY_DIR))?;
        let perks = load_perks(&directory.join(PERKS_DIR))?;
        let mut map = Map::new(config.map_height, config.map_width);
        map.load_locations(&directory.join(MAP_LOCATIONS_DIR))?;
        let start = player.position;
        map.place_player(&mut player, start);

        let session = Self {
            inventory,
            perks,
            map,
            radio: Radio::load(&directory.join(SONGS_DIR))?,
            quests: QuestLog::default(),
            factions: load_factions(&directory.join(FACTIONS_DIR))?,
            faction_index: 0,
            notes: load_notes(&directory.join(DATA_DIR))?,
            navigation: Navigation::default(),
            player,
            player_path,
            codec,
            config,
            directory,
        };
        log::debug!(
            "session open: {} items, {} perks, {} factions",
            session.inventory.len(),
            session.perks.len(),
            session.factions.len()
        );
        Ok(session)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub const fn config(&self) -> &PipBoyConfig {
        &self.config
    }

    #[must_use]
    pub const fn codec(&self) -> &DocumentCodec {
        &self.codec
    }

    #[must_use]
    pub const fn faction_index(&self) -> usize {
        self.faction_index
    }

    #[must_use]
    pub fn selected_faction(&self) -> Option<&Faction> {
        self.factions.get(self.faction_index)
    }

    /// Move the faction selection, clamped to the faction list.
    pub fn change_faction(&mut self, down: bool) {
        if down {
            if self.faction_index + 1 < self.factions.len() {
                self.faction_index += 1;
            }
        } else {
            self.faction_index = self.faction_index.saturating_sub(1);
        }
    }

    /// Step the player on the map; returns the name of a newly discovered location.
    pub fn move_player(&mut self, direction: Direction) -> Option<String> {
        self.map
            .move_player(&mut self.player, direction)
            .map(|location| location.name.clone())
    }

    /// Directory a new object of this kind is stored in.
    #[must_use]
    pub fn directory_for(&self, object: &DomainObject) -> PathBuf {
        match object.kind() {
            ConcreteType::Player => self.directory.clone(),
            concrete => match concrete.category() {
                Category::Item => self.directory.join(INVENTORY_DIR),
                Category::Perk => self.directory.join(PERKS_DIR),
                Category::Location => self.directory.join(MAP_LOCATIONS_DIR),
                _ => self.directory.join(ENTITIES_DIR),
            },
        }
    }

    /// Write `object` into its directory, creating the directory if needed.
    ///
    /// A [`Player`] lands in the working directory next to the session's own
    /// player document. [`PipBoy::open`] only reads the first root document
    /// by file name, so a stored player may replace or shadow the current one.
    ///
    /// # Errors
    ///
    /// Any [`PersistError`] raised by the codec.
    pub fn store(&self, object: &DomainObject) -> Result<PathBuf, PersistError> {
        let directory = self.directory_for(object);
        fs::create_dir_all(&directory).map_err(|source| PersistError::io(&directory, source))?;
        self.codec.encode(&directory, object)
    }

    /// Document the player was loaded from, if any.
    #[must_use]
    pub fn player_path(&self) -> Option<&Path> {
        self.player_path.as_deref()
    }

    /// Write the perks, the inventory and the player back to disk.
    ///
    /// The player is written under its current name. When that differs from
    /// the document it was loaded from, the old document is removed so the
    /// next [`PipBoy::open`] finds the renamed player.
    ///
    /// # Errors
    ///
    /// Returns the first [`SessionError`] raised while writing.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        let perks = self.directory.join(PERKS_DIR);
        save_all(&self.codec, &perks, &self.perks)?;
        self.inventory.save(&self.codec)?;
        let path = self.codec.encode(&self.directory, &self.player)?;
        log::info!("saved player to {}", path.display());

        let stale = self
            .player_path
            .as_deref()
            .filter(|previous| *previous != path.as_path());
        if let Some(previous) = stale {
            match fs::remove_file(previous) {
                Ok(()) => log::info!("removed stale player document {}", previous.display()),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(SessionError::io(previous, source)),
            }
        }
        Ok(())
    }
}

fn save_all<R: Record>(
    codec: &DocumentCodec,
    directory: &Path,
    objects: &[R],
) -> Result<(), SessionError> {
    fs::create_dir_all(directory).map_err(|source| SessionError::io(directory, source))?;
    for object in objects {
        codec.encode(directory, object)?;
    }
    Ok(())
}

fn load_perks(directory: &Path) -> Result<Vec<Perk>, SessionError> {
    let paths = match document_paths(directory) {
        Ok(paths) => paths,
        Err(PersistError::DirectoryNotFound { .. }) => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let mut perks = Vec::with_capacity(paths.len());
    for path in paths {
        match decode::<Perk>(&path) {
            Ok(perk) => perks.push(perk),
            Err(err) => log::warn!("skipping {}: {err}", path.display()),
        }
    }
    Ok(perks)
}

/// Files in `directory`, sorted; empty when the directory is missing.
pub(crate) fn sorted_files(directory: &Path) -> Result<Vec<PathBuf>, SessionError> {
    if !directory.is_dir() {
        log::debug!("{} not found", directory.display());
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(directory).map_err(|source| SessionError::io(directory, source))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| SessionError::io(directory, source))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn file_title(path: &Path) -> String {
    path.file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

fn load_factions(directory: &Path) -> Result<Vec<Faction>, SessionError> {
    let mut factions = Vec::new();
    for path in sorted_files(directory)? {
        if path.extension().is_none_or(|extension| extension != FACTION_EXTENSION) {
            log::warn!("skipping {}: not a faction description", path.display());
            continue;
        }
        let description =
            fs::read_to_string(&path).map_err(|source| SessionError::io(&path, source))?;
        factions.push(Faction::new(file_title(&path), description.trim_end()));
    }
    Ok(factions)
}

fn load_notes(directory: &Path) -> Result<Vec<DataNote>, SessionError> {
    let mut notes = Vec::new();
    for path in sorted_files(directory)? {
        let kind = NoteKind::from_path(&path);
        let text = match kind {
            NoteKind::Text => Some(
                fs::read_to_string(&path).map_err(|source| SessionError::io(&path, source))?,
            ),
            NoteKind::Recording | NoteKind::Other => None,
        };
        notes.push(DataNote {
            title: file_title(&path),
            kind,
            text,
        });
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quest_log_moves_finished_quests() {
        let mut log = QuestLog::default();
        log.add(Quest::new("Volare!", "", ["Find the flight recorder"]));
        assert!(log.advance("Volare!"));
        assert!(log.active().is_empty());
        assert_eq!(log.finished()[0].name, "Volare!");
        assert!(!log.advance("Volare!"));
    }

    #[test]
    fn completed_quests_are_added_as_finished() {
        let mut quest = Quest::new("Back in Your Own Backyard", "", ["Kill Tabitha"]);
        quest.advance();
        let mut log = QuestLog::default();
        log.add(quest);
        assert_eq!(log.finished().len(), 1);
    }

    #[test]
    fn note_kinds_follow_the_extension() {
        assert_eq!(NoteKind::from_path(Path::new("Data/log.txt")), NoteKind::Text);
        assert_eq!(NoteKind::from_path(Path::new("Data/tape.wav")), NoteKind::Recording);
        assert_eq!(NoteKind::from_path(Path::new("Data/blob")).icon(), "?");
    }

    #[test]
    fn missing_working_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipBoy::open(dir.path().join("nowhere"), PipBoyConfig::default()).unwrap_err();
        assert!(matches!(err, SessionError::WorkingDirectory { .. }));
    }

    #[test]
    fn faction_selection_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let factions = dir.path().join(FACTIONS_DIR);
        fs::create_dir(&factions).unwrap();
        fs::write(factions.join("NCR.txt"), "New California Republic\n").unwrap();
        fs::write(factions.join("Legion.txt"), "Caesar's Legion").unwrap();
        fs::write(factions.join("readme.md"), "ignored").unwrap();

        let mut session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
        assert_eq!(session.factions.len(), 2);
        assert_eq!(session.selected_faction().map(|f| f.name.as_str()), Some("Legion"));
        session.change_faction(false);
        assert_eq!(session.faction_index(), 0);
        session.change_faction(true);
        session.change_faction(true);
        assert_eq!(session.faction_index(), 1);
        assert_eq!(
            session.selected_faction().map(|f| f.description.as_str()),
            Some("New California Republic")
        );
    }
}
