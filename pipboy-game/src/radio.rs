//! DATA/Radio: a song list with a selection cursor. Playback is not handled here.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::pipboy::{file_title, sorted_files};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Radio {
    songs: Vec<PathBuf>,
    selected: usize,
}

impl Radio {
    #[must_use]
    pub fn new(mut songs: Vec<PathBuf>) -> Self {
        songs.sort();
        Self { songs, selected: 0 }
    }

    /// Collect every file in `directory`; a missing directory gives an empty radio.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the directory exists but cannot be listed.
    pub fn load(directory: &Path) -> Result<Self, SessionError> {
        let songs = sorted_files(directory)?;
        log::debug!("{} songs at {}", songs.len(), directory.display());
        Ok(Self::new(songs))
    }

    #[must_use]
    pub fn songs(&self) -> &[PathBuf] {
        &self.songs
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Path> {
        self.songs.get(self.selected).map(PathBuf::as_path)
    }

    /// Move the cursor one song forward or back, clamped to the list.
    pub fn change_song(&mut self, forward: bool) {
        if forward {
            if self.selected + 1 < self.songs.len() {
                self.selected += 1;
            }
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn add_song(&mut self, path: impl Into<PathBuf>) {
        self.songs.push(path.into());
    }
}

impl fmt::Display for Radio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.songs.is_empty() {
            return writeln!(f, "No stations found");
        }
        for (index, song) in self.songs.iter().enumerate() {
            let marker = if index == self.selected { '>' } else { ' ' };
            writeln!(f, "{marker} {}", file_title(song))?;
        }
        Ok(())
    }
}
