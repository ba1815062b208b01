//! The DATA/Map grid: player movement and location discovery.
use std::fmt::Write as _;
use std::path::Path;

use crate::codec::{decode, document_paths};
use crate::constants::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use crate::entities::Player;
use crate::error::PersistError;
use crate::world::{Coordinate, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Parse a single-letter or full direction name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "up" => Some(Self::North),
            "s" | "south" | "down" => Some(Self::South),
            "w" | "west" | "left" => Some(Self::West),
            "e" | "east" | "right" => Some(Self::East),
            _ => None,
        }
    }
}

/// A `height` x `width` grid; row 0 is the northern edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    height: u16,
    width: u16,
    locations: Vec<Location>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH)
    }
}

impl Map {
    /// Zero dimensions are raised to one cell.
    #[must_use]
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            height: height.max(1),
            width: width.max(1),
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Load every location document in `directory`; a missing directory adds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the directory cannot be listed.
    pub fn load_locations(&mut self, directory: &Path) -> Result<usize, PersistError> {
        let paths = match document_paths(directory) {
            Ok(paths) => paths,
            Err(PersistError::DirectoryNotFound { .. }) => return Ok(0),
            Err(err) => return Err(err),
        };
        let before = self.locations.len();
        for path in paths {
            match decode::<Location>(&path) {
                Ok(location) => self.add_location(location),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        Ok(self.locations.len() - before)
    }

    /// Add a location, pulling its position onto the grid.
    pub fn add_location(&mut self, mut location: Location) {
        location.position = self.clamp(location.position);
        self.locations.push(location);
    }

    #[must_use]
    pub fn location_at(&self, position: Coordinate) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.position == position)
    }

    #[must_use]
    pub fn clamp(&self, position: Coordinate) -> Coordinate {
        Coordinate::new(
            position.x.min(self.width - 1),
            position.y.min(self.height - 1),
        )
    }

    /// Step `player` one cell, staying on the grid.
    ///
    /// Returns the location the player discovered by arriving, if any.
    pub fn move_player(&mut self, player: &mut Player, direction: Direction) -> Option<&Location> {
        let Coordinate { x, y } = self.clamp(player.position);
        let next = match direction {
            Direction::North => Coordinate::new(x, y.saturating_sub(1)),
            Direction::South => Coordinate::new(x, y.saturating_add(1)),
            Direction::West => Coordinate::new(x.saturating_sub(1), y),
            Direction::East => Coordinate::new(x.saturating_add(1), y),
        };
        self.place_player(player, next)
    }

    /// Put `player` at `position` (clamped) and discover whatever is there.
    pub fn place_player(&mut self, player: &mut Player, position: Coordinate) -> Option<&Location> {
        player.position = self.clamp(position);
        let location = self
            .locations
            .iter_mut()
            .find(|location| location.position == player.position && !location.discovered)?;
        location.discovered = true;
        log::debug!("discovered {} at {}", location.name, location.position);
        Some(location)
    }

    /// Text rendering: `@` for the player, `X` for discovered locations, `.` elsewhere.
    #[must_use]
    pub fn render(&self, player: Coordinate) -> String {
        let capacity = usize::from(self.height) * (usize::from(self.width) + 1);
        let mut out = String::with_capacity(capacity);
        for y in 0..self.height {
            for x in 0..self.width {
                let here = Coordinate::new(x, y);
                let cell = if here == player {
                    '@'
                } else if self
                    .location_at(here)
                    .is_some_and(|location| location.discovered)
                {
                    'X'
                } else {
                    '.'
                };
                out.push(cell);
            }
            out.push('\n');
        }
        for location in self.locations.iter().filter(|location| location.discovered) {
            let _ = writeln!(out, "X {} {}", location.position, location.name);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::LocationKind;

    fn goodsprings() -> Location {
        Location::new(
            "Goodsprings",
            "A small town",
            LocationKind::Settlement,
            Coordinate::new(1, 0),
        )
    }

    #[test]
    fn movement_clamps_to_the_grid() {
        let mut map = Map::new(3, 3);
        let mut player = Player::default();
        map.move_player(&mut player, Direction::North);
        map.move_player(&mut player, Direction::West);
        assert_eq!(player.position, Coordinate::new(0, 0));
        for _ in 0..5 {
            map.move_player(&mut player, Direction::South);
            map.move_player(&mut player, Direction::East);
        }
        assert_eq!(player.position, Coordinate::new(2, 2));
    }

    #[test]
    fn standing_on_a_location_discovers_it_once() {
        let mut map = Map::new(3, 3);
        map.add_location(goodsprings());
        let mut player = Player::default();
        let found = map.move_player(&mut player, Direction::East);
        assert_eq!(found.map(|l| l.name.as_str()), Some("Goodsprings"));
        map.move_player(&mut player, Direction::West);
        assert!(map.move_player(&mut player, Direction::East).is_none());
        assert!(map.locations()[0].discovered);
    }

    #[test]
    fn off_grid_locations_are_clamped() {
        let mut map = Map::new(2, 2);
        let mut far = goodsprings();
        far.position = Coordinate::new(40, 40);
        map.add_location(far);
        assert_eq!(map.locations()[0].position, Coordinate::new(1, 1));
    }

    #[test]
    fn render_marks_player_and_discoveries() {
        let mut map = Map::new(2, 3);
        map.add_location(goodsprings());
        let mut player = Player::default();
        map.place_player(&mut player, Coordinate::new(1, 0));
        map.place_player(&mut player, Coordinate::new(0, 1));
        let rendered = map.render(player.position);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some(".X."));
        assert_eq!(lines.next(), Some("@.."));
        assert_eq!(lines.next(), Some("X (1, 0) Goodsprings"));
    }

    #[test]
    fn locations_load_from_documents() {
        let dir = tempfile::tempdir().unwrap();
        crate::codec::encode(dir.path(), &goodsprings()).unwrap();
        let mut map = Map::default();
        assert_eq!(map.load_locations(dir.path()).unwrap(), 1);
        assert_eq!(map.locations()[0].name, "Goodsprings");
        assert_eq!(map.load_locations(&dir.path().join("missing")).unwrap(), 0);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(Direction::parse("N"), Some(Direction::North));
        assert_eq!(Direction::parse(" east "), Some(Direction::East));
        assert_eq!(Direction::parse("up"), Some(Direction::North));
        assert_eq!(Direction::parse("sideways"), None);
    }
}
