//! Fixed names and tuning values shared by the persistence layer and the session.
//!
//! Directory names describe the on-disk layout of a PIP-Boy working directory;
//! they are consumed by the session, the codec itself never assumes them.

// Document format -----------------------------------------------------------
pub const DOCUMENT_EXTENSION: &str = "xml";
pub const XML_VERSION: &str = "1.0";
pub const XML_ENCODING: &str = "utf-8";
pub const STYLESHEET_TARGET: &str = "xml-stylesheet";
pub const DEFAULT_STYLESHEET_HREF: &str = "../Inventory Styling.css";
pub const INDENT_CHAR: char = '\t';
pub const INDENT_SIZE: usize = 1;

// Working directory layout --------------------------------------------------
pub const INVENTORY_DIR: &str = "Inventory";
pub const PERKS_DIR: &str = "Perks";
pub const FACTIONS_DIR: &str = "Factions";
pub const SONGS_DIR: &str = "Songs";
pub const MAP_LOCATIONS_DIR: &str = "Map Locations";
pub const DATA_DIR: &str = "Data";
pub const ENTITIES_DIR: &str = "Entities";
pub const FACTION_EXTENSION: &str = "txt";
pub const CONFIG_FILE: &str = "pipboy.json";

// Player tuning -------------------------------------------------------------
pub const SPECIAL_MIN: u8 = 1;
pub const SPECIAL_MAX: u8 = 10;
pub const SPECIAL_DEFAULT: u8 = 5;
pub const SKILL_MAX: u8 = 100;
pub const LIMB_MAX: u8 = 100;
pub const BASE_CARRY_WEIGHT: f32 = 150.0;
pub const CARRY_WEIGHT_PER_STRENGTH: f32 = 10.0;
pub const BASE_HEALTH: f32 = 90.0;
pub const HEALTH_PER_ENDURANCE: f32 = 20.0;
pub const BASE_ACTION_POINTS: f32 = 65.0;
pub const ACTION_POINTS_PER_AGILITY: f32 = 2.0;
pub const RADS_PER_SICKNESS_LEVEL: u16 = 200;

// Map -----------------------------------------------------------------------
pub const DEFAULT_MAP_HEIGHT: u16 = 25;
pub const DEFAULT_MAP_WIDTH: u16 = 50;
