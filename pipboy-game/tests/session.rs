use std::fs;
use std::path::Path;

use pipboy_game::{
    Aid, AidType, ConcreteType, Coordinate, DataPage, Direction, DomainObject, Entity, Human,
    Item, Location, LocationKind, NoteKind, Perk, PipBoy, PipBoyConfig, Player, SessionError,
    Special, decode, encode, peek_type,
};

fn seed_directory(root: &Path) {
    for sub in ["Inventory", "Perks", "Map Locations", "Factions", "Songs", "Data"] {
        fs::create_dir(root.join(sub)).unwrap();
    }
    let mut player = Player::new("Courier", Special::uniform(6));
    player.position = Coordinate::new(2, 2);
    encode(root, &player).unwrap();
    encode(
        &root.join("Inventory"),
        &Aid::new("Stimpack", 0.5, 75, vec![], AidType::Syringe),
    )
    .unwrap();
    encode(&root.join("Perks"), &Perk::new("Toughness", "", 2, vec![])).unwrap();
    encode(
        &root.join("Map Locations"),
        &Location::new("Goodsprings", "", LocationKind::Settlement, Coordinate::new(2, 3)),
    )
    .unwrap();
    fs::write(root.join("Factions").join("NCR.txt"), "New California Republic").unwrap();
    fs::write(root.join("Songs").join("Blue Moon.wav"), b"").unwrap();
    fs::write(root.join("Data").join("Holotape.wav"), b"").unwrap();
    fs::write(root.join("Data").join("Note.txt"), "Remember the Platinum Chip").unwrap();
}

#[test]
fn open_loads_every_part_of_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    seed_directory(dir.path());
    let session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();

    assert_eq!(session.player.name, "Courier");
    assert_eq!(session.inventory.len(), 1);
    assert_eq!(session.perks[0].name, "Toughness");
    assert_eq!(session.map.locations().len(), 1);
    assert_eq!(session.factions[0].name, "NCR");
    assert_eq!(session.radio.songs().len(), 1);
    assert_eq!(session.notes.len(), 2);
    assert_eq!(session.notes[0].kind, NoteKind::Recording);
    assert_eq!(session.notes[1].text.as_deref(), Some("Remember the Platinum Chip"));
}

#[test]
fn missing_player_falls_back_to_a_fresh_one() {
    let dir = tempfile::tempdir().unwrap();
    let session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    assert_eq!(session.player, Player::default());
    assert!(session.inventory.is_empty());
    assert!(session.factions.is_empty());
}

#[test]
fn a_non_player_root_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    encode(
        dir.path(),
        &Aid::new("Stimpack", 0.5, 75, vec![], AidType::Syringe),
    )
    .unwrap();
    let err = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap_err();
    assert!(matches!(err, SessionError::Persist(_)));
}

#[test]
fn walking_onto_a_location_discovers_it() {
    let dir = tempfile::tempdir().unwrap();
    seed_directory(dir.path());
    let mut session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    session.navigation.data_page = DataPage::Map;
    assert_eq!(session.move_player(Direction::South).as_deref(), Some("Goodsprings"));
    assert!(session.map.locations()[0].discovered);
    assert_eq!(session.move_player(Direction::North), None);
}

#[test]
fn configured_map_size_bounds_movement() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipBoyConfig {
        map_height: 2,
        map_width: 2,
        ..PipBoyConfig::default()
    };
    let mut session = PipBoy::open(dir.path(), config).unwrap();
    for _ in 0..5 {
        session.move_player(Direction::East);
        session.move_player(Direction::South);
    }
    assert_eq!(session.player.position, Coordinate::new(1, 1));
}

#[test]
fn shutdown_writes_perks_inventory_and_player() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    session.player.name = "Lone Wanderer".into();
    session
        .inventory
        .add(Aid::new("Rad-X", 0.1, 40, vec![], AidType::Pill));
    session.perks.push(Perk::new("Lady Killer", "", 1, vec![]));
    session.shutdown().unwrap();

    let player_path = dir.path().join("Lone Wanderer.xml");
    assert_eq!(peek_type(&player_path).unwrap(), ConcreteType::Player);
    let saved: Player = decode(&player_path).unwrap();
    assert_eq!(saved.name, "Lone Wanderer");
    assert!(dir.path().join("Inventory").join("Rad-X.xml").is_file());
    assert!(dir.path().join("Perks").join("Lady Killer.xml").is_file());

    let reopened = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    assert_eq!(reopened.player.name, "Lone Wanderer");
    assert_eq!(reopened.inventory.len(), 1);
}

#[test]
fn stored_objects_land_in_their_category_directory() {
    let dir = tempfile::tempdir().unwrap();
    let session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();

    let item: DomainObject = Item::Aid(Aid::new("Med-X", 0.1, 60, vec![], AidType::Syringe)).into();
    assert_eq!(
        session.store(&item).unwrap(),
        dir.path().join("Inventory").join("Med-X.xml")
    );

    let npc: DomainObject = Entity::Human(Human {
        name: "Benny".into(),
        ..Human::default()
    })
    .into();
    assert_eq!(
        session.store(&npc).unwrap(),
        dir.path().join("Entities").join("Benny.xml")
    );

    let documents = pipboy_game::document_paths(dir.path()).unwrap();
    assert!(documents.is_empty());
}

#[test]
fn stylesheet_from_config_is_used_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipBoyConfig {
        stylesheet_href: "pipboy.css".into(),
        ..PipBoyConfig::default()
    };
    let session = PipBoy::open(dir.path(), config).unwrap();
    session.shutdown().unwrap();
    let text = fs::read_to_string(dir.path().join("Player.xml")).unwrap();
    assert!(text.contains(r#"href="pipboy.css""#));
}

#[test]
fn renamed_player_replaces_its_old_document() {
    let dir = tempfile::tempdir().unwrap();
    seed_directory(dir.path());
    let mut session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    assert_eq!(session.player_path(), Some(dir.path().join("Courier.xml").as_path()));

    session.player.name = "Six".into();
    session.shutdown().unwrap();
    assert!(!dir.path().join("Courier.xml").exists());
    assert!(dir.path().join("Six.xml").is_file());

    let reopened = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    assert_eq!(reopened.player.name, "Six");
    assert_eq!(reopened.player.position, Coordinate::new(2, 2));
}

#[test]
fn escaping_names_are_refused_and_the_session_still_opens() {
    let dir = tempfile::tempdir().unwrap();
    seed_directory(dir.path());
    let session = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();

    let item: DomainObject = Item::Aid(Aid::new("../X", 0.1, 1, vec![], AidType::Food)).into();
    assert!(matches!(
        session.store(&item),
        Err(pipboy_game::PersistError::InvalidStorageKey { .. })
    ));
    assert!(!dir.path().join("X.xml").exists());

    let reopened = PipBoy::open(dir.path(), PipBoyConfig::default()).unwrap();
    assert_eq!(reopened.player.name, "Courier");
}
