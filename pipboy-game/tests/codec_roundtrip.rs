use std::fs;
use std::path::Path;

use pipboy_game::{
    Aid, AidType, Ammo, AmmoModification, AmmoType, AttributeName, BloatFly, CombatStats,
    ConcreteType, Coordinate, DeathClaw, Dog, DomainObject, Effect, EffectType, Entity, Faction,
    Feral, Ghoul, HeadPiece, Human, Item, Location, LocationKind, Misc, MiscType, NightStalker,
    Nightkin, Perk, PersistError, Persist, Player, Quest, Robot, RobotModel, Special,
    SuperMutant, TorsoPiece, Weapon, WeaponType, decode, decode_any, encode, peek_type,
};

fn pistol() -> Weapon {
    Weapon::new(
        "10mm Pistol",
        5.5,
        55,
        vec![],
        WeaponType::Gun,
        3,
        30,
        10,
        100,
    )
}

fn combat(level: u8, health: f32) -> CombatStats {
    let mut combat = CombatStats::new(level, health, 12);
    combat.health.drain(health / 3.0);
    combat.action_points.drain(7.25);
    combat
}

fn effects() -> Vec<Effect> {
    vec![
        Effect::new(EffectType::Strength, 2, 60),
        Effect::permanent(EffectType::RadiationResistance, -15),
    ]
}

fn courier() -> Player {
    let mut player = Player::new(
        "Courier Six",
        Special {
            strength: 6,
            perception: 7,
            endurance: 4,
            charisma: 3,
            intelligence: 9,
            agility: 8,
            luck: 2,
        },
    );
    player.rads = 340;
    player.xp = 1_250;
    player.karma = -42;
    player.caps = 999;
    player.is_female = true;
    player.position = Coordinate::new(12, 7);
    player.limbs.left_leg = 15;
    player.combat.health.drain(33.3);
    player.effects = effects();
    player
}

/// One non-default instance of every registered type.
fn samples() -> Vec<DomainObject> {
    vec![
        Item::Weapon(Weapon {
            effects: effects(),
            ..pistol()
        })
        .into(),
        Item::HeadPiece(HeadPiece::new("Ranger Helmet", 4.0, 150, effects(), 8, false)).into(),
        Item::TorsoPiece(TorsoPiece::new("T-51b Power Armor", 40.0, 4_000, vec![], 40, true))
            .into(),
        Item::Aid(Aid::new("Rad-X", 0.1, 40, effects(), AidType::Pill)).into(),
        Item::Ammo(Ammo::new(
            ".308 Round",
            3,
            vec![],
            AmmoType::Bullet,
            AmmoModification::ArmorPiercing,
        ))
        .into(),
        Item::Misc(Misc::new("Bobby Pin", 0.01, 1, MiscType::Crafting)).into(),
        Entity::Player(courier()).into(),
        Entity::Human(Human {
            name: "Craig Boone".into(),
            combat: combat(12, 250.0),
            effects: effects(),
            is_female: false,
            faction: "NCR".into(),
        })
        .into(),
        Entity::Robot(Robot {
            name: "Victor".into(),
            combat: combat(10, 200.0),
            effects: vec![],
            model: RobotModel::Eyebot,
        })
        .into(),
        Entity::Ghoul(Ghoul {
            name: "Raul".into(),
            combat: combat(9, 180.0),
            effects: vec![],
            rad_regeneration: 0.75,
        })
        .into(),
        Entity::Feral(Feral {
            name: "Glowing One".into(),
            combat: combat(14, 300.0),
            effects: vec![],
            is_glowing: true,
        })
        .into(),
        Entity::SuperMutant(SuperMutant {
            name: "Marcus".into(),
            combat: combat(20, 500.0),
            effects: vec![],
            is_master: true,
        })
        .into(),
        Entity::Nightkin(Nightkin {
            name: "Lily".into(),
            combat: combat(18, 450.0),
            effects: vec![],
            stealth_boys: 3,
        })
        .into(),
        Entity::Dog(Dog {
            name: "Rex".into(),
            combat: combat(8, 160.0),
            effects: vec![],
            is_companion: true,
        })
        .into(),
        Entity::NightStalker(NightStalker {
            name: "Nightstalker Alpha".into(),
            combat: combat(6, 120.0),
            effects: vec![],
            venom_damage: 25,
        })
        .into(),
        Entity::BloatFly(BloatFly {
            name: "Bloatfly".into(),
            combat: combat(1, 15.0),
            effects: vec![],
            swarm_size: 4,
        })
        .into(),
        Entity::DeathClaw(DeathClaw {
            name: "Legendary Deathclaw".into(),
            combat: combat(30, 1_500.0),
            effects: effects(),
            is_alpha: true,
        })
        .into(),
        Perk::new("Toughness", "+3 damage threshold per rank", 2, effects()).into(),
        Location::new(
            "Goodsprings",
            "A small settlement in the Mojave",
            LocationKind::Settlement,
            Coordinate::new(4, 19),
        )
        .into(),
    ]
}

fn roundtrip<T: Persist + PartialEq + std::fmt::Debug>(dir: &Path, value: &T) {
    let path = encode(dir, value).unwrap();
    assert_eq!(peek_type(&path).unwrap(), T::TYPE);
    assert_eq!(&decode::<T>(&path).unwrap(), value);
}

#[test]
fn every_registered_type_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let samples = samples();
    let mut covered: Vec<ConcreteType> = samples.iter().map(DomainObject::kind).collect();
    covered.sort();
    assert_eq!(covered, ConcreteType::ALL.to_vec());

    for sample in &samples {
        let path = encode(dir.path(), sample).unwrap();
        assert_eq!(peek_type(&path).unwrap(), sample.kind(), "{}", path.display());
        assert_eq!(&decode_any(&path).unwrap(), sample, "{}", path.display());
    }
}

#[test]
fn typed_decode_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), &pistol());
    roundtrip(dir.path(), &courier());
    roundtrip(
        dir.path(),
        &Location::new("Primm", "", LocationKind::Ruins, Coordinate::new(0, 0)),
    );
}

#[test]
fn player_skills_and_effects_survive() {
    let dir = tempfile::tempdir().unwrap();
    let player = courier();
    let path = encode(dir.path(), &player).unwrap();
    let decoded: Player = decode(&path).unwrap();
    assert_eq!(decoded.skills.len(), 13);
    assert_eq!(
        decoded.attribute(AttributeName::Strength),
        player.attribute(AttributeName::Strength)
    );
    assert_eq!(decoded.combat.health.current.to_bits(), player.combat.health.current.to_bits());
}

#[test]
fn ten_millimeter_pistol_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = encode(dir.path(), &pistol()).unwrap();
    assert_eq!(path, dir.path().join("10mm Pistol.xml"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n<Weapon>\n"));
    assert_eq!(peek_type(&path).unwrap(), ConcreteType::Weapon);

    let weapon: Weapon = decode(&path).unwrap();
    assert_eq!(weapon.name, "10mm Pistol");
    assert!((weapon.weight - 5.5).abs() < f32::EPSILON);
    assert_eq!(weapon.value, 55);
    assert_eq!(weapon.weapon_type, WeaponType::Gun);
    assert_eq!(weapon.clip_size, 10);
    assert_eq!(weapon.damage, 100);
}

#[test]
fn encoding_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let object: DomainObject = Entity::Player(courier()).into();
    let first = fs::read(encode(dir.path(), &object).unwrap()).unwrap();
    let second = fs::read(encode(dir.path(), &object).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(!first.contains(&b'\r'));
}

#[test]
fn unsupported_objects_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let quest = Quest::new("They Went That-a-Way", "", ["Follow the trail"]);
    let err = encode(dir.path(), &quest).unwrap_err();
    assert!(matches!(err, PersistError::UnsupportedObject { type_name: "Quest" }));

    let faction = Faction::new("Boomers", "");
    assert!(matches!(
        encode(dir.path(), &faction),
        Err(PersistError::UnsupportedObject { .. })
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn encoding_into_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = encode(&dir.path().join("Inventory"), &pistol()).unwrap_err();
    assert!(matches!(err, PersistError::DirectoryNotFound { .. }));
}

#[test]
fn same_name_overwrites_across_types() {
    let dir = tempfile::tempdir().unwrap();
    let aid = Aid::new("Stimpack", 0.5, 75, vec![], AidType::Syringe);
    let misc = Misc::new("Stimpack", 0.5, 5, MiscType::Junk);
    let first = encode(dir.path(), &aid).unwrap();
    let second = encode(dir.path(), &misc).unwrap();
    assert_eq!(first, second);
    assert_eq!(peek_type(&second).unwrap(), ConcreteType::Misc);
    assert!(matches!(
        decode::<Aid>(&second),
        Err(PersistError::NullResult { .. })
    ));
}

#[test]
fn missing_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Nowhere.xml");
    assert!(matches!(
        peek_type(&path),
        Err(PersistError::FileNotFound { .. })
    ));
    assert!(matches!(
        decode::<Weapon>(&path),
        Err(PersistError::FileNotFound { .. })
    ));
}

#[test]
fn unknown_tags_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cazador.xml");
    fs::write(&path, "<?xml version=\"1.0\"?>\n<Cazador><name>x</name></Cazador>\n").unwrap();
    match peek_type(&path) {
        Err(PersistError::UnknownType { tag }) => assert_eq!(tag, "Cazador"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn malformed_documents_are_classified() {
    let dir = tempfile::tempdir().unwrap();

    let wrong_extension = dir.path().join("Stimpack.json");
    fs::write(&wrong_extension, "{}").unwrap();
    assert!(matches!(
        peek_type(&wrong_extension),
        Err(PersistError::NotXmlFormat { .. })
    ));

    let prolog_only = dir.path().join("Empty.xml");
    fs::write(&prolog_only, "<?xml version=\"1.0\"?>\n<!-- nothing -->\n").unwrap();
    assert!(matches!(
        peek_type(&prolog_only),
        Err(PersistError::MissingRootElement { .. })
    ));
    assert!(matches!(
        decode::<Weapon>(&prolog_only),
        Err(PersistError::NullResult { .. })
    ));
}

#[test]
fn comments_and_whitespace_are_ignored_on_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Pin.xml");
    fs::write(
        &path,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <!-- hand edited -->\n\
         <Misc>\n  <name>Bobby Pin</name>\n  <!-- light -->\n  <weight>0.01</weight>\n\
         <value>1</value>\n  <misc_type>Crafting</misc_type>\n</Misc>\n",
    )
    .unwrap();
    let misc: Misc = decode(&path).unwrap();
    assert_eq!(misc, Misc::new("Bobby Pin", 0.01, 1, MiscType::Crafting));
}

#[test]
fn text_values_keep_their_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let perk = Perk::new("Toughness", "  Line one\n\tLine two  ", 3, vec![]);
    roundtrip(dir.path(), &perk);

    let blank = Location::new("Primm", "   ", LocationKind::Ruins, Coordinate::new(1, 1));
    roundtrip(dir.path(), &blank);

    let padded = Human {
        name: " Boone ".into(),
        faction: "\tNCR\n".into(),
        ..Human::default()
    };
    let path = encode(dir.path(), &padded).unwrap();
    assert_eq!(path, dir.path().join(" Boone .xml"));
    let decoded: Human = decode(&path).unwrap();
    assert_eq!(decoded, padded);
    assert_eq!(pipboy_game::storage_path(dir.path(), &decoded).unwrap(), path);
}

#[test]
fn markup_characters_survive_in_text() {
    let dir = tempfile::tempdir().unwrap();
    let misc = Misc::new(r#"Ben & "Jerry's" <Box>"#, 1.0, 2, MiscType::Junk);
    roundtrip(dir.path(), &misc);
}

#[test]
fn names_cannot_escape_the_target_directory() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("Inventory");
    fs::create_dir(&inventory).unwrap();

    for name in ["../Courier", "Sub/Gun", ".."] {
        let weapon = Weapon {
            name: name.into(),
            ..pistol()
        };
        match encode(&inventory, &weapon) {
            Err(PersistError::InvalidStorageKey { key }) => assert_eq!(key, name),
            other => panic!("expected InvalidStorageKey for {name:?}, got {other:?}"),
        }
    }
    assert_eq!(fs::read_dir(&inventory).unwrap().count(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
