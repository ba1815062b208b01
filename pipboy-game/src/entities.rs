//! Characters and creatures: the player plus every kind of wasteland NPC.
use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeName, Special};
use crate::constants::{
    ACTION_POINTS_PER_AGILITY, BASE_ACTION_POINTS, BASE_CARRY_WEIGHT, BASE_HEALTH,
    CARRY_WEIGHT_PER_STRENGTH, HEALTH_PER_ENDURANCE, LIMB_MAX, RADS_PER_SICKNESS_LEVEL, SKILL_MAX,
    SPECIAL_MAX,
};
use crate::effect::{Effect, EffectType, total_for};
use crate::registry::ConcreteType;
use crate::world::Coordinate;

/// A current/maximum pair such as hit points or action points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub current: f32,
    pub max: f32,
}

impl Vitals {
    #[must_use]
    pub const fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Remaining fraction in `0.0..=1.0`; an empty pool reads as zero.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn drain(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }

    pub fn restore(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

/// Combat-relevant numbers shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub level: u8,
    pub health: Vitals,
    pub action_points: Vitals,
    pub damage_resistance: u8,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(1, 100.0, 0)
    }
}

impl CombatStats {
    #[must_use]
    pub const fn new(level: u8, health: f32, damage_resistance: u8) -> Self {
        Self {
            level,
            health: Vitals::full(health),
            action_points: Vitals::full(BASE_ACTION_POINTS),
            damage_resistance,
        }
    }

    /// Apply incoming damage reduced by damage resistance (percentage, capped at 85).
    pub fn take_damage(&mut self, amount: f32) {
        let resistance = f32::from(self.damage_resistance.min(85)) / 100.0;
        self.health.drain(amount * (1.0 - resistance));
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }
}

/// Limb conditions, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limbs {
    pub head: u8,
    pub torso: u8,
    pub left_arm: u8,
    pub right_arm: u8,
    pub left_leg: u8,
    pub right_leg: u8,
}

impl Default for Limbs {
    fn default() -> Self {
        Self {
            head: LIMB_MAX,
            torso: LIMB_MAX,
            left_arm: LIMB_MAX,
            right_arm: LIMB_MAX,
            left_leg: LIMB_MAX,
            right_leg: LIMB_MAX,
        }
    }
}

impl Limbs {
    #[must_use]
    pub fn crippled_count(&self) -> usize {
        [
            self.head,
            self.torso,
            self.left_arm,
            self.right_arm,
            self.left_leg,
            self.right_leg,
        ]
        .iter()
        .filter(|&&condition| condition == 0)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RadiationSicknessLevel {
    None,
    Minor,
    Advanced,
    Critical,
    Deadly,
    Fatal,
}

impl RadiationSicknessLevel {
    /// Sickness level for an accumulated dose; each level spans 200 rads.
    #[must_use]
    pub const fn from_rads(rads: u16) -> Self {
        match rads / RADS_PER_SICKNESS_LEVEL {
            0 => Self::None,
            1 => Self::Minor,
            2 => Self::Advanced,
            3 => Self::Critical,
            4 => Self::Deadly,
            _ => Self::Fatal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub combat: CombatStats,
    pub special: Special,
    #[serde(rename = "skill", default)]
    pub skills: Vec<Attribute>,
    pub limbs: Limbs,
    pub rads: u16,
    pub xp: u32,
    pub karma: i16,
    pub caps: u32,
    pub is_female: bool,
    pub position: Coordinate,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new("", Special::default())
    }
}

impl Player {
    /// Fresh level-one character with skills and pools derived from `special`.
    #[must_use]
    pub fn new(name: impl Into<String>, mut special: Special) -> Self {
        special.clamp();
        let health = BASE_HEALTH + HEALTH_PER_ENDURANCE * f32::from(special.endurance);
        let action_points =
            BASE_ACTION_POINTS + ACTION_POINTS_PER_AGILITY * f32::from(special.agility);
        Self {
            name: name.into(),
            combat: CombatStats {
                level: 1,
                health: Vitals::full(health),
                action_points: Vitals::full(action_points),
                damage_resistance: 0,
            },
            skills: special.initial_skills(),
            special,
            limbs: Limbs::default(),
            rads: 0,
            xp: 0,
            karma: 0,
            caps: 0,
            is_female: false,
            position: Coordinate::default(),
            effects: Vec::new(),
        }
    }

    /// Effective value of a S.P.E.C.I.A.L. stat or skill, including active effects.
    #[must_use]
    pub fn attribute(&self, name: AttributeName) -> i32 {
        let base = if name.is_special() {
            self.special.get(name)
        } else {
            self.skills
                .iter()
                .find(|skill| skill.name == name)
                .map_or(0, |skill| skill.value)
        };
        let bonus = EffectType::ALL
            .iter()
            .find(|effect_type| effect_type.attribute() == Some(name))
            .map_or(0, |&effect_type| total_for(&self.effects, effect_type));
        let max = if name.is_special() { i32::from(SPECIAL_MAX) } else { i32::from(SKILL_MAX) };
        (i32::from(base) + bonus).clamp(0, max)
    }

    #[must_use]
    pub fn carry_capacity(&self) -> f32 {
        BASE_CARRY_WEIGHT + CARRY_WEIGHT_PER_STRENGTH * f32::from(self.special.strength)
    }

    #[must_use]
    pub const fn radiation_sickness(&self) -> RadiationSicknessLevel {
        RadiationSicknessLevel::from_rads(self.rads)
    }

    pub fn add_rads(&mut self, amount: u16) {
        self.rads = self.rads.saturating_add(amount);
    }

    /// Injury level `0..=5` from the remaining health fraction; 5 means dead.
    #[must_use]
    pub fn injury_level(&self) -> usize {
        let fraction = self.combat.health.fraction();
        if fraction <= 0.0 {
            return 5;
        }
        // fraction is in (0, 1], so the product is in [0, 4)
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let lost = ((1.0 - fraction) * 4.0).floor() as usize;
        lost.min(4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RobotModel {
    #[default]
    Protectron,
    MrHandy,
    Eyebot,
    SentryBot,
    Robobrain,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Human {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub is_female: bool,
    pub faction: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Robot {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub model: RobotModel,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ghoul {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    /// Health regained per rad absorbed.
    pub rad_regeneration: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feral {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub is_glowing: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuperMutant {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub is_master: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nightkin {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub stealth_boys: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub is_companion: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NightStalker {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub venom_damage: u16,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BloatFly {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub swarm_size: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeathClaw {
    pub name: String,
    pub combat: CombatStats,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
    pub is_alpha: bool,
}

/// Any character or creature. Serializes as the wrapped entity, without a variant wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Player(Player),
    Human(Human),
    Robot(Robot),
    Ghoul(Ghoul),
    Feral(Feral),
    SuperMutant(SuperMutant),
    Nightkin(Nightkin),
    Dog(Dog),
    NightStalker(NightStalker),
    BloatFly(BloatFly),
    DeathClaw(DeathClaw),
}

impl Entity {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Player(entity) => &entity.name,
            Self::Human(entity) => &entity.name,
            Self::Robot(entity) => &entity.name,
            Self::Ghoul(entity) => &entity.name,
            Self::Feral(entity) => &entity.name,
            Self::SuperMutant(entity) => &entity.name,
            Self::Nightkin(entity) => &entity.name,
            Self::Dog(entity) => &entity.name,
            Self::NightStalker(entity) => &entity.name,
            Self::BloatFly(entity) => &entity.name,
            Self::DeathClaw(entity) => &entity.name,
        }
    }

    #[must_use]
    pub const fn combat(&self) -> &CombatStats {
        match self {
            Self::Player(entity) => &entity.combat,
            Self::Human(entity) => &entity.combat,
            Self::Robot(entity) => &entity.combat,
            Self::Ghoul(entity) => &entity.combat,
            Self::Feral(entity) => &entity.combat,
            Self::SuperMutant(entity) => &entity.combat,
            Self::Nightkin(entity) => &entity.combat,
            Self::Dog(entity) => &entity.combat,
            Self::NightStalker(entity) => &entity.combat,
            Self::BloatFly(entity) => &entity.combat,
            Self::DeathClaw(entity) => &entity.combat,
        }
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Player(entity) => &entity.effects,
            Self::Human(entity) => &entity.effects,
            Self::Robot(entity) => &entity.effects,
            Self::Ghoul(entity) => &entity.effects,
            Self::Feral(entity) => &entity.effects,
            Self::SuperMutant(entity) => &entity.effects,
            Self::Nightkin(entity) => &entity.effects,
            Self::Dog(entity) => &entity.effects,
            Self::NightStalker(entity) => &entity.effects,
            Self::BloatFly(entity) => &entity.effects,
            Self::DeathClaw(entity) => &entity.effects,
        }
    }

    #[must_use]
    pub const fn concrete_type(&self) -> ConcreteType {
        match self {
            Self::Player(_) => ConcreteType::Player,
            Self::Human(_) => ConcreteType::Human,
            Self::Robot(_) => ConcreteType::Robot,
            Self::Ghoul(_) => ConcreteType::Ghoul,
            Self::Feral(_) => ConcreteType::Feral,
            Self::SuperMutant(_) => ConcreteType::SuperMutant,
            Self::Nightkin(_) => ConcreteType::Nightkin,
            Self::Dog(_) => ConcreteType::Dog,
            Self::NightStalker(_) => ConcreteType::NightStalker,
            Self::BloatFly(_) => ConcreteType::BloatFly,
            Self::DeathClaw(_) => ConcreteType::DeathClaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_player_derives_pools_from_special() {
        let player = Player::default();
        assert!(player.name.is_empty());
        assert_eq!(player.combat.level, 1);
        assert!((player.combat.health.max - 190.0).abs() <= f32::EPSILON);
        assert!((player.combat.action_points.max - 75.0).abs() <= f32::EPSILON);
        assert_eq!(player.skills.len(), AttributeName::SKILLS.len());
        assert!((player.carry_capacity() - 200.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn effects_shift_attributes_within_bounds() {
        let mut player = Player::new("Courier", Special::uniform(9));
        player
            .effects
            .push(Effect::permanent(EffectType::Strength, 3));
        assert_eq!(player.attribute(AttributeName::Strength), 10);
        player
            .effects
            .push(Effect::permanent(EffectType::Lockpick, -10));
        let lockpick = player.attribute(AttributeName::Lockpick);
        assert_eq!(
            lockpick,
            i32::from(player.special.initial_skill(AttributeName::Lockpick)) - 10
        );
    }

    #[test]
    fn radiation_sickness_levels_step_every_two_hundred_rads() {
        let mut player = Player::default();
        assert_eq!(player.radiation_sickness(), RadiationSicknessLevel::None);
        player.add_rads(199);
        assert_eq!(player.radiation_sickness(), RadiationSicknessLevel::None);
        player.add_rads(1);
        assert_eq!(player.radiation_sickness(), RadiationSicknessLevel::Minor);
        player.add_rads(u16::MAX);
        assert_eq!(player.rads, u16::MAX);
        assert_eq!(player.radiation_sickness(), RadiationSicknessLevel::Fatal);
    }

    #[test]
    fn damage_is_reduced_by_resistance_and_clamps_at_zero() {
        let mut combat = CombatStats::new(1, 100.0, 50);
        combat.take_damage(40.0);
        assert!((combat.health.current - 80.0).abs() <= f32::EPSILON);
        combat.take_damage(1_000.0);
        assert!(!combat.is_alive());
        combat.health.restore(500.0);
        assert!((combat.health.current - 100.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn injury_level_tracks_lost_health() {
        let mut player = Player::default();
        assert_eq!(player.injury_level(), 0);
        player.combat.health.current = player.combat.health.max * 0.5;
        assert_eq!(player.injury_level(), 2);
        player.combat.health.current = 0.0;
        assert_eq!(player.injury_level(), 5);
    }

    #[test]
    fn crippled_limbs_are_counted() {
        let limbs = Limbs {
            left_leg: 0,
            head: 0,
            ..Limbs::default()
        };
        assert_eq!(limbs.crippled_count(), 2);
    }

    #[test]
    fn entity_accessors_reach_the_wrapped_entity() {
        let claw = Entity::DeathClaw(DeathClaw {
            name: "Legendary Deathclaw".to_string(),
            is_alpha: true,
            ..DeathClaw::default()
        });
        assert_eq!(claw.name(), "Legendary Deathclaw");
        assert_eq!(claw.concrete_type(), ConcreteType::DeathClaw);
        assert_eq!(claw.combat().level, 1);
        assert!(claw.effects().is_empty());
    }
}
