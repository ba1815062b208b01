//! Perks, map locations, quests and factions.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::effect::Effect;

/// A cell on the PIP-Boy map; `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Perk {
    pub name: String,
    pub description: String,
    pub rank: u8,
    pub max_rank: u8,
    #[serde(rename = "effect", default)]
    pub effects: Vec<Effect>,
}

impl Perk {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_rank: u8,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rank: 1,
            max_rank: max_rank.max(1),
            effects,
        }
    }

    /// Take another rank; returns `false` once the perk is maxed out.
    pub fn rank_up(&mut self) -> bool {
        if self.rank >= self.max_rank {
            return false;
        }
        self.rank += 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocationKind {
    #[default]
    Settlement,
    Vault,
    Cave,
    Factory,
    Military,
    Monument,
    Ruins,
    Camp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
    pub kind: LocationKind,
    pub position: Coordinate,
    pub discovered: bool,
}

impl Location {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: LocationKind,
        position: Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            position,
            discovered: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestStep {
    pub text: String,
    pub completed: bool,
}

/// A quest; kept in the session's quest log, never written as its own document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub description: String,
    #[serde(rename = "step", default)]
    pub steps: Vec<QuestStep>,
    pub completed: bool,
}

impl Quest {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            steps: steps
                .into_iter()
                .map(|text| QuestStep {
                    text: text.into(),
                    completed: false,
                })
                .collect(),
            completed: false,
        }
    }

    /// The first step that is still open.
    #[must_use]
    pub fn current_step(&self) -> Option<&QuestStep> {
        self.steps.iter().find(|step| !step.completed)
    }

    /// Complete the current step; the quest completes with its last step.
    pub fn advance(&mut self) {
        if let Some(step) = self.steps.iter_mut().find(|step| !step.completed) {
            step.completed = true;
        }
        if self.steps.iter().all(|step| step.completed) {
            self.completed = true;
        }
    }
}

/// A wasteland faction. Loaded from plain-text descriptions, not from XML documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    pub description: String,
    pub reputation: i16,
}

impl Faction {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            reputation: 0,
        }
    }

    #[must_use]
    pub const fn standing(&self) -> &'static str {
        match self.reputation {
            i16::MIN..=-50 => "Vilified",
            -49..=-10 => "Shunned",
            -9..=9 => "Neutral",
            10..=49 => "Accepted",
            _ => "Idolized",
        }
    }
}
