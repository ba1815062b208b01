//! Text rendering of PIP-Boy pages.
use std::fmt::Write as _;

use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use pipboy_game::{
    DataPage, Item, ItemsPage, Page, PipBoy, Player, StatsPage, Tab, enumerate_leaves,
    Category,
};

/// Screen tint from the configured color name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Green,
    Amber,
    Blue,
    White,
}

impl Tint {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "amber" | "yellow" => Self::Amber,
            "blue" => Self::Blue,
            "white" => Self::White,
            _ => Self::Green,
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Green => text.bright_green(),
            Self::Amber => text.yellow(),
            Self::Blue => text.bright_blue(),
            Self::White => text.white(),
        }
    }

    /// Inverted colors for the selected tab.
    pub fn highlight(self, text: &str) -> ColoredString {
        let text = text.black();
        match self {
            Self::Green => text.on_bright_green(),
            Self::Amber => text.on_yellow(),
            Self::Blue => text.on_bright_blue(),
            Self::White => text.on_white(),
        }
    }
}

pub const BOOT_LINES: [&str; 5] = [
    "PIP-Boy 3000 MKIV",
    "Copyright 2075 RobCo Industries",
    "64kb Memory",
    "VAULT-TEC",
    "LOADING...",
];

const RULE_WIDTH: usize = 40;

fn tab_row(tint: Tint, labels: &[&str], selected: &str) -> String {
    let mut row = String::new();
    for label in labels {
        let cell = if *label == selected {
            tint.highlight(label)
        } else {
            tint.paint(label)
        };
        let _ = write!(row, "\t{cell}\t");
    }
    row
}

/// Full screen: main tabs, the clock on STATS, the page body and the sub-page footer.
#[must_use]
pub fn screen(session: &PipBoy, tint: Tint, now: DateTime<Local>) -> String {
    let nav = session.navigation;
    let mut out = tab_row(tint, &Page::labels(), nav.page.label());
    out.push('\n');
    if nav.page == Page::Stats {
        let _ = writeln!(out, "{}", tint.paint(&now.format("%m/%d/%Y %H:%M").to_string()));
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out.push_str(&page_body(session));
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let (labels, selected) = nav.sub_pages(session.inventory.page);
    out.push_str(&tab_row(tint, &labels, selected));
    out.push('\n');
    out
}

/// Body text of whichever page is selected.
#[must_use]
pub fn page_body(session: &PipBoy) -> String {
    let nav = session.navigation;
    match nav.page {
        Page::Stats => match nav.stats_page {
            StatsPage::Status => status(&session.player, session),
            StatsPage::Special => special(&session.player),
            StatsPage::Skills => skills(&session.player),
            StatsPage::Perks => perks(session),
            StatsPage::General => factions(session),
        },
        Page::Items => items(session, session.inventory.page),
        Page::Data => match nav.data_page {
            DataPage::Map => session.map.render(session.player.position),
            DataPage::Quests => quests(session),
            DataPage::Misc => notes(session),
            DataPage::Radio => session.radio.to_string(),
        },
    }
}

fn status(player: &Player, session: &PipBoy) -> String {
    let combat = &player.combat;
    let mut out = String::new();
    let name = if player.name.is_empty() { "Unnamed" } else { &player.name };
    let _ = writeln!(out, "{name}  LVL {}", combat.level);
    let _ = writeln!(
        out,
        "HP {:.0}/{:.0}  AP {:.0}/{:.0}  DR {}",
        combat.health.current,
        combat.health.max,
        combat.action_points.current,
        combat.action_points.max,
        combat.damage_resistance
    );
    let _ = writeln!(
        out,
        "RADS {} ({:?})  XP {}  Caps {}  Karma {}",
        player.rads,
        player.radiation_sickness(),
        player.xp,
        player.caps,
        player.karma
    );
    let limbs = &player.limbs;
    let _ = writeln!(
        out,
        "Head {}  Torso {}  L.Arm {}  R.Arm {}  L.Leg {}  R.Leg {}",
        limbs.head, limbs.torso, limbs.left_arm, limbs.right_arm, limbs.left_leg, limbs.right_leg
    );
    if session.inventory.is_over_encumbered(player) {
        let _ = writeln!(out, "{}", "OVER-ENCUMBERED".red().bold());
    }
    out
}

fn collection<T: std::fmt::Display>(header: &str, entries: impl IntoIterator<Item = T>) -> String {
    let mut out = format!("{header}:\n");
    for entry in entries {
        let _ = writeln!(out, "\t{entry}");
    }
    out
}

fn special(player: &Player) -> String {
    collection(
        "SPECIAL",
        player
            .special
            .attributes()
            .into_iter()
            .map(|attribute| format!("{}: {}", attribute.name, player.attribute(attribute.name))),
    )
}

fn skills(player: &Player) -> String {
    collection(
        "Skills",
        player
            .skills
            .iter()
            .map(|skill| format!("{}: {}", skill.name, player.attribute(skill.name))),
    )
}

fn perks(session: &PipBoy) -> String {
    collection(
        "Perks",
        session.perks.iter().map(|perk| {
            format!(
                "{} ({}/{}) {}",
                perk.name, perk.rank, perk.max_rank, perk.description
            )
        }),
    )
}

fn factions(session: &PipBoy) -> String {
    let mut out = String::new();
    for (index, faction) in session.factions.iter().enumerate() {
        let marker = if index == session.faction_index() { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<24} {}", faction.name, faction.standing());
    }
    if let Some(faction) = session.selected_faction() {
        let _ = writeln!(out, "\n{}", faction.description);
    } else {
        out.push_str("No factions known\n");
    }
    out
}

fn items(session: &PipBoy, page: ItemsPage) -> String {
    let inventory = &session.inventory;
    let mut out = collection(page.as_str(), inventory.page_items(page).map(Item::to_string));
    let _ = writeln!(
        out,
        "Wg {:.1}/{:.0}",
        inventory.total_weight(),
        session.player.carry_capacity()
    );
    out
}

fn quests(session: &PipBoy) -> String {
    let mut out = String::new();
    for quest in session.quests.active() {
        let _ = writeln!(out, "{}", quest.name);
        for step in &quest.steps {
            let mark = if step.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "\t[{mark}] {}", step.text);
        }
    }
    if !session.quests.finished().is_empty() {
        out.push_str(&collection(
            "Completed",
            session.quests.finished().iter().map(|quest| quest.name.as_str()),
        ));
    }
    if out.is_empty() {
        out.push_str("No active quests\n");
    }
    out
}

fn notes(session: &PipBoy) -> String {
    let mut out = String::new();
    for note in &session.notes {
        let _ = writeln!(out, "{} {}", note.kind.icon(), note.title);
        let _ = writeln!(out, "{}", "-".repeat(10));
        if let Some(text) = &note.text {
            let _ = writeln!(out, "{text}");
        }
    }
    out
}

/// The registry as an indented tree of categories and their concrete types.
#[must_use]
pub fn type_tree() -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let suffix = if category.is_persistable() { "" } else { " (not stored)" };
        let _ = writeln!(out, "{category}{suffix}");
        for leaf in enumerate_leaves(category) {
            let _ = writeln!(out, "\t{leaf}");
        }
    }
    out
}
