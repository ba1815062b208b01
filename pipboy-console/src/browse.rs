//! Line-driven page browser.
use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use pipboy_game::{DataPage, Direction, Page, PipBoy, StatsPage};

use crate::render::{Tint, screen};

pub const HELP: &str = "\
a / d        previous / next page
q / e        previous / next sub-page
go <dir>     move on the map (n, s, w, e)
up / down    select faction (STATS/General) or song (DATA/Radio)
help         show this help
quit         save and leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Page { right: bool },
    SubPage { right: bool },
    Move(Direction),
    Select { down: bool },
    Help,
    Quit,
}

impl Action {
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let action = match words.next()? {
            "a" => Self::Page { right: false },
            "d" => Self::Page { right: true },
            "q" => Self::SubPage { right: false },
            "e" => Self::SubPage { right: true },
            "go" | "move" => Self::Move(Direction::parse(words.next()?)?),
            "up" | "u" => Self::Select { down: false },
            "down" | "j" => Self::Select { down: true },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Apply `action` to the session; returns a status line worth showing.
pub fn apply(session: &mut PipBoy, action: Action) -> Option<String> {
    match action {
        Action::Page { right } => session.navigation.change_page(right),
        Action::SubPage { right } => {
            let mut items_page = session.inventory.page;
            session.navigation.change_sub_page(right, &mut items_page);
            session.inventory.page = items_page;
        }
        Action::Move(direction) => {
            return session
                .move_player(direction)
                .map(|name| format!("Discovered {name}"));
        }
        Action::Select { down } => {
            let nav = session.navigation;
            match (nav.page, nav.stats_page, nav.data_page) {
                (Page::Stats, StatsPage::General, _) => session.change_faction(down),
                (Page::Data, _, DataPage::Radio) => session.radio.change_song(down),
                _ => return Some("Nothing to select here".to_string()),
            }
        }
        Action::Help => return Some(HELP.to_string()),
        Action::Quit => {}
    }
    None
}

/// Read commands until `quit` or end of input, redrawing after each one.
///
/// # Errors
///
/// Fails on I/O errors.
pub fn run<R: BufRead, W: Write>(
    session: &mut PipBoy,
    tint: Tint,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    write!(output, "{}", screen(session, tint, Local::now()))?;
    let mut line = String::new();
    loop {
        line.clear();
        write!(output, "> ")?;
        output.flush()?;
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let Some(action) = Action::parse(&line) else {
            writeln!(output, "{}", format!("Unknown command: {}", line.trim()).red())?;
            continue;
        };
        if action == Action::Quit {
            break;
        }
        log::debug!("browse action {action:?}");
        let message = apply(session, action);
        write!(output, "{}", screen(session, tint, Local::now()))?;
        if let Some(message) = message {
            writeln!(output, "{}", tint.paint(&message))?;
        }
    }
    Ok(())
}
