//! Text command parsing. Accepts Polish and English words, with or without
//! Polish diacritics.

use super::error::GameError;
use crate::combat::CombatAction;
use crate::world::Direction;
use serde::Serialize;

/// A normalized player command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "arg")]
pub enum Command {
    Move(Direction),
    Explore,
    Inventory,
    Use(String),
    Status,
    Scan,
    Map,
    Help,
    Quit,
    Act(CombatAction),
    /// Item offered to a trader.
    Trade(String),
    Cancel,
}

/// Lowercases, trims, collapses inner whitespace and strips Polish
/// diacritics, so "  Mały  MEDYKIT" and "maly medykit" compare equal.
pub fn fold_key(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ż' | 'ź' => 'z',
            other => other,
        })
        .collect()
}

pub fn parse_direction(word: &str) -> Option<Direction> {
    match fold_key(word).as_str() {
        "polnoc" | "pn" | "n" | "p" | "north" => Some(Direction::North),
        "poludnie" | "pd" | "s" | "d" | "south" => Some(Direction::South),
        "wschod" | "wsch" | "e" | "w" | "east" => Some(Direction::East),
        "zachod" | "zach" | "z" | "west" => Some(Direction::West),
        _ => None,
    }
}

fn parse_action(word: &str) -> Option<CombatAction> {
    match word {
        "atakuj" | "atak" | "a" | "attack" => Some(CombatAction::Attack),
        "lecz" | "l" | "heal" => Some(CombatAction::Heal),
        "uciekaj" | "uciek" | "u" | "run" | "flee" => Some(CombatAction::Flee),
        "blokuj" | "blok" | "b" | "block" => Some(CombatAction::Block),
        "specjalna" | "umiejetnosc" | "skill" | "special" => Some(CombatAction::Special),
        _ => None,
    }
}

/// Read-only reports, also accepted while a trader waits for an answer.
fn parse_report(word: &str) -> Option<Command> {
    match word {
        "ekwipunek" | "inventory" | "inv" | "eq" => Some(Command::Inventory),
        "status" | "staty" => Some(Command::Status),
        "pomoc" | "help" | "?" => Some(Command::Help),
        _ => None,
    }
}

fn is_quit(word: &str) -> bool {
    matches!(word, "wyjdz" | "koniec" | "quit" | "exit")
}

/// Parses one line typed at the main or combat prompt.
pub fn parse_command(line: &str) -> Result<Command, GameError> {
    let folded = fold_key(line);
    let (head, rest) = match folded.split_once(' ') {
        Some((head, rest)) => (head, rest.trim()),
        None => (folded.as_str(), ""),
    };

    if let Some(action) = parse_action(&folded) {
        return Ok(Command::Act(action));
    }
    if let Some(report) = parse_report(&folded) {
        return Ok(report);
    }

    let command = match head {
        "idz" | "go" | "move" => {
            if rest.is_empty() {
                return Err(GameError::invalid_target("Where to?"));
            }
            let direction = parse_direction(rest)
                .ok_or_else(|| GameError::invalid_target("I don't understand that direction."))?;
            Command::Move(direction)
        }
        "north" | "south" | "east" | "west" | "polnoc" | "poludnie" | "wschod" | "zachod"
            if rest.is_empty() =>
        {
            parse_direction(head).map(Command::Move).ok_or_else(|| unknown(line))?
        }
        "uzyj" | "use" => {
            if rest.is_empty() {
                return Err(GameError::invalid_target("Use what?"));
            }
            // item lookup folds the name itself
            let name = line.trim().split_once(char::is_whitespace).map_or("", |(_, n)| n);
            Command::Use(name.trim().to_string())
        }
        "eksploruj" | "explore" | "szukaj" if rest.is_empty() => Command::Explore,
        "skanuj" | "skan" | "scan" if rest.is_empty() => Command::Scan,
        "mapa" | "map" if rest.is_empty() => Command::Map,
        word if is_quit(word) && rest.is_empty() => Command::Quit,
        _ => return Err(unknown(line)),
    };
    Ok(command)
}

/// Parses an answer to a trader's offer: an item name, cancel, quit, or a
/// request for the inventory, status or help.
pub fn parse_trade(line: &str) -> Command {
    let folded = fold_key(line);
    match folded.as_str() {
        "" | "anuluj" | "nie" | "nic" | "cancel" | "no" => Command::Cancel,
        word if is_quit(word) => Command::Quit,
        word => parse_report(word).unwrap_or_else(|| Command::Trade(line.trim().to_string())),
    }
}

fn unknown(line: &str) -> GameError {
    GameError::InvalidCommand(line.trim().to_string())
}
