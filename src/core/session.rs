//! Game session: routes commands by mode and collects their events.
//!
//! Nothing here prints. Every command yields a [`Response`] holding the
//! events it caused plus a status snapshot, so the binary can render prose
//! or JSON.

use super::dice::Dice;
use super::error::GameError;
use super::input::Command;
use crate::character::{Player, PlayerClass, StatusReport};
use crate::combat::{Combat, CombatAction, CombatEvent, CombatState};
use crate::items::{EffectReport, ItemId};
use crate::world::{self, npc, ExploreOutcome, MapView, Position, WorldEvent, WorldMap};
use serde::Serialize;
use std::fmt;

pub const HELP_LINES: [&str; 10] = [
    "idz <direction> / go <direction>  - move north, south, east or west",
    "eksploruj / explore               - search the current cell",
    "ekwipunek / inventory             - list your items",
    "uzyj <item> / use <item>          - use an item",
    "status                            - show your stats",
    "skanuj / scan                     - reveal neighbouring cells (costs a charge)",
    "mapa / map                        - show the map",
    "pomoc / help                      - show this list",
    "wyjdz / quit                      - end the game",
    "in combat: atak, lecz, uciekaj, blokuj, specjalna (attack, heal, flee, block, special)",
];

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ending {
    Defeat,
    Quit,
}

impl Ending {
    pub fn error(self) -> GameError {
        match self {
            Ending::Defeat => GameError::TerminalDefeat,
            Ending::Quit => GameError::TerminalQuit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Exploring,
    InCombat(Combat),
    /// A trader waits for an item name or a cancel.
    Trading,
    Over(Ending),
}

/// Ordered inventory listing for the `inventory` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub items: Vec<(ItemId, u32)>,
    pub scan_charges: u32,
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            write!(f, "Your inventory is empty.")?;
        } else {
            write!(f, "Inventory:")?;
            for (id, count) in &self.items {
                write!(f, "\n  - {} x{} ({})", id.name(), count, id.item().description)?;
            }
        }
        write!(f, "\nScan charges: {}", self.scan_charges)
    }
}

/// One thing that happened while handling a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum GameEvent {
    Combat(CombatEvent),
    World(WorldEvent),
    ItemUsed { item: ItemId, report: EffectReport },
    Status(StatusReport),
    Inventory(InventoryReport),
    Map(MapView),
    Help(Vec<&'static str>),
    /// The command was refused; nothing changed.
    Rejected(GameError),
    Ended(GameError),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Combat(event) => write!(f, "{event}"),
            GameEvent::World(event) => write!(f, "{event}"),
            GameEvent::ItemUsed { item, report } => write!(f, "You use {}. {report}", item.name()),
            GameEvent::Status(status) => write!(f, "{status}"),
            GameEvent::Inventory(report) => write!(f, "{report}"),
            GameEvent::Map(view) => write!(f, "Map ({} rows), you are at {}", view.rows.len(), view.position),
            GameEvent::Help(lines) => write!(f, "Commands:\n  {}", lines.join("\n  ")),
            GameEvent::Rejected(err) | GameEvent::Ended(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnemyStatus {
    pub name: &'static str,
    pub hp: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "ending")]
pub enum ModeKind {
    Exploring,
    InCombat,
    Trading,
    Over(Ending),
}

/// Snapshot taken after every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub mode: ModeKind,
    pub hp: i32,
    pub hp_max: i32,
    pub level: u32,
    pub position: Position,
    pub enemy: Option<EnemyStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub events: Vec<GameEvent>,
    pub status: SessionStatus,
}

impl Response {
    pub fn is_over(&self) -> bool {
        matches!(self.status.mode, ModeKind::Over(_))
    }
}

pub struct Session<D: Dice> {
    player: Player,
    world: WorldMap,
    dice: D,
    mode: Mode,
}

impl<D: Dice> Session<D> {
    pub fn new(class: PlayerClass, world: WorldMap, dice: D) -> Self {
        Self::with_player(Player::new(class), world, dice)
    }

    pub fn with_player(player: Player, world: WorldMap, dice: D) -> Self {
        tracing::info!(class = %player.class, "session started");
        Self {
            player,
            world,
            dice,
            mode: Mode::Exploring,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_trading(&self) -> bool {
        self.mode == Mode::Trading
    }

    pub fn is_over(&self) -> bool {
        matches!(self.mode, Mode::Over(_))
    }

    pub fn status(&self) -> SessionStatus {
        let (mode, enemy) = match &self.mode {
            Mode::Exploring => (ModeKind::Exploring, None),
            Mode::InCombat(combat) => (
                ModeKind::InCombat,
                Some(EnemyStatus {
                    name: combat.enemy().name,
                    hp: combat.enemy().hp,
                }),
            ),
            Mode::Trading => (ModeKind::Trading, None),
            Mode::Over(ending) => (ModeKind::Over(*ending), None),
        };
        SessionStatus {
            mode,
            hp: self.player.hp,
            hp_max: self.player.hp_max,
            level: self.player.level,
            position: self.world.position(),
            enemy,
        }
    }

    /// Handles one command. Never fails: refusals come back as
    /// [`GameEvent::Rejected`] with the session unchanged.
    pub fn handle(&mut self, command: Command) -> Response {
        tracing::debug!(?command, "handling command");
        let mut events = Vec::new();
        let mode = std::mem::replace(&mut self.mode, Mode::Exploring);

        self.mode = match mode {
            Mode::Exploring => match self.exploring(command, &mut events) {
                Ok(next) => next,
                Err(err) => {
                    events.push(GameEvent::Rejected(err));
                    Mode::Exploring
                }
            },
            Mode::InCombat(combat) => self.fighting(combat, command, &mut events),
            Mode::Trading => self.trading(command, &mut events),
            Mode::Over(ending) => {
                events.push(GameEvent::Ended(ending.error()));
                Mode::Over(ending)
            }
        };

        Response {
            events,
            status: self.status(),
        }
    }

    fn inventory_report(&self) -> GameEvent {
        GameEvent::Inventory(InventoryReport {
            items: self.player.inventory.iter().collect(),
            scan_charges: self.player.scan_charges,
        })
    }

    fn exploring(&mut self, command: Command, events: &mut Vec<GameEvent>) -> Result<Mode, GameError> {
        match command {
            Command::Move(direction) => {
                let event = world::step(&mut self.world, direction, &mut self.dice)?;
                events.push(GameEvent::World(event));
            }
            Command::Explore => {
                let exploration = world::explore(&mut self.world, &mut self.player, &mut self.dice);
                events.extend(exploration.events.into_iter().map(GameEvent::World));
                return Ok(match exploration.outcome {
                    ExploreOutcome::Settled => Mode::Exploring,
                    ExploreOutcome::Trade => Mode::Trading,
                    ExploreOutcome::Died => end(Ending::Defeat, events),
                    ExploreOutcome::Fight(combat) => {
                        events.push(GameEvent::Combat(combat.opening()));
                        Mode::InCombat(combat)
                    }
                });
            }
            Command::Inventory => events.push(self.inventory_report()),
            Command::Use(name) => {
                let (item, report) = self.player.use_item(&name)?;
                events.push(GameEvent::ItemUsed { item, report });
            }
            Command::Status => events.push(GameEvent::Status(self.player.status())),
            Command::Scan => {
                let event = world::scan(&mut self.world, &mut self.player)?;
                events.push(GameEvent::World(event));
            }
            Command::Map => events.push(GameEvent::Map(self.world.view())),
            Command::Help => events.push(GameEvent::Help(HELP_LINES.to_vec())),
            Command::Quit => return Ok(end(Ending::Quit, events)),
            Command::Act(action) => {
                return Err(GameError::InvalidCommand(action_word(action).to_string()))
            }
            Command::Trade(_) | Command::Cancel => {
                return Err(GameError::InvalidCommand("trade".to_string()))
            }
        }
        Ok(Mode::Exploring)
    }

    fn fighting(&mut self, mut combat: Combat, command: Command, events: &mut Vec<GameEvent>) -> Mode {
        let action = match command {
            Command::Act(action) => action,
            Command::Quit => return end(Ending::Quit, events),
            other => {
                events.push(GameEvent::Rejected(GameError::InvalidCommand(format!(
                    "{} (you are in combat: attack, heal, flee, block or special)",
                    command_word(&other)
                ))));
                return Mode::InCombat(combat);
            }
        };

        let report = match combat.act(&mut self.player, action, &mut self.dice) {
            Ok(report) => report,
            Err(err) => {
                events.push(GameEvent::Rejected(err));
                return Mode::Exploring;
            }
        };
        events.extend(report.events.into_iter().map(GameEvent::Combat));

        match report.state {
            CombatState::Ongoing => Mode::InCombat(combat),
            CombatState::PlayerDefeat => end(Ending::Defeat, events),
            CombatState::PlayerVictory | CombatState::PlayerFled => {
                world::resolve_encounter(&mut self.world, combat.encounter(), report.state);
                Mode::Exploring
            }
        }
    }

    fn trading(&mut self, command: Command, events: &mut Vec<GameEvent>) -> Mode {
        match command {
            Command::Trade(name) => match npc::trade(&mut self.player, &name, &mut self.dice) {
                Ok(event) => {
                    events.push(GameEvent::World(event));
                    Mode::Exploring
                }
                Err(err) => {
                    events.push(GameEvent::Rejected(err));
                    Mode::Trading
                }
            },
            Command::Cancel => {
                events.push(GameEvent::World(WorldEvent::TradeCancelled));
                Mode::Exploring
            }
            Command::Inventory => {
                events.push(self.inventory_report());
                Mode::Trading
            }
            Command::Status => {
                events.push(GameEvent::Status(self.player.status()));
                Mode::Trading
            }
            Command::Help => {
                events.push(GameEvent::Help(HELP_LINES.to_vec()));
                Mode::Trading
            }
            Command::Quit => end(Ending::Quit, events),
            other => {
                events.push(GameEvent::Rejected(GameError::InvalidCommand(format!(
                    "{} (name an item to trade, or cancel)",
                    command_word(&other)
                ))));
                Mode::Trading
            }
        }
    }
}

fn end(ending: Ending, events: &mut Vec<GameEvent>) -> Mode {
    tracing::info!(?ending, "session over");
    events.push(GameEvent::Ended(ending.error()));
    Mode::Over(ending)
}

fn action_word(action: CombatAction) -> &'static str {
    match action {
        CombatAction::Attack => "attack",
        CombatAction::Heal => "heal",
        CombatAction::Flee => "flee",
        CombatAction::Block => "block",
        CombatAction::Special => "special",
    }
}

fn command_word(command: &Command) -> &'static str {
    match command {
        Command::Move(_) => "move",
        Command::Explore => "explore",
        Command::Inventory => "inventory",
        Command::Use(_) => "use",
        Command::Status => "status",
        Command::Scan => "scan",
        Command::Map => "map",
        Command::Help => "help",
        Command::Quit => "quit",
        Command::Act(action) => action_word(*action),
        Command::Trade(_) => "trade",
        Command::Cancel => "cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;
    use crate::world::{Direction, Tile};

    fn session_on(tile: Tile, class: PlayerClass, dice: ScriptedDice) -> Session<ScriptedDice> {
        let mut tiles = vec![Tile::Empty; 9];
        tiles[4] = tile;
        let map = WorldMap::from_tiles(3, 3, tiles, Position::new(1, 1)).unwrap();
        Session::new(class, map, dice)
    }

    #[test]
    fn test_combat_action_outside_combat_is_invalid() {
        let mut session = session_on(Tile::Empty, PlayerClass::Warrior, ScriptedDice::new());
        let response = session.handle(Command::Act(CombatAction::Attack));
        assert_eq!(
            response.events,
            vec![GameEvent::Rejected(GameError::InvalidCommand("attack".into()))]
        );
        assert_eq!(response.status.mode, ModeKind::Exploring);
    }

    #[test]
    fn test_explore_combat_tile_enters_combat() {
        let mut session = session_on(Tile::Combat, PlayerClass::Warrior, ScriptedDice::new());
        let response = session.handle(Command::Explore);
        assert_eq!(response.status.mode, ModeKind::InCombat);
        assert_eq!(
            response.status.enemy,
            Some(EnemyStatus {
                name: "Piaskowy robak",
                hp: 60
            })
        );
        assert!(matches!(
            response.events.last(),
            Some(GameEvent::Combat(CombatEvent::Engaged { .. }))
        ));
    }

    #[test]
    fn test_non_combat_command_in_combat_changes_nothing() {
        let mut session = session_on(Tile::Combat, PlayerClass::Warrior, ScriptedDice::new());
        session.handle(Command::Explore);
        let response = session.handle(Command::Move(Direction::North));
        assert!(matches!(
            response.events[..],
            [GameEvent::Rejected(GameError::InvalidCommand(_))]
        ));
        assert_eq!(response.status.hp, 120);
        assert_eq!(response.status.enemy.map(|e| e.hp), Some(60));
    }

    #[test]
    fn test_win_returns_to_exploring_and_clears_tile() {
        let mut session = session_on(Tile::Combat, PlayerClass::Warrior, ScriptedDice::new());
        session.handle(Command::Explore);
        let mut last = None;
        for _ in 0..6 {
            let response = session.handle(Command::Act(CombatAction::Attack));
            if response.status.mode == ModeKind::Exploring {
                last = Some(response);
                break;
            }
        }
        let response = last.expect("fight should end within six rounds");
        assert!(response
            .events
            .contains(&GameEvent::Combat(CombatEvent::EnemyDefeated {
                enemy: "Piaskowy robak",
                xp: 50
            })));
        assert_eq!(session.world().current_tile(), Tile::Empty);
        assert_eq!(session.player().xp, 50);
    }

    #[test]
    fn test_quit_ends_and_stays_over() {
        let mut session = session_on(Tile::Empty, PlayerClass::Nomad, ScriptedDice::new());
        let response = session.handle(Command::Quit);
        assert!(response.is_over());
        assert_eq!(response.status.mode, ModeKind::Over(Ending::Quit));

        let after = session.handle(Command::Explore);
        assert!(after.is_over());
        assert_eq!(after.events, vec![GameEvent::Ended(GameError::TerminalQuit)]);
    }

    #[test]
    fn test_trade_flow() {
        let dice = ScriptedDice::new().with_picks([0, 0, 4]);
        let mut session = session_on(Tile::Npc, PlayerClass::Nomad, dice);
        let response = session.handle(Command::Explore);
        assert_eq!(response.status.mode, ModeKind::Trading);

        let response = session.handle(Command::Trade("Mega medykit".into()));
        assert!(matches!(
            response.events[..],
            [GameEvent::Rejected(GameError::InvalidTarget(_))]
        ));
        assert_eq!(response.status.mode, ModeKind::Trading);

        let response = session.handle(Command::Inventory);
        assert_eq!(response.status.mode, ModeKind::Trading);
        let GameEvent::Inventory(report) = &response.events[0] else {
            panic!("expected an inventory report");
        };
        assert_eq!(report.items, vec![(ItemId::Rusks, 2)]);

        let response = session.handle(Command::Status);
        assert!(matches!(response.events[..], [GameEvent::Status(_)]));
        assert_eq!(response.status.mode, ModeKind::Trading);

        let response = session.handle(Command::Map);
        assert!(matches!(
            response.events[..],
            [GameEvent::Rejected(GameError::InvalidCommand(_))]
        ));
        assert_eq!(response.status.mode, ModeKind::Trading);

        let response = session.handle(Command::Trade("suchary".into()));
        assert_eq!(response.status.mode, ModeKind::Exploring);
        assert_eq!(session.player().inventory.count(ItemId::PowerElixir), 1);
        assert_eq!(session.player().inventory.count(ItemId::Rusks), 1);
    }

    #[test]
    fn test_use_and_scan_errors_are_recoverable() {
        let mut session = session_on(Tile::Empty, PlayerClass::Warrior, ScriptedDice::new());
        let response = session.handle(Command::Use("Nano tarcza".into()));
        assert!(matches!(
            response.events[..],
            [GameEvent::Rejected(GameError::InvalidTarget(_))]
        ));
        for _ in 0..3 {
            session.handle(Command::Scan);
        }
        let response = session.handle(Command::Scan);
        assert!(matches!(
            response.events[..],
            [GameEvent::Rejected(GameError::OutOfResource(_))]
        ));
        assert!(!response.is_over());
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::Rejected(GameError::InvalidCommand("dance".into()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Rejected");
        assert_eq!(json["data"]["kind"], "InvalidCommand");
    }
}
