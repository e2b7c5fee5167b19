//! Engine plumbing: randomness, errors, config, input and the session loop.

pub mod config;
pub mod constants;
pub mod dice;
pub mod error;
pub mod input;
pub mod session;

pub use config::{parse_args, CliOptions, ConfigError, GameConfig};
pub use dice::{Dice, ScriptedDice};
pub use error::GameError;
pub use input::{fold_key, parse_command, parse_trade, Command};
pub use session::{Ending, GameEvent, ModeKind, Response, Session, SessionStatus};
