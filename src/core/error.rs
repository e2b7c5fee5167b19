//! Error taxonomy shared by every command handler.

use serde::Serialize;
use thiserror::Error;

/// Everything a single command or combat turn can fail with.
///
/// The first three are recoverable: the session reports them and keeps
/// going. The terminal variants end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum GameError {
    #[error("I don't understand \"{0}\".")]
    InvalidCommand(String),
    #[error("{0}")]
    InvalidTarget(String),
    #[error("{0}")]
    OutOfResource(String),
    #[error("You have died. Your journey ends here.")]
    TerminalDefeat,
    #[error("Game over. See you in the wastes.")]
    TerminalQuit,
}

impl GameError {
    pub fn invalid_target(message: impl Into<String>) -> Self {
        GameError::InvalidTarget(message.into())
    }

    pub fn out_of_resource(message: impl Into<String>) -> Self {
        GameError::OutOfResource(message.into())
    }

    /// True for errors that end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameError::TerminalDefeat | GameError::TerminalQuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(GameError::TerminalDefeat.is_terminal());
        assert!(GameError::TerminalQuit.is_terminal());
        assert!(!GameError::InvalidCommand("dance".into()).is_terminal());
        assert!(!GameError::out_of_resource("no charges").is_terminal());
        assert!(!GameError::invalid_target("no such item").is_terminal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::InvalidCommand("dance".into()).to_string(),
            "I don't understand \"dance\"."
        );
        assert_eq!(
            GameError::invalid_target("You can't go any further.").to_string(),
            "You can't go any further."
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(GameError::out_of_resource("empty")).unwrap();
        assert_eq!(json["kind"], "OutOfResource");
        assert_eq!(json["message"], "empty");
    }
}
