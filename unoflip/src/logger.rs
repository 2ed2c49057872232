use std::error::Error;

use strum_macros::Display;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ActionType {
    PlayCard,
    DrawCard,
    PassTurn,
    CallUno,
    UnoPenalty,
    ChooseColor,
    ChoosePlayer,
    RoundWon,
    RoundTied,
    NewRound,
}

/// Audit trail for a match. The engine never depends on a call succeeding.
pub trait GameLogger {
    fn log_action(
        &self,
        player_name: &str,
        action: ActionType,
        card_details: &str,
        extra_info: &str,
    );

    fn log_error(&self, context: &str, error: &dyn Error);
}

/// Forwards audit records to `tracing` under the `audit` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl GameLogger for TracingLogger {
    fn log_action(
        &self,
        player_name: &str,
        action: ActionType,
        card_details: &str,
        extra_info: &str,
    ) {
        tracing::info!(
            target: "audit",
            player = player_name,
            %action,
            card = card_details,
            extra = extra_info,
        );
    }

    fn log_error(&self, context: &str, error: &dyn Error) {
        tracing::warn!(target: "audit", context, %error);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl GameLogger for NoopLogger {
    fn log_action(&self, _: &str, _: ActionType, _: &str, _: &str) {}

    fn log_error(&self, _: &str, _: &dyn Error) {}
}

/// Told that something changed; reads the new state back from the game.
pub trait GameObserver {
    fn on_game_update(&mut self);
}
