//! End-of-game conditions checked after each turn advance.

use kessler_core::enums::GameOverReason;

#[derive(Debug, Clone, Copy)]
pub struct TerminalInput {
    pub budget: i64,
    pub step: u64,
    pub max_steps: u64,
    pub debris_count: usize,
    pub debris_limit: usize,
}

/// First satisfied terminal condition, checked budget, turns, then debris.
pub fn check(input: &TerminalInput) -> Option<GameOverReason> {
    if input.budget < 0 {
        Some(GameOverReason::BudgetDepleted)
    } else if input.step >= input.max_steps {
        Some(GameOverReason::MaxTurnsReached)
    } else if input.debris_count > input.debris_limit {
        Some(GameOverReason::DebrisLimitExceeded)
    } else {
        None
    }
}
