//! Turning free-text prompts into scheduling commands.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::scheduler::goals::GoalSpec;
use crate::store::TaskDraft;

mod rules;

pub use rules::RuleBasedInterpreter;

/// A change to the task list derived from a prompt.
#[derive(Debug, Clone)]
pub enum Command {
    AddTask(TaskDraft),
    AddGoal(GoalSpec),
}

/// Interprets a natural-language prompt into commands.
///
/// Async so an implementation backed by a remote model can slot in
/// without changing the intake endpoint.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, prompt: &str, today: NaiveDate) -> Result<Vec<Command>>;
}
