use std::sync::Arc;

use crate::core::AppConfig;
use crate::natural::{Interpreter, RuleBasedInterpreter};
use crate::store::TaskStore;

pub struct AppState {
    pub store: TaskStore,
    // Arc so handlers can interpret without holding the state lock
    // across an await.
    pub interpreter: Arc<dyn Interpreter>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_interpreter(config, Arc::new(RuleBasedInterpreter))
    }

    pub fn with_interpreter(config: AppConfig, interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            store: TaskStore::default(),
            interpreter,
            config,
        }
    }
}
