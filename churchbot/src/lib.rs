//! # churchbot
//!
//! Church community Telegram bot. Wires the JSON stores, the command router with its admin gate,
//! broadcast fan-out, the membership reconciler, and the session orchestrator that keeps the
//! Telegram long-polling session alive.

pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod fanout;
pub mod gate;
pub mod handlers;
pub mod reconciler;
pub mod replies;
pub mod router;
pub mod runner;
pub mod scheduler;
pub mod session;
pub mod telegram;
pub mod translate;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_router, open_stores, BotComponents};
pub use config::{BaseConfig, BotConfig, Features, SessionConfig};
pub use dispatcher::UpdateDispatcher;
pub use fanout::{fan_out, Audience, FanoutReport};
pub use gate::AdminGate;
pub use reconciler::{MembershipReconciler, Reconciliation};
pub use router::CommandRouter;
pub use runner::{init_data, run_bot};
pub use scheduler::Scheduler;
pub use session::{
    Gateway, RetryPolicy, SessionExit, SessionFault, SessionOrchestrator, SessionState, Teardown,
};
pub use translate::{GoogleTranslator, Translator};
