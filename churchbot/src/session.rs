//! # Session orchestrator
//!
//! Keeps the gateway session alive: `Starting → Listening`, transient faults go through `Backoff`
//! and back to `Starting`, anything else ends in `Terminated`. Auxiliary background work is torn
//! down exactly once, whatever the reason for termination.
//!
//! The attempt counter is lifetime-scoped: a healthy listening period does not reset it, so a
//! process that flaps `max_retries` times over its whole life exits even if every outage was short.

use async_trait::async_trait;
use churchbot_core::BotError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Fault reported by the gateway while establishing or running the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionFault {
    /// Connection-level failure; retried after a backoff.
    #[error("Network fault: {0}")]
    Network(String),

    /// Anything else; fatal.
    #[error("Unexpected fault: {0}")]
    Unexpected(String),
}

impl SessionFault {
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionFault::Network(_))
    }
}

impl From<BotError> for SessionFault {
    fn from(err: BotError) -> Self {
        if err.is_transient() {
            SessionFault::Network(err.to_string())
        } else {
            SessionFault::Unexpected(err.to_string())
        }
    }
}

/// Establishes and runs one session with the messaging gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Establishes the session (e.g. verifies the token and drops pending updates).
    async fn connect(&self) -> Result<(), SessionFault>;

    /// Listens until the listener stops. Must return once `cancel` fires; `Ok(())` means a clean
    /// stop, including one caused by `cancel`.
    async fn listen(&self, cancel: CancellationToken) -> Result<(), SessionFault>;
}

/// Stops auxiliary background work. Must be idempotent and must not fail.
#[async_trait]
pub trait Teardown: Send + Sync {
    async fn teardown(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Starting,
    Listening,
    Backoff,
    Terminated,
}

/// Why the orchestrator terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// Cancelled externally or the listener stopped cleanly.
    Stopped,
    /// A transient fault arrived after the retry budget was spent.
    RetriesExhausted,
    /// A non-transient fault.
    Fatal,
}

impl SessionExit {
    /// Process exit code: 0 for a clean stop, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionExit::Stopped => 0,
            SessionExit::RetriesExhausted | SessionExit::Fatal => 1,
        }
    }
}

/// Linear backoff: the n-th wait is `backoff_base × n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of backoff waits allowed over the life of the orchestrator.
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }
}

enum SessionEnd {
    Cancelled,
    Stopped,
    Fault(SessionFault),
}

/// Drives a [`Gateway`] through the connect / listen / backoff cycle.
pub struct SessionOrchestrator {
    gateway: Arc<dyn Gateway>,
    teardown: Arc<dyn Teardown>,
    policy: RetryPolicy,
    cancel: CancellationToken,
    state: SessionState,
    attempts: u32,
    torn_down: bool,
}

impl SessionOrchestrator {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        teardown: Arc<dyn Teardown>,
        policy: RetryPolicy,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            gateway,
            teardown,
            policy,
            cancel,
            state: SessionState::Starting,
            attempts: 0,
            torn_down: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Backoff waits taken so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Runs until termination and returns the reason. Teardown has run when this returns.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> SessionExit {
        loop {
            self.state = SessionState::Starting;
            info!(attempts = self.attempts, "Starting session");

            let fault = match self.run_session().await {
                SessionEnd::Cancelled => {
                    info!("Session cancelled");
                    return self.terminate(SessionExit::Stopped).await;
                }
                SessionEnd::Stopped => {
                    info!("Listener stopped without a fault");
                    return self.terminate(SessionExit::Stopped).await;
                }
                SessionEnd::Fault(fault) => fault,
            };

            if !fault.is_transient() {
                error!(error = %fault, "Unexpected session fault");
                return self.terminate(SessionExit::Fatal).await;
            }

            self.state = SessionState::Backoff;
            if self.attempts >= self.policy.max_retries {
                error!(
                    error = %fault,
                    attempts = self.attempts,
                    "Network fault after retry budget exhausted"
                );
                return self.terminate(SessionExit::RetriesExhausted).await;
            }

            self.attempts += 1;
            let delay = self.policy.delay_for(self.attempts);
            warn!(
                error = %fault,
                attempt = self.attempts,
                max_retries = self.policy.max_retries,
                delay_secs = delay.as_secs_f64(),
                "Network fault, backing off"
            );

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!("Cancelled during backoff");
                    return self.terminate(SessionExit::Stopped).await;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn run_session(&mut self) -> SessionEnd {
        let connected = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return SessionEnd::Cancelled,
            result = self.gateway.connect() => result,
        };
        if let Err(fault) = connected {
            return SessionEnd::Fault(fault);
        }

        self.state = SessionState::Listening;
        info!("Session established, listening");

        match self.gateway.listen(self.cancel.clone()).await {
            Ok(()) if self.cancel.is_cancelled() => SessionEnd::Cancelled,
            Ok(()) => SessionEnd::Stopped,
            Err(fault) => SessionEnd::Fault(fault),
        }
    }

    async fn terminate(&mut self, exit: SessionExit) -> SessionExit {
        if !self.torn_down {
            self.torn_down = true;
            debug!("Running teardown");
            self.teardown.teardown().await;
        }
        self.state = SessionState::Terminated;
        info!(exit = ?exit, code = exit.exit_code(), "Session terminated");
        exit
    }
}
