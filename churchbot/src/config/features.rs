//! Feature flags deciding which optional handlers get registered.

use std::env;
use std::time::Duration;

use super::base::{env_flag, env_parse};

#[derive(Debug, Clone)]
pub struct Features {
    /// ENABLE_TRANSLATION: registers /tran
    pub translation: bool,
    /// ENABLE_QUIZ: registers /quiz and its answer callbacks
    pub quiz: bool,
    /// ENABLE_BROADCAST: registers /broadcast and /broadcast_users
    pub broadcast: bool,
    /// ENABLE_SCHEDULER: starts the periodic task runner
    pub scheduler: bool,
    /// DAILY_INSPIRATION_INTERVAL_SECS: period of the group inspiration post; unset disables it
    pub daily_inspiration_interval_secs: Option<u64>,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            translation: true,
            quiz: true,
            broadcast: true,
            scheduler: true,
            daily_inspiration_interval_secs: None,
        }
    }
}

impl Features {
    pub fn from_env() -> Self {
        let interval = env::var("DAILY_INSPIRATION_INTERVAL_SECS")
            .ok()
            .map(|_| env_parse("DAILY_INSPIRATION_INTERVAL_SECS", 0u64))
            .filter(|secs| *secs > 0);
        Self {
            translation: env_flag("ENABLE_TRANSLATION", true),
            quiz: env_flag("ENABLE_QUIZ", true),
            broadcast: env_flag("ENABLE_BROADCAST", true),
            scheduler: env_flag("ENABLE_SCHEDULER", true),
            daily_inspiration_interval_secs: interval,
        }
    }

    /// Period of the scheduled inspiration post, if the scheduler and broadcasting are both on.
    pub fn daily_inspiration_interval(&self) -> Option<Duration> {
        if !(self.scheduler && self.broadcast) {
            return None;
        }
        self.daily_inspiration_interval_secs.map(Duration::from_secs)
    }
}
