//! Command handlers: user commands, id-roster management, broadcasts and events, quiz,
//! translation, and the plain-text user tracker.

mod admin;
mod quiz;
mod roster;
mod tracker;
mod translate;
mod user;

pub use admin::{AddEventHandler, BroadcastHandler, ClearEventsHandler};
pub use quiz::{QuizHandler, QuizProgress, QuizQuestion, QUIZ_LABELS, QUIZ_QUESTIONS_FILE};
pub use roster::{AddIdHandler, ListIdsHandler, RemoveIdHandler};
pub use tracker::UserTracker;
pub use translate::TranslateHandler;
pub use user::{
    ChatIdHandler, EventsHandler, MyIdHandler, PrayerHandler, PrayerListHandler, StaticReplyHandler,
};
