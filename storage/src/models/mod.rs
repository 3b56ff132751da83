//! Persisted record types.

mod prayer_request;

pub use prayer_request::PrayerRequest;
