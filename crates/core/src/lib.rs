//! Domain logic for the Daily Wins tracker.
//!
//! Pure, I/O-free building blocks shared by the db and api crates:
//! shared types, the domain error enum, field validation, the 1-10 mood
//! scale, weekly/monthly calendar computation, and win-text formatting.

pub mod calendar;
pub mod error;
pub mod mood;
pub mod types;
pub mod validation;
pub mod wins;
