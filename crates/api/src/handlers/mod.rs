pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod day;
pub mod entries;
pub mod quick;
pub mod sticky_notes;
