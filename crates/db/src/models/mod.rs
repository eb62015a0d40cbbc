pub mod category;
pub mod entry;
pub mod session;
pub mod sticky_note;
pub mod user;
