pub mod category_repo;
pub mod entry_repo;
pub mod session_repo;
pub mod sticky_note_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use entry_repo::EntryRepo;
pub use session_repo::SessionRepo;
pub use sticky_note_repo::StickyNoteRepo;
pub use user_repo::UserRepo;
