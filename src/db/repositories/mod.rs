//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod contest_repo;
pub mod entry_repo;
pub mod training_repo;

pub use contest_repo::ContestRepository;
pub use entry_repo::EntryRepository;
pub use training_repo::TrainingRepository;
