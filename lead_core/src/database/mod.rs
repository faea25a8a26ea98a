pub mod connection;
pub mod migrations;
pub mod repository;

pub use connection::{DatabaseManager, get_database_pool};
pub use migrations::{MigrationManager, run_migrations};
pub use repository::LeadRepository;
