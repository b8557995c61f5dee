//! SQLite-Implementierungen der Repository-Traits

pub mod berichte;
pub mod konten;
pub mod pool;

pub use pool::SqliteDb;
