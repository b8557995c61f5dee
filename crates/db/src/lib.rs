//! schulfit-db: Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern fuer Schulfit bereit:
//! - [`KontenRepository`] fuer Benutzerkonten (Schueler, Lehrer, Admins)
//! - [`BerichtRepository`] fuer taegliche Gesundheitsberichte
//!
//! Die konkrete Implementierung laeuft ueber SQLite (WAL-Modus, optional
//! in-memory fuer Tests). Die Geschaeftslogik in `schulfit-auth` und
//! `schulfit-berichte` kennt nur die Traits.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::{
    BerichtRecord, KontoRecord, KontoUpdate, NeuerBericht, NeuesKontoRecord,
};
pub use repository::{BerichtRepository, DatenbankKonfiguration, KontenRepository};
pub use sqlite::SqliteDb;
