//! SQLite Connection Pool mit WAL-Modus
//!
//! Das Schema wird beim Oeffnen direkt angelegt (idempotente
//! CREATE TABLE IF NOT EXISTS Statements), es gibt keine externe
//! Migrationshistorie.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::error::DbError;
use crate::repository::DatenbankKonfiguration;

/// Wrapper um den SQLite Connection Pool
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

impl SqliteDb {
    /// Erstellt einen neuen Pool und legt das Schema an
    pub async fn oeffnen(config: &DatenbankKonfiguration) -> Result<Self, DbError> {
        let opts = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(if config.sqlite_wal {
                SqliteJournalMode::Wal
            } else {
                SqliteJournalMode::Delete
            })
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_verbindungen)
            .connect_with(opts)
            .await?;

        info!(url = %config.url, wal = config.sqlite_wal, "SQLite-Pool geoeffnet");

        let db = Self { pool };
        db.schema_anlegen().await?;

        Ok(db)
    }

    /// Erstellt eine In-Memory-Datenbank fuer Tests
    pub async fn in_memory() -> Result<Self, DbError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            // In-Memory benoetigt mindestens 1 persistente Verbindung
            .min_connections(1)
            .connect_with(opts)
            .await?;

        let db = Self { pool };
        db.schema_anlegen().await?;
        Ok(db)
    }

    /// Legt die Tabellen an, falls sie noch nicht existieren
    pub async fn schema_anlegen(&self) -> Result<(), DbError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS konten (
                id            TEXT PRIMARY KEY,
                email         TEXT NOT NULL UNIQUE,
                name          TEXT NOT NULL,
                passwort_hash TEXT NOT NULL,
                rolle         TEXT NOT NULL,
                klasse        TEXT,
                created_at    TEXT NOT NULL,
                last_login    TEXT,
                is_active     INTEGER NOT NULL DEFAULT 1
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            // konto_id ist bewusst keine Fremdschluessel-Spalte: im
            // Demo-Modus liegen die Konten nicht in dieser Datenbank
            "CREATE TABLE IF NOT EXISTS berichte (
                id                 TEXT PRIMARY KEY,
                konto_id           TEXT NOT NULL,
                klasse             TEXT NOT NULL,
                temperatur_celsius REAL NOT NULL,
                gewicht_kg         REAL NOT NULL,
                groesse_cm         REAL NOT NULL,
                stimmung           TEXT NOT NULL,
                beschwerde         TEXT,
                gemeldet_am        TEXT NOT NULL,
                antwort            TEXT,
                beantwortet_von    TEXT,
                beantwortet_am     TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_berichte_klasse
             ON berichte (klasse, gemeldet_am)",
        )
        .execute(&self.pool)
        .await?;

        info!("Datenbank-Schema angelegt");
        Ok(())
    }

    /// Gibt den internen Pool zurueck (fuer Tests)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
