//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt Auth- und Bericht-Logik von der
//! konkreten Datenbank. Implementiert wird es von [`crate::SqliteDb`];
//! Tests nutzen dieselben Traits gegen eine In-Memory-Datenbank.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{BerichtRecord, KontoRecord, KontoUpdate, NeuerBericht, NeuesKontoRecord};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatenbankKonfiguration {
    /// Verbindungs-URL (z.B. "sqlite://schulfit.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatenbankKonfiguration {
    fn default() -> Self {
        Self {
            url: "sqlite://schulfit.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Konten-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait KontenRepository: Send + Sync {
    /// Legt ein neues Konto an
    async fn erstellen(&self, data: NeuesKontoRecord<'_>) -> DbResult<KontoRecord>;

    /// Laedt ein Konto anhand seiner ID
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>>;

    /// Laedt ein Konto anhand der E-Mail-Adresse (Login-Schluessel)
    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>>;

    /// Aktualisiert die gesetzten Felder eines Kontos
    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord>;

    /// Loescht ein Konto
    async fn loeschen(&self, id: Uuid) -> DbResult<bool>;

    /// Listet Konten, optional nur aktive
    async fn liste(&self, nur_aktive: bool) -> DbResult<Vec<KontoRecord>>;

    /// Setzt den Zeitpunkt des letzten Logins
    async fn update_last_login(&self, id: Uuid) -> DbResult<()>;
}

/// Repository fuer Gesundheitsberichte
#[allow(async_fn_in_trait)]
pub trait BerichtRepository: Send + Sync {
    /// Legt einen neuen Bericht an
    async fn erstellen(&self, data: NeuerBericht<'_>) -> DbResult<BerichtRecord>;

    /// Laedt einen Bericht anhand seiner ID
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BerichtRecord>>;

    /// Alle Berichte eines Kontos, neueste zuerst
    async fn fuer_konto(&self, konto_id: Uuid) -> DbResult<Vec<BerichtRecord>>;

    /// Alle Berichte einer Klasse, optional auf einen Tag gefiltert
    async fn fuer_klasse(
        &self,
        klasse: &str,
        tag: Option<NaiveDate>,
    ) -> DbResult<Vec<BerichtRecord>>;

    /// Traegt die Lehrer-Antwort zu einem Bericht ein
    async fn beantworten(
        &self,
        id: Uuid,
        lehrer_id: Uuid,
        antwort: &str,
    ) -> DbResult<BerichtRecord>;
}
