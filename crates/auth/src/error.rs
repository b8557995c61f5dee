//! Fehlertypen fuer den Auth-Kern
//!
//! Die Taxonomie unterscheidet drei Arten:
//! - Abweisungen (falsche Anmeldedaten, gesperrtes Konto): erwartete,
//!   lokal behandelte Negativergebnisse, der Kern meldet sie als
//!   `Ok(false)`, nie als Fehler
//! - Validierungsfehler: der Antrag erreicht den Store gar nicht erst
//! - Transport-/Speicherfehler: Datenbank oder Session-Datei nicht
//!   erreichbar, fuer den Aufrufer getrennt sichtbar

use thiserror::Error;

use schulfit_core::ValidierungsFehler;
use schulfit_db::DbError;

/// Alle moeglichen Fehler im Auth-Kern
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Authentifizierung ---
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Konto gesperrt")]
    KontoGesperrt,

    // --- Kontoverwaltung ---
    #[error("E-Mail bereits vergeben: {0}")]
    EmailVergeben(String),

    // --- Validierung ---
    #[error("Validierung fehlgeschlagen: {0}")]
    Validierung(#[from] ValidierungsFehler),

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Session-Persistenz ---
    #[error("Session-Speicher nicht schreibbar: {0}")]
    SessionSpeicher(String),

    // --- Datenbank / Transport ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] DbError),
}

impl AuthError {
    /// Gibt true zurueck wenn es sich um eine erwartete Abweisung handelt
    /// (und nicht um einen Transport- oder Programmfehler)
    pub fn ist_abweisung(&self) -> bool {
        matches!(self, Self::UngueltigeAnmeldedaten | Self::KontoGesperrt)
    }
}

/// Result-Alias fuer den Auth-Kern
pub type AuthResult<T> = Result<T, AuthError>;
