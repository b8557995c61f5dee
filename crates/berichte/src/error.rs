//! Fehlertypen fuer Gesundheitsberichte

use thiserror::Error;

use schulfit_db::DbError;

/// Alle moeglichen Fehler im Bericht-Service
#[derive(Debug, Error)]
pub enum BerichtFehler {
    #[error("Zugriff verweigert: {0}")]
    ZugriffVerweigert(String),

    #[error("Ungueltige Werte: {0}")]
    UngueltigeWerte(String),

    #[error("Bericht nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] DbError),
}

impl BerichtFehler {
    pub fn zugriff(msg: impl Into<String>) -> Self {
        Self::ZugriffVerweigert(msg.into())
    }

    pub fn werte(msg: impl Into<String>) -> Self {
        Self::UngueltigeWerte(msg.into())
    }
}

/// Result-Alias fuer den Bericht-Service
pub type BerichtResult<T> = Result<T, BerichtFehler>;
