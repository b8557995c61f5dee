//! Konto-Store-Schnittstelle
//!
//! Der Auth-Kern spricht nie direkt mit einer Konto-Quelle, sondern immer
//! ueber diesen Trait. Beide Varianten, die Demo-Kontoliste und das
//! Datenbank-Backend, liegen hinter derselben asynchronen Schnittstelle,
//! damit der Kern (und seine Tests) sie austauschbar behandeln koennen.

use async_trait::async_trait;

use schulfit_core::{Identitaet, NeuesKonto};

use crate::error::AuthResult;

/// Konto-Verwaltung: Anmeldung, Registrierung, serverseitige Session
#[async_trait]
pub trait KontoStore: Send + Sync {
    /// Prueft E-Mail/Passwort und gibt die zugehoerige Identitaet zurueck
    ///
    /// Falsche Anmeldedaten sind `AuthError::UngueltigeAnmeldedaten`,
    /// ein gesperrtes Konto `AuthError::KontoGesperrt`. Alles andere ist
    /// ein Transportfehler.
    async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Identitaet>;

    /// Legt ein neues Konto an, ohne die aktive Session zu beruehren
    ///
    /// Wird vom Admin zur Provisionierung genutzt: der Admin bleibt
    /// danach selbst angemeldet.
    async fn registrieren(&self, antrag: &NeuesKonto) -> AuthResult<Identitaet>;

    /// Gibt die Identitaet der aktuellen serverseitigen Session zurueck,
    /// falls eine existiert
    async fn aktuelle_session(&self) -> AuthResult<Option<Identitaet>>;

    /// Beendet die serverseitige Session (idempotent)
    async fn session_beenden(&self) -> AuthResult<()>;
}
