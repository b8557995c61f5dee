//! Validierungsfehler fuer Domaenen-Typen
//!
//! Validierungsfehler sind von Anmeldefehlern getrennt: ein abgelehnter
//! Kontoantrag erreicht den Konto-Store gar nicht erst.

use thiserror::Error;

use crate::identitaet::RollenArt;

/// Fehler bei der Validierung von Domaenen-Typen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidierungsFehler {
    #[error("Klassenzuweisung fehlt fuer Rolle '{0}'")]
    KlasseFehlt(RollenArt),

    #[error("Klassenbezeichnung darf nicht leer sein")]
    KlasseLeer,

    #[error("Pflichtfeld '{0}' darf nicht leer sein")]
    FeldLeer(&'static str),

    #[error("Unbekannte Rolle: {0}")]
    UnbekannteRolle(String),
}
