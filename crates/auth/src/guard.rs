//! Route-Guard: Entscheidung fuer rollengeschuetzte Ansichten
//!
//! Reine Funktion ueber dem Kern-Zustand. Waehrend der
//! Identitaetsaufloesung wird die Entscheidung zurueckgehalten, damit
//! ein Neustart nicht kurz zum Login umleitet und gleich wieder zurueck.
//!
//! Falsche Rolle und fehlende Anmeldung muenden bewusst in dieselbe
//! Umleitung: ein angemeldeter Benutzer mit falscher Rolle erfaehrt
//! nicht, dass die Ansicht existiert.

use schulfit_core::RollenArt;

use crate::kern::AuthZustand;

/// Ergebnis der Guard-Entscheidung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardEntscheidung {
    /// Geschuetzten Inhalt anzeigen
    Anzeigen,
    /// Zum Login umleiten
    ZumLoginUmleiten,
    /// Aufloesung laeuft noch, Platzhalter anzeigen
    LadeAnzeige,
}

/// Entscheidet, ob eine Ansicht fuer den aktuellen Zustand gezeigt wird
///
/// `erforderliche_rolle = None` verlangt nur eine Anmeldung.
pub fn pruefen(
    zustand: &AuthZustand,
    erforderliche_rolle: Option<RollenArt>,
) -> GuardEntscheidung {
    match zustand {
        AuthZustand::Uninitialisiert | AuthZustand::Laedt => GuardEntscheidung::LadeAnzeige,
        AuthZustand::Anonym => GuardEntscheidung::ZumLoginUmleiten,
        AuthZustand::Angemeldet(identitaet) => match erforderliche_rolle {
            None => GuardEntscheidung::Anzeigen,
            Some(rolle) if identitaet.rollen_art() == rolle => GuardEntscheidung::Anzeigen,
            Some(_) => GuardEntscheidung::ZumLoginUmleiten,
        },
    }
}
