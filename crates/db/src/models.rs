//! Datenbankmodelle fuer Schulfit
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank. Sie sind von
//! den Domaenen-Typen getrennt: Rolle und Klasse liegen hier als lose
//! Strings vor und werden erst in [`KontoRecord::als_identitaet`] gegen
//! das strikte Rollen-Modell validiert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schulfit_core::{Identitaet, Klasse, Rolle, RollenArt};

use crate::error::DbError;

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub passwort_hash: String,
    /// Draht-Name der Rolle ("student" | "teacher" | "admin")
    pub rolle: String,
    pub klasse: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl KontoRecord {
    /// Validiert den Datensatz in eine Domaenen-Identitaet
    ///
    /// Ein Datensatz mit unbekannter Rolle oder fehlender Klasse ist ein
    /// Datenfehler, kein Anmeldefehler.
    pub fn als_identitaet(&self) -> Result<Identitaet, DbError> {
        let art: RollenArt = self
            .rolle
            .parse()
            .map_err(|e| DbError::ungueltige_daten(format!("Konto {}: {e}", self.id)))?;
        let klasse = self
            .klasse
            .as_deref()
            .map(Klasse::neu)
            .transpose()
            .map_err(|e| DbError::ungueltige_daten(format!("Konto {}: {e}", self.id)))?;
        let rolle = Rolle::zusammensetzen(art, klasse)
            .map_err(|e| DbError::ungueltige_daten(format!("Konto {}: {e}", self.id)))?;

        Ok(Identitaet {
            id: self.id.into(),
            name: self.name.clone(),
            email: self.email.clone(),
            rolle,
        })
    }
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKontoRecord<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub passwort_hash: &'a str,
    pub rolle: &'a str,
    pub klasse: Option<&'a str>,
}

/// Daten zum Aktualisieren eines Kontos
#[derive(Debug, Clone, Default)]
pub struct KontoUpdate {
    pub name: Option<String>,
    pub passwort_hash: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Gesundheitsberichte
// ---------------------------------------------------------------------------

/// Gesundheitsbericht-Datensatz aus der Datenbank
///
/// Die Lehrer-Antwort haengt direkt am Bericht: `antwort`,
/// `beantwortet_von` und `beantwortet_am` sind gemeinsam gesetzt oder
/// gemeinsam leer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BerichtRecord {
    pub id: Uuid,
    /// Konto des meldenden Schuelers
    pub konto_id: Uuid,
    /// Klasse zum Meldezeitpunkt (denormalisiert fuer die Lehrer-Ansicht)
    pub klasse: String,
    pub temperatur_celsius: f64,
    pub gewicht_kg: f64,
    pub groesse_cm: f64,
    /// Draht-Name der Stimmung
    pub stimmung: String,
    pub beschwerde: Option<String>,
    pub gemeldet_am: DateTime<Utc>,
    pub antwort: Option<String>,
    pub beantwortet_von: Option<Uuid>,
    pub beantwortet_am: Option<DateTime<Utc>>,
}

impl BerichtRecord {
    /// Gibt true zurueck wenn bereits eine Lehrer-Antwort vorliegt
    pub fn ist_beantwortet(&self) -> bool {
        self.antwort.is_some()
    }
}

/// Daten zum Erstellen eines neuen Gesundheitsberichts
#[derive(Debug, Clone)]
pub struct NeuerBericht<'a> {
    pub konto_id: Uuid,
    pub klasse: &'a str,
    pub temperatur_celsius: f64,
    pub gewicht_kg: f64,
    pub groesse_cm: f64,
    pub stimmung: &'a str,
    pub beschwerde: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rolle: &str, klasse: Option<&str>) -> KontoRecord {
        KontoRecord {
            id: Uuid::new_v4(),
            email: "x@schule.de".into(),
            name: "Testkonto".into(),
            passwort_hash: "hash".into(),
            rolle: rolle.into(),
            klasse: klasse.map(Into::into),
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
        }
    }

    #[test]
    fn schueler_record_wird_identitaet() {
        let identitaet = record("student", Some("6A")).als_identitaet().unwrap();
        assert_eq!(identitaet.rollen_art(), RollenArt::Schueler);
        assert_eq!(identitaet.klasse().unwrap().als_str(), "6A");
    }

    #[test]
    fn admin_record_ohne_klasse() {
        let identitaet = record("admin", None).als_identitaet().unwrap();
        assert_eq!(identitaet.rollen_art(), RollenArt::Admin);
        assert!(identitaet.klasse().is_none());
    }

    #[test]
    fn unbekannte_rolle_ist_datenfehler() {
        let ergebnis = record("wizard", None).als_identitaet();
        assert!(matches!(ergebnis, Err(DbError::UngueltigeDaten(_))));
    }

    #[test]
    fn lehrer_ohne_klasse_ist_datenfehler() {
        let ergebnis = record("teacher", None).als_identitaet();
        assert!(matches!(ergebnis, Err(DbError::UngueltigeDaten(_))));
    }
}
