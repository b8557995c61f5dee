//! Identitaets- und Rollen-Modell
//!
//! Die Rolle ist ein geschlossener Summentyp: Schueler und Lehrer tragen
//! ihre Klassenzuweisung direkt im Varianten-Payload, ein Admin hat keine.
//! "Klasse erforderlich ausser bei Admin" ist damit kein Laufzeit-Check
//! mehr, sondern im Typsystem nicht anders darstellbar.
//!
//! Fuer Persistenz und Altbestand existiert ein flaches Draht-Format
//! (`role` als String plus optionales `klasse`-Feld), das beim Einlesen
//! ueber `Rolle::zusammensetzen` validiert wird.

use serde::{Deserialize, Serialize};

use crate::error::ValidierungsFehler;
use crate::types::KontoId;

// ---------------------------------------------------------------------------
// Klasse
// ---------------------------------------------------------------------------

/// Klassenbezeichnung, z.B. "6A"
///
/// Garantiert nicht-leer (Leerzeichen werden abgeschnitten).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Klasse(String);

impl Klasse {
    /// Erstellt eine Klassenbezeichnung, lehnt leere Eingaben ab
    pub fn neu(bezeichnung: &str) -> Result<Self, ValidierungsFehler> {
        let bezeichnung = bezeichnung.trim();
        if bezeichnung.is_empty() {
            return Err(ValidierungsFehler::KlasseLeer);
        }
        Ok(Self(bezeichnung.to_string()))
    }

    /// Gibt die Bezeichnung als &str zurueck
    pub fn als_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Klasse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Klasse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Klasse::neu(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Rollen
// ---------------------------------------------------------------------------

/// Rollen-Art ohne Payload, fuer Vergleiche und den Route-Guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollenArt {
    #[serde(rename = "student")]
    Schueler,
    #[serde(rename = "teacher")]
    Lehrer,
    #[serde(rename = "admin")]
    Admin,
}

impl RollenArt {
    /// Draht-Name der Rolle (Altbestand des urspruenglichen Systems)
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Schueler => "student",
            Self::Lehrer => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for RollenArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_str())
    }
}

impl std::str::FromStr for RollenArt {
    type Err = ValidierungsFehler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Schueler),
            "teacher" => Ok(Self::Lehrer),
            "admin" => Ok(Self::Admin),
            other => Err(ValidierungsFehler::UnbekannteRolle(other.to_string())),
        }
    }
}

/// Rolle mit Klassenzuweisung als geschlossener Summentyp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rolle {
    /// Schueler gehoeren immer genau einer Klasse an
    Schueler { klasse: Klasse },
    /// Lehrer betreuen genau eine Klasse
    Lehrer { klasse: Klasse },
    /// Admins haben keine Klassenzuweisung
    Admin,
}

impl Rolle {
    /// Setzt eine Rolle aus losen Teilen zusammen (Draht-Format, Formulare)
    ///
    /// Admin ignoriert eine mitgelieferte Klasse. Schueler und Lehrer
    /// ohne Klasse werden abgelehnt.
    pub fn zusammensetzen(
        art: RollenArt,
        klasse: Option<Klasse>,
    ) -> Result<Self, ValidierungsFehler> {
        match (art, klasse) {
            (RollenArt::Admin, _) => Ok(Self::Admin),
            (RollenArt::Schueler, Some(klasse)) => Ok(Self::Schueler { klasse }),
            (RollenArt::Lehrer, Some(klasse)) => Ok(Self::Lehrer { klasse }),
            (art, None) => Err(ValidierungsFehler::KlasseFehlt(art)),
        }
    }

    /// Gibt die Rollen-Art ohne Payload zurueck
    pub fn art(&self) -> RollenArt {
        match self {
            Self::Schueler { .. } => RollenArt::Schueler,
            Self::Lehrer { .. } => RollenArt::Lehrer,
            Self::Admin => RollenArt::Admin,
        }
    }

    /// Klassenzuweisung, falls vorhanden
    pub fn klasse(&self) -> Option<&Klasse> {
        match self {
            Self::Schueler { klasse } | Self::Lehrer { klasse } => Some(klasse),
            Self::Admin => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Identitaet
// ---------------------------------------------------------------------------

/// Der angemeldete Principal
///
/// Serde laeuft ueber das flache Draht-Format [`IdentitaetDraht`], damit
/// eine persistierte Session aus einem aelteren Client lesbar bleibt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IdentitaetDraht", into = "IdentitaetDraht")]
pub struct Identitaet {
    pub id: KontoId,
    pub name: String,
    pub email: String,
    pub rolle: Rolle,
}

impl Identitaet {
    /// Rollen-Art ohne Payload (fuer Guard-Vergleiche)
    pub fn rollen_art(&self) -> RollenArt {
        self.rolle.art()
    }

    /// Klassenzuweisung, falls vorhanden
    pub fn klasse(&self) -> Option<&Klasse> {
        self.rolle.klasse()
    }
}

/// Flaches Draht-Format einer Identitaet
///
/// Feldnamen entsprechen dem Altbestand: `role` als String, `klasse`
/// optional daneben.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitaetDraht {
    pub id: KontoId,
    pub name: String,
    pub email: String,
    #[serde(rename = "role")]
    pub rolle: RollenArt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub klasse: Option<Klasse>,
}

impl TryFrom<IdentitaetDraht> for Identitaet {
    type Error = ValidierungsFehler;

    fn try_from(draht: IdentitaetDraht) -> Result<Self, Self::Error> {
        let rolle = Rolle::zusammensetzen(draht.rolle, draht.klasse)?;
        Ok(Self {
            id: draht.id,
            name: draht.name,
            email: draht.email,
            rolle,
        })
    }
}

impl From<Identitaet> for IdentitaetDraht {
    fn from(identitaet: Identitaet) -> Self {
        Self {
            id: identitaet.id,
            name: identitaet.name,
            email: identitaet.email,
            rolle: identitaet.rolle.art(),
            klasse: identitaet.rolle.klasse().cloned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Kontoerstellung
// ---------------------------------------------------------------------------

/// Antrag zur Kontoerstellung (Admin-Provisionierung)
///
/// Der Konstruktor prueft Pflichtfelder; die Rollen-Invariante steckt
/// bereits im [`Rolle`]-Typ.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuesKonto {
    pub email: String,
    pub passwort: String,
    pub name: String,
    pub rolle: Rolle,
}

impl NeuesKonto {
    /// Erstellt einen validierten Kontoantrag
    pub fn neu(
        email: &str,
        passwort: &str,
        name: &str,
        rolle: Rolle,
    ) -> Result<Self, ValidierungsFehler> {
        let email = email.trim();
        let name = name.trim();
        if email.is_empty() {
            return Err(ValidierungsFehler::FeldLeer("email"));
        }
        if passwort.is_empty() {
            return Err(ValidierungsFehler::FeldLeer("passwort"));
        }
        if name.is_empty() {
            return Err(ValidierungsFehler::FeldLeer("name"));
        }
        Ok(Self {
            email: email.to_string(),
            passwort: passwort.to_string(),
            name: name.to_string(),
            rolle,
        })
    }
}
