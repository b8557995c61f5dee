//! Gemeinsame Identifikationstypen fuer Schulfit
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Konto-ID (Schueler, Lehrer oder Admin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KontoId(pub Uuid);

impl KontoId {
    /// Erstellt eine neue zufaellige KontoId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for KontoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for KontoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for KontoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "konto:{}", self.0)
    }
}

/// Eindeutige Gesundheitsbericht-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BerichtId(pub Uuid);

impl BerichtId {
    /// Erstellt eine neue zufaellige BerichtId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for BerichtId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BerichtId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BerichtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bericht:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn konto_id_eindeutig() {
        let a = KontoId::new();
        let b = KontoId::new();
        assert_ne!(a, b, "Zwei neue KontoIds muessen verschieden sein");
    }

    #[test]
    fn bericht_id_eindeutig() {
        let a = BerichtId::new();
        let b = BerichtId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_mit_praefix() {
        let id = KontoId::new();
        assert!(id.to_string().starts_with("konto:"));
        let id = BerichtId::new();
        assert!(id.to_string().starts_with("bericht:"));
    }
}
