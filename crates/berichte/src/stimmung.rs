//! Stimmungs-Skala der taeglichen Meldung

use serde::{Deserialize, Serialize};

/// Stimmung des Schuelers am Meldetag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stimmung {
    Froehlich,
    Normal,
    Muede,
    Schlecht,
}

impl Stimmung {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Froehlich => "froehlich",
            Self::Normal => "normal",
            Self::Muede => "muede",
            Self::Schlecht => "schlecht",
        }
    }
}

impl std::fmt::Display for Stimmung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_str())
    }
}

impl std::str::FromStr for Stimmung {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "froehlich" => Ok(Self::Froehlich),
            "normal" => Ok(Self::Normal),
            "muede" => Ok(Self::Muede),
            "schlecht" => Ok(Self::Schlecht),
            other => Err(format!("Unbekannte Stimmung: {other}")),
        }
    }
}
