//! Client-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass der Client ohne Konfigurationsdatei im
//! Demo-Modus lauffaehig ist.

use serde::{Deserialize, Serialize};

/// Vollstaendige Client-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Konto-Store-Einstellungen
    pub speicher: SpeicherEinstellungen,
    /// Session-Ablage
    pub session: SessionEinstellungen,
    /// Initiales Admin-Konto (nur SQLite-Variante, nur bei leerer Datenbank)
    pub admin: AdminEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Auswahl und Anbindung des Konto-Stores
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeicherEinstellungen {
    /// Variante: "demo" (feste Demo-Konten) oder "sqlite" (Datenbank)
    pub variante: String,
    /// Verbindungs-URL fuer die SQLite-Variante
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
}

impl Default for SpeicherEinstellungen {
    fn default() -> Self {
        Self {
            variante: "demo".into(),
            url: "sqlite://schulfit.db".into(),
            max_verbindungen: 5,
        }
    }
}

/// Ablageort der persistierten Session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionEinstellungen {
    /// Pfad der Session-Datei
    pub datei: String,
}

impl Default for SessionEinstellungen {
    fn default() -> Self {
        Self {
            datei: "schulfit-session.json".into(),
        }
    }
}

/// Initiales Admin-Konto fuer eine frische Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminEinstellungen {
    pub email: String,
    pub passwort: String,
    pub name: String,
}

impl Default for AdminEinstellungen {
    fn default() -> Self {
        Self {
            email: "admin@schulfit.local".into(),
            passwort: "admin123".into(),
            name: "Schulfit Admin".into(),
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level (env-filter-Syntax, z.B. "info" oder "schulfit_auth=debug")
    pub level: String,
    /// Format: "text" oder "json"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl AppConfig {
    /// Laedt die Konfiguration, Standardwerte falls die Datei fehlt
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(pfad = pfad, "Keine Konfigurationsdatei, verwende Standardwerte");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardwerte() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.speicher.variante, "demo");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.session.datei.ends_with(".json"));
    }

    #[test]
    fn teilweise_konfiguration_lesbar() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [speicher]
            variante = "sqlite"
            url = "sqlite:///tmp/test.db"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.speicher.variante, "sqlite");
        assert_eq!(cfg.speicher.max_verbindungen, 5, "Standardwert bleibt");
        assert_eq!(cfg.logging.format, "text");
    }
}
