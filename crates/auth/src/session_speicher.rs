//! Dauerhafte Session-Ablage
//!
//! Haelt hoechstens eine serialisierte Identitaet unter einem festen
//! Schluessel (hier: eine JSON-Datei), damit ein Neustart des Clients die
//! Anmeldung wiederherstellen kann. Schreibzugriffe laufen ueber eine
//! Temporaerdatei plus Umbenennen, damit nie eine halb geschriebene
//! Session auf der Platte liegt.
//!
//! Eine korrupte oder unlesbare Datei gilt beim Lesen als "keine
//! Session", die Initialisierung darf daran nie scheitern.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use schulfit_core::Identitaet;

use crate::error::{AuthError, AuthResult};

/// Ablage fuer die aktive Session
///
/// Einziger Schreiber ist der [`AuthKern`](crate::AuthKern).
#[async_trait]
pub trait SessionSpeicher: Send + Sync {
    /// Liest die persistierte Identitaet, falls vorhanden und lesbar
    async fn lesen(&self) -> Option<Identitaet>;

    /// Persistiert die Identitaet (ueberschreibt eine vorhandene)
    async fn schreiben(&self, identitaet: &Identitaet) -> AuthResult<()>;

    /// Entfernt die persistierte Identitaet (idempotent)
    async fn loeschen(&self) -> AuthResult<()>;
}

// ---------------------------------------------------------------------------
// Datei-Variante
// ---------------------------------------------------------------------------

/// Session-Ablage als JSON-Datei an einem festen Pfad
pub struct DateiSessionSpeicher {
    pfad: PathBuf,
}

impl DateiSessionSpeicher {
    /// Erstellt eine Ablage am angegebenen Pfad
    pub fn neu(pfad: impl Into<PathBuf>) -> Self {
        Self { pfad: pfad.into() }
    }

    /// Gibt den Dateipfad zurueck
    pub fn pfad(&self) -> &Path {
        &self.pfad
    }

    fn temp_pfad(&self) -> PathBuf {
        let mut pfad = self.pfad.clone();
        pfad.as_mut_os_string().push(".tmp");
        pfad
    }
}

#[async_trait]
impl SessionSpeicher for DateiSessionSpeicher {
    async fn lesen(&self) -> Option<Identitaet> {
        let inhalt = match tokio::fs::read(&self.pfad).await {
            Ok(inhalt) => inhalt,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(pfad = %self.pfad.display(), "Keine persistierte Session");
                return None;
            }
            Err(e) => {
                tracing::warn!(pfad = %self.pfad.display(), fehler = %e, "Session-Datei nicht lesbar");
                return None;
            }
        };

        match serde_json::from_slice::<Identitaet>(&inhalt) {
            Ok(identitaet) => Some(identitaet),
            Err(e) => {
                tracing::warn!(
                    pfad = %self.pfad.display(),
                    fehler = %e,
                    "Korrupte Session-Datei, behandle als keine Session"
                );
                None
            }
        }
    }

    async fn schreiben(&self, identitaet: &Identitaet) -> AuthResult<()> {
        let json = serde_json::to_vec_pretty(identitaet)
            .map_err(|e| AuthError::SessionSpeicher(e.to_string()))?;

        if let Some(verzeichnis) = self.pfad.parent() {
            if !verzeichnis.as_os_str().is_empty() {
                tokio::fs::create_dir_all(verzeichnis)
                    .await
                    .map_err(|e| AuthError::SessionSpeicher(e.to_string()))?;
            }
        }

        let temp = self.temp_pfad();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| AuthError::SessionSpeicher(e.to_string()))?;
        tokio::fs::rename(&temp, &self.pfad)
            .await
            .map_err(|e| AuthError::SessionSpeicher(e.to_string()))?;

        tracing::debug!(pfad = %self.pfad.display(), "Session persistiert");
        Ok(())
    }

    async fn loeschen(&self) -> AuthResult<()> {
        match tokio::fs::remove_file(&self.pfad).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionSpeicher(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// In-Memory-Variante (Tests)
// ---------------------------------------------------------------------------

/// In-Memory-Ablage fuer Tests
#[derive(Default)]
pub struct SpeicherSessionSpeicher {
    slot: RwLock<Option<Identitaet>>,
}

impl SpeicherSessionSpeicher {
    pub fn neu() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionSpeicher for SpeicherSessionSpeicher {
    async fn lesen(&self) -> Option<Identitaet> {
        self.slot.read().await.clone()
    }

    async fn schreiben(&self, identitaet: &Identitaet) -> AuthResult<()> {
        *self.slot.write().await = Some(identitaet.clone());
        Ok(())
    }

    async fn loeschen(&self) -> AuthResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
