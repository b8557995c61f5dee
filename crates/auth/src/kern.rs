//! Der Auth-Kern: Zustandsautomat und Operationen
//!
//! Zustandsverlauf:
//!
//! ```text
//! Uninitialisiert --initialisieren--> Laedt --+--> Angemeldet(Identitaet)
//!                                             +--> Anonym
//! ```
//!
//! Der Kern besitzt exklusiv den In-Memory-Identitaets-Slot und ist der
//! einzige Schreiber des [`SessionSpeicher`]s. Jede erfolgreiche
//! Zustandsaenderung schreibt erst durch und meldet dann Erfolg, damit
//! Speicher und Gedaechtnis nie laenger als einen Schritt auseinander
//! liegen. Alle Operationen serialisieren sich ueber eine interne
//! Sperre, eine doppelt abgeschickte Anmeldung kann sich also nicht
//! selbst ueberholen.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use schulfit_core::{Identitaet, NeuesKonto};

use crate::error::{AuthError, AuthResult};
use crate::konto_store::KontoStore;
use crate::session_speicher::SessionSpeicher;

/// Zustand des Auth-Kerns
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthZustand {
    /// Vor dem ersten `initialisieren`
    #[default]
    Uninitialisiert,
    /// Identitaetsaufloesung laeuft, Guard-Entscheidungen warten
    Laedt,
    /// Genau eine aktive Session
    Angemeldet(Identitaet),
    /// Keine aktive Session
    Anonym,
}

impl AuthZustand {
    /// Gibt die Identitaet zurueck, falls angemeldet
    pub fn identitaet(&self) -> Option<&Identitaet> {
        match self {
            Self::Angemeldet(identitaet) => Some(identitaet),
            _ => None,
        }
    }
}

/// Der Auth-Kern
///
/// Wird einmal beim Start konstruiert und per `Arc` weitergereicht.
pub struct AuthKern {
    store: Arc<dyn KontoStore>,
    speicher: Arc<dyn SessionSpeicher>,
    zustand: watch::Sender<AuthZustand>,
    // Serialisiert anmelden/registrieren/abmelden/initialisieren
    ablauf_sperre: Mutex<()>,
}

impl AuthKern {
    /// Erstellt einen neuen Kern im Zustand `Uninitialisiert`
    pub fn neu(store: Arc<dyn KontoStore>, speicher: Arc<dyn SessionSpeicher>) -> Self {
        let (zustand, _) = watch::channel(AuthZustand::Uninitialisiert);
        Self {
            store,
            speicher,
            zustand,
            ablauf_sperre: Mutex::new(()),
        }
    }

    /// Aktueller Zustand (Momentaufnahme)
    pub fn zustand(&self) -> AuthZustand {
        self.zustand.borrow().clone()
    }

    /// Aktuelle Identitaet, falls angemeldet
    pub fn aktuelle_identitaet(&self) -> Option<Identitaet> {
        self.zustand.borrow().identitaet().cloned()
    }

    /// Abonniert Zustandsaenderungen
    ///
    /// Jeder Uebergang wird vor der naechsten Operation sichtbar.
    pub fn abonnieren(&self) -> watch::Receiver<AuthZustand> {
        self.zustand.subscribe()
    }

    /// Loest die Identitaet beim Start auf
    ///
    /// Reihenfolge: persistierte Session, dann serverseitige Session des
    /// Konto-Stores, sonst `Anonym`. Fehler fuehren nie zum Abbruch,
    /// im Zweifel startet der Client anonym.
    pub async fn initialisieren(&self) {
        let _sperre = self.ablauf_sperre.lock().await;
        self.zustand.send_replace(AuthZustand::Laedt);

        if let Some(identitaet) = self.speicher.lesen().await {
            tracing::info!(konto = %identitaet.id, "Session aus Ablage wiederhergestellt");
            self.zustand.send_replace(AuthZustand::Angemeldet(identitaet));
            return;
        }

        match self.store.aktuelle_session().await {
            Ok(Some(identitaet)) => {
                if let Err(e) = self.speicher.schreiben(&identitaet).await {
                    tracing::warn!(fehler = %e, "Session-Ablage nicht beschreibbar");
                }
                tracing::info!(konto = %identitaet.id, "Serverseitige Session uebernommen");
                self.zustand.send_replace(AuthZustand::Angemeldet(identitaet));
            }
            Ok(None) => {
                self.zustand.send_replace(AuthZustand::Anonym);
            }
            Err(e) => {
                tracing::warn!(fehler = %e, "Sessionaufloesung fehlgeschlagen, starte anonym");
                self.zustand.send_replace(AuthZustand::Anonym);
            }
        }
    }

    /// Meldet einen Benutzer an
    ///
    /// `Ok(false)` steht fuer abgewiesene Anmeldedaten (inkl. leerer
    /// Eingaben), ein normales Negativergebnis. `Err` ist ein
    /// Transport- oder Speicherfehler.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<bool> {
        let _sperre = self.ablauf_sperre.lock().await;

        if email.trim().is_empty() || passwort.is_empty() {
            tracing::debug!("Anmeldung mit leeren Eingaben abgewiesen");
            return Ok(false);
        }

        match self.store.anmelden(email, passwort).await {
            Ok(identitaet) => {
                // Erst durchschreiben, dann Erfolg melden
                self.speicher.schreiben(&identitaet).await?;
                self.zustand.send_replace(AuthZustand::Angemeldet(identitaet));
                Ok(true)
            }
            Err(e) if e.ist_abweisung() => {
                tracing::debug!(email = %email, "Anmeldung abgewiesen");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Legt ein neues Konto an, ohne die eigene Session zu veraendern
    ///
    /// Vertrag der Admin-Provisionierung: ein Admin, der ein Lehrerkonto
    /// anlegt, bleibt danach selbst angemeldet.
    pub async fn registrieren(&self, antrag: &NeuesKonto) -> AuthResult<Identitaet> {
        let _sperre = self.ablauf_sperre.lock().await;
        self.store.registrieren(antrag).await
    }

    /// Meldet ab: Speicher leeren, serverseitige Session beenden, `Anonym`
    ///
    /// Idempotent: ohne aktive Session passiert nichts, insbesondere
    /// kein Speicherzugriff.
    pub async fn abmelden(&self) -> AuthResult<()> {
        let _sperre = self.ablauf_sperre.lock().await;

        if !matches!(&*self.zustand.borrow(), AuthZustand::Angemeldet(_)) {
            return Ok(());
        }

        self.speicher.loeschen().await?;
        if let Err(e) = self.store.session_beenden().await {
            // Lokale Abmeldung gelingt auch bei unerreichbarem Store
            tracing::warn!(fehler = %e, "Serverseitige Session nicht beendet");
        }
        self.zustand.send_replace(AuthZustand::Anonym);
        tracing::info!("Abgemeldet");
        Ok(())
    }
}
