//! Datenbank-gestuetzter Konto-Store
//!
//! Verifiziert Passwoerter per Argon2id gegen das [`KontenRepository`]
//! und haelt genau eine serverseitige Session (Token mit TTL). Die
//! Registrierung legt nur das Konto an, die aktive Session des
//! Aufrufers bleibt unberuehrt, damit ein Admin nach der
//! Provisionierung eines Lehrerkontos selbst angemeldet bleibt.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::RngCore;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use schulfit_core::{Identitaet, NeuesKonto};
use schulfit_db::{KontenRepository, NeuesKontoRecord, SqliteDb};

use crate::error::{AuthError, AuthResult};
use crate::konto_store::KontoStore;
use crate::password::{passwort_hashen, passwort_verifizieren};

/// Session-Lebensdauer: 24 Stunden
const SESSION_TTL_SEKUNDEN: i64 = 24 * 60 * 60;

/// Serverseitige Session des Backend-Stores
#[derive(Debug, Clone)]
struct ServerSitzung {
    token: String,
    konto_id: Uuid,
    laeuft_ab_am: DateTime<Utc>,
}

impl ServerSitzung {
    fn ist_gueltig(&self) -> bool {
        Utc::now() < self.laeuft_ab_am
    }
}

/// Konto-Store ueber ein Datenbank-Repository
pub struct BackendKontoStore<R: KontenRepository> {
    repo: Arc<R>,
    sitzung: RwLock<Option<ServerSitzung>>,
}

impl<R: KontenRepository> BackendKontoStore<R> {
    /// Erstellt einen neuen Store ueber dem angegebenen Repository
    pub fn neu(repo: Arc<R>) -> Self {
        Self {
            repo,
            sitzung: RwLock::new(None),
        }
    }

    /// Prueft die Anmeldedaten gegen das Repository
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Identitaet> {
        let konto = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        if !konto.is_active {
            return Err(AuthError::KontoGesperrt);
        }

        let korrekt = passwort_verifizieren(passwort, &konto.passwort_hash)?;
        if !korrekt {
            tracing::warn!(email = %email, "Fehlgeschlagener Anmeldeversuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        self.repo.update_last_login(konto.id).await?;
        let identitaet = konto.als_identitaet()?;

        let jetzt = Utc::now();
        let sitzung = ServerSitzung {
            token: token_generieren(),
            konto_id: konto.id,
            laeuft_ab_am: jetzt + chrono::Duration::seconds(SESSION_TTL_SEKUNDEN),
        };
        let token_praefix = sitzung.token[..8].to_string();
        *self.sitzung.write().await = Some(sitzung);

        tracing::info!(
            konto_id = %konto.id,
            rolle = %identitaet.rollen_art(),
            token_praefix = %token_praefix,
            "Konto angemeldet"
        );
        Ok(identitaet)
    }

    /// Legt ein neues Konto an, ohne die serverseitige Session anzufassen
    pub async fn registrieren(&self, antrag: &NeuesKonto) -> AuthResult<Identitaet> {
        let passwort_hash = passwort_hashen(&antrag.passwort)?;

        let konto = self
            .repo
            .erstellen(NeuesKontoRecord {
                email: &antrag.email,
                name: &antrag.name,
                passwort_hash: &passwort_hash,
                rolle: antrag.rolle.art().als_str(),
                klasse: antrag.rolle.klasse().map(|k| k.als_str()),
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben(antrag.email.clone())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        tracing::info!(
            konto_id = %konto.id,
            email = %konto.email,
            rolle = %konto.rolle,
            "Neues Konto registriert"
        );

        Ok(konto.als_identitaet()?)
    }

    /// Loest die serverseitige Session auf, falls gueltig
    pub async fn aktuelle_session(&self) -> AuthResult<Option<Identitaet>> {
        let sitzung = { self.sitzung.read().await.clone() };
        let Some(sitzung) = sitzung else {
            return Ok(None);
        };

        if !sitzung.ist_gueltig() {
            tracing::debug!("Serverseitige Session abgelaufen");
            *self.sitzung.write().await = None;
            return Ok(None);
        }

        let Some(konto) = self.repo.get_by_id(sitzung.konto_id).await? else {
            *self.sitzung.write().await = None;
            return Ok(None);
        };

        if !konto.is_active {
            // Konto wurde zwischenzeitlich gesperrt
            *self.sitzung.write().await = None;
            return Ok(None);
        }

        Ok(Some(konto.als_identitaet()?))
    }

    /// Beendet die serverseitige Session (idempotent)
    pub async fn session_beenden(&self) -> AuthResult<()> {
        *self.sitzung.write().await = None;
        Ok(())
    }
}

// Die dyn-faehige Store-Schnittstelle existiert fuer die konkrete
// SQLite-Anbindung; die generischen Methoden oben bleiben fuer Tests
// gegen beliebige Repositories nutzbar.
#[async_trait]
impl KontoStore for BackendKontoStore<SqliteDb> {
    async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Identitaet> {
        BackendKontoStore::anmelden(self, email, passwort).await
    }

    async fn registrieren(&self, antrag: &NeuesKonto) -> AuthResult<Identitaet> {
        BackendKontoStore::registrieren(self, antrag).await
    }

    async fn aktuelle_session(&self) -> AuthResult<Option<Identitaet>> {
        BackendKontoStore::aktuelle_session(self).await
    }

    async fn session_beenden(&self) -> AuthResult<()> {
        BackendKontoStore::session_beenden(self).await
    }
}

/// Generiert einen kryptografisch zufaelligen Session-Token
/// (URL-sicheres Base64, 32 Byte Entropie)
fn token_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}
