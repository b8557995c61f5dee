//! In-Memory-Konto-Store mit Demo-Zugangsdaten
//!
//! Fuer Vorfuehrungen und Tests: eine feste Kontoliste im Speicher,
//! Passwoerter im Klartext (ausschliesslich Demo-Konten, nie echte
//! Zugangsdaten). Es gibt keine serverseitige Session, die
//! Wiederherstellung nach einem Neustart laeuft allein ueber den
//! [`SessionSpeicher`](crate::SessionSpeicher).

use async_trait::async_trait;
use tokio::sync::RwLock;

use schulfit_core::{Identitaet, Klasse, KontoId, NeuesKonto, Rolle};

use crate::error::{AuthError, AuthResult};
use crate::konto_store::KontoStore;

struct DemoKonto {
    identitaet: Identitaet,
    passwort: String,
}

/// Konto-Store auf Basis einer In-Memory-Liste
#[derive(Default)]
pub struct DemoKontoStore {
    konten: RwLock<Vec<DemoKonto>>,
}

impl DemoKontoStore {
    /// Erstellt einen leeren Store
    pub fn neu() -> Self {
        Self::default()
    }

    /// Erstellt einen Store mit den drei Standard-Demo-Konten
    pub fn mit_standard_konten() -> Self {
        let klasse_6a = || Klasse::neu("6A").expect("feste Klassenbezeichnung");
        let konten = vec![
            DemoKonto {
                identitaet: Identitaet {
                    id: KontoId::new(),
                    name: "Ben Sattler".into(),
                    email: "schueler@demo.com".into(),
                    rolle: Rolle::Schueler { klasse: klasse_6a() },
                },
                passwort: "schueler123".into(),
            },
            DemoKonto {
                identitaet: Identitaet {
                    id: KontoId::new(),
                    name: "Frau Sander".into(),
                    email: "lehrer@demo.com".into(),
                    rolle: Rolle::Lehrer { klasse: klasse_6a() },
                },
                passwort: "lehrer123".into(),
            },
            DemoKonto {
                identitaet: Identitaet {
                    id: KontoId::new(),
                    name: "Herr Rudolph".into(),
                    email: "admin@demo.com".into(),
                    rolle: Rolle::Admin,
                },
                passwort: "admin123".into(),
            },
        ];

        Self {
            konten: RwLock::new(konten),
        }
    }
}

#[async_trait]
impl KontoStore for DemoKontoStore {
    async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Identitaet> {
        let konten = self.konten.read().await;
        konten
            .iter()
            .find(|k| k.identitaet.email == email && k.passwort == passwort)
            .map(|k| k.identitaet.clone())
            .ok_or(AuthError::UngueltigeAnmeldedaten)
    }

    async fn registrieren(&self, antrag: &NeuesKonto) -> AuthResult<Identitaet> {
        let mut konten = self.konten.write().await;
        if konten.iter().any(|k| k.identitaet.email == antrag.email) {
            return Err(AuthError::EmailVergeben(antrag.email.clone()));
        }

        let identitaet = Identitaet {
            id: KontoId::new(),
            name: antrag.name.clone(),
            email: antrag.email.clone(),
            rolle: antrag.rolle.clone(),
        };
        konten.push(DemoKonto {
            identitaet: identitaet.clone(),
            passwort: antrag.passwort.clone(),
        });

        tracing::info!(email = %identitaet.email, rolle = %identitaet.rollen_art(), "Demo-Konto angelegt");
        Ok(identitaet)
    }

    async fn aktuelle_session(&self) -> AuthResult<Option<Identitaet>> {
        // Kein serverseitiger Sitzungsbegriff im Demo-Store
        Ok(None)
    }

    async fn session_beenden(&self) -> AuthResult<()> {
        Ok(())
    }
}
