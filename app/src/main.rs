//! Schulfit Terminal-Client: Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging, baut den
//! Auth-Kern mit der konfigurierten Store-Variante zusammen und startet
//! die Eingabeschleife.

mod config;
mod repl;

use std::sync::Arc;

use anyhow::Result;

use schulfit_auth::{
    AuthKern, BackendKontoStore, DateiSessionSpeicher, DemoKontoStore, KontoStore, SessionSpeicher,
};
use schulfit_berichte::BerichtService;
use schulfit_core::{NeuesKonto, Rolle};
use schulfit_db::{DatenbankKonfiguration, KontenRepository, SqliteDb};

use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config_pfad =
        std::env::var("SCHULFIT_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = AppConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        variante = %config.speicher.variante,
        "Schulfit Client wird initialisiert"
    );

    // Store-Variante waehlen: beide liegen hinter derselben Schnittstelle
    let (konto_store, db): (Arc<dyn KontoStore>, SqliteDb) = match config.speicher.variante.as_str()
    {
        "demo" => {
            // Berichte laufen im Demo-Modus ueber eine fluechtige Datenbank
            let db = SqliteDb::in_memory().await?;
            (Arc::new(DemoKontoStore::mit_standard_konten()), db)
        }
        "sqlite" => {
            let db = SqliteDb::oeffnen(&DatenbankKonfiguration {
                url: config.speicher.url.clone(),
                max_verbindungen: config.speicher.max_verbindungen,
                sqlite_wal: true,
            })
            .await?;
            let store = Arc::new(BackendKontoStore::neu(Arc::new(db.clone())));
            admin_anlegen_falls_leer(&*store, &db, &config).await?;
            (store, db)
        }
        andere => {
            anyhow::bail!("Unbekannte Store-Variante '{andere}' (erwartet: demo | sqlite)")
        }
    };

    let speicher: Arc<dyn SessionSpeicher> =
        Arc::new(DateiSessionSpeicher::neu(config.session.datei.clone()));

    let kern = Arc::new(AuthKern::neu(konto_store, speicher));
    kern.initialisieren().await;

    let berichte = BerichtService::neu(Arc::new(db));

    repl::ausfuehren(kern, berichte).await
}

/// Legt das initiale Admin-Konto an, falls die Datenbank noch leer ist
async fn admin_anlegen_falls_leer(
    store: &dyn KontoStore,
    db: &SqliteDb,
    config: &AppConfig,
) -> Result<()> {
    if !db.liste(false).await?.is_empty() {
        return Ok(());
    }

    let antrag = NeuesKonto::neu(
        &config.admin.email,
        &config.admin.passwort,
        &config.admin.name,
        Rolle::Admin,
    )?;
    store.registrieren(&antrag).await?;
    tracing::warn!(
        email = %config.admin.email,
        "Leere Datenbank: initiales Admin-Konto angelegt, Passwort bitte in der Konfiguration aendern"
    );
    Ok(())
}

/// Initialisiert tracing-subscriber mit konfiguriertem Level und Format
fn logging_initialisieren(level: &str, format: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}
