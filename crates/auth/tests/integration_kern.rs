//! Integration-Tests: Auth-Kern mit Datei-Ablage und beiden Store-Varianten

use std::sync::Arc;

use schulfit_auth::{
    pruefen, AuthKern, AuthZustand, BackendKontoStore, DateiSessionSpeicher, DemoKontoStore,
    GuardEntscheidung, KontoStore, SessionSpeicher,
};
use schulfit_core::{Klasse, NeuesKonto, Rolle, RollenArt};
use schulfit_db::SqliteDb;

fn demo_kern(speicher: Arc<dyn SessionSpeicher>) -> AuthKern {
    AuthKern::neu(Arc::new(DemoKontoStore::mit_standard_konten()), speicher)
}

#[tokio::test]
async fn demo_szenario_admin() {
    let verzeichnis = tempfile::tempdir().unwrap();
    let speicher: Arc<dyn SessionSpeicher> = Arc::new(DateiSessionSpeicher::neu(
        verzeichnis.path().join("session.json"),
    ));
    let kern = demo_kern(speicher);
    kern.initialisieren().await;

    // Falsches Passwort: normales Negativergebnis, Zustand bleibt anonym
    assert!(!kern.anmelden("admin@demo.com", "falsch").await.unwrap());
    assert_eq!(kern.zustand(), AuthZustand::Anonym);
    assert_eq!(
        pruefen(&kern.zustand(), Some(RollenArt::Admin)),
        GuardEntscheidung::ZumLoginUmleiten
    );

    // Richtige Anmeldedaten: Admin-Ansicht wird angezeigt
    assert!(kern.anmelden("admin@demo.com", "admin123").await.unwrap());
    let identitaet = kern.aktuelle_identitaet().unwrap();
    assert_eq!(identitaet.rollen_art(), RollenArt::Admin);
    assert_eq!(
        pruefen(&kern.zustand(), Some(RollenArt::Admin)),
        GuardEntscheidung::Anzeigen
    );

    // Aber nicht die Schueler-Ansicht
    assert_eq!(
        pruefen(&kern.zustand(), Some(RollenArt::Schueler)),
        GuardEntscheidung::ZumLoginUmleiten
    );
}

#[tokio::test]
async fn neustart_stellt_session_aus_datei_wieder_her() {
    let verzeichnis = tempfile::tempdir().unwrap();
    let pfad = verzeichnis.path().join("session.json");

    let kern = demo_kern(Arc::new(DateiSessionSpeicher::neu(&pfad)));
    kern.initialisieren().await;
    assert!(kern.anmelden("schueler@demo.com", "schueler123").await.unwrap());
    let vorher = kern.aktuelle_identitaet().unwrap();
    drop(kern);

    // Neuer Prozess: frischer Kern, dieselbe Datei
    let neuer_kern = demo_kern(Arc::new(DateiSessionSpeicher::neu(&pfad)));
    assert_eq!(
        pruefen(&neuer_kern.zustand(), None),
        GuardEntscheidung::LadeAnzeige,
        "Vor der Initialisierung wird die Entscheidung zurueckgehalten"
    );

    neuer_kern.initialisieren().await;
    let nachher = neuer_kern.aktuelle_identitaet().expect("Session wiederhergestellt");
    assert_eq!(nachher.id, vorher.id);
    assert_eq!(nachher.klasse().unwrap().als_str(), "6A");
}

#[tokio::test]
async fn abmelden_loescht_datei() {
    let verzeichnis = tempfile::tempdir().unwrap();
    let pfad = verzeichnis.path().join("session.json");

    let kern = demo_kern(Arc::new(DateiSessionSpeicher::neu(&pfad)));
    kern.initialisieren().await;
    kern.anmelden("lehrer@demo.com", "lehrer123").await.unwrap();
    assert!(pfad.exists());

    kern.abmelden().await.unwrap();
    assert!(!pfad.exists(), "Abmelden entfernt die persistierte Session");

    let neuer_kern = demo_kern(Arc::new(DateiSessionSpeicher::neu(&pfad)));
    neuer_kern.initialisieren().await;
    assert_eq!(neuer_kern.zustand(), AuthZustand::Anonym);
}

#[tokio::test]
async fn korrupte_session_datei_startet_anonym() {
    let verzeichnis = tempfile::tempdir().unwrap();
    let pfad = verzeichnis.path().join("session.json");
    tokio::fs::write(&pfad, b"%%% kaputt %%%").await.unwrap();

    let kern = demo_kern(Arc::new(DateiSessionSpeicher::neu(&pfad)));
    kern.initialisieren().await;
    assert_eq!(
        kern.zustand(),
        AuthZustand::Anonym,
        "Korrupte Ablage darf die Initialisierung nicht scheitern lassen"
    );
}

#[tokio::test]
async fn backend_variante_provisionierung() {
    let db = SqliteDb::in_memory().await.unwrap();
    let store: Arc<dyn KontoStore> = Arc::new(BackendKontoStore::neu(Arc::new(db)));

    let verzeichnis = tempfile::tempdir().unwrap();
    let speicher: Arc<dyn SessionSpeicher> = Arc::new(DateiSessionSpeicher::neu(
        verzeichnis.path().join("session.json"),
    ));

    let kern = AuthKern::neu(store, speicher);
    kern.initialisieren().await;

    // Admin-Konto anlegen und anmelden
    let admin = NeuesKonto::neu("admin@schule.de", "admin_pw", "Herr Rudolph", Rolle::Admin)
        .unwrap();
    kern.registrieren(&admin).await.unwrap();
    assert!(kern.anmelden("admin@schule.de", "admin_pw").await.unwrap());
    let admin_identitaet = kern.aktuelle_identitaet().unwrap();

    // Admin provisioniert ein Schuelerkonto, bleibt selbst angemeldet
    let schueler = NeuesKonto::neu(
        "mia@schule.de",
        "mia_pw",
        "Mia Krueger",
        Rolle::Schueler {
            klasse: Klasse::neu("4B").unwrap(),
        },
    )
    .unwrap();
    let angelegt = kern.registrieren(&schueler).await.unwrap();
    assert_eq!(angelegt.rollen_art(), RollenArt::Schueler);
    assert_eq!(kern.aktuelle_identitaet().unwrap().id, admin_identitaet.id);

    // Das neue Konto kann sich anschliessend selbst anmelden
    kern.abmelden().await.unwrap();
    assert!(kern.anmelden("mia@schule.de", "mia_pw").await.unwrap());
    assert_eq!(
        kern.aktuelle_identitaet().unwrap().klasse().unwrap().als_str(),
        "4B"
    );
}
