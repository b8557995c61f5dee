//! Integration-Tests fuer KontenRepository (In-Memory SQLite)

use schulfit_db::{
    models::{KontoUpdate, NeuesKontoRecord},
    KontenRepository, SqliteDb,
};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn schueler<'a>(email: &'a str, name: &'a str) -> NeuesKontoRecord<'a> {
    NeuesKontoRecord {
        email,
        name,
        passwort_hash: "hash",
        rolle: "student",
        klasse: Some("6A"),
    }
}

#[tokio::test]
async fn konto_erstellen_und_laden() {
    let db = db().await;

    let konto = db
        .erstellen(schueler("ben@schule.de", "Ben Sattler"))
        .await
        .expect("Konto erstellen fehlgeschlagen");

    assert_eq!(konto.email, "ben@schule.de");
    assert_eq!(konto.rolle, "student");
    assert_eq!(konto.klasse.as_deref(), Some("6A"));
    assert!(konto.is_active);
    assert!(konto.last_login.is_none());

    let geladen = db
        .get_by_id(konto.id)
        .await
        .expect("get_by_id fehlgeschlagen")
        .expect("Konto sollte gefunden werden");

    assert_eq!(geladen.id, konto.id);
    assert_eq!(geladen.name, "Ben Sattler");
}

#[tokio::test]
async fn konto_nach_email_laden() {
    let db = db().await;

    db.erstellen(schueler("mia@schule.de", "Mia Krueger"))
        .await
        .unwrap();

    let gefunden = db
        .get_by_email("mia@schule.de")
        .await
        .unwrap()
        .expect("Konto 'mia@schule.de' sollte gefunden werden");

    assert_eq!(gefunden.name, "Mia Krueger");

    let fehlt = db.get_by_email("unbekannt@schule.de").await.unwrap();
    assert!(fehlt.is_none());
}

#[tokio::test]
async fn doppelte_email_ist_eindeutigkeitsfehler() {
    let db = db().await;

    db.erstellen(schueler("doppelt@schule.de", "Erstes Konto"))
        .await
        .unwrap();

    let ergebnis = db
        .erstellen(schueler("doppelt@schule.de", "Zweites Konto"))
        .await;

    let fehler = ergebnis.expect_err("Doppelte E-Mail muss abgelehnt werden");
    assert!(fehler.ist_eindeutigkeit(), "Erwartet Eindeutigkeitsfehler: {fehler}");
}

#[tokio::test]
async fn admin_ohne_klasse_speicherbar() {
    let db = db().await;

    let konto = db
        .erstellen(NeuesKontoRecord {
            email: "admin@schule.de",
            name: "Herr Rudolph",
            passwort_hash: "hash",
            rolle: "admin",
            klasse: None,
        })
        .await
        .unwrap();

    assert!(konto.klasse.is_none());

    let identitaet = konto.als_identitaet().expect("Admin-Record muss valide sein");
    assert!(identitaet.klasse().is_none());
}

#[tokio::test]
async fn konto_update_teilweise() {
    let db = db().await;
    let konto = db
        .erstellen(schueler("update@schule.de", "Alter Name"))
        .await
        .unwrap();

    let aktualisiert = db
        .update(
            konto.id,
            KontoUpdate {
                name: Some("Neuer Name".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(aktualisiert.name, "Neuer Name");
    assert_eq!(aktualisiert.passwort_hash, "hash", "Ungesetzte Felder bleiben");
}

#[tokio::test]
async fn loeschen_ist_deaktivieren() {
    let db = db().await;
    let konto = db
        .erstellen(schueler("weg@schule.de", "Geht Weg"))
        .await
        .unwrap();

    assert!(db.loeschen(konto.id).await.unwrap());

    let geladen = db.get_by_id(konto.id).await.unwrap().unwrap();
    assert!(!geladen.is_active, "Loeschen setzt nur is_active = 0");

    let aktive = db.liste(true).await.unwrap();
    assert!(aktive.iter().all(|k| k.id != konto.id));
}

#[tokio::test]
async fn last_login_wird_gesetzt() {
    let db = db().await;
    let konto = db
        .erstellen(schueler("login@schule.de", "Login Konto"))
        .await
        .unwrap();

    db.update_last_login(konto.id).await.unwrap();

    let geladen = db.get_by_id(konto.id).await.unwrap().unwrap();
    assert!(geladen.last_login.is_some());
}
