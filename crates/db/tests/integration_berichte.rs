//! Integration-Tests fuer BerichtRepository (In-Memory SQLite)
//!
//! `erstellen`/`get_by_id` existieren auf beiden Repository-Traits,
//! daher werden die Aufrufe hier voll qualifiziert.

use chrono::Utc;
use uuid::Uuid;

use schulfit_db::{
    models::{NeuerBericht, NeuesKontoRecord},
    BerichtRepository, DbError, KontenRepository, SqliteDb,
};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

async fn schueler_konto(db: &SqliteDb, email: &str, klasse: &str) -> Uuid {
    KontenRepository::erstellen(
        db,
        NeuesKontoRecord {
            email,
            name: "Testschueler",
            passwort_hash: "hash",
            rolle: "student",
            klasse: Some(klasse),
        },
    )
    .await
    .expect("Schuelerkonto erstellen fehlgeschlagen")
    .id
}

fn meldung<'a>(konto_id: Uuid, klasse: &'a str) -> NeuerBericht<'a> {
    NeuerBericht {
        konto_id,
        klasse,
        temperatur_celsius: 36.8,
        gewicht_kg: 31.5,
        groesse_cm: 134.0,
        stimmung: "froehlich",
        beschwerde: None,
    }
}

#[tokio::test]
async fn bericht_erstellen_und_laden() {
    let db = db().await;
    let konto_id = schueler_konto(&db, "ben@schule.de", "6A").await;

    let bericht = BerichtRepository::erstellen(&db, meldung(konto_id, "6A"))
        .await
        .expect("Bericht erstellen fehlgeschlagen");

    assert_eq!(bericht.konto_id, konto_id);
    assert_eq!(bericht.klasse, "6A");
    assert!(!bericht.ist_beantwortet());

    let geladen = BerichtRepository::get_by_id(&db, bericht.id)
        .await
        .unwrap()
        .expect("Bericht sollte gefunden werden");

    assert_eq!(geladen.temperatur_celsius, 36.8);
    assert_eq!(geladen.stimmung, "froehlich");
}

#[tokio::test]
async fn berichte_fuer_konto_neueste_zuerst() {
    let db = db().await;
    let konto_id = schueler_konto(&db, "mia@schule.de", "4B").await;

    let erster = BerichtRepository::erstellen(&db, meldung(konto_id, "4B"))
        .await
        .unwrap();
    let zweiter = BerichtRepository::erstellen(
        &db,
        NeuerBericht {
            beschwerde: Some("Bauchschmerzen"),
            ..meldung(konto_id, "4B")
        },
    )
    .await
    .unwrap();

    let berichte = db.fuer_konto(konto_id).await.unwrap();
    assert_eq!(berichte.len(), 2);
    // Gleicher Zeitstempel ist bei In-Memory moeglich, daher nur Mengenpruefung
    let ids: Vec<_> = berichte.iter().map(|b| b.id).collect();
    assert!(ids.contains(&erster.id));
    assert!(ids.contains(&zweiter.id));
}

#[tokio::test]
async fn berichte_fuer_klasse_gefiltert() {
    let db = db().await;
    let in_6a = schueler_konto(&db, "a@schule.de", "6A").await;
    let in_4b = schueler_konto(&db, "b@schule.de", "4B").await;

    BerichtRepository::erstellen(&db, meldung(in_6a, "6A"))
        .await
        .unwrap();
    BerichtRepository::erstellen(&db, meldung(in_4b, "4B"))
        .await
        .unwrap();

    let nur_6a = db.fuer_klasse("6A", None).await.unwrap();
    assert_eq!(nur_6a.len(), 1);
    assert_eq!(nur_6a[0].konto_id, in_6a);

    let heute = Utc::now().date_naive();
    let heute_6a = db.fuer_klasse("6A", Some(heute)).await.unwrap();
    assert_eq!(heute_6a.len(), 1, "Heutiger Bericht muss im Tagesfilter liegen");

    let morgen = heute.succ_opt().unwrap();
    let morgen_6a = db.fuer_klasse("6A", Some(morgen)).await.unwrap();
    assert!(morgen_6a.is_empty());
}

#[tokio::test]
async fn lehrer_antwort_eintragen() {
    let db = db().await;
    let konto_id = schueler_konto(&db, "c@schule.de", "6A").await;
    let lehrer_id = Uuid::new_v4();

    let bericht = BerichtRepository::erstellen(&db, meldung(konto_id, "6A"))
        .await
        .unwrap();

    let beantwortet = db
        .beantworten(bericht.id, lehrer_id, "Gute Besserung, ruh dich aus!")
        .await
        .unwrap();

    assert!(beantwortet.ist_beantwortet());
    assert_eq!(beantwortet.beantwortet_von, Some(lehrer_id));
    assert!(beantwortet.beantwortet_am.is_some());
    assert_eq!(
        beantwortet.antwort.as_deref(),
        Some("Gute Besserung, ruh dich aus!")
    );
}

#[tokio::test]
async fn antwort_auf_unbekannten_bericht() {
    let db = db().await;

    let ergebnis = db
        .beantworten(Uuid::new_v4(), Uuid::new_v4(), "Hallo?")
        .await;

    assert!(matches!(ergebnis, Err(DbError::NichtGefunden(_))));
}
