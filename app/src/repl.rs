//! Eingabeschleife des Terminal-Clients
//!
//! Die Oberflaeche kennt den Kern nur ueber seine Operationen und den
//! Route-Guard: jeder rollengeschuetzte Befehl laeuft durch
//! [`schulfit_auth::pruefen`] und zeigt dessen drei Ausgaenge als
//! Inhalt, Login-Umleitung oder Ladeanzeige an.

use std::sync::Arc;

use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};
use uuid::Uuid;

use schulfit_auth::{pruefen, AuthKern, GuardEntscheidung};
use schulfit_berichte::{BerichtService, NeueMeldung, Stimmung};
use schulfit_core::{BerichtId, Identitaet, Klasse, NeuesKonto, Rolle, RollenArt};
use schulfit_db::{BerichtRecord, SqliteDb};

const BEGRUESSUNG: &str = "Schulfit - 'hilfe' zeigt die Befehle, 'ende' beendet.";

const HILFE: &str = "\
Befehle:
  anmelden <email> <passwort>
  abmelden
  wer
  registrieren <email> <passwort> <rolle> <klasse|-> <name...>   (nur Admin)
  melden <temp C> <gewicht kg> <groesse cm> <stimmung> [beschwerde...]  (nur Schueler)
  berichte                                     (Schueler: eigene, Lehrer: Klasse)
  antworten <bericht-id> <text...>             (nur Lehrer)
  hilfe
  ende";

/// Startet die Eingabeschleife
pub async fn ausfuehren(kern: Arc<AuthKern>, berichte: BerichtService<SqliteDb>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("{BEGRUESSUNG}");

    loop {
        match editor.readline("schulfit> ") {
            Ok(zeile) => {
                let zeile = zeile.trim();
                if zeile.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(zeile);

                let teile: Vec<&str> = zeile.split_whitespace().collect();
                match teile[0] {
                    "ende" | "exit" => break,
                    "hilfe" => println!("{HILFE}"),
                    "anmelden" => anmelden(&kern, &teile[1..]).await,
                    "abmelden" => abmelden(&kern).await,
                    "wer" => wer(&kern),
                    "registrieren" => registrieren(&kern, &teile[1..]).await,
                    "melden" => melden(&kern, &berichte, &teile[1..]).await,
                    "berichte" => berichte_anzeigen(&kern, &berichte).await,
                    "antworten" => antworten(&kern, &berichte, &teile[1..]).await,
                    unbekannt => println!("Unbekannter Befehl '{unbekannt}', 'hilfe' hilft."),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!(fehler = %e, "Eingabefehler");
                break;
            }
        }
    }

    println!("Bis bald!");
    Ok(())
}

/// Route-Guard-Durchlauf fuer einen geschuetzten Befehl
///
/// Gibt die Identitaet zurueck, wenn der Inhalt gezeigt werden darf.
fn zugriff(kern: &AuthKern, rolle: Option<RollenArt>) -> Option<Identitaet> {
    let zustand = kern.zustand();
    match pruefen(&zustand, rolle) {
        GuardEntscheidung::Anzeigen => zustand.identitaet().cloned(),
        GuardEntscheidung::ZumLoginUmleiten => {
            println!("Weiterleitung zum Login: bitte mit 'anmelden' fortfahren.");
            None
        }
        GuardEntscheidung::LadeAnzeige => {
            println!("Anmeldung wird noch geladen, bitte kurz warten ...");
            None
        }
    }
}

async fn anmelden(kern: &AuthKern, args: &[&str]) {
    let [email, passwort] = args else {
        println!("Benutzung: anmelden <email> <passwort>");
        return;
    };

    match kern.anmelden(email, passwort).await {
        Ok(true) => match kern.aktuelle_identitaet() {
            Some(identitaet) => println!(
                "Willkommen, {} ({})!",
                identitaet.name,
                identitaet.rollen_art()
            ),
            None => println!("Angemeldet."),
        },
        Ok(false) => println!("E-Mail oder Passwort falsch."),
        Err(e) => println!("Anmeldung derzeit nicht moeglich: {e}"),
    }
}

async fn abmelden(kern: &AuthKern) {
    match kern.abmelden().await {
        Ok(()) => println!("Abgemeldet."),
        Err(e) => println!("Abmelden fehlgeschlagen: {e}"),
    }
}

fn wer(kern: &AuthKern) {
    match kern.aktuelle_identitaet() {
        Some(identitaet) => {
            let klasse = identitaet
                .klasse()
                .map(|k| format!(", Klasse {k}"))
                .unwrap_or_default();
            println!(
                "{} <{}>: {}{klasse}",
                identitaet.name,
                identitaet.email,
                identitaet.rollen_art()
            );
        }
        None => println!("Nicht angemeldet."),
    }
}

async fn registrieren(kern: &AuthKern, args: &[&str]) {
    let Some(_admin) = zugriff(kern, Some(RollenArt::Admin)) else {
        return;
    };

    let [email, passwort, rolle, klasse, name @ ..] = args else {
        println!("Benutzung: registrieren <email> <passwort> <rolle> <klasse|-> <name...>");
        return;
    };
    if name.is_empty() {
        println!("Name fehlt.");
        return;
    }

    let antrag = rolle
        .parse::<RollenArt>()
        .map_err(|e| e.to_string())
        .and_then(|art| {
            let klasse = match *klasse {
                "-" => None,
                k => Some(Klasse::neu(k).map_err(|e| e.to_string())?),
            };
            Rolle::zusammensetzen(art, klasse).map_err(|e| e.to_string())
        })
        .and_then(|rolle| {
            NeuesKonto::neu(email, passwort, &name.join(" "), rolle).map_err(|e| e.to_string())
        });

    let antrag = match antrag {
        Ok(antrag) => antrag,
        Err(e) => {
            println!("Ungueltiger Kontoantrag: {e}");
            return;
        }
    };

    match kern.registrieren(&antrag).await {
        Ok(identitaet) => println!(
            "Konto angelegt: {} ({})",
            identitaet.email,
            identitaet.rollen_art()
        ),
        Err(e) => println!("Konto konnte nicht angelegt werden: {e}"),
    }
}

async fn melden(kern: &AuthKern, berichte: &BerichtService<SqliteDb>, args: &[&str]) {
    let Some(identitaet) = zugriff(kern, Some(RollenArt::Schueler)) else {
        return;
    };

    let [temperatur, gewicht, groesse, stimmung, beschwerde @ ..] = args else {
        println!("Benutzung: melden <temp C> <gewicht kg> <groesse cm> <stimmung> [beschwerde...]");
        return;
    };

    let werte = (|| -> Result<NeueMeldung, String> {
        Ok(NeueMeldung {
            temperatur_celsius: temperatur
                .parse()
                .map_err(|_| format!("Ungueltige Temperatur '{temperatur}'"))?,
            gewicht_kg: gewicht
                .parse()
                .map_err(|_| format!("Ungueltiges Gewicht '{gewicht}'"))?,
            groesse_cm: groesse
                .parse()
                .map_err(|_| format!("Ungueltige Groesse '{groesse}'"))?,
            stimmung: stimmung.parse::<Stimmung>()?,
            beschwerde: (!beschwerde.is_empty()).then(|| beschwerde.join(" ")),
        })
    })();

    let meldung = match werte {
        Ok(meldung) => meldung,
        Err(e) => {
            println!("{e} (Stimmungen: froehlich, normal, muede, schlecht)");
            return;
        }
    };

    match berichte.melden(&identitaet, meldung).await {
        Ok(bericht) => println!("Danke! Meldung {} gespeichert.", bericht.id),
        Err(e) => println!("Meldung nicht gespeichert: {e}"),
    }
}

async fn berichte_anzeigen(kern: &AuthKern, berichte: &BerichtService<SqliteDb>) {
    let Some(identitaet) = zugriff(kern, None) else {
        return;
    };

    let ergebnis = match identitaet.rollen_art() {
        RollenArt::Schueler => berichte.eigene_berichte(&identitaet).await,
        RollenArt::Lehrer => berichte.klassen_berichte(&identitaet, None).await,
        RollenArt::Admin => {
            println!("Admins verwalten Konten, Berichte sehen Lehrer und Schueler.");
            return;
        }
    };

    match ergebnis {
        Ok(liste) if liste.is_empty() => println!("Keine Meldungen vorhanden."),
        Ok(liste) => {
            for bericht in &liste {
                bericht_anzeigen(bericht);
            }
        }
        Err(e) => println!("Meldungen nicht abrufbar: {e}"),
    }
}

async fn antworten(kern: &AuthKern, berichte: &BerichtService<SqliteDb>, args: &[&str]) {
    let Some(identitaet) = zugriff(kern, Some(RollenArt::Lehrer)) else {
        return;
    };

    let [id, text @ ..] = args else {
        println!("Benutzung: antworten <bericht-id> <text...>");
        return;
    };
    if text.is_empty() {
        println!("Antworttext fehlt.");
        return;
    }

    let bericht_id = match Uuid::parse_str(id) {
        Ok(id) => BerichtId::from(id),
        Err(_) => {
            println!("Ungueltige Bericht-ID '{id}'.");
            return;
        }
    };

    match berichte
        .beantworten(&identitaet, bericht_id, &text.join(" "))
        .await
    {
        Ok(bericht) => println!("Antwort zu {} gespeichert.", bericht.id),
        Err(e) => println!("Antwort nicht gespeichert: {e}"),
    }
}

fn bericht_anzeigen(bericht: &BerichtRecord) {
    println!(
        "[{}] {}  {:.1} C  {:.1} kg  {:.1} cm  Stimmung: {}",
        bericht.gemeldet_am.format("%Y-%m-%d %H:%M"),
        bericht.id,
        bericht.temperatur_celsius,
        bericht.gewicht_kg,
        bericht.groesse_cm,
        bericht.stimmung,
    );
    if let Some(beschwerde) = &bericht.beschwerde {
        println!("    Beschwerde: {beschwerde}");
    }
    if let Some(antwort) = &bericht.antwort {
        println!("    Antwort: {antwort}");
    }
}
