//! Bericht-Service: rollen- und klassengebundene Operationen
//!
//! Der Service prueft die Identitaet des Aufrufers selbst, statt sich
//! auf die Oberflaeche zu verlassen: die Klasse eines neuen Berichts
//! stammt immer aus der Schueler-Identitaet, nie aus dem Formular.

use chrono::NaiveDate;
use std::sync::Arc;

use schulfit_core::{BerichtId, Identitaet, Rolle};
use schulfit_db::{BerichtRecord, BerichtRepository, NeuerBericht};

use crate::error::{BerichtFehler, BerichtResult};
use crate::stimmung::Stimmung;

/// Plausibilitaetsgrenzen fuer Grundschulkinder
const TEMPERATUR_BEREICH: std::ops::RangeInclusive<f64> = 34.0..=43.0;
const GEWICHT_BEREICH: std::ops::RangeInclusive<f64> = 10.0..=120.0;
const GROESSE_BEREICH: std::ops::RangeInclusive<f64> = 80.0..=220.0;

/// Eingaben einer taeglichen Meldung
#[derive(Debug, Clone)]
pub struct NeueMeldung {
    pub temperatur_celsius: f64,
    pub gewicht_kg: f64,
    pub groesse_cm: f64,
    pub stimmung: Stimmung,
    pub beschwerde: Option<String>,
}

impl NeueMeldung {
    fn pruefen(&self) -> BerichtResult<()> {
        if !TEMPERATUR_BEREICH.contains(&self.temperatur_celsius) {
            return Err(BerichtFehler::werte(format!(
                "Temperatur {} ausserhalb {:?}",
                self.temperatur_celsius, TEMPERATUR_BEREICH
            )));
        }
        if !GEWICHT_BEREICH.contains(&self.gewicht_kg) {
            return Err(BerichtFehler::werte(format!(
                "Gewicht {} ausserhalb {:?}",
                self.gewicht_kg, GEWICHT_BEREICH
            )));
        }
        if !GROESSE_BEREICH.contains(&self.groesse_cm) {
            return Err(BerichtFehler::werte(format!(
                "Groesse {} ausserhalb {:?}",
                self.groesse_cm, GROESSE_BEREICH
            )));
        }
        Ok(())
    }
}

/// Service fuer Gesundheitsberichte
pub struct BerichtService<B: BerichtRepository> {
    repo: Arc<B>,
}

impl<B: BerichtRepository> BerichtService<B> {
    /// Erstellt einen neuen Service ueber dem angegebenen Repository
    pub fn neu(repo: Arc<B>) -> Self {
        Self { repo }
    }

    /// Legt eine Meldung des angemeldeten Schuelers an
    pub async fn melden(
        &self,
        wer: &Identitaet,
        meldung: NeueMeldung,
    ) -> BerichtResult<BerichtRecord> {
        let Rolle::Schueler { klasse } = &wer.rolle else {
            return Err(BerichtFehler::zugriff(
                "Nur Schueler koennen Meldungen abgeben",
            ));
        };
        meldung.pruefen()?;

        let beschwerde = meldung
            .beschwerde
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let bericht = self
            .repo
            .erstellen(NeuerBericht {
                konto_id: wer.id.inner(),
                klasse: klasse.als_str(),
                temperatur_celsius: meldung.temperatur_celsius,
                gewicht_kg: meldung.gewicht_kg,
                groesse_cm: meldung.groesse_cm,
                stimmung: meldung.stimmung.als_str(),
                beschwerde,
            })
            .await?;

        tracing::info!(
            bericht = %bericht.id,
            konto = %wer.id,
            klasse = %bericht.klasse,
            "Gesundheitsmeldung angelegt"
        );
        Ok(bericht)
    }

    /// Alle Meldungen des angemeldeten Schuelers, neueste zuerst
    pub async fn eigene_berichte(&self, wer: &Identitaet) -> BerichtResult<Vec<BerichtRecord>> {
        if !matches!(wer.rolle, Rolle::Schueler { .. }) {
            return Err(BerichtFehler::zugriff("Nur Schueler haben eigene Meldungen"));
        }
        Ok(self.repo.fuer_konto(wer.id.inner()).await?)
    }

    /// Meldungen der eigenen Klasse, optional auf einen Tag gefiltert
    pub async fn klassen_berichte(
        &self,
        wer: &Identitaet,
        tag: Option<NaiveDate>,
    ) -> BerichtResult<Vec<BerichtRecord>> {
        let Rolle::Lehrer { klasse } = &wer.rolle else {
            return Err(BerichtFehler::zugriff(
                "Nur Lehrer sehen die Meldungen ihrer Klasse",
            ));
        };
        Ok(self.repo.fuer_klasse(klasse.als_str(), tag).await?)
    }

    /// Traegt die Antwort einer Lehrkraft zu einer Meldung ein
    ///
    /// Die Meldung muss zur Klasse der Lehrkraft gehoeren.
    pub async fn beantworten(
        &self,
        wer: &Identitaet,
        bericht_id: BerichtId,
        antwort: &str,
    ) -> BerichtResult<BerichtRecord> {
        let Rolle::Lehrer { klasse } = &wer.rolle else {
            return Err(BerichtFehler::zugriff("Nur Lehrer koennen antworten"));
        };

        let antwort = antwort.trim();
        if antwort.is_empty() {
            return Err(BerichtFehler::werte("Antwort darf nicht leer sein"));
        }

        let bericht = self
            .repo
            .get_by_id(bericht_id.inner())
            .await?
            .ok_or_else(|| BerichtFehler::NichtGefunden(bericht_id.to_string()))?;

        if bericht.klasse != klasse.als_str() {
            return Err(BerichtFehler::zugriff(format!(
                "Meldung gehoert zu Klasse {}, nicht {}",
                bericht.klasse, klasse
            )));
        }

        let beantwortet = self
            .repo
            .beantworten(bericht.id, wer.id.inner(), antwort)
            .await?;

        tracing::info!(
            bericht = %beantwortet.id,
            lehrkraft = %wer.id,
            "Meldung beantwortet"
        );
        Ok(beantwortet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schulfit_core::{Klasse, KontoId};
    use schulfit_db::SqliteDb;

    fn schueler(klasse: &str) -> Identitaet {
        Identitaet {
            id: KontoId::new(),
            name: "Ben Sattler".into(),
            email: "ben@schule.de".into(),
            rolle: Rolle::Schueler {
                klasse: Klasse::neu(klasse).unwrap(),
            },
        }
    }

    fn lehrer(klasse: &str) -> Identitaet {
        Identitaet {
            id: KontoId::new(),
            name: "Frau Sander".into(),
            email: "sander@schule.de".into(),
            rolle: Rolle::Lehrer {
                klasse: Klasse::neu(klasse).unwrap(),
            },
        }
    }

    fn admin() -> Identitaet {
        Identitaet {
            id: KontoId::new(),
            name: "Herr Rudolph".into(),
            email: "admin@schule.de".into(),
            rolle: Rolle::Admin,
        }
    }

    fn meldung() -> NeueMeldung {
        NeueMeldung {
            temperatur_celsius: 36.7,
            gewicht_kg: 30.0,
            groesse_cm: 132.0,
            stimmung: Stimmung::Froehlich,
            beschwerde: None,
        }
    }

    async fn service() -> BerichtService<SqliteDb> {
        let db = SqliteDb::in_memory().await.expect("In-Memory DB");
        BerichtService::neu(Arc::new(db))
    }

    #[tokio::test]
    async fn schueler_meldet_eigene_klasse() {
        let service = service().await;
        let wer = schueler("6A");

        let bericht = service.melden(&wer, meldung()).await.unwrap();
        assert_eq!(bericht.konto_id, wer.id.inner());
        assert_eq!(bericht.klasse, "6A", "Klasse stammt aus der Identitaet");

        let eigene = service.eigene_berichte(&wer).await.unwrap();
        assert_eq!(eigene.len(), 1);
    }

    #[tokio::test]
    async fn nur_schueler_duerfen_melden() {
        let service = service().await;

        for wer in [lehrer("6A"), admin()] {
            let ergebnis = service.melden(&wer, meldung()).await;
            assert!(matches!(ergebnis, Err(BerichtFehler::ZugriffVerweigert(_))));
        }
    }

    #[tokio::test]
    async fn unplausible_werte_abgelehnt() {
        let service = service().await;
        let wer = schueler("6A");

        let zu_heiss = NeueMeldung {
            temperatur_celsius: 45.0,
            ..meldung()
        };
        assert!(matches!(
            service.melden(&wer, zu_heiss).await,
            Err(BerichtFehler::UngueltigeWerte(_))
        ));

        let zu_leicht = NeueMeldung {
            gewicht_kg: 2.0,
            ..meldung()
        };
        assert!(matches!(
            service.melden(&wer, zu_leicht).await,
            Err(BerichtFehler::UngueltigeWerte(_))
        ));
    }

    #[tokio::test]
    async fn leere_beschwerde_wird_verworfen() {
        let service = service().await;
        let wer = schueler("6A");

        let mit_leerer_beschwerde = NeueMeldung {
            beschwerde: Some("   ".into()),
            ..meldung()
        };
        let bericht = service.melden(&wer, mit_leerer_beschwerde).await.unwrap();
        assert!(bericht.beschwerde.is_none());
    }

    #[tokio::test]
    async fn lehrer_sieht_nur_eigene_klasse() {
        let service = service().await;
        service.melden(&schueler("6A"), meldung()).await.unwrap();
        service.melden(&schueler("4B"), meldung()).await.unwrap();

        let gesehen = service
            .klassen_berichte(&lehrer("6A"), None)
            .await
            .unwrap();
        assert_eq!(gesehen.len(), 1);
        assert_eq!(gesehen[0].klasse, "6A");

        assert!(matches!(
            service.klassen_berichte(&admin(), None).await,
            Err(BerichtFehler::ZugriffVerweigert(_))
        ));
    }

    #[tokio::test]
    async fn antwort_nur_durch_lehrer_der_klasse() {
        let service = service().await;
        let bericht = service.melden(&schueler("6A"), meldung()).await.unwrap();
        let id = BerichtId::from(bericht.id);

        // Lehrkraft einer fremden Klasse
        let fremd = service.beantworten(&lehrer("4B"), id, "Gute Besserung").await;
        assert!(matches!(fremd, Err(BerichtFehler::ZugriffVerweigert(_))));

        // Leere Antwort
        let leer = service.beantworten(&lehrer("6A"), id, "   ").await;
        assert!(matches!(leer, Err(BerichtFehler::UngueltigeWerte(_))));

        // Passende Lehrkraft
        let wer = lehrer("6A");
        let beantwortet = service
            .beantworten(&wer, id, "Gute Besserung, ruh dich aus!")
            .await
            .unwrap();
        assert!(beantwortet.ist_beantwortet());
        assert_eq!(beantwortet.beantwortet_von, Some(wer.id.inner()));
    }

    #[tokio::test]
    async fn antwort_auf_unbekannte_meldung() {
        let service = service().await;
        let ergebnis = service
            .beantworten(&lehrer("6A"), BerichtId::new(), "Hallo?")
            .await;
        assert!(matches!(ergebnis, Err(BerichtFehler::NichtGefunden(_))));
    }
}
