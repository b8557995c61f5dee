//! SQLite-Implementierung des BerichtRepository

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{BerichtRecord, NeuerBericht};
use crate::repository::BerichtRepository;
use crate::sqlite::pool::SqliteDb;

const BERICHT_SPALTEN: &str =
    "id, konto_id, klasse, temperatur_celsius, gewicht_kg, groesse_cm, stimmung, beschwerde, \
     gemeldet_am, antwort, beantwortet_von, beantwortet_am";

impl BerichtRepository for SqliteDb {
    async fn erstellen(&self, data: NeuerBericht<'_>) -> DbResult<BerichtRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO berichte
                (id, konto_id, klasse, temperatur_celsius, gewicht_kg, groesse_cm,
                 stimmung, beschwerde, gemeldet_am)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.konto_id.to_string())
        .bind(data.klasse)
        .bind(data.temperatur_celsius)
        .bind(data.gewicht_kg)
        .bind(data.groesse_cm)
        .bind(data.stimmung)
        .bind(data.beschwerde)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(BerichtRecord {
            id,
            konto_id: data.konto_id,
            klasse: data.klasse.to_string(),
            temperatur_celsius: data.temperatur_celsius,
            gewicht_kg: data.gewicht_kg,
            groesse_cm: data.groesse_cm,
            stimmung: data.stimmung.to_string(),
            beschwerde: data.beschwerde.map(Into::into),
            gemeldet_am: now,
            antwort: None,
            beantwortet_von: None,
            beantwortet_am: None,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BerichtRecord>> {
        let sql = format!("SELECT {BERICHT_SPALTEN} FROM berichte WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_bericht(&r)).transpose()
    }

    async fn fuer_konto(&self, konto_id: Uuid) -> DbResult<Vec<BerichtRecord>> {
        let sql = format!(
            "SELECT {BERICHT_SPALTEN} FROM berichte
             WHERE konto_id = ? ORDER BY gemeldet_am DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(konto_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_bericht).collect()
    }

    async fn fuer_klasse(
        &self,
        klasse: &str,
        tag: Option<NaiveDate>,
    ) -> DbResult<Vec<BerichtRecord>> {
        // gemeldet_am ist RFC3339, die ersten 10 Zeichen sind das Datum
        let rows = match tag {
            Some(tag) => {
                let sql = format!(
                    "SELECT {BERICHT_SPALTEN} FROM berichte
                     WHERE klasse = ? AND substr(gemeldet_am, 1, 10) = ?
                     ORDER BY gemeldet_am DESC"
                );
                sqlx::query(&sql)
                    .bind(klasse)
                    .bind(tag.format("%Y-%m-%d").to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {BERICHT_SPALTEN} FROM berichte
                     WHERE klasse = ? ORDER BY gemeldet_am DESC"
                );
                sqlx::query(&sql).bind(klasse).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(row_to_bericht).collect()
    }

    async fn beantworten(
        &self,
        id: Uuid,
        lehrer_id: Uuid,
        antwort: &str,
    ) -> DbResult<BerichtRecord> {
        let now = Utc::now().to_rfc3339();
        let affected = sqlx::query(
            "UPDATE berichte SET antwort = ?, beantwortet_von = ?, beantwortet_am = ?
             WHERE id = ?",
        )
        .bind(antwort)
        .bind(lehrer_id.to_string())
        .bind(&now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Bericht {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Bericht nach Antwort nicht gefunden"))
    }
}

fn row_to_bericht(row: &sqlx::sqlite::SqliteRow) -> DbResult<BerichtRecord> {
    use sqlx::Row as _;

    let uuid_aus = |feld: &str, wert: &str| {
        Uuid::parse_str(wert)
            .map_err(|e| DbError::intern(format!("Ungueltige UUID in '{feld}': {e}")))
    };
    let zeit_aus = |feld: &str, wert: &str| {
        chrono::DateTime::parse_from_rfc3339(wert)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DbError::intern(format!("Ungueltiger Zeitstempel in '{feld}': {e}")))
    };

    let id_str: String = row.try_get("id")?;
    let konto_id_str: String = row.try_get("konto_id")?;
    let gemeldet_am_str: String = row.try_get("gemeldet_am")?;

    let beantwortet_von: Option<String> = row.try_get("beantwortet_von")?;
    let beantwortet_von = beantwortet_von
        .as_deref()
        .map(|s| uuid_aus("beantwortet_von", s))
        .transpose()?;

    let beantwortet_am: Option<String> = row.try_get("beantwortet_am")?;
    let beantwortet_am = beantwortet_am
        .as_deref()
        .map(|s| zeit_aus("beantwortet_am", s))
        .transpose()?;

    Ok(BerichtRecord {
        id: uuid_aus("id", &id_str)?,
        konto_id: uuid_aus("konto_id", &konto_id_str)?,
        klasse: row.try_get("klasse")?,
        temperatur_celsius: row.try_get("temperatur_celsius")?,
        gewicht_kg: row.try_get("gewicht_kg")?,
        groesse_cm: row.try_get("groesse_cm")?,
        stimmung: row.try_get("stimmung")?,
        beschwerde: row.try_get("beschwerde")?,
        gemeldet_am: zeit_aus("gemeldet_am", &gemeldet_am_str)?,
        antwort: row.try_get("antwort")?,
        beantwortet_von,
        beantwortet_am,
    })
}
