//! SQLite-Implementierung des KontenRepository

use chrono::Utc;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{KontoRecord, KontoUpdate, NeuesKontoRecord};
use crate::repository::KontenRepository;
use crate::sqlite::pool::SqliteDb;

const KONTO_SPALTEN: &str =
    "id, email, name, passwort_hash, rolle, klasse, created_at, last_login, is_active";

impl KontenRepository for SqliteDb {
    async fn erstellen(&self, data: NeuesKontoRecord<'_>) -> DbResult<KontoRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO konten (id, email, name, passwort_hash, rolle, klasse, created_at, is_active)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1)",
        )
        .bind(id.to_string())
        .bind(data.email)
        .bind(data.name)
        .bind(data.passwort_hash)
        .bind(data.rolle)
        .bind(data.klasse)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits vergeben", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(KontoRecord {
            id,
            email: data.email.to_string(),
            name: data.name.to_string(),
            passwort_hash: data.passwort_hash.to_string(),
            rolle: data.rolle.to_string(),
            klasse: data.klasse.map(Into::into),
            created_at: now,
            last_login: None,
            is_active: true,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord> {
        // Dynamisches UPDATE, nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.name.is_some() {
            sets.push("name = ?");
        }
        if data.passwort_hash.is_some() {
            sets.push("passwort_hash = ?");
        }
        if data.is_active.is_some() {
            sets.push("is_active = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Konto {id}")));
        }

        let sql = format!("UPDATE konten SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.name {
            q = q.bind(v);
        }
        if let Some(ref v) = data.passwort_hash {
            q = q.bind(v);
        }
        if let Some(v) = data.is_active {
            q = q.bind(v as i64);
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Konto {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Konto nach Update nicht gefunden"))
    }

    async fn loeschen(&self, id: Uuid) -> DbResult<bool> {
        // Weicher Loeschvorgang: is_active = 0
        let affected = sqlx::query("UPDATE konten SET is_active = 0 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn liste(&self, nur_aktive: bool) -> DbResult<Vec<KontoRecord>> {
        let sql = if nur_aktive {
            format!("SELECT {KONTO_SPALTEN} FROM konten WHERE is_active = 1 ORDER BY name")
        } else {
            format!("SELECT {KONTO_SPALTEN} FROM konten ORDER BY name")
        };

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_konto).collect()
    }

    async fn update_last_login(&self, id: Uuid) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE konten SET last_login = ? WHERE id = ?")
            .bind(&now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_konto(row: &sqlx::sqlite::SqliteRow) -> DbResult<KontoRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let last_login: Option<String> = row.try_get("last_login")?;
    let last_login = last_login
        .as_deref()
        .map(|s| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::intern(format!("Ungueltige last_login '{s}': {e}")))
        })
        .transpose()?;

    let is_active: i64 = row.try_get("is_active")?;

    Ok(KontoRecord {
        id,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        passwort_hash: row.try_get("passwort_hash")?,
        rolle: row.try_get("rolle")?,
        klasse: row.try_get("klasse")?,
        created_at,
        last_login,
        is_active: is_active != 0,
    })
}
