use super::ProfileStore;
use crate::db::Database;
use crate::error::{Result, SchemeError};
use crate::models::{
    EligibilityResultSet, FarmerInput, FarmerProfile, SavedProfileSummary, SearchRecord,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

// Profile Queries

impl ProfileStore for Database {
    fn save_profile(
        &self,
        user_id: &str,
        profile_name: &str,
        input: &FarmerInput,
        results: &EligibilityResultSet,
    ) -> Result<SavedProfileSummary> {
        if profile_name.trim().is_empty() {
            return Err(SchemeError::InvalidData("Profile name is empty".into()));
        }

        let answers_json = serde_json::to_string(input)?;
        let names_json = serde_json::to_string(&results.names())?;
        let now = Utc::now();

        let profile_id = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                r#"
                INSERT INTO farmer_profiles
                    (user_id, profile_name, answers_json, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?4)
                ON CONFLICT(user_id, profile_name) DO UPDATE SET
                    answers_json = excluded.answers_json,
                    updated_at = excluded.updated_at
                "#,
                params![user_id, profile_name, answers_json, now.to_rfc3339()],
            )?;
            let profile_id: i64 = tx.query_row(
                "SELECT id FROM farmer_profiles WHERE user_id = ?1 AND profile_name = ?2",
                params![user_id, profile_name],
                |row| row.get(0),
            )?;
            tx.execute(
                r#"
                INSERT INTO search_history
                    (profile_id, eligible_count, scheme_names_json, searched_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    profile_id,
                    results.count as i64,
                    names_json,
                    results.searched_at.to_rfc3339(),
                ],
            )?;
            tx.commit()?;
            Ok(profile_id)
        })?;

        Ok(SavedProfileSummary {
            profile_id,
            user_id: user_id.to_string(),
            profile_name: profile_name.to_string(),
            eligible_count: results.count,
            saved_at: now,
        })
    }
}

impl Database {
    pub fn list_profiles(&self, user_id: &str) -> Result<Vec<FarmerProfile>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM farmer_profiles WHERE user_id = ?1 ORDER BY profile_name",
            )?;
            let profiles = stmt
                .query_map([user_id], row_to_profile)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(profiles)
        })
    }

    pub fn get_profile(&self, user_id: &str, profile_name: &str) -> Result<Option<FarmerProfile>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM farmer_profiles WHERE user_id = ?1 AND profile_name = ?2",
                params![user_id, profile_name],
                row_to_profile,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn delete_profile(&self, user_id: &str, profile_name: &str) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            Ok(conn.execute(
                "DELETE FROM farmer_profiles WHERE user_id = ?1 AND profile_name = ?2",
                params![user_id, profile_name],
            )?)
        })?;
        if deleted == 0 {
            return Err(SchemeError::NotFound(format!("Profile '{}'", profile_name)));
        }
        Ok(())
    }
}

fn row_to_profile(row: &Row) -> rusqlite::Result<FarmerProfile> {
    let name: String = row.get("profile_name")?;
    let answers_str: String = row.get("answers_json")?;
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;

    let answers = serde_json::from_str::<FarmerInput>(&answers_str).unwrap_or_else(|e| {
        warn!(profile = %name, error = %e, "Unreadable stored answers, using none");
        FarmerInput::default()
    });

    Ok(FarmerProfile {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name,
        answers,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

// Search History Queries

impl Database {
    pub fn search_history(&self, profile_id: i64, limit: usize) -> Result<Vec<SearchRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, profile_id, eligible_count, scheme_names_json, searched_at
                FROM search_history
                WHERE profile_id = ?1
                ORDER BY searched_at DESC, id DESC
                LIMIT ?2
                "#,
            )?;
            let records = stmt
                .query_map(params![profile_id, limit as i64], row_to_search_record)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(records)
        })
    }
}

fn row_to_search_record(row: &Row) -> rusqlite::Result<SearchRecord> {
    let names_str: String = row.get("scheme_names_json")?;
    let searched_at_str: String = row.get("searched_at")?;
    let eligible_count: i64 = row.get("eligible_count")?;

    let scheme_names = serde_json::from_str::<Vec<String>>(&names_str).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable scheme names in search history");
        Vec::new()
    });

    Ok(SearchRecord {
        id: row.get("id")?,
        profile_id: row.get("profile_id")?,
        eligible_count: eligible_count.max(0) as usize,
        scheme_names,
        searched_at: parse_timestamp(&searched_at_str),
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
