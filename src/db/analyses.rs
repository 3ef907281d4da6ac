//! Analysis run persistence.
//!
//! CRUD operations for the `analyses` table. The full bundle is stored as
//! JSON; a few derived columns are kept alongside it so history listings
//! never have to deserialize bundles.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::analysis::AnalysisBundle;

/// An analysis run from the database.
#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub id: i64,
    pub source: String,
    pub title: Option<String>,
    pub row_count: i64,
    pub action_items: i64,
    pub decisions: i64,
    pub questions: i64,
    pub duration_minutes: i64,
    pub bundle_json: String,
    pub created_at: String,
}

impl StoredAnalysis {
    /// Deserialize the stored bundle.
    pub fn bundle(&self) -> Result<AnalysisBundle> {
        serde_json::from_str(&self.bundle_json).context("Failed to deserialize stored bundle")
    }
}

const SELECT_COLUMNS: &str = "id, source, title, row_count, action_items, decisions, \
                              questions, duration_minutes, bundle_json, created_at";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredAnalysis> {
    Ok(StoredAnalysis {
        id: row.get(0)?,
        source: row.get(1)?,
        title: row.get(2)?,
        row_count: row.get(3)?,
        action_items: row.get(4)?,
        decisions: row.get(5)?,
        questions: row.get(6)?,
        duration_minutes: row.get(7)?,
        bundle_json: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Repository for analysis runs.
pub struct AnalysisRepository;

impl AnalysisRepository {
    /// Insert a run. Returns the new analysis ID. The derived count
    /// columns are taken from the bundle at insert time.
    pub fn insert(
        conn: &Connection,
        source: &str,
        title: Option<&str>,
        row_count: usize,
        bundle: &AnalysisBundle,
    ) -> Result<i64> {
        let bundle_json =
            serde_json::to_string(bundle).context("Failed to serialize analysis bundle")?;

        conn.execute(
            "INSERT INTO analyses (source, title, row_count, action_items, decisions, \
             questions, duration_minutes, bundle_json) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                source,
                title,
                row_count as i64,
                bundle.action_items.len() as i64,
                bundle.decisions.len() as i64,
                bundle.questions.len() as i64,
                bundle.meeting_stats.duration,
                bundle_json,
            ],
        )
        .context("Failed to insert analysis")?;

        Ok(conn.last_insert_rowid())
    }

    /// Rewrite a run's bundle after a reducer action. The derived count
    /// columns follow the new bundle; `row_count` and the stats inside the
    /// JSON are untouched.
    pub fn update_bundle(conn: &Connection, id: i64, bundle: &AnalysisBundle) -> Result<()> {
        let bundle_json =
            serde_json::to_string(bundle).context("Failed to serialize analysis bundle")?;

        conn.execute(
            "UPDATE analyses SET bundle_json = ?1, action_items = ?2, decisions = ?3, \
             questions = ?4 WHERE id = ?5",
            params![
                bundle_json,
                bundle.action_items.len() as i64,
                bundle.decisions.len() as i64,
                bundle.questions.len() as i64,
                id,
            ],
        )
        .context("Failed to update analysis bundle")?;
        Ok(())
    }

    /// Get an analysis by ID.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<StoredAnalysis>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM analyses WHERE id = ?1"
            ))
            .context("Failed to prepare analysis query")?;

        let mut rows = stmt
            .query_map(params![id], map_row)
            .context("Failed to query analysis")?;

        match rows.next() {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// List runs, newest first, optionally filtered by a substring of the
    /// source or title.
    pub fn list(conn: &Connection, query: Option<&str>, limit: usize) -> Result<Vec<StoredAnalysis>> {
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM analyses WHERE 1=1");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(q) = query {
            sql.push_str(" AND (source LIKE ? OR title LIKE ?)");
            params.push(Box::new(format!("%{}%", q)));
            params.push(Box::new(format!("%{}%", q)));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
        params.push(Box::new(limit as i64));

        let mut stmt = conn.prepare(&sql).context("Failed to prepare list query")?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), map_row)
            .context("Failed to list analyses")?;

        let mut analyses = Vec::new();
        for row in rows {
            analyses.push(row?);
        }

        Ok(analyses)
    }

    /// Delete a run. Returns false when the id did not exist.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM analyses WHERE id = ?1", params![id])
            .context("Failed to delete analysis")?;
        Ok(deleted > 0)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .context("Failed to count analyses")?;
        Ok(count)
    }

    /// Drop the oldest runs beyond `max_count`. Returns how many were
    /// removed.
    pub fn prune(conn: &Connection, max_count: i64) -> Result<usize> {
        let count = Self::count(conn)?;

        if count <= max_count {
            return Ok(0);
        }

        let to_delete = count - max_count;

        let deleted = conn
            .execute(
                "DELETE FROM analyses WHERE id IN (
                    SELECT id FROM analyses ORDER BY created_at ASC, id ASC LIMIT ?1
                )",
                [to_delete],
            )
            .context("Failed to prune old analyses")?;

        Ok(deleted)
    }
}
