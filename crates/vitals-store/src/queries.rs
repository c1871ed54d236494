//! Query builder for glucose and pressure records.
//!
//! [`RecordQuery`] follows the builder pattern: every filter is optional
//! and can be chained in any order. Records are always ordered by
//! `recorded_at`, with the row id breaking ties in the same direction, so
//! the order is total even when two records share a timestamp.
//!
//! # Example
//!
//! ```
//! use vitals_store::{RecordQuery, Store};
//! use time::{Duration, OffsetDateTime};
//!
//! let store = Store::open_in_memory()?;
//! let last_week = OffsetDateTime::now_utc() - Duration::days(7);
//!
//! // Ten most recent glucose records
//! let recent = store.query_glucose(&RecordQuery::new().limit(10))?;
//!
//! // Every pressure record since last week, oldest first
//! let window = store.query_pressure(&RecordQuery::new().since(last_week).oldest_first())?;
//! # assert!(recent.is_empty() && window.is_empty());
//! # Ok::<(), vitals_store::Error>(())
//! ```

use time::OffsetDateTime;

use crate::error::Result;
use crate::models::format_timestamp;

/// Fluent query builder for stored records.
///
/// By default, queries return every record ordered newest first.
#[derive(Debug, Default, Clone)]
pub struct RecordQuery {
    /// Only include records at or after this instant.
    pub since: Option<OffsetDateTime>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Order by recorded_at descending (newest first).
    pub newest_first: bool,
}

impl RecordQuery {
    /// Create a new query: no filter, no limit, newest first.
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Filter to records at or after this instant (inclusive).
    pub fn since(mut self, time: OffsetDateTime) -> Self {
        self.since = Some(time);
        self
    }

    /// Limit the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order results oldest first (ascending by `recorded_at`, then id).
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Build the SQL WHERE clause and parameters.
    pub(crate) fn build_where(&self) -> Result<(String, Vec<Box<dyn rusqlite::ToSql>>)> {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(since) = self.since {
            conditions.push("recorded_at >= ?");
            params.push(Box::new(format_timestamp(since)?));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Ok((where_clause, params))
    }

    /// Build the full SQL query against `table`, selecting `columns`.
    pub(crate) fn build_sql(&self, table: &str, columns: &str) -> Result<String> {
        let (where_clause, _) = self.build_where()?;
        let order = if self.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT {columns} FROM {table} {where_clause} ORDER BY recorded_at {order}, id {order}"
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(sql)
    }
}
