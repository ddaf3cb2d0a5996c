// ABOUTME: Generic repository providing CRUD over any catalog record type
// ABOUTME: Compile-time field allow-lists, partial updates, filters and stable ordering

use std::fmt::Debug;
use std::marker::PhantomData;

use atelier_core::{fold_case, generate_id};
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::pagination::PageParams;
use crate::{list_codec, StorageError, StorageResult};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A writable column of a record.
///
/// Implemented by a per-entity enum so that only declared, mutable columns
/// can ever reach an INSERT or UPDATE statement.
pub trait Field: Copy + Debug + Send + Sync + 'static {
    fn column(self) -> &'static str;
}

/// A persisted record type
pub trait Record: Sized + Send + Unpin + 'static {
    type Field: Field;

    /// Table name
    const TABLE: &'static str;

    /// Human readable entity name used in logs and errors
    const ENTITY: &'static str;

    /// SELECT statement (without WHERE) producing the columns `from_row` reads.
    /// The record table must be the only table in its FROM clause.
    const SELECT: &'static str;

    /// Ordering used by `list`
    const DEFAULT_ORDER: &'static [SortKey];

    fn from_row(row: &SqliteRow) -> StorageResult<Self>;

    fn id(&self) -> &str;
}

/// A bindable SQL value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    NullableText(Option<String>),
    Integer(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// A list column value, encoded through the list adapter
    pub fn list(items: Option<Vec<String>>) -> Self {
        SqlValue::NullableText(list_codec::encode(items))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::NullableText(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

fn bind_value(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Text(v) => query.bind(v),
        SqlValue::NullableText(v) => query.bind(v),
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Timestamp(v) => query.bind(v),
    }
}

/// One `column = value` pair of a create or update
#[derive(Debug, Clone)]
pub struct Assignment<F: Field> {
    pub field: F,
    pub value: SqlValue,
}

impl<F: Field> Assignment<F> {
    pub fn new(field: F, value: impl Into<SqlValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Sort key for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: &'static str,
    pub descending: bool,
}

impl SortKey {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// WHERE clause builder. Column names are static so only values are bound.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<String>,
    binds: Vec<SqlValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(format!("{} = ?", column));
        self.binds.push(value.into());
        self
    }

    /// Case-insensitive equality against a column holding `fold_case` text
    pub fn eq_folded(mut self, column: &'static str, value: &str) -> Self {
        self.clauses.push(format!("{} = ?", column));
        self.binds.push(SqlValue::Text(fold_case(value)));
        self
    }

    pub fn gte(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(format!("{} >= ?", column));
        self.binds.push(value.into());
        self
    }

    pub fn lte(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(format!("{} <= ?", column));
        self.binds.push(value.into());
        self
    }

    /// Membership test. An empty set matches nothing.
    pub fn in_list(mut self, column: &'static str, values: &[String]) -> Self {
        if values.is_empty() {
            self.clauses.push("0 = 1".to_string());
            return self;
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{} IN ({})", column, placeholders));
        self.binds
            .extend(values.iter().map(|value| SqlValue::Text(value.clone())));
        self
    }

    /// Case-insensitive substring match across any of the given columns.
    /// The columns must hold `fold_case` text: SQLite only folds ASCII, so
    /// both sides are folded on the Rust side.
    pub fn search(mut self, columns: &[&'static str], term: &str) -> Self {
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(&fold_case(term)));
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("{} LIKE ? ESCAPE '\\'", column))
            .collect();

        self.clauses.push(format!("({})", alternatives.join(" OR ")));
        for _ in columns {
            self.binds.push(SqlValue::Text(pattern.clone()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn bind<'q>(&self, mut query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        for value in &self.binds {
            query = bind_value(query, value.clone());
        }
        query
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Generic CRUD helper over one record type
pub struct Repository<R: Record> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<R: Record> Repository<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn order_clause(keys: &[SortKey]) -> String {
        let mut parts: Vec<String> = keys
            .iter()
            .map(|key| {
                format!(
                    "{}.{} {}",
                    R::TABLE,
                    key.column,
                    if key.descending { "DESC" } else { "ASC" }
                )
            })
            .collect();

        // id tiebreak keeps skip/limit pages disjoint
        if !keys.iter().any(|key| key.column == "id") {
            parts.push(format!("{}.id ASC", R::TABLE));
        }

        parts.join(", ")
    }

    async fn fetch_by_id(conn: &mut SqliteConnection, id: &str) -> StorageResult<Option<R>> {
        let sql = format!("{} WHERE {}.id = ?", R::SELECT, R::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// Fetch a single record by id
    pub async fn get(&self, id: &str) -> StorageResult<Option<R>> {
        debug!("Fetching {}: {}", R::ENTITY, id);

        let sql = format!("{} WHERE {}.id = ?", R::SELECT, R::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// Fetch a single record by id, failing with `NotFound` when absent
    pub async fn get_required(&self, id: &str) -> StorageResult<R> {
        self.get(id).await?.ok_or(StorageError::NotFound)
    }

    /// List records in default order
    pub async fn list(&self, page: PageParams) -> StorageResult<Vec<R>> {
        self.find_where(&Filter::new(), R::DEFAULT_ORDER, page).await
    }

    /// First record matching the filter in default order
    pub async fn find_one(&self, filter: &Filter) -> StorageResult<Option<R>> {
        let sql = format!(
            "{}{} ORDER BY {} LIMIT 1",
            R::SELECT,
            filter.where_clause(),
            Self::order_clause(R::DEFAULT_ORDER)
        );

        let row = filter
            .bind(sqlx::query(&sql))
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// Filtered, ordered and paginated listing
    pub async fn find_where(
        &self,
        filter: &Filter,
        order: &[SortKey],
        page: PageParams,
    ) -> StorageResult<Vec<R>> {
        let (limit, offset) = page.validate();
        debug!(
            "Listing {} (limit: {}, offset: {}, filtered: {})",
            R::ENTITY,
            limit,
            offset,
            !filter.is_empty()
        );

        let sql = format!(
            "{}{} ORDER BY {} LIMIT ? OFFSET ?",
            R::SELECT,
            filter.where_clause(),
            Self::order_clause(order)
        );

        let rows = filter
            .bind(sqlx::query(&sql))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(R::from_row).collect()
    }

    /// Every record matching the filter, unpaginated
    pub async fn find_all(&self, filter: &Filter, order: &[SortKey]) -> StorageResult<Vec<R>> {
        let sql = format!(
            "{}{} ORDER BY {}",
            R::SELECT,
            filter.where_clause(),
            Self::order_clause(order)
        );

        let rows = filter
            .bind(sqlx::query(&sql))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(R::from_row).collect()
    }

    pub async fn count(&self) -> StorageResult<i64> {
        self.count_where(&Filter::new()).await
    }

    pub async fn count_where(&self, filter: &Filter) -> StorageResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}{}", R::TABLE, filter.where_clause());
        let row = filter
            .bind(sqlx::query(&sql))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.try_get::<i64, _>(0).map_err(StorageError::Sqlx)
    }

    pub async fn exists_where(&self, filter: &Filter) -> StorageResult<bool> {
        let sql = format!("SELECT 1 FROM {}{} LIMIT 1", R::TABLE, filter.where_clause());
        let row = filter
            .bind(sqlx::query(&sql))
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(row.is_some())
    }

    /// Insert a new record and return it as stored
    pub async fn create(&self, values: Vec<Assignment<R::Field>>) -> StorageResult<R> {
        let id = generate_id();
        let now = Utc::now();

        debug!("Creating {}: {}", R::ENTITY, id);

        let mut columns = vec!["id", "created_at", "updated_at"];
        columns.extend(values.iter().map(|assignment| assignment.field.column()));
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            columns.join(", "),
            placeholders
        );

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let mut query = sqlx::query(&sql).bind(id.as_str()).bind(now).bind(now);
        for assignment in values {
            query = bind_value(query, assignment.value);
        }
        query
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;

        let record = Self::fetch_by_id(&mut tx, &id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(record)
    }

    /// Apply only the supplied assignments to an existing record
    pub async fn update(&self, existing: &R, changes: Vec<Assignment<R::Field>>) -> StorageResult<R> {
        let id = existing.id();

        if changes.is_empty() {
            debug!("No changes for {}: {}", R::ENTITY, id);
            return self.get_required(id).await;
        }

        debug!("Updating {}: {} ({} fields)", R::ENTITY, id, changes.len());

        let sets: Vec<String> = changes
            .iter()
            .map(|assignment| format!("{} = ?", assignment.field.column()))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ? WHERE id = ?",
            R::TABLE,
            sets.join(", ")
        );

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let mut query = sqlx::query(&sql);
        for assignment in changes {
            query = bind_value(query, assignment.value);
        }
        let result = query
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let record = Self::fetch_by_id(&mut tx, id)
            .await?
            .ok_or(StorageError::NotFound)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(record)
    }

    /// Atomically add `amount` to an integer column. `None` when no record has this id.
    pub async fn increment(
        &self,
        id: &str,
        field: R::Field,
        amount: i64,
    ) -> StorageResult<Option<R>> {
        debug!("Incrementing {}.{} for {}", R::ENTITY, field.column(), id);

        let sql = format!(
            "UPDATE {table} SET {column} = {column} + ?, updated_at = ? WHERE id = ?",
            table = R::TABLE,
            column = field.column()
        );

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result = sqlx::query(&sql)
            .bind(amount)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let record = Self::fetch_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(record)
    }

    /// Remove a record, returning it. `None` when no record has this id.
    pub async fn delete(&self, id: &str) -> StorageResult<Option<R>> {
        debug!("Deleting {}: {}", R::ENTITY, id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let Some(record) = Self::fetch_by_id(&mut tx, id).await? else {
            return Ok(None);
        };

        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_where_clause() {
        let filter = Filter::new()
            .eq("is_active", true)
            .gte("rating", 2i64)
            .search(&["name_key", "search_key"], " Élégance ");

        assert_eq!(
            filter.where_clause(),
            " WHERE is_active = ? AND rating >= ? AND (name_key LIKE ? ESCAPE '\\' OR search_key LIKE ? ESCAPE '\\')"
        );
        assert_eq!(filter.binds.len(), 4);
        assert_eq!(filter.binds[2], SqlValue::Text("%élégance%".to_string()));
    }

    #[test]
    fn test_eq_folded_binds_folded_value() {
        let filter = Filter::new().eq_folded("client_name_key", "ZOË Élise ");
        assert_eq!(filter.where_clause(), " WHERE client_name_key = ?");
        assert_eq!(filter.binds, vec![SqlValue::Text("zoë élise".to_string())]);
    }

    #[test]
    fn test_empty_filter() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.where_clause(), "");
    }

    #[test]
    fn test_in_list() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let filter = Filter::new().in_list("suite_id", &ids);
        assert_eq!(filter.where_clause(), " WHERE suite_id IN (?, ?)");

        let filter = Filter::new().in_list("suite_id", &[]);
        assert_eq!(filter.where_clause(), " WHERE 0 = 1");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_list_value_encoding() {
        assert_eq!(
            SqlValue::list(Some(vec!["S".to_string()])),
            SqlValue::NullableText(Some(r#"["S"]"#.to_string()))
        );
        assert_eq!(SqlValue::list(None), SqlValue::NullableText(None));
    }
}
