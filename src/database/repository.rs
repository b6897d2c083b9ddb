use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Entity;

/// CRUD over one entity table. Every call is a single auto-committed statement.
pub struct Repository<E> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All rows, ordered by id.
    pub async fn list(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = format!("{} ORDER BY \"id\"", select_sql(E::TABLE, E::COLUMNS));
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Rows whose `column` equals `value`, ordered by id.
    pub async fn list_by(&self, column: &str, value: i32) -> Result<Vec<E>, DatabaseError> {
        if !E::COLUMNS.iter().any(|c| *c == column) {
            return Err(DatabaseError::QueryError(format!(
                "{} has no column '{}'",
                E::LABEL,
                column
            )));
        }

        let sql = format!(
            "{} WHERE {} = $1 ORDER BY \"id\"",
            select_sql(E::TABLE, E::COLUMNS),
            quote_identifier(column)
        );
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i32) -> Result<Option<E>, DatabaseError> {
        let sql = format!("{} WHERE \"id\" = $1", select_sql(E::TABLE, E::COLUMNS));
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Like [`find`](Self::find) but an absent row is an error.
    pub async fn get(&self, id: i32) -> Result<E, DatabaseError> {
        self.find(id).await?.ok_or_else(|| not_found::<E>(id))
    }

    pub async fn create(&self, entity: &E) -> Result<(), DatabaseError> {
        let sql = insert_sql(E::TABLE, E::COLUMNS);
        entity.bind_columns(sqlx::query(&sql)).execute(&self.pool).await?;
        Ok(())
    }

    /// Overwrite every column of the row currently identified by `id`,
    /// including the id itself.
    pub async fn update(&self, id: i32, entity: &E) -> Result<(), DatabaseError> {
        let sql = update_sql(E::TABLE, E::COLUMNS);
        let result = entity
            .bind_columns(sqlx::query(&sql))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<E>(id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE \"id\" = $1", quote_identifier(E::TABLE));
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<E>(id));
        }
        Ok(())
    }
}

fn not_found<E: Entity>(id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {} not found", E::LABEL, id))
}

/// Quote SQL identifier to prevent injection
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_sql(table: &str, columns: &[&str]) -> String {
    format!("SELECT {} FROM {}", column_list(columns), quote_identifier(table))
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        column_list(columns),
        placeholders
    )
}

/// The path id is bound after the column values, as `$<columns + 1>`.
fn update_sql(table: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quote_identifier(c), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE \"id\" = ${}",
        quote_identifier(table),
        assignments,
        columns.len() + 1
    )
}
