use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, types::Json, PgPool, Postgres, QueryBuilder, Row};

use crate::model::{generate_id, Collection, Document, Fields, Id};
use crate::store::traits::{DocumentQuery, DocumentStore, OrderBy};

/// Document store persisting every collection into one JSONB table
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn document_from_row(row: PgRow) -> Result<Document> {
    let Json(fields): Json<Fields> = row.try_get("fields")?;
    Ok(Document::new(
        row.try_get("id")?,
        row.try_get("user_id")?,
        row.try_get("created_at")?,
        fields,
    ))
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn create_document(&self, collection: Collection, user_id: &str, fields: Fields) -> Result<Id> {
        let id = generate_id();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, user_id, created_at, fields)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(collection.name())
        .bind(&id)
        .bind(user_id)
        .bind(Utc::now())
        .bind(Json(fields))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert into {}", collection))?;

        Ok(id)
    }

    async fn get_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, created_at, fields
            FROM documents
            WHERE collection = $1 AND id = $2 AND user_id = $3
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to fetch {} document", collection))?;

        row.map(document_from_row).transpose()
    }

    async fn list_documents(
        &self,
        collection: Collection,
        user_id: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, created_at, fields FROM documents WHERE collection = ",
        );
        builder.push_bind(collection.name());
        builder.push(" AND user_id = ");
        builder.push_bind(user_id.to_string());

        if let Some(range) = &query.range {
            if let Some(from) = &range.from {
                builder.push(" AND (fields->>");
                builder.push_bind(range.field.clone());
                builder.push(") COLLATE \"C\" >= ");
                builder.push_bind(from.clone());
            }
            if let Some(to) = &range.to {
                builder.push(" AND (fields->>");
                builder.push_bind(range.field.clone());
                builder.push(") COLLATE \"C\" <= ");
                builder.push_bind(to.clone());
            }
        }

        let direction = if query.descending { " DESC" } else { " ASC" };
        match &query.order_by {
            OrderBy::CreatedAt => {
                builder.push(" ORDER BY created_at");
                builder.push(direction);
            }
            OrderBy::Field(field) => {
                builder.push(" ORDER BY (fields->>");
                builder.push_bind(field.clone());
                builder.push(") COLLATE \"C\"");
                builder.push(direction);
                builder.push(", created_at");
                builder.push(direction);
            }
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list {}", collection))?;

        rows.into_iter().map(document_from_row).collect()
    }

    async fn merge_document(&self, collection: Collection, user_id: &str, id: &Id, fields: Fields) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET fields = fields || $4
            WHERE collection = $1 AND id = $2 AND user_id = $3
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(user_id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to update {} document", collection))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 AND user_id = $3",
        )
        .bind(collection.name())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to delete {} document", collection))?;

        Ok(result.rows_affected() > 0)
    }
}
