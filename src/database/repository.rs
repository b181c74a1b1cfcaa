use sqlx::types::Json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::record::{Document, NewProduct, ProductPatch, StoredProduct};
use crate::database::store::{ProductStore, UpdateOutcome};

/// Postgres-backed product collection.
///
/// Each product lives in `productos` as a JSONB document keyed by a UUID. The
/// business key is unique through an expression index on
/// `documento->>'codigoProducto'`, so a duplicate insert surfaces as a
/// Postgres unique violation.
#[derive(Clone, Debug)]
pub struct ProductRepository {
    manager: DatabaseManager,
}

const CREATE_COLLECTION: &str = r#"
    CREATE TABLE IF NOT EXISTS productos (
        id UUID PRIMARY KEY,
        documento JSONB NOT NULL
    )
"#;

const CREATE_UNIQUE_CODIGO: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS productos_codigo_producto_key
    ON productos ((documento->>'codigoProducto'))
"#;

const UPDATE_BY_CODIGO: &str = r#"
    WITH target AS (
        SELECT id, documento
        FROM productos
        WHERE documento->>'codigoProducto' = $1
        FOR UPDATE
    ),
    changed AS (
        UPDATE productos p
        SET documento = t.documento || $2
        FROM target t
        WHERE p.id = t.id
        AND (t.documento || $2) IS DISTINCT FROM t.documento
        RETURNING p.id
    )
    SELECT
        (SELECT COUNT(*) FROM target) AS matched,
        (SELECT COUNT(*) FROM changed) AS modified
"#;

impl ProductRepository {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }

    /// Create the collection and its business-key index if they do not exist yet
    pub async fn ensure_collection(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_COLLECTION)
            .execute(self.manager.pool())
            .await?;
        sqlx::query(CREATE_UNIQUE_CODIGO)
            .execute(self.manager.pool())
            .await?;
        info!("Collection 'productos' ready");
        Ok(())
    }

    fn into_stored(rows: Vec<(Uuid, Json<Document>)>) -> Vec<StoredProduct> {
        rows.into_iter()
            .map(|(id, Json(document))| StoredProduct { id, document })
            .collect()
    }
}

fn map_insert_error(err: sqlx::Error, codigo: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DatabaseError::DuplicateKey(codigo.to_string())
        }
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait::async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO productos (id, documento) VALUES ($1, $2)")
            .bind(id)
            .bind(Json(product.document()))
            .execute(self.manager.pool())
            .await
            .map_err(|e| map_insert_error(e, product.codigo()))?;

        debug!("Inserted product {} as {}", product.codigo(), id);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredProduct>, DatabaseError> {
        let rows: Vec<(Uuid, Json<Document>)> =
            sqlx::query_as("SELECT id, documento FROM productos")
                .fetch_all(self.manager.pool())
                .await?;
        Ok(Self::into_stored(rows))
    }

    async fn update_by_codigo(
        &self,
        codigo: &str,
        patch: &ProductPatch,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let (matched, modified): (i64, i64) = sqlx::query_as(UPDATE_BY_CODIGO)
            .bind(codigo)
            .bind(Json(patch.fields()))
            .fetch_one(self.manager.pool())
            .await?;

        Ok(UpdateOutcome {
            matched: matched.max(0) as u64,
            modified: modified.max(0) as u64,
        })
    }

    async fn delete_by_codigo(&self, codigo: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM productos WHERE documento->>'codigoProducto' = $1")
            .bind(codigo)
            .execute(self.manager.pool())
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_labeled(&self) -> Result<Vec<StoredProduct>, DatabaseError> {
        let rows: Vec<(Uuid, Json<Document>)> = sqlx::query_as(
            r#"
            SELECT id, documento
            FROM productos
            WHERE COALESCE(jsonb_typeof(documento->'idEtiqueta'), 'null') <> 'null'
            "#,
        )
        .fetch_all(self.manager.pool())
        .await?;
        Ok(Self::into_stored(rows))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.manager.health_check().await
    }
}
