use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::record::{NewProduct, ProductPatch, StoredProduct};
use crate::database::store::{ProductStore, UpdateOutcome};

/// In-memory product collection with the same uniqueness and merge rules as
/// the Postgres repository. Used by tests and for running without a database.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<StoredProduct>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Uuid, DatabaseError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.codigo() == Some(product.codigo())) {
            return Err(DatabaseError::DuplicateKey(product.codigo().to_string()));
        }

        let id = Uuid::new_v4();
        products.push(StoredProduct {
            id,
            document: product.into_document(),
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredProduct>, DatabaseError> {
        Ok(self.products.read().await.clone())
    }

    async fn update_by_codigo(
        &self,
        codigo: &str,
        patch: &ProductPatch,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.codigo() == Some(codigo)) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = patch.apply_to(&mut product.document);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_by_codigo(&self, codigo: &str) -> Result<u64, DatabaseError> {
        let mut products = self.products.write().await;
        match products.iter().position(|p| p.codigo() == Some(codigo)) {
            Some(index) => {
                products.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_labeled(&self) -> Result<Vec<StoredProduct>, DatabaseError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| p.has_label()).cloned().collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
