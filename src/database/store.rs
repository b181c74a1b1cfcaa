use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::record::{NewProduct, ProductPatch, StoredProduct};

/// Result of a keyed update: documents matched and documents actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// The product collection as the request layer sees it.
///
/// Every method is a single-document (or single-scan) operation; there are no
/// multi-document transactions. Implementations must be safe to share across
/// async tasks.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Insert a new product and return its assigned identity.
    ///
    /// Fails with [`DatabaseError::DuplicateKey`] if the business key is taken.
    async fn insert(&self, product: NewProduct) -> Result<Uuid, DatabaseError>;

    /// Every product, unfiltered and in storage order
    async fn find_all(&self) -> Result<Vec<StoredProduct>, DatabaseError>;

    /// Merge `patch` into the product addressed by `codigo`
    async fn update_by_codigo(
        &self,
        codigo: &str,
        patch: &ProductPatch,
    ) -> Result<UpdateOutcome, DatabaseError>;

    /// Remove the product addressed by `codigo`, returning how many were deleted
    async fn delete_by_codigo(&self, codigo: &str) -> Result<u64, DatabaseError>;

    /// Products whose `idEtiqueta` is present and not null
    async fn find_labeled(&self) -> Result<Vec<StoredProduct>, DatabaseError>;

    /// Round-trip to the backend
    async fn ping(&self) -> Result<(), DatabaseError>;
}
