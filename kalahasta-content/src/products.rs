use kalahasta_catalog::{Product, ProductDraft, ProductUpdate};
use kalahasta_core::repository::{load_collection, save_collection};
use kalahasta_core::{IdentityProvider, Session};
use kalahasta_shared::keys;
use uuid::Uuid;

use crate::{ContentError, ContentStore};

impl ContentStore {
    pub async fn list_products(&self, session: &Session) -> Result<Vec<Product>, ContentError> {
        Ok(load_collection(self.store(), &keys::products(session.user_id())).await?)
    }

    /// Price the draft (manual price or the suggested one) and list it.
    pub async fn add_product(&self, session: &Session, draft: ProductDraft) -> Result<Product, ContentError> {
        let product = draft.finalize(self.engine())?;

        let key = keys::products(session.user_id());
        let mut products: Vec<Product> = load_collection(self.store(), &key).await?;
        products.push(product.clone());
        save_collection(self.store(), &key, &products).await?;

        tracing::info!("Product {} listed at {}", product.id, product.price);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        session: &Session,
        product_id: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ContentError> {
        let key = keys::products(session.user_id());
        let mut products: Vec<Product> = load_collection(self.store(), &key).await?;

        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(ContentError::NotFound { kind: "Product", id: product_id })?;
        product.apply(update)?;
        let updated = product.clone();

        save_collection(self.store(), &key, &products).await?;
        Ok(updated)
    }

    pub async fn delete_product(&self, session: &Session, product_id: Uuid) -> Result<(), ContentError> {
        let key = keys::products(session.user_id());
        let mut products: Vec<Product> = load_collection(self.store(), &key).await?;

        let before = products.len();
        products.retain(|p| p.id != product_id);
        if products.len() == before {
            return Err(ContentError::NotFound { kind: "Product", id: product_id });
        }

        save_collection(self.store(), &key, &products).await?;
        tracing::info!("Product {} deleted", product_id);
        Ok(())
    }
}
