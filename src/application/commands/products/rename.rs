use super::ProductCommandService;
use crate::{
    application::{dto::ProductDto, error::ApplicationResult},
    domain::{
        errors::DomainResult,
        product::{Product, ProductName, ProductUpdate},
        slug::{SlugRecordId, Sluggable},
    },
};

pub struct RenameProductCommand {
    pub id: i64,
    pub name: String,
    /// Replaces the description when set; blank text clears it.
    pub description: Option<String>,
    /// Make the canonical slug follow the new name. Slugs that were active
    /// before stay active and become old slugs.
    pub regenerate_slug: bool,
}

impl ProductCommandService {
    pub async fn rename_product(&self, command: RenameProductCommand) -> ApplicationResult<ProductDto> {
        let name = ProductName::new(command.name)?;
        let mut product = self.load(command.id).await?;

        let now = self.clock.now();
        let owner = product.owner_mut();
        owner.rename(name, now);
        if let Some(description) = command.description {
            owner.describe(Some(description), now);
        }
        let updated = self
            .product_repo
            .update(ProductUpdate::from(product.owner()))
            .await?;
        *product.owner_mut() = updated;

        if command.regenerate_slug {
            self.refresh_slug(&mut product).await?;
        }

        Ok(ProductDto::from_sluggable(&mut product, self.markdown.as_ref()).await?)
    }

    /// Bring the canonical slug in line with the name. A current slug already
    /// derived from the name is kept, an old slug derived from it is
    /// promoted, and otherwise a fresh slug is created.
    async fn refresh_slug(&self, product: &mut Sluggable<Product>) -> DomainResult<()> {
        let manager = &self.slug_manager;
        let candidate = manager.candidate_for(product.owner())?;

        let history = product.history().await?;
        if history
            .current()
            .is_some_and(|current| manager.derives_from(current, &candidate))
        {
            return Ok(());
        }

        // Exact matches first, then the most recent suffixed form.
        let reusable = history
            .records()
            .iter()
            .skip(1)
            .filter(|record| manager.derives_from(&record.slug, &candidate))
            .min_by_key(|record| record.slug.as_str() != candidate)
            .map(|record| record.id);

        match reusable {
            Some(id) => product.promote_slug(id).await.map(|_| ()),
            None => self.regenerate_slug(product).await,
        }
    }

    /// Park the active slugs, ensure a fresh one, then restore the parked
    /// ones. They are restored even when ensuring fails.
    async fn regenerate_slug(&self, product: &mut Sluggable<Product>) -> DomainResult<()> {
        let parked: Vec<SlugRecordId> = product
            .history()
            .await?
            .records()
            .iter()
            .map(|record| record.id)
            .collect();

        for id in &parked {
            product.set_slug_active(*id, false).await?;
        }

        let ensured = product.ensure_slug().await;

        for id in &parked {
            product.set_slug_active(*id, true).await?;
        }

        ensured.map(|_| ())
    }
}
