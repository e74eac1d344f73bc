use super::ProductCommandService;
use crate::{
    application::{
        dto::{EnsureSlugDto, SlugRecordDto},
        error::ApplicationResult,
    },
    domain::slug::SlugRecordId,
};

pub struct EnsureProductSlugCommand {
    pub product_id: i64,
}

pub struct SetSlugActiveCommand {
    pub product_id: i64,
    pub slug_id: i64,
    pub is_active: bool,
}

impl ProductCommandService {
    pub async fn ensure_product_slug(
        &self,
        command: EnsureProductSlugCommand,
    ) -> ApplicationResult<EnsureSlugDto> {
        let mut product = self.load(command.product_id).await?;
        let created = product.ensure_slug().await?;
        let slug = product.slug().await?.map(String::from);
        Ok(EnsureSlugDto {
            created: created.is_some(),
            slug,
        })
    }

    pub async fn set_slug_active(
        &self,
        command: SetSlugActiveCommand,
    ) -> ApplicationResult<SlugRecordDto> {
        let mut product = self.load(command.product_id).await?;
        let id = SlugRecordId::new(command.slug_id)?;
        let record = product.set_slug_active(id, command.is_active).await?;
        Ok(record.into())
    }
}
