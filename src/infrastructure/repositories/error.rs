// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_PRODUCT_SLUG: &str = "product_slugs_slug_key";

/// Translate a sqlx failure into the domain vocabulary. Unique violations
/// become `Conflict` so that a lost slug race reaches the caller intact.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                return if db_err.constraint() == Some(CNT_PRODUCT_SLUG)
                    || message.contains("product_slugs.slug")
                {
                    DomainError::Conflict("slug already exists".into())
                } else {
                    DomainError::Conflict("unique constraint violated".into())
                };
            }

            if db_err.is_foreign_key_violation() {
                return DomainError::NotFound("referenced record not found".into());
            }

            if db_err.is_check_violation() {
                return DomainError::Validation("check constraint violated".into());
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
