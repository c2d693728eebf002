//! Category service

use tracing::info;

use crate::database::DatabaseService;
use crate::models::category::{CategoryDto, NewCategoryDto};
use crate::utils::errors::{EwmError, Result};
use crate::utils::helpers::Pagination;

#[derive(Debug, Clone)]
pub struct CategoryService {
    db: DatabaseService,
}

impl CategoryService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Create a category; the name must be unique
    pub async fn post_category(&self, dto: NewCategoryDto) -> Result<CategoryDto> {
        dto.validate()?;
        if self.db.categories.find_by_name(&dto.name).await?.is_some() {
            return Err(EwmError::DuplicateCategoryName(dto.name));
        }
        let category = self.db.categories.create(&dto.name).await?;
        info!(category_id = category.id, "Category created");
        Ok(CategoryDto::from(&category))
    }

    /// Delete a category; fails while any event references it
    pub async fn delete_category(&self, category_id: i64) -> Result<()> {
        self.db
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(EwmError::CategoryNotFound { category_id })?;
        if self.db.events.exists_by_category(category_id).await? {
            return Err(EwmError::CategoryNotEmpty);
        }
        self.db.categories.delete(category_id).await?;
        info!(category_id = category_id, "Category deleted");
        Ok(())
    }

    /// Rename a category; the new name must not belong to another category
    pub async fn patch_category(&self, category_id: i64, dto: NewCategoryDto) -> Result<CategoryDto> {
        dto.validate()?;
        let category = self
            .db
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(EwmError::CategoryNotFound { category_id })?;
        if let Some(existing) = self.db.categories.find_by_name(&dto.name).await? {
            if existing.id != category.id {
                return Err(EwmError::DuplicateCategoryName(dto.name));
            }
        }
        let updated = self.db.categories.update_name(category_id, &dto.name).await?;
        Ok(CategoryDto::from(&updated))
    }

    /// List categories, paged
    pub async fn get_categories(&self, page: Pagination) -> Result<Vec<CategoryDto>> {
        let categories = self.db.categories.list(page.limit(), page.offset()).await?;
        Ok(categories.iter().map(CategoryDto::from).collect())
    }

    /// One category by ID
    pub async fn get_category(&self, category_id: i64) -> Result<CategoryDto> {
        let category = self
            .db
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(EwmError::CategoryNotFound { category_id })?;
        Ok(CategoryDto::from(&category))
    }
}
