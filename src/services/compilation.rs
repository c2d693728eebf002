//! Compilation service

use tracing::info;

use crate::database::DatabaseService;
use crate::models::compilation::{
    Compilation, CompilationDto, NewCompilationDto, UpdateCompilationRequest,
};
use crate::services::event::assemble_short_dtos;
use crate::utils::errors::{EwmError, Result};
use crate::utils::helpers::Pagination;

#[derive(Debug, Clone)]
pub struct CompilationService {
    db: DatabaseService,
}

impl CompilationService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// List compilations, optionally filtered by the pinned flag, paged
    pub async fn get_compilations(
        &self,
        pinned: Option<bool>,
        page: Pagination,
    ) -> Result<Vec<CompilationDto>> {
        let compilations = self
            .db
            .compilations
            .list(pinned, page.limit(), page.offset())
            .await?;
        let mut dtos = Vec::with_capacity(compilations.len());
        for compilation in &compilations {
            dtos.push(self.to_dto(compilation).await?);
        }
        Ok(dtos)
    }

    /// One compilation by ID
    pub async fn get_compilation(&self, compilation_id: i64) -> Result<CompilationDto> {
        let compilation = self.require_compilation(compilation_id).await?;
        self.to_dto(&compilation).await
    }

    /// Create a compilation; unknown event IDs are skipped
    pub async fn post_compilation(&self, dto: NewCompilationDto) -> Result<CompilationDto> {
        dto.validate()?;
        let event_ids = match &dto.events {
            Some(ids) => {
                let events = self.db.events.find_by_ids(ids).await?;
                events.iter().map(|e| e.id).collect()
            }
            None => Vec::new(),
        };
        let compilation = self
            .db
            .compilations
            .create(&dto.title, dto.pinned, &event_ids)
            .await?;
        info!(compilation_id = compilation.id, "Compilation created");
        self.to_dto(&compilation).await
    }

    /// Delete a compilation
    pub async fn delete_compilation(&self, compilation_id: i64) -> Result<()> {
        self.require_compilation(compilation_id).await?;
        self.db.compilations.delete(compilation_id).await?;
        info!(compilation_id = compilation_id, "Compilation deleted");
        Ok(())
    }

    /// Update title/pinned and optionally replace the linked events
    pub async fn patch_compilation(
        &self,
        compilation_id: i64,
        request: UpdateCompilationRequest,
    ) -> Result<CompilationDto> {
        let mut compilation = self.require_compilation(compilation_id).await?;
        if let Some(title) = request.title {
            compilation.title = title;
        }
        if let Some(pinned) = request.pinned {
            compilation.pinned = pinned;
        }
        let event_ids = match &request.events {
            Some(ids) => {
                let events = self.db.events.find_by_ids(ids).await?;
                Some(events.iter().map(|e| e.id).collect::<Vec<_>>())
            }
            None => None,
        };
        let updated = self
            .db
            .compilations
            .update(&compilation, event_ids.as_deref())
            .await?;
        self.to_dto(&updated).await
    }

    async fn require_compilation(&self, compilation_id: i64) -> Result<Compilation> {
        self.db
            .compilations
            .find_by_id(compilation_id)
            .await?
            .ok_or(EwmError::CompilationNotFound { compilation_id })
    }

    async fn to_dto(&self, compilation: &Compilation) -> Result<CompilationDto> {
        let event_ids = self.db.compilations.event_ids(compilation.id).await?;
        let events = self.db.events.find_by_ids(&event_ids).await?;
        Ok(CompilationDto {
            events: assemble_short_dtos(&self.db, &events).await?,
            id: compilation.id,
            pinned: compilation.pinned,
            title: compilation.title.clone(),
        })
    }
}
