//! Controller de contenido del sitio
//!
//! Blob JSON opaco para las secciones informativas de la UI. Fuera del
//! núcleo de negocio: persistencia clave-valor y nada más.

use crate::dto::stats_dto::ContentSections;
use crate::repositories::content_repository::ContentRepository;
use crate::utils::errors::AppResult;
use serde_json::json;
use sqlx::PgPool;

pub struct ContentController {
    repository: ContentRepository,
}

impl ContentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContentRepository::new(pool),
        }
    }

    pub async fn get(&self) -> AppResult<ContentSections> {
        let sections = self
            .repository
            .get_sections()
            .await?
            .unwrap_or_else(|| json!([]));

        Ok(ContentSections { sections })
    }

    pub async fn put(&self, request: ContentSections) -> AppResult<ContentSections> {
        // Solo se aceptan arrays de secciones; cualquier otra cosa se
        // guarda como lista vacía.
        let sections = if request.sections.is_array() {
            request.sections
        } else {
            json!([])
        };

        self.repository.put_sections(&sections).await?;
        Ok(ContentSections { sections })
    }
}
