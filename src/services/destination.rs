use crate::message::AppError;
use crate::models::{Destination, DestinationChanges, NewDestination};
use crate::store::DestinationStore;
use crate::utils::ingest::{ImageIngestor, Upload};

/// Text fields and optional image uploads of a create or update request.
///
/// Blank text counts as absent.
#[derive(Debug, Default)]
pub struct DestinationSubmission {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub background_image: Option<Upload>,
    pub gallery_image: Option<Upload>,
}

#[derive(Clone)]
pub struct DestinationService {
    store: DestinationStore,
    images: ImageIngestor,
}

impl DestinationService {
    pub fn new(store: DestinationStore, images: ImageIngestor) -> Self {
        Self { store, images }
    }

    pub fn images(&self) -> &ImageIngestor {
        &self.images
    }

    pub async fn list(&self) -> Result<Vec<Destination>, AppError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Destination, AppError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    pub async fn create(&self, submission: DestinationSubmission) -> Result<i64, AppError> {
        let DestinationSubmission {
            name,
            location,
            description,
            background_image,
            gallery_image,
        } = submission;

        let (Some(name), Some(location), Some(description)) =
            (present(name), present(location), present(description))
        else {
            return Err(AppError::BadRequest(
                "name, location and description are required".to_string(),
            ));
        };

        let (background_image, gallery_image) =
            self.ingest_pair(background_image, gallery_image).await?;

        let input = NewDestination {
            name,
            location,
            description,
            background_image,
            gallery_image,
        };

        match self.store.insert(&input).await {
            Ok(id) => {
                tracing::info!(id, name = %input.name, "destination created");
                Ok(id)
            }
            Err(e) => {
                self.discard_all([&input.background_image, &input.gallery_image])
                    .await;
                Err(e.into())
            }
        }
    }

    pub async fn update(&self, id: i64, submission: DestinationSubmission) -> Result<i64, AppError> {
        let existing = self.get(id).await?;

        let (background_image, gallery_image) = self
            .ingest_pair(submission.background_image, submission.gallery_image)
            .await?;
        let changes = DestinationChanges {
            name: present(submission.name),
            location: present(submission.location),
            description: present(submission.description),
            background_image,
            gallery_image,
        };

        if let Err(e) = self.store.update(id, &changes).await {
            self.discard_all([&changes.background_image, &changes.gallery_image])
                .await;
            return Err(e.into());
        }

        // old files go only after the row points at the new ones
        if changes.background_image.is_some() {
            self.discard_all([&existing.background_image]).await;
        }
        if changes.gallery_image.is_some() {
            self.discard_all([&existing.gallery_image]).await;
        }

        tracing::info!(id, "destination updated");
        Ok(id)
    }

    /// Removes the row and both of its image files. Returns rows affected.
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let existing = self.get(id).await?;

        self.discard_all([&existing.background_image, &existing.gallery_image])
            .await;

        let changes = self.store.delete_by_id(id).await?;
        tracing::info!(id, changes, "destination deleted");
        Ok(changes)
    }

    async fn ingest_optional(&self, upload: Option<Upload>) -> Result<Option<String>, AppError> {
        match upload {
            Some(upload) => Ok(Some(self.images.ingest(upload).await?)),
            None => Ok(None),
        }
    }

    /// Ingests background then gallery. Nothing stays on disk when either fails.
    async fn ingest_pair(
        &self,
        background: Option<Upload>,
        gallery: Option<Upload>,
    ) -> Result<(Option<String>, Option<String>), AppError> {
        let background = self.ingest_optional(background).await?;
        match self.ingest_optional(gallery).await {
            Ok(gallery) => Ok((background, gallery)),
            Err(e) => {
                self.discard_all([&background]).await;
                Err(e)
            }
        }
    }

    async fn discard_all<const N: usize>(&self, references: [&Option<String>; N]) {
        for reference in references.into_iter().flatten() {
            self.images.discard(reference).await;
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
