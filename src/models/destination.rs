use serde::{Deserialize, Serialize};

/// A row of the `destinations` table.
///
/// Image fields hold relative references such as `uploads/1712345678901-1a2b3c4d.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "backgroundImage")]
    #[sqlx(rename = "backgroundImage")]
    pub background_image: Option<String>,
    #[serde(rename = "galleryImage")]
    #[sqlx(rename = "galleryImage")]
    pub gallery_image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDestination {
    pub name: String,
    pub location: String,
    pub description: String,
    pub background_image: Option<String>,
    pub gallery_image: Option<String>,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct DestinationChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub background_image: Option<String>,
    pub gallery_image: Option<String>,
}
