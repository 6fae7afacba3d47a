use crate::domain::common::{AggregateId, EntityMetadata};
use crate::enums::content_type::ContentType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор единицы каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogEntryId(pub Uuid);

impl CatalogEntryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CatalogEntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CatalogEntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Единица каталога: фильм или сериал
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogEntryId,
    pub title: String,
    pub description: String,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Порядок тегов сохраняется для отображения
    pub genre: Vec<String>,

    #[serde(rename = "releaseYear")]
    pub release_year: i32,

    /// Длительность в минутах
    pub duration: i32,

    pub rating: f64,

    #[serde(rename = "posterUrl")]
    pub poster_url: String,

    #[serde(rename = "videoUrl")]
    pub video_url: String,

    pub featured: bool,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl CatalogEntry {
    /// Создать новую запись для вставки в БД
    pub fn new_for_insert(dto: CatalogEntryDto) -> Self {
        Self {
            id: CatalogEntryId::new_v4(),
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            content_type: dto.content_type,
            genre: dto.genre,
            release_year: dto.release_year,
            duration: dto.duration,
            rating: dto.rating.unwrap_or(MIN_RATING),
            poster_url: dto.poster_url,
            video_url: dto.video_url,
            featured: dto.featured.unwrap_or(false),
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Подпись типа для карточек ("Movie" / "TV Show")
    pub fn type_label(&self) -> &'static str {
        self.content_type.display_name()
    }

    /// Запись содержит тег (точное совпадение)
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Please provide a title".into());
        }
        if self.description.trim().is_empty() {
            return Err("Please provide a description".into());
        }
        if self.genre.is_empty() {
            return Err("Please provide at least one genre".into());
        }
        if self.genre.iter().any(|g| g.trim().is_empty()) {
            return Err("Genre tags cannot be empty".into());
        }
        if self.duration < 0 {
            return Err("Duration cannot be negative".into());
        }
        if !self.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            ));
        }
        if self.poster_url.trim().is_empty() {
            return Err("Please provide a poster URL".into());
        }
        if self.video_url.trim().is_empty() {
            return Err("Please provide a video URL".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания записи каталога.
///
/// Идентификатор и метки времени назначает сервер.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntryDto {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub genre: Vec<String>,
    #[serde(rename = "releaseYear")]
    pub release_year: i32,
    pub duration: i32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "posterUrl")]
    pub poster_url: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    #[serde(default)]
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CatalogEntryDto {
        CatalogEntryDto {
            title: "  Night Runner ".into(),
            description: "A courier races the dawn.".into(),
            content_type: ContentType::Movie,
            genre: vec!["action".into(), "thriller".into()],
            release_year: 2023,
            duration: 112,
            rating: None,
            poster_url: "https://cdn.example.com/night-runner.jpg".into(),
            video_url: "https://cdn.example.com/night-runner.mp4".into(),
            featured: None,
        }
    }

    #[test]
    fn test_new_for_insert_applies_defaults() {
        let entry = CatalogEntry::new_for_insert(dto());
        assert_eq!(entry.title, "Night Runner");
        assert_eq!(entry.rating, 0.0);
        assert!(!entry.featured);
        assert_eq!(entry.metadata.created_at, entry.metadata.updated_at);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_invariants() {
        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.genre.clear();
        assert!(entry.validate().is_err());

        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.genre.push("  ".into());
        assert!(entry.validate().is_err());

        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.rating = 10.5;
        assert!(entry.validate().is_err());

        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.rating = f64::NAN;
        assert!(entry.validate().is_err());

        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.description = " ".into();
        assert!(entry.validate().is_err());

        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.video_url = String::new();
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let mut entry = CatalogEntry::new_for_insert(dto());
        entry.rating = 10.0;
        assert!(entry.validate().is_ok());
        entry.rating = 0.0;
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_json_uses_camel_case_wire_names() {
        let entry = CatalogEntry::new_for_insert(dto());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "movie");
        assert_eq!(value["releaseYear"], 2023);
        assert!(value.get("posterUrl").is_some());
        assert!(value.get("videoUrl").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["id"], entry.id.as_string());

        let back: CatalogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_dto_ignores_client_timestamps() {
        let json = r#"{
            "title": "Orbit",
            "description": "Station drama",
            "type": "tv-show",
            "genre": ["sci-fi"],
            "releaseYear": 2022,
            "duration": 45,
            "posterUrl": "p",
            "videoUrl": "v",
            "createdAt": "1999-01-01T00:00:00Z"
        }"#;
        let dto: CatalogEntryDto = serde_json::from_str(json).unwrap();
        let entry = CatalogEntry::new_for_insert(dto);
        assert_ne!(entry.metadata.created_at.timestamp(), 915148800);
        assert_eq!(entry.content_type, ContentType::TvShow);
    }
}
