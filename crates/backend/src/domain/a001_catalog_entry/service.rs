use super::repository::CatalogRepository;
use contracts::domain::a001_catalog_entry::aggregate::{CatalogEntry, CatalogEntryDto};
use contracts::domain::a001_catalog_entry::query::{CatalogQuery, CATALOG_PAGE_LIMIT};
use contracts::enums::content_type::ContentType;
use uuid::Uuid;

/// Сколько записей показывает блок "Featured Content" на лендинге
pub const FEATURED_LIMIT: u64 = 4;

/// Данные записи не прошли валидацию (клиентская ошибка, а не сбой)
#[derive(Debug, thiserror::Error)]
#[error("Validation failed: {0}")]
pub struct ValidationError(pub String);

/// Выборка каталога по фильтру: не более `CATALOG_PAGE_LIMIT`, новые первыми
pub async fn list(repo: &dyn CatalogRepository, query: &CatalogQuery) -> anyhow::Result<Vec<CatalogEntry>> {
    let filter = match query.to_filter() {
        Ok(f) => f,
        Err(e) => {
            // Тип вне перечисления не совпадёт ни с одной записью
            tracing::debug!("Catalog query short-circuited: {}", e);
            return Ok(Vec::new());
        }
    };

    if query.has_unparsed_year() {
        tracing::warn!(
            "Ignoring unparsable year filter {:?}, treating as 'all'",
            query.year
        );
    }

    if filter.is_unconstrained() {
        tracing::debug!("Catalog query without filters, newest {} entries", CATALOG_PAGE_LIMIT);
    } else {
        tracing::debug!("Catalog query with filter {:?}", filter);
    }

    repo.find(&filter, CATALOG_PAGE_LIMIT).await
}

/// Запись по строковому ID. Некорректный UUID равнозначен отсутствию записи.
pub async fn get_by_id(repo: &dyn CatalogRepository, id: &str) -> anyhow::Result<Option<CatalogEntry>> {
    let Ok(uuid) = Uuid::parse_str(id.trim()) else {
        return Ok(None);
    };
    repo.get_by_id(uuid).await
}

pub async fn list_featured(repo: &dyn CatalogRepository) -> anyhow::Result<Vec<CatalogEntry>> {
    repo.list_featured(FEATURED_LIMIT).await
}

/// Создание новой записи каталога
pub async fn create(repo: &dyn CatalogRepository, dto: CatalogEntryDto) -> anyhow::Result<Uuid> {
    let mut aggregate = CatalogEntry::new_for_insert(dto);

    // Валидация
    aggregate.validate().map_err(ValidationError)?;

    // Before write
    aggregate.before_write();

    repo.insert(&aggregate).await
}

/// Вставка тестовых данных
pub async fn insert_test_data(repo: &dyn CatalogRepository) -> anyhow::Result<usize> {
    let data = sample_catalog();
    let count = data.len();

    for dto in data {
        create(repo, dto).await?;
    }

    tracing::info!("Inserted {} sample catalog entries", count);
    Ok(count)
}

fn sample(
    title: &str,
    description: &str,
    content_type: ContentType,
    genre: &[&str],
    release_year: i32,
    duration: i32,
    rating: f64,
    slug: &str,
    featured: bool,
) -> CatalogEntryDto {
    CatalogEntryDto {
        title: title.into(),
        description: description.into(),
        content_type,
        genre: genre.iter().map(|g| g.to_string()).collect(),
        release_year,
        duration,
        rating: Some(rating),
        poster_url: format!("https://picsum.photos/seed/{}/400/600", slug),
        video_url: format!(
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/{}.mp4",
            match content_type {
                ContentType::Movie => "BigBuckBunny",
                ContentType::TvShow => "ElephantsDream",
            }
        ),
        featured: Some(featured),
    }
}

fn sample_catalog() -> Vec<CatalogEntryDto> {
    use ContentType::{Movie, TvShow};
    vec![
        sample(
            "Night Runner",
            "A courier has one night to cross a city that wants her stopped.",
            Movie,
            &["action", "drama"],
            2023,
            112,
            7.8,
            "night-runner",
            true,
        ),
        sample(
            "Orbit Station",
            "Six strangers keep a failing space station alive, one episode at a time.",
            TvShow,
            &["sci-fi", "drama"],
            2024,
            48,
            8.4,
            "orbit-station",
            true,
        ),
        sample(
            "The Wrong Wedding",
            "Two families book the same venue on the same day.",
            Movie,
            &["comedy"],
            2022,
            97,
            6.9,
            "wrong-wedding",
            true,
        ),
        sample(
            "Signal Lost",
            "A radio operator hears a broadcast from a ship that sank decades ago.",
            Movie,
            &["sci-fi", "drama"],
            2021,
            124,
            7.2,
            "signal-lost",
            false,
        ),
        sample(
            "Desk Duty",
            "An ex-detective is stuck answering phones at the worst precinct in town.",
            TvShow,
            &["comedy", "action"],
            2023,
            26,
            7.5,
            "desk-duty",
            true,
        ),
        sample(
            "Iron Harbor",
            "Dock workers take on the syndicate that runs the port.",
            TvShow,
            &["action", "drama"],
            2022,
            55,
            8.0,
            "iron-harbor",
            false,
        ),
        sample(
            "Paper Planets",
            "A teenager's sketchbook starts predicting the future.",
            Movie,
            &["sci-fi", "comedy"],
            2024,
            101,
            7.1,
            "paper-planets",
            false,
        ),
        sample(
            "Last Orders",
            "The final week of a pub that has outlived its street.",
            TvShow,
            &["drama", "comedy"],
            2021,
            42,
            7.9,
            "last-orders",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_catalog_entry::repository::SeaOrmCatalogRepository;
    use crate::shared::data::db;

    async fn repo() -> SeaOrmCatalogRepository {
        SeaOrmCatalogRepository::new(db::memory().await)
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        for dto in sample_catalog() {
            let entry = CatalogEntry::new_for_insert(dto);
            assert!(entry.validate().is_ok(), "{}", entry.title);
        }
    }

    #[tokio::test]
    async fn test_unknown_type_returns_empty() {
        let repo = repo().await;
        insert_test_data(&repo).await.unwrap();

        let found = list(&repo, &CatalogQuery::new("documentary", "all", "all"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_year_is_ignored() {
        let repo = repo().await;
        let seeded = insert_test_data(&repo).await.unwrap();

        let found = list(&repo, &CatalogQuery::new("all", "all", "twenty"))
            .await
            .unwrap();
        assert_eq!(found.len(), seeded);

        let movies = list(&repo, &CatalogQuery::new("movie", "all", "abc"))
            .await
            .unwrap();
        assert!(!movies.is_empty());
        assert!(movies.iter().all(|e| e.content_type == ContentType::Movie));
    }

    #[tokio::test]
    async fn test_list_filters_seeded_catalog() {
        let repo = repo().await;
        insert_test_data(&repo).await.unwrap();

        let found = list(&repo, &CatalogQuery::new("tv-show", "comedy", "all"))
            .await
            .unwrap();
        let titles: Vec<_> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(found.len(), 2);
        assert!(titles.contains(&"Desk Duty"));
        assert!(titles.contains(&"Last Orders"));
    }

    #[tokio::test]
    async fn test_get_by_id_with_malformed_id_is_none() {
        let repo = repo().await;
        assert!(get_by_id(&repo, "not-a-uuid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_dto() {
        let repo = repo().await;
        let mut dto = sample_catalog().remove(0);
        dto.genre.clear();

        let err = create(&repo, dto).await.unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[tokio::test]
    async fn test_featured_is_capped() {
        let repo = repo().await;
        insert_test_data(&repo).await.unwrap();
        insert_test_data(&repo).await.unwrap();

        let featured = list_featured(&repo).await.unwrap();
        assert_eq!(featured.len() as u64, FEATURED_LIMIT);
        assert!(featured.iter().all(|e| e.featured));
    }
}
