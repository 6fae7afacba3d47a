use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a001_catalog_entry::aggregate::{CatalogEntry, CatalogEntryId};
use contracts::domain::a001_catalog_entry::query::CatalogFilter;
use contracts::domain::common::EntityMetadata;
use contracts::enums::content_type::ContentType;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Query;
use sea_orm::{DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait};
use std::collections::HashMap;

/// Хранилище каталога.
///
/// Только чтение для сервиса списка; `insert` нужен пути загрузки контента.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Записи, удовлетворяющие всем измерениям фильтра, новые первыми, не более `limit`
    async fn find(&self, filter: &CatalogFilter, limit: u64) -> anyhow::Result<Vec<CatalogEntry>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<CatalogEntry>>;

    async fn list_featured(&self, limit: u64) -> anyhow::Result<Vec<CatalogEntry>>;

    async fn insert(&self, entry: &CatalogEntry) -> anyhow::Result<Uuid>;
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_catalog_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub release_year: i32,
    pub duration: i32,
    pub rating: f64,
    pub poster_url: String,
    pub video_url: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub mod genre_tag {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "a001_catalog_entry_genre")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub entry_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub position: i32,
        pub genre: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl Model {
    fn into_aggregate(self, genre: Vec<String>) -> anyhow::Result<CatalogEntry> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| anyhow::anyhow!("Corrupted catalog id '{}': {}", self.id, e))?;
        let content_type = ContentType::from_code(&self.content_type).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown content type '{}' for entry {}",
                self.content_type,
                self.id
            )
        })?;

        Ok(CatalogEntry {
            id: CatalogEntryId(id),
            title: self.title,
            description: self.description,
            content_type,
            genre,
            release_year: self.release_year,
            duration: self.duration,
            rating: self.rating,
            poster_url: self.poster_url,
            video_url: self.video_url,
            featured: self.featured,
            metadata: EntityMetadata {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }
}

/// Реализация на sea-orm / SQLite
#[derive(Clone)]
pub struct SeaOrmCatalogRepository {
    conn: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Подтянуть теги жанров одним запросом и собрать агрегаты в исходном порядке
    async fn attach_genres(&self, models: Vec<Model>) -> anyhow::Result<Vec<CatalogEntry>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let tags = genre_tag::Entity::find()
            .filter(genre_tag::Column::EntryId.is_in(ids))
            .order_by_asc(genre_tag::Column::EntryId)
            .order_by_asc(genre_tag::Column::Position)
            .all(&self.conn)
            .await?;

        let mut by_entry: HashMap<String, Vec<String>> = HashMap::new();
        for tag in tags {
            by_entry.entry(tag.entry_id).or_default().push(tag.genre);
        }

        models
            .into_iter()
            .map(|m| {
                let genre = by_entry.remove(&m.id).unwrap_or_default();
                m.into_aggregate(genre)
            })
            .collect()
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn find(&self, filter: &CatalogFilter, limit: u64) -> anyhow::Result<Vec<CatalogEntry>> {
        let mut select = Entity::find();

        if let Some(content_type) = filter.content_type {
            select = select.filter(Column::ContentType.eq(content_type.code()));
        }
        if let Some(genre) = filter.genre.as_deref() {
            select = select.filter(
                Column::Id.in_subquery(
                    Query::select()
                        .column(genre_tag::Column::EntryId)
                        .from(genre_tag::Entity)
                        .and_where(genre_tag::Column::Genre.eq(genre))
                        .to_owned(),
                ),
            );
        }
        if let Some(year) = filter.release_year {
            select = select.filter(Column::ReleaseYear.eq(year));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        self.attach_genres(models).await
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<CatalogEntry>> {
        let Some(model) = Entity::find_by_id(id.to_string()).one(&self.conn).await? else {
            return Ok(None);
        };
        let mut entries = self.attach_genres(vec![model]).await?;
        Ok(entries.pop())
    }

    async fn list_featured(&self, limit: u64) -> anyhow::Result<Vec<CatalogEntry>> {
        let models = Entity::find()
            .filter(Column::Featured.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        self.attach_genres(models).await
    }

    async fn insert(&self, entry: &CatalogEntry) -> anyhow::Result<Uuid> {
        let uuid = entry.id.value();
        let id = uuid.to_string();

        let active = ActiveModel {
            id: Set(id.clone()),
            title: Set(entry.title.clone()),
            description: Set(entry.description.clone()),
            content_type: Set(entry.content_type.code().to_string()),
            release_year: Set(entry.release_year),
            duration: Set(entry.duration),
            rating: Set(entry.rating),
            poster_url: Set(entry.poster_url.clone()),
            video_url: Set(entry.video_url.clone()),
            featured: Set(entry.featured),
            created_at: Set(entry.metadata.created_at),
            updated_at: Set(entry.metadata.updated_at),
        };
        let tags: Vec<genre_tag::ActiveModel> = entry
            .genre
            .iter()
            .enumerate()
            .map(|(position, genre)| genre_tag::ActiveModel {
                entry_id: Set(id.clone()),
                position: Set(position as i32),
                genre: Set(genre.clone()),
            })
            .collect();

        let txn = self.conn.begin().await?;
        Entity::insert(active).exec_without_returning(&txn).await?;
        if !tags.is_empty() {
            genre_tag::Entity::insert_many(tags)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(uuid)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::data::db;
    use chrono::Duration;
    use contracts::domain::a001_catalog_entry::query::{CatalogQuery, CATALOG_PAGE_LIMIT};

    /// Запись с явным моментом создания: `minutes` минут после базовой даты
    pub(crate) fn sample(
        content_type: ContentType,
        genre: &[&str],
        year: i32,
        minutes: i64,
    ) -> CatalogEntry {
        let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        CatalogEntry {
            id: CatalogEntryId::new_v4(),
            title: format!("Title {}", minutes),
            description: "Description".into(),
            content_type,
            genre: genre.iter().map(|g| g.to_string()).collect(),
            release_year: year,
            duration: 100,
            rating: 7.5,
            poster_url: "https://cdn.example.com/poster.jpg".into(),
            video_url: "https://cdn.example.com/video.mp4".into(),
            featured: false,
            metadata: EntityMetadata::at(base + Duration::minutes(minutes)),
        }
    }

    async fn repo_with(entries: &[CatalogEntry]) -> SeaOrmCatalogRepository {
        let repo = SeaOrmCatalogRepository::new(db::memory().await);
        for e in entries {
            repo.insert(e).await.unwrap();
        }
        repo
    }

    fn filter(t: &str, g: &str, y: &str) -> CatalogFilter {
        CatalogQuery::new(t, g, y).to_filter().unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id_preserves_genre_order() {
        let entry = sample(ContentType::TvShow, &["sci-fi", "drama", "action"], 2022, 1);
        let repo = repo_with(&[entry.clone()]).await;

        let loaded = repo.get_by_id(entry.id.value()).await.unwrap().unwrap();
        assert_eq!(loaded.genre, vec!["sci-fi", "drama", "action"]);
        assert_eq!(loaded.content_type, ContentType::TvShow);
        assert_eq!(loaded.metadata.created_at, entry.metadata.created_at);

        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_conjunctive_match() {
        let hit = sample(ContentType::Movie, &["action"], 2023, 1);
        let miss = sample(ContentType::TvShow, &["action"], 2023, 2);
        let repo = repo_with(&[hit.clone(), miss]).await;

        let found = repo
            .find(&filter("movie", "action", "2023"), CATALOG_PAGE_LIMIT)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, hit.id);
    }

    #[tokio::test]
    async fn test_find_every_result_satisfies_filter() {
        let mut entries = Vec::new();
        let types = [ContentType::Movie, ContentType::TvShow];
        let genres = [["action", "drama"], ["comedy", "action"], ["sci-fi", "drama"]];
        let years = [2021, 2022, 2023];
        let mut minute = 0;
        for t in types {
            for g in &genres {
                for y in years {
                    minute += 1;
                    entries.push(sample(t, g, y, minute));
                }
            }
        }
        let repo = repo_with(&entries).await;

        for t in ["all", "movie", "tv-show"] {
            for g in ["all", "action", "drama", "comedy", "horror"] {
                for y in ["all", "2021", "2023", "1999"] {
                    let f = filter(t, g, y);
                    let found = repo.find(&f, CATALOG_PAGE_LIMIT).await.unwrap();
                    assert!(found.len() as u64 <= CATALOG_PAGE_LIMIT);
                    assert!(found.iter().all(|e| f.matches(e)), "{} {} {}", t, g, y);

                    let expected = entries.iter().filter(|e| f.matches(e)).count();
                    assert_eq!(found.len(), expected.min(CATALOG_PAGE_LIMIT as usize));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_find_caps_at_twenty_newest_first() {
        let entries: Vec<CatalogEntry> = (0..25)
            .map(|i| sample(ContentType::Movie, &["drama"], 2020, i))
            .collect();
        let repo = repo_with(&entries).await;

        let found = repo
            .find(&CatalogFilter::default(), CATALOG_PAGE_LIMIT)
            .await
            .unwrap();
        assert_eq!(found.len(), 20);
        assert!(found
            .windows(2)
            .all(|w| w[0].metadata.created_at >= w[1].metadata.created_at));

        let expected: Vec<_> = entries.iter().rev().take(20).map(|e| e.id).collect();
        let actual: Vec<_> = found.iter().map(|e| e.id).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_list_featured_only_returns_flagged() {
        let mut featured = sample(ContentType::Movie, &["action"], 2024, 1);
        featured.featured = true;
        let plain = sample(ContentType::Movie, &["action"], 2024, 2);
        let repo = repo_with(&[featured.clone(), plain]).await;

        let found = repo.list_featured(4).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, featured.id);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let entry = sample(ContentType::Movie, &["action"], 2024, 1);
        let repo = repo_with(&[entry.clone()]).await;
        assert!(repo.insert(&entry).await.is_err());

        // Транзакция откатилась: теги не задвоились
        let loaded = repo.get_by_id(entry.id.value()).await.unwrap().unwrap();
        assert_eq!(loaded.genre, vec!["action"]);
    }
}
