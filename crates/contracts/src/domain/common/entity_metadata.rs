use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Системные метки времени записи.
///
/// Заполняются только на сервере: клиент никогда не передаёт их в DTO.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Метаданные с заданным моментом создания (загрузка, тестовые данные)
    pub fn at(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at: created_at,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
