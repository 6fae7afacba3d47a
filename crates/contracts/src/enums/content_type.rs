use serde::{Deserialize, Serialize};
use std::fmt;

/// Тип единицы каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv-show")]
    TvShow,
}

impl ContentType {
    /// Код типа (значение в БД и в query-параметре `type`)
    pub fn code(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::TvShow => "tv-show",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Название для списков выбора (множественное число)
    pub fn plural_name(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movies",
            ContentType::TvShow => "TV Shows",
        }
    }

    /// Получить все типы
    pub fn all() -> Vec<ContentType> {
        vec![ContentType::Movie, ContentType::TvShow]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "movie" => Some(ContentType::Movie),
            "tv-show" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for t in ContentType::all() {
            assert_eq!(ContentType::from_code(t.code()), Some(t));
        }
        assert_eq!(ContentType::from_code("tv_show"), None);
        assert_eq!(ContentType::from_code("Movie"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&ContentType::TvShow).unwrap();
        assert_eq!(json, "\"tv-show\"");
        let parsed: ContentType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, ContentType::Movie);
    }
}
