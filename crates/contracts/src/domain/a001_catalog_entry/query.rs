//! Параметры выборки каталога.
//!
//! `CatalogQuery` это то, что приходит в query-строке (`?type=&genre=&year=`),
//! `CatalogFilter` это строго типизированный предикат, который понимает хранилище.
//! Пустое значение или `all` означает "без ограничения по этому измерению".

use super::aggregate::CatalogEntry;
use crate::enums::content_type::ContentType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Максимальное число записей в ответе списка. Курсора нет.
pub const CATALOG_PAGE_LIMIT: u64 = 20;

/// Значение фильтра "без ограничения"
pub const ALL: &str = "all";

/// Сырые параметры фильтра каталога (как в URL)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Строго типизированный предикат: при `None` измерение не участвует в запросе
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub content_type: Option<ContentType>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
}

/// Значение `type` вне перечисления: такому фильтру не соответствует ни одна запись
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentType(pub String);

impl fmt::Display for UnknownContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content type '{}'", self.0)
    }
}

impl std::error::Error for UnknownContentType {}

/// Значение участвует в предикате, только если оно не пустое и не `all`
fn constrained(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None | Some("") | Some(ALL) => None,
        Some(v) => Some(v),
    }
}

/// Год разбирается с откатом: нечисловой ввод равнозначен `all`
pub fn parse_year(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

impl CatalogQuery {
    pub fn new(content_type: &str, genre: &str, year: &str) -> Self {
        Self {
            content_type: Some(content_type.to_string()),
            genre: Some(genre.to_string()),
            year: Some(year.to_string()),
        }
    }

    /// Собрать из пар query-строки. Повторный ключ не ошибка: берётся первое значение,
    /// неизвестные ключи пропускаются.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "type" => &mut query.content_type,
                "genre" => &mut query.genre,
                "year" => &mut query.year,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Построить предикат.
    ///
    /// `Err` означает, что запрос заведомо пуст (неизвестный тип), и ходить
    /// в хранилище не нужно.
    pub fn to_filter(&self) -> Result<CatalogFilter, UnknownContentType> {
        let content_type = match constrained(&self.content_type) {
            None => None,
            Some(code) => Some(
                ContentType::from_code(code)
                    .ok_or_else(|| UnknownContentType(code.to_string()))?,
            ),
        };

        Ok(CatalogFilter {
            content_type,
            genre: constrained(&self.genre).map(str::to_string),
            release_year: constrained(&self.year).and_then(parse_year),
        })
    }

    /// Год был указан, но не разобран (и поэтому проигнорирован)
    pub fn has_unparsed_year(&self) -> bool {
        constrained(&self.year).is_some_and(|y| parse_year(y).is_none())
    }
}

impl CatalogFilter {
    /// Ни одно измерение не ограничено
    pub fn is_unconstrained(&self) -> bool {
        self.content_type.is_none() && self.genre.is_none() && self.release_year.is_none()
    }

    /// Запись удовлетворяет всем заданным измерениям (AND)
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.content_type.map_or(true, |t| entry.content_type == t)
            && self.genre.as_deref().map_or(true, |g| entry.has_genre(g))
            && self.release_year.map_or(true, |y| entry.release_year == y)
    }
}
