//! Conversion of raw catalog payloads into [`ContentItem`]s.
//!
//! Browse endpoints are single-kind, so the caller supplies the media type.
//! Search pages mix kinds; there the entry's own discriminator decides, and
//! person results are replaced by the titles they are known for.

use crate::diff::remove_duplicates_by_key;
use catalog_models::dates::parse_lenient;
use catalog_models::{ContentItem, MediaType, RawEntry, RawPage, SearchEntry};
use tracing::debug;

/// Which search result kinds a browsing context accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Movies, shows and the known-for titles of people
    All,
    Movies,
    Shows,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::All => "all",
            SearchScope::Movies => "movies",
            SearchScope::Shows => "shows",
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Movie if the entry has a movie-style title, show otherwise
fn derive_media_type(entry: &RawEntry) -> MediaType {
    if let Some(tag) = entry.media_type.as_deref() {
        if let Ok(media_type) = tag.parse() {
            return media_type;
        }
    }
    if entry.title.as_deref().is_some_and(|t| !t.is_empty()) {
        MediaType::Movie
    } else {
        MediaType::Tv
    }
}

/// Normalize one movie or show entry.
///
/// `media_type` is the intended context; `None` derives it from the entry.
/// A missing title becomes `""` so a page never loses entries.
pub fn normalize_entry(entry: RawEntry, media_type: Option<MediaType>) -> ContentItem {
    let media_type = media_type.unwrap_or_else(|| derive_media_type(&entry));
    let title = non_empty(entry.title).or(non_empty(entry.name)).unwrap_or_default();
    let release_date = non_empty(entry.release_date)
        .or(non_empty(entry.first_air_date))
        .and_then(|d| parse_lenient(&d));

    ContentItem {
        id: entry.id,
        media_type,
        title,
        release_date,
        poster_path: non_empty(entry.poster_path),
        backdrop_path: non_empty(entry.backdrop_path),
        overview: entry.overview.unwrap_or_default(),
        original_language: entry.original_language.unwrap_or_default(),
        vote_average: entry.vote_average,
    }
}

/// Normalize a single-kind browse page, preserving order
pub fn normalize_page(page: RawPage<RawEntry>, media_type: MediaType) -> Vec<ContentItem> {
    page.results
        .into_iter()
        .map(|entry| normalize_entry(entry, Some(media_type)))
        .collect()
}

/// Flatten a search page into items accepted by `scope`, first occurrence wins.
pub fn normalize_search(entries: Vec<SearchEntry>, scope: SearchScope) -> Vec<ContentItem> {
    let total = entries.len();
    let mut items = Vec::with_capacity(total);

    for entry in entries {
        match (entry, scope) {
            (SearchEntry::Movie(raw), SearchScope::All | SearchScope::Movies) => {
                items.push(normalize_entry(raw, Some(MediaType::Movie)));
            }
            (SearchEntry::Tv(raw), SearchScope::All | SearchScope::Shows) => {
                items.push(normalize_entry(raw, Some(MediaType::Tv)));
            }
            (SearchEntry::Person(person), SearchScope::All) => {
                debug!(person_id = person.id, known_for = person.known_for.len(), "Expanding person result");
                items.extend(person.known_for.into_iter().map(|raw| normalize_entry(raw, None)));
            }
            _ => {}
        }
    }

    let items = remove_duplicates_by_key(items);
    debug!(total, kept = items.len(), scope = scope.as_str(), "Normalized search page");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::RawPerson;

    fn movie(id: u64, title: &str) -> RawEntry {
        RawEntry {
            id,
            title: Some(title.to_string()),
            release_date: Some("2001-07-20".to_string()),
            ..Default::default()
        }
    }

    fn show(id: u64, name: &str) -> RawEntry {
        RawEntry {
            id,
            name: Some(name.to_string()),
            first_air_date: Some("2008-01-20".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_and_date_resolution() {
        let item = normalize_entry(show(1, "Breaking Bad"), Some(MediaType::Tv));
        assert_eq!(item.title, "Breaking Bad");
        assert_eq!(item.year(), Some(2008));

        let item = normalize_entry(movie(2, "Spirited Away"), Some(MediaType::Movie));
        assert_eq!(item.title, "Spirited Away");
        assert_eq!(item.year(), Some(2001));
    }

    #[test]
    fn test_missing_title_and_bad_date() {
        let raw = RawEntry {
            id: 9,
            release_date: Some(String::new()),
            first_air_date: Some("not a date".to_string()),
            ..Default::default()
        };
        let item = normalize_entry(raw, Some(MediaType::Movie));
        assert_eq!(item.title, "");
        assert!(item.release_date.is_none());
        assert_eq!(item.overview, "");
    }

    #[test]
    fn test_derived_media_type() {
        assert_eq!(normalize_entry(movie(1, "Alien"), None).media_type, MediaType::Movie);
        assert_eq!(normalize_entry(show(1, "Lost"), None).media_type, MediaType::Tv);

        let mut tagged = movie(3, "Odd");
        tagged.media_type = Some("tv".to_string());
        assert_eq!(normalize_entry(tagged, None).media_type, MediaType::Tv);
    }

    #[test]
    fn test_person_expansion() {
        let person = RawPerson {
            id: 500,
            name: Some("Someone".to_string()),
            known_for: vec![movie(10, "A"), movie(11, "B"), show(12, "C")],
        };
        let entries = vec![SearchEntry::Person(person), SearchEntry::Movie(movie(20, "D"))];

        let items = normalize_search(entries, SearchScope::All);
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.id != 500));
        assert_eq!(items[2].media_type, MediaType::Tv);
        assert_eq!(items[3].id, 20);
    }

    #[test]
    fn test_search_scope_filters_kinds() {
        let entries = || {
            vec![
                SearchEntry::Movie(movie(1, "Movie")),
                SearchEntry::Tv(show(2, "Show")),
                SearchEntry::Person(RawPerson {
                    id: 3,
                    name: None,
                    known_for: vec![movie(4, "Known")],
                }),
                SearchEntry::Unsupported,
            ]
        };

        let movies = normalize_search(entries(), SearchScope::Movies);
        assert_eq!(movies.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1]);

        let shows = normalize_search(entries(), SearchScope::Shows);
        assert_eq!(shows.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);

        let all = normalize_search(entries(), SearchScope::All);
        assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_search_dedup_uses_composite_key() {
        let entries = vec![
            SearchEntry::Movie(movie(7, "Movie seven")),
            SearchEntry::Tv(show(7, "Show seven")),
            SearchEntry::Person(RawPerson {
                id: 1,
                name: None,
                known_for: vec![movie(7, "Movie seven again")],
            }),
        ];

        let items = normalize_search(entries, SearchScope::All);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Movie seven");
        assert_eq!(items[1].media_type, MediaType::Tv);
    }
}
