use catalog_models::{ContentItem, MediaType};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Order in which items were accumulated
    #[default]
    Insertion,
    TitleAscending,
    TitleDescending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "insertion" => Ok(SortOrder::Insertion),
            "asc" | "az" => Ok(SortOrder::TitleAscending),
            "desc" | "za" => Ok(SortOrder::TitleDescending),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFilter {
    #[default]
    All,
    Only(MediaType),
}

impl MediaFilter {
    pub fn accepts(&self, item: &ContentItem) -> bool {
        match self {
            MediaFilter::All => true,
            MediaFilter::Only(media_type) => item.media_type == *media_type,
        }
    }
}

impl FromStr for MediaFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(MediaFilter::All);
        }
        s.parse().map(MediaFilter::Only)
    }
}

/// Borrowed, filtered and sorted view over `items`. The slice is untouched.
pub fn arrange<'a>(items: &'a [ContentItem], filter: MediaFilter, order: SortOrder) -> Vec<&'a ContentItem> {
    let mut view: Vec<&ContentItem> = items.iter().filter(|item| filter.accepts(item)).collect();

    // sort_by_cached_key is stable
    match order {
        SortOrder::Insertion => {}
        SortOrder::TitleAscending => view.sort_by_cached_key(|item| item.title.to_lowercase()),
        SortOrder::TitleDescending => {
            view.sort_by_cached_key(|item| std::cmp::Reverse(item.title.to_lowercase()));
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, media_type: MediaType, title: &str) -> ContentItem {
        ContentItem {
            id,
            media_type,
            title: title.to_string(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            original_language: String::new(),
            vote_average: None,
        }
    }

    fn titles(view: &[&ContentItem]) -> Vec<String> {
        view.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_sort_is_case_insensitive_and_stable() {
        let items = vec![
            item(1, MediaType::Movie, "beta"),
            item(2, MediaType::Movie, "Alpha"),
            item(3, MediaType::Tv, "alpha"),
            item(4, MediaType::Tv, "Gamma"),
        ];

        let asc = arrange(&items, MediaFilter::All, SortOrder::TitleAscending);
        assert_eq!(titles(&asc), vec!["Alpha", "alpha", "beta", "Gamma"]);

        let desc = arrange(&items, MediaFilter::All, SortOrder::TitleDescending);
        assert_eq!(titles(&desc), vec!["Gamma", "beta", "Alpha", "alpha"]);

        let insertion = arrange(&items, MediaFilter::All, SortOrder::Insertion);
        assert_eq!(insertion.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(items[0].title, "beta");
    }

    #[test]
    fn test_media_filter() {
        let items = vec![item(1, MediaType::Movie, "A"), item(2, MediaType::Tv, "B")];
        let shows = arrange(&items, MediaFilter::Only(MediaType::Tv), SortOrder::Insertion);
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].id, 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::TitleAscending);
        assert_eq!("default".parse::<SortOrder>().unwrap(), SortOrder::Insertion);
        assert!("random".parse::<SortOrder>().is_err());
        assert_eq!("tv".parse::<MediaFilter>().unwrap(), MediaFilter::Only(MediaType::Tv));
        assert_eq!("ALL".parse::<MediaFilter>().unwrap(), MediaFilter::All);
    }
}
