use super::*;
use crate::testing::{raw_movie, raw_show, FakeCatalog};
use catalog_models::RawPerson;
use catalog_models::SearchEntry;

fn movies(ids: std::ops::Range<u64>) -> Vec<catalog_models::RawEntry> {
    ids.map(|id| raw_movie(id, &format!("Movie {}", id))).collect()
}

fn shows(ids: std::ops::Range<u64>) -> Vec<catalog_models::RawEntry> {
    ids.map(|id| raw_show(id, &format!("Show {}", id))).collect()
}

fn mixed_popular() -> ActiveFilter {
    ActiveFilter::Browse {
        kind: ContentKind::Mixed,
        category: Category::Popular,
    }
}

fn movie_popular() -> ActiveFilter {
    ActiveFilter::Browse {
        kind: ContentKind::Movie,
        category: Category::Popular,
    }
}

fn assert_unique_keys(state: &PageState) {
    let keys: HashSet<ItemKey> = state.items().iter().map(ContentItem::key).collect();
    assert_eq!(keys.len(), state.items().len());
}

#[tokio::test]
async fn test_mixed_page_concatenates_movies_then_shows() {
    let catalog = FakeCatalog::new()
        .with_popular(MediaType::Movie, 1, movies(1..21))
        .with_popular(MediaType::Tv, 1, shows(1..21));
    let mut state = PageState::new();

    let outcome = state.select_filter(&catalog, mixed_popular()).await;

    assert_eq!(outcome, PageOutcome::Loaded { page: 1, added: 40 });
    assert_eq!(state.items().len(), 40);
    assert!(state.items()[..20].iter().all(|i| i.media_type == MediaType::Movie));
    assert!(state.items()[20..].iter().all(|i| i.media_type == MediaType::Tv));
    assert_eq!(state.items()[0].id, 1);
    assert_eq!(state.items()[20].id, 1);
    assert!(state.has_more());
}

#[tokio::test]
async fn test_load_more_dedups_and_preserves_order() {
    let catalog = FakeCatalog::new()
        .with_popular(MediaType::Movie, 1, movies(1..6))
        .with_popular(MediaType::Movie, 2, movies(4..9))
        .with_popular(MediaType::Movie, 3, movies(1..3));
    let mut state = PageState::new();

    state.select_filter(&catalog, movie_popular()).await;
    let before: Vec<u64> = state.items().iter().map(|i| i.id).collect();

    let outcome = state.load_more(&catalog).await;
    assert_eq!(outcome, PageOutcome::Loaded { page: 2, added: 3 });
    let ids: Vec<u64> = state.items().iter().map(|i| i.id).collect();
    assert_eq!(&ids[..before.len()], &before[..]);
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);

    // A page made only of duplicates still advances the page number
    let outcome = state.load_more(&catalog).await;
    assert_eq!(outcome, PageOutcome::Loaded { page: 3, added: 0 });
    assert_eq!(state.page_number(), 3);
    assert_unique_keys(&state);
}

#[tokio::test]
async fn test_same_id_across_media_types_is_kept() {
    let catalog = FakeCatalog::new()
        .with_popular(MediaType::Movie, 1, movies(1..3))
        .with_popular(MediaType::Tv, 1, shows(1..3))
        .with_popular(MediaType::Movie, 2, movies(2..4))
        .with_popular(MediaType::Tv, 2, shows(2..4));
    let mut state = PageState::new();

    state.select_filter(&catalog, mixed_popular()).await;
    state.load_more(&catalog).await;

    assert_eq!(state.items().len(), 6);
    assert_unique_keys(&state);
}

#[tokio::test]
async fn test_empty_second_page_terminates_paging() {
    let catalog = FakeCatalog::new().with_popular(MediaType::Movie, 1, movies(1..4));
    let mut state = PageState::new();

    state.select_filter(&catalog, movie_popular()).await;
    let items_before = state.items().to_vec();

    let outcome = state.load_more(&catalog).await;
    assert_eq!(outcome, PageOutcome::Empty { page: 2 });
    assert!(!state.has_more());
    assert_eq!(state.page_number(), 1);
    assert_eq!(state.items(), &items_before[..]);

    let calls_before = catalog.calls().len();
    assert_eq!(state.load_more(&catalog).await, PageOutcome::Exhausted);
    assert_eq!(catalog.calls().len(), calls_before);
}

#[tokio::test]
async fn test_empty_first_page_keeps_has_more() {
    let catalog = FakeCatalog::new();
    let mut state = PageState::new();

    let outcome = state.select_filter(&catalog, movie_popular()).await;
    assert_eq!(outcome, PageOutcome::Empty { page: 1 });
    assert!(state.items().is_empty());
    assert!(state.has_more());
}

#[tokio::test]
async fn test_fetch_error_stops_paging() {
    let catalog = FakeCatalog::new().with_popular(MediaType::Movie, 1, movies(1..4));
    let mut state = PageState::new();
    state.select_filter(&catalog, movie_popular()).await;

    catalog.set_failing(true);
    assert_eq!(state.load_more(&catalog).await, PageOutcome::Failed);
    assert!(!state.has_more());
    assert_eq!(state.items().len(), 3);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_mixed_fails_when_either_source_fails() {
    let catalog = FakeCatalog::new().with_popular(MediaType::Movie, 1, movies(1..4));
    catalog.set_failing(true);
    let mut state = PageState::new();

    assert_eq!(state.select_filter(&catalog, mixed_popular()).await, PageOutcome::Failed);
    assert!(state.items().is_empty());
}

#[tokio::test]
async fn test_select_filter_resets_state() {
    let catalog = FakeCatalog::new()
        .with_popular(MediaType::Movie, 1, movies(1..4))
        .with_popular(MediaType::Movie, 2, movies(4..6))
        .with_genre(MediaType::Movie, 27, 1, movies(100..102));
    let mut state = PageState::new();

    state.select_filter(&catalog, movie_popular()).await;
    state.load_more(&catalog).await;
    assert_eq!(state.page_number(), 2);

    let horror = ActiveFilter::Browse {
        kind: ContentKind::Movie,
        category: Category::Genre(27),
    };
    state.select_filter(&catalog, horror).await;
    assert_eq!(state.page_number(), 1);
    assert_eq!(state.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![100, 101]);
}

#[tokio::test]
async fn test_mixed_genre_uses_movie_source() {
    let catalog = FakeCatalog::new().with_genre(MediaType::Movie, 35, 1, movies(1..3));
    let mut state = PageState::new();

    let filter = ActiveFilter::Browse {
        kind: ContentKind::Mixed,
        category: Category::Genre(35),
    };
    state.select_filter(&catalog, filter).await;

    assert_eq!(catalog.calls(), vec!["genre:movie:35:1".to_string()]);
    assert!(state.items().iter().all(|i| i.media_type == MediaType::Movie));
}

#[tokio::test]
async fn test_stale_commit_is_dropped() {
    let catalog = FakeCatalog::new()
        .with_search("alien", 1, vec![SearchEntry::Movie(raw_movie(1, "Alien"))])
        .with_popular(MediaType::Movie, 1, movies(10..12));
    let mut state = PageState::new();

    let search = state.begin_select_filter(ActiveFilter::Search {
        query: "alien".to_string(),
        scope: SearchScope::All,
    });
    let search_result = search.fetch(&catalog).await;

    // User leaves search before the response lands
    state.select_filter(&catalog, movie_popular()).await;

    assert_eq!(state.commit(&search, search_result), PageOutcome::Stale);
    assert_eq!(state.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![10, 11]);
    assert!(!state.is_searching());
}

#[tokio::test]
async fn test_load_more_busy_while_in_flight() {
    let catalog = FakeCatalog::new().with_popular(MediaType::Movie, 1, movies(1..3));
    let mut state = PageState::new();

    let request = state.begin_select_filter(movie_popular());
    assert_eq!(state.begin_load_more().unwrap_err(), PageOutcome::Busy);

    let result = request.fetch(&catalog).await;
    state.commit(&request, result);
    assert!(state.begin_load_more().is_ok());
}

#[tokio::test]
async fn test_search_paging_with_person_expansion() {
    let person = RawPerson {
        id: 900,
        name: Some("Director".to_string()),
        known_for: vec![raw_movie(1, "One"), raw_movie(2, "Two"), raw_show(3, "Three")],
    };
    let catalog = FakeCatalog::new()
        .with_search("dir", 1, vec![SearchEntry::Person(person), SearchEntry::Movie(raw_movie(4, "Four"))])
        .with_search("dir", 2, vec![SearchEntry::Movie(raw_movie(4, "Four")), SearchEntry::Movie(raw_movie(5, "Five"))]);
    let mut state = PageState::new();

    let filter = ActiveFilter::Search {
        query: "dir".to_string(),
        scope: SearchScope::All,
    };
    assert_eq!(state.select_filter(&catalog, filter).await, PageOutcome::Loaded { page: 1, added: 4 });
    assert!(state.is_searching());

    assert_eq!(state.load_more(&catalog).await, PageOutcome::Loaded { page: 2, added: 1 });
    assert_eq!(state.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_snapshot_prepend() {
    let mut state = PageState::new();
    let item = |id| crate::normalize::normalize_entry(raw_movie(id, "Row"), Some(MediaType::Movie));

    assert!(!state.prepend(item(1)));

    state.load_snapshot(vec![item(1), item(2)]);
    assert!(!state.has_more());
    assert_eq!(state.begin_load_more().unwrap_err(), PageOutcome::Exhausted);

    assert!(state.prepend(item(1)));
    assert_eq!(state.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 1, 2]);
}
