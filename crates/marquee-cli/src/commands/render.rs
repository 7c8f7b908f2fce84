use catalog_core::{FavoriteState, Selection, TrailerResolution};
use catalog_models::{ContentItem, MediaType};
use comfy_table::{Attribute, Cell, Color, Table};
use serde_json::json;

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

pub fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Movie",
        MediaType::Tv => "Series",
    }
}

pub fn items_table(items: &[&ContentItem]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("#"),
        header("Title"),
        header("Year"),
        header("Type"),
        header("Rating"),
        header("Key"),
    ]);

    for (index, item) in items.iter().enumerate() {
        let kind_color = match item.media_type {
            MediaType::Movie => Color::Cyan,
            MediaType::Tv => Color::Magenta,
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(item.year().map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())),
            Cell::new(media_label(item.media_type)).fg(kind_color),
            Cell::new(
                item.vote_average
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(item.key().to_string()),
        ]);
    }
    table
}

fn favorite_label(state: FavoriteState) -> &'static str {
    match state {
        FavoriteState::Favorited => "★ yes",
        FavoriteState::NotFavorited => "no",
        FavoriteState::Unknown => "unknown",
    }
}

fn trailer_label(trailer: &TrailerResolution) -> String {
    match trailer {
        TrailerResolution::Found(video) => format!(
            "https://www.youtube.com/watch?v={} ({} {}{})",
            video.key,
            match video.video_type {
                catalog_models::VideoType::Teaser => "teaser",
                _ => "trailer",
            },
            video.language_code,
            if video.region_code.is_empty() {
                String::new()
            } else {
                format!("-{}", video.region_code)
            }
        ),
        TrailerResolution::NotFound => "no trailer found".to_string(),
        TrailerResolution::Failed => "unavailable".to_string(),
    }
}

pub fn selection_table(selection: &Selection) -> Table {
    let item = &selection.item;
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(&item.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(item.key().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Released"),
        Cell::new(
            item.release_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
    ]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&item.original_language)]);
    if !item.overview.is_empty() {
        table.add_row(vec![Cell::new("Overview"), Cell::new(&item.overview)]);
    }
    table.add_row(vec![Cell::new("Favorite"), Cell::new(favorite_label(selection.favorite))]);
    table.add_row(vec![Cell::new("Trailer"), Cell::new(trailer_label(&selection.trailer))]);
    table
}

pub fn selection_json(selection: &Selection) -> serde_json::Value {
    json!({
        "item": selection.item,
        "favorite": selection.favorite.is_favorite(),
        "trailer_key": selection.trailer.key(),
        "history_recorded": selection.history_recorded,
    })
}
