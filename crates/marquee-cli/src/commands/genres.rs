use crate::output::Output;
use catalog_core::KNOWN_GENRES;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use serde_json::json;

pub fn run_genres(output: &Output) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ]);
    for genre in KNOWN_GENRES {
        table.add_row(vec![Cell::new(genre.id), Cell::new(genre.name)]);
    }
    output.block(table);

    let genres: Vec<_> = KNOWN_GENRES
        .iter()
        .map(|g| json!({ "id": g.id, "name": g.name }))
        .collect();
    output.data("genres", &genres);
    Ok(())
}
