use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lq_core::stars::MAX_STARS;
use lq_core::{TRACK_LENGTH, level_grid};

use super::{Context, parse_unit, star_bar};
use crate::content::unit_title;

pub fn run(ctx: &Context, unit: u8) -> Result<(), String> {
    let unit = parse_unit(unit)?;
    let store = ctx.store();
    let track = &store.progress().unit(unit).challenge;

    println!("  {} {}", unit.to_string().bold(), unit_title(unit).dimmed());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Mode", "Stars", "Best", "State"]);

    for slot in level_grid(&track.levels, TRACK_LENGTH) {
        let best = track
            .levels
            .get(&slot.level)
            .map_or_else(|| "—".to_string(), |s| s.best_score.to_string());
        let state = if slot.unlocked { "open" } else { "locked" };
        table.add_row(vec![
            slot.level.to_string(),
            ctx.config.levels.mode_for(slot.level).to_string(),
            star_bar(slot.stars, MAX_STARS),
            best,
            state.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
