use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lq_core::UnitId;
use lq_core::stars::MAX_STARS;

use super::{Context, star_bar};
use crate::content::unit_title;

pub fn run(ctx: &Context) -> Result<(), String> {
    let store = ctx.store();
    let progress = store.progress();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Unit", "Title", "XP", "Stars", "Cleared", "Best", "Best time"]);

    for id in UnitId::all() {
        let unit = progress.unit(id);
        let best_time = unit
            .challenge
            .best_time_sec
            .map_or_else(|| "—".to_string(), |t| format!("{t}s"));
        table.add_row(vec![
            id.get().to_string(),
            unit_title(id).to_string(),
            unit.xp.to_string(),
            star_bar(unit.stars, MAX_STARS),
            unit.challenge.cleared_levels.to_string(),
            unit.challenge.best_score.to_string(),
            best_time,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} {}   {} {}/{}",
        "Total XP:".bold(),
        progress.total_xp,
        "Badges:".bold(),
        progress.unlocked_badges().len(),
        progress.badges.len()
    );

    Ok(())
}
