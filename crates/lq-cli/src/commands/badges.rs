use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let store = ctx.store();
    let progress = store.progress();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Badge", "Title", "How to earn", "Unlocked"]);

    for rule in store.rules().badges.rules() {
        let unlocked = match progress.badges.get(rule.key) {
            Some(state) if state.unlocked => state
                .unlocked_at
                .map_or_else(|| "yes".to_string(), |at| at.format("%Y-%m-%d").to_string()),
            _ => "—".to_string(),
        };
        table.add_row(vec![rule.key, rule.title, rule.description, unlocked.as_str()]);
    }

    println!("{table}");
    println!();
    println!(
        "  {}/{} unlocked",
        progress.unlocked_badges().len(),
        store.rules().badges.rules().len()
    );
    Ok(())
}
