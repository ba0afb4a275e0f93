use lq_core::SessionResult;

use super::{Context, parse_unit, playable_level, print_outcome};

/// Record a result played elsewhere. Score and time are clamped like a live session's.
pub fn run(ctx: &Context, unit: u8, level: u32, score: u32, time: u32) -> Result<(), String> {
    let unit = parse_unit(unit)?;
    let mut store = ctx.store();
    let level = playable_level(&store, unit, level)?;

    let result = SessionResult::new(score, time, ctx.config.challenge.total_time_secs);
    let outcome = store.record_challenge(unit, level, result);

    println!(
        "  Recorded {unit}, level {level}: {} points in {}s",
        result.score, result.time_used_secs
    );
    print_outcome(&outcome);
    Ok(())
}
