use super::Context;

pub fn run(ctx: &Context, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("reset deletes all progress; pass --yes to confirm".into());
    }
    let mut store = ctx.store();
    store.reset();
    println!("  Progress reset.");
    Ok(())
}
