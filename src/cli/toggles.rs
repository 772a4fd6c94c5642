//! Команды переключателей

use colored::Colorize;

use super::{header, on_off, Context};
use crate::error::Result;
use crate::panels::{toggles, ToggleGroup};

pub fn list(ctx: &Context<'_>, json: bool) -> Result<()> {
    let states = toggles::list(ctx.params, ctx.hardware)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }

    for (group, title) in [(ToggleGroup::General, "Toggles"), (ToggleGroup::Community, "Community")] {
        header(title);
        println!("{:<28} {:<5} {}", "KEY".bold(), "VALUE".bold(), "TITLE".bold());
        println!("{}", "─".repeat(70).dimmed());

        for state in states.iter().filter(|s| s.def.group == group) {
            let lock = if state.locked { " (locked)".yellow().to_string() } else { String::new() };
            println!(
                "{:<28} {:<5} {}{}",
                state.def.key,
                on_off(state.enabled),
                state.def.title,
                lock
            );
        }
        println!();
    }
    Ok(())
}

pub fn set(ctx: &Context<'_>, key: &str, value: bool) -> Result<()> {
    toggles::set(ctx.params, ctx.hardware, key, value)?;
    println!("{} {}", key.bold(), on_off(value));
    Ok(())
}
