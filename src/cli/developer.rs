use colored::Colorize;

use super::{header, Context};
use crate::error::Result;
use crate::panels::developer;

pub fn show(ctx: &Context<'_>, json: bool) -> Result<()> {
    let rows = developer::rows(ctx.params, ctx.hardware)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&developer::to_json(&rows))?);
        return Ok(());
    }

    header("Developer");
    for row in &rows {
        println!("{:<16} {}", format!("{}:", row.name).bold(), row.value);
    }
    println!();
    Ok(())
}
