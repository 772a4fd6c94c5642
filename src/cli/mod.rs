//! Реализация CLI команд

pub mod developer;
pub mod device;
pub mod ssh;
pub mod toggles;

use std::future::Future;

use colored::Colorize;

use crate::error::Result;
use crate::hardware::Hardware;
use crate::params::ParamStore;
use crate::prompt::Prompt;

/// Collaborators every command works against
pub struct Context<'a> {
    pub params: &'a dyn ParamStore,
    pub hardware: &'a dyn Hardware,
    pub prompt: &'a dyn Prompt,
}

/// Run a future to completion on a fresh single-threaded runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Заголовок раздела
pub(crate) fn header(title: &str) {
    println!("{}", format!("=== {} ===", title).cyan().bold());
    println!();
}

pub(crate) fn on_off(value: bool) -> colored::ColoredString {
    if value {
        "on".green()
    } else {
        "off".dimmed()
    }
}
