//! Команды устройства

use colored::Colorize;

use super::{block_on, header, Context};
use crate::error::Result;
use crate::panels::{ActionResult, DevicePanel};

fn panel<'a>(ctx: &'a Context<'_>) -> DevicePanel<'a> {
    DevicePanel::new(ctx.params, ctx.hardware, ctx.prompt)
}

fn report(result: ActionResult, done: &str) {
    match result {
        ActionResult::Done => println!("{} {}", "Success:".green().bold(), done),
        ActionResult::Cancelled => println!("{}", "Cancelled.".dimmed()),
    }
}

pub fn info(ctx: &Context<'_>) -> Result<()> {
    header("Device");
    let info = panel(ctx).info()?;
    println!("{:<12} {}", "Dongle ID:".bold(), info.dongle_id);
    println!("{:<12} {}", "Serial:".bold(), info.serial);
    println!();
    Ok(())
}

pub fn driver_view(ctx: &Context<'_>) -> Result<()> {
    report(panel(ctx).driver_view()?, "driver camera preview requested.");
    Ok(())
}

pub fn reset_calibration(ctx: &Context<'_>, reboot: bool) -> Result<()> {
    let panel = panel(ctx);
    if reboot {
        report(block_on(panel.reset_calibration_and_reboot())??, "calibration reset, rebooting.");
    } else {
        report(panel.reset_calibration()?, "calibration reset.");
    }
    Ok(())
}

pub fn training_guide(ctx: &Context<'_>) -> Result<()> {
    report(panel(ctx).review_training_guide()?, "training guide will be shown again.");
    Ok(())
}

pub fn uninstall(ctx: &Context<'_>) -> Result<()> {
    let panel = panel(ctx);
    println!("{}", panel.uninstall_label()?.bold());
    report(panel.uninstall()?, "uninstall scheduled.");
    Ok(())
}

pub fn reboot(ctx: &Context<'_>) -> Result<()> {
    report(panel(ctx).reboot()?, "rebooting.");
    Ok(())
}

pub fn poweroff(ctx: &Context<'_>) -> Result<()> {
    report(panel(ctx).poweroff()?, "powering off.");
    Ok(())
}
