use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use offroad_settings::cli::{self, Context};
use offroad_settings::config::Config;
use offroad_settings::hardware::SystemHardware;
use offroad_settings::params::FileParams;
use offroad_settings::prompt::TerminalPrompt;
use offroad_settings::ssh_keys::GithubKeySource;

#[derive(Parser)]
#[command(name = "offroad-settings")]
#[command(version)]
#[command(about = "Offroad settings: toggles, device actions and GitHub SSH keys", long_about = None)]
struct Cli {
    /// Directory holding the parameter files
    #[arg(long, global = true, value_name = "PATH")]
    params_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage GitHub SSH keys
    Ssh {
        #[command(subcommand)]
        action: SshCommands,
    },

    /// Feature toggles
    Toggles {
        #[command(subcommand)]
        action: ToggleCommands,
    },

    /// Device information and actions
    Device {
        #[command(subcommand)]
        action: DeviceCommands,
    },

    /// Show version and build information
    Developer {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SshCommands {
    /// Fetch and store the public keys of a GitHub account
    Add {
        /// GitHub username (asked for when omitted)
        username: Option<String>,
    },
    /// Remove the stored account and keys
    Remove,
    /// Show the stored account and keys
    Show,
    /// Allow SSH access
    Enable,
    /// Disallow SSH access
    Disable,
    /// Print whether SSH access is allowed
    Status,
}

#[derive(Subcommand)]
enum ToggleCommands {
    /// List toggles and their values
    List {
        #[arg(long)]
        json: bool,
    },
    /// Change a toggle
    Set { key: String, value: Switch },
}

#[derive(Subcommand)]
enum DeviceCommands {
    /// Show dongle ID and serial
    Info,
    /// Preview the driver camera
    DriverView,
    /// Reset calibration
    ResetCalibration {
        /// Also drop learned parameters and reboot
        #[arg(long)]
        reboot: bool,
    },
    /// Show the training guide again
    TrainingGuide,
    /// Uninstall the software
    Uninstall,
    /// Reboot the device
    Reboot,
    /// Power off the device
    Poweroff,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "offroad_settings=debug"
    } else {
        "offroad_settings=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.params_dir).context("failed to resolve configuration")?;

    let params = FileParams::new(&config.params_dir);
    let hardware = SystemHardware::new();
    let prompt = TerminalPrompt::new(cli.yes);
    let ctx = Context {
        params: &params,
        hardware: &hardware,
        prompt: &prompt,
    };

    match cli.command {
        Commands::Ssh { action } => match action {
            SshCommands::Add { username } => {
                let source = GithubKeySource::builder(
                    offroad_settings::ssh_keys::GITHUB_BASE_URL,
                    config.ca_bundle.as_deref(),
                )
                .context("failed to set up the key service client")?;
                cli::block_on(cli::ssh::add(&ctx, &source, username))??;
            }
            SshCommands::Remove => cli::ssh::remove(&ctx)?,
            SshCommands::Show => cli::ssh::show(&ctx)?,
            SshCommands::Enable => cli::ssh::set_enabled(&ctx, true)?,
            SshCommands::Disable => cli::ssh::set_enabled(&ctx, false)?,
            SshCommands::Status => cli::ssh::status(&ctx)?,
        },
        Commands::Toggles { action } => match action {
            ToggleCommands::List { json } => cli::toggles::list(&ctx, json)?,
            ToggleCommands::Set { key, value } => {
                cli::toggles::set(&ctx, &key, matches!(value, Switch::On))?
            }
        },
        Commands::Device { action } => match action {
            DeviceCommands::Info => cli::device::info(&ctx)?,
            DeviceCommands::DriverView => cli::device::driver_view(&ctx)?,
            DeviceCommands::ResetCalibration { reboot } => {
                cli::device::reset_calibration(&ctx, reboot)?
            }
            DeviceCommands::TrainingGuide => cli::device::training_guide(&ctx)?,
            DeviceCommands::Uninstall => cli::device::uninstall(&ctx)?,
            DeviceCommands::Reboot => cli::device::reboot(&ctx)?,
            DeviceCommands::Poweroff => cli::device::poweroff(&ctx)?,
        },
        Commands::Developer { json } => cli::developer::show(&ctx, json)?,
    }

    Ok(())
}
