use clap::Parser;
use portfolio_sync::{cli, config, error, prompt, session, workflow};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use prompt::TerminalPrompter;
use session::Session;
use tracing_subscriber::EnvFilter;
use workflow::Mode;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the operator-facing status lines
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = Config::load()?;
    if let Some(images) = cli.images {
        config.image_dir = images;
    }
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    if let Some(ignore_file) = cli.ignore_file {
        config.ignore_file = ignore_file;
    }

    let mode = match cli.command {
        None => None,
        Some(Commands::Scan) => Some(Mode::Scan),
        Some(Commands::Replace { collection }) => Some(Mode::Replace(collection)),

        Some(Commands::Status) => {
            let session = Session::open(config)?;
            return workflow::status(&session);
        }

        Some(Commands::Config { show, init }) => {
            if init {
                let path = std::path::PathBuf::from(config::LOCAL_CONFIG_FILE);
                if path.exists() {
                    println!("⚠ {} already exists, not overwritten", path.display());
                } else {
                    config.save_to(&path)?;
                    println!("✔ Wrote {}", path.display());
                }
            }
            if show || !init {
                println!("Config:");
                println!("  image folder:     {}", config.image_dir.display());
                println!("  data file:        {}", config.data_file.display());
                println!("  ignore list:      {}", config.ignore_file.display());
                println!("  certificates var: {}", config.certificates_var);
                println!("  projects var:     {}", config.projects_var);
                println!("  default link:     {}", config.default_certificate_link);
                println!("  extensions:       {}", config.extensions.join(", "));
            }
            return Ok(());
        }
    };

    println!("🖼  sync-images\n");

    // 1. ignore list + data file
    let session = Session::open(config)?.with_dry_run(cli.dry_run);

    // 2. chosen mode, then a single flush
    workflow::run(session, &mut TerminalPrompter, mode)?;

    Ok(())
}
