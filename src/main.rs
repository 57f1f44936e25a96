mod commands;

use clap::{Parser, Subcommand};
use glossa_core::config;
use tracing::{info, warn};

use commands::CommandContext;

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "Glossa: look up and check localized resource tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "glossa.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the translation for a key (`namespace:path` or `path`).
    Lookup {
        key: String,
        /// Locale to translate into (default: from config).
        #[arg(short, long)]
        locale: Option<String>,
        /// Interpolation value, repeatable: `--param name=Alice`.
        #[arg(short, long = "param", value_parser = commands::parse_param)]
        params: Vec<(String, String)>,
        /// Strip `<N>...</N>` markup from the output.
        #[arg(long)]
        plain: bool,
    },
    /// List leaf keys of a locale.
    Keys {
        #[arg(short, long)]
        locale: Option<String>,
        #[arg(short, long)]
        namespace: Option<String>,
        /// Only keys starting with this path prefix.
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Report missing keys and placeholder mismatches against a reference locale.
    Check {
        #[arg(short, long)]
        reference: Option<String>,
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Load every resource file and report what was found.
    Validate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = config::load(&cli.config)?;
    let from_file = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.glossa.log_level)),
        )
        .init();

    if !from_file {
        info!("Config file not found at {}, using defaults", cli.config);
    }

    let ctx = CommandContext::load(&cfg)?;

    match cli.command {
        Commands::Lookup {
            key,
            locale,
            params,
            plain,
        } => {
            let out = commands::handle_lookup(&ctx, &key, locale.as_deref(), &params, plain)?;
            println!("{out}");
        }
        Commands::Keys {
            locale,
            namespace,
            prefix,
        } => {
            let out = commands::handle_keys(
                &ctx,
                locale.as_deref(),
                namespace.as_deref(),
                prefix.as_deref(),
            )?;
            if !out.is_empty() {
                println!("{out}");
            }
        }
        Commands::Check { reference, json } => {
            let (out, complete) = commands::handle_check(&ctx, reference.as_deref(), json)?;
            println!("{out}");
            if !complete {
                warn!("check found missing keys or placeholder mismatches");
                anyhow::bail!("translations are incomplete");
            }
        }
        Commands::Validate => {
            println!("{}", commands::handle_validate(&ctx));
        }
    }

    Ok(())
}
