//! Command-line interface implementation

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{check, load_config, merge_cli_overrides, CliOverrides, ParticlesConfig};
use crate::document::{Document, VirtualDocument};
use crate::models::MAX_PARTICLE_COUNT;
use crate::spawner::ParticleSpawner;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Particlefield - spawn ambient decorative particles for a web page
#[derive(Parser)]
#[command(name = "particles")]
#[command(about = "Particlefield - spawn ambient decorative particles for a web page")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest particles.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for `spawn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The populated container as an HTML fragment
    Html,
    /// The generated particles as a JSON array
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Spawn a particle field and write it as HTML or JSON
    Spawn {
        /// Number of particles (1-10000)
        #[arg(
            short = 'n',
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_PARTICLE_COUNT as u64)
        )]
        count: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Container element id
        #[arg(long)]
        container: Option<String>,

        /// Presentation class for each particle
        #[arg(long)]
        class: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the resolved configuration as TOML
    Config,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Spawn { count, seed, container, class, format, output } => {
            let overrides = CliOverrides { count, container_id: container, class, seed };
            run_spawn(cli.config.as_deref(), &overrides, format, output.as_deref())
        }
        Commands::Config => run_config(cli.config.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Load the config file (if any) and apply CLI overrides
fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<ParticlesConfig, String> {
    let mut config = load_config(config_path).map_err(|e| e.to_string())?;
    merge_cli_overrides(&mut config, overrides);
    check(&config).map_err(|e| e.to_string())?;
    Ok(config)
}

/// Execute the spawn command
fn run_spawn(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    format: OutputFormat,
    output: Option<&Path>,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let spawner = match ParticleSpawner::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    // Stand-in for the host page: a body holding the empty container
    let mut doc = VirtualDocument::with_container(&config.spawner.container_id);
    let report = match spawner.spawn_with_entropy(&mut doc) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let rendered = match format {
        OutputFormat::Html => match doc.get_element_by_id(&report.container_id) {
            Some(container) => doc.to_html(container),
            None => {
                eprintln!("Error: container '#{}' vanished after spawn", report.container_id);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        OutputFormat::Json => match serde_json::to_string_pretty(&report.particles) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: Cannot serialize particles: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    write_output(output, &rendered)
}

/// Execute the config command
fn run_config(config_path: Option<&Path>) -> ExitCode {
    let config = match resolve_config(config_path, &CliOverrides::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match toml::to_string(&config) {
        Ok(text) => write_output(None, text.trim_end()),
        Err(e) => {
            eprintln!("Error: Cannot serialize config: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn write_output(output: Option<&Path>, contents: &str) -> ExitCode {
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", contents)) {
                eprintln!("Error: Cannot write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", contents),
    }
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spawn_flags() {
        let cli = Cli::try_parse_from([
            "particles", "spawn", "-n", "10", "--seed", "5", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Spawn { count, seed, format, .. } => {
                assert_eq!(count, Some(10));
                assert_eq!(seed, Some(5));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected spawn"),
        }
    }

    #[test]
    fn test_count_out_of_range_rejected_by_parser() {
        for count in ["0", "10001", "18446744073709551615"] {
            let result = Cli::try_parse_from(["particles", "spawn", "-n", count]);
            assert!(result.is_err(), "count {} should be rejected", count);
        }
        assert!(Cli::try_parse_from(["particles", "spawn", "-n", "10000"]).is_ok());
    }

    #[test]
    fn test_resolve_config_rejects_zero_count() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("particles.toml");
        fs::write(&path, "").unwrap();
        let overrides = CliOverrides { count: Some(0), ..Default::default() };
        let err = resolve_config(Some(&path), &overrides).unwrap_err();
        assert!(err.contains("spawner.count"));
    }
}
