//! Command-line interface for mag-import
//!
//! # Usage Examples
//!
//! ```bash
//! # Backfill the full 100-600 km band, one component file at a time
//! mag-import per-component \
//!   --data-dir /data/survey/2013-02-01 \
//!   --db-user mag --db-password secret
//!
//! # Merged single-pass import of elevations 140 through 159
//! mag-import merged 140 160 \
//!   --data-dir /data/survey/2013-02-01 \
//!   --db-user mag --db-password secret
//!
//! # Check what a run would do without writing
//! mag-import merged 100 102 --dry-run --db-user mag --db-password secret
//! ```
//!
//! Progress is logged per elevation (and per component for `per-component`);
//! set `RUST_LOG` to adjust verbosity. Any failure aborts the whole run with
//! a non-zero exit status.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mag_import::{elevation, import, ImportOpts, PgOpts};
use mag_store::MagStore;

#[derive(Parser)]
#[command(name = "mag-import")]
#[command(about = "A tool for importing geomagnetic survey CSV files into PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one component file at a time, backfilling missing fields on existing rows
    PerComponent {
        /// Lowest elevation to process, in kilometers (inclusive)
        #[arg(long, default_value = "100")]
        from: i32,

        /// Highest elevation to process, in kilometers (inclusive)
        #[arg(long, default_value = "600")]
        to: i32,

        #[command(flatten)]
        import_opts: ImportOpts,

        #[command(flatten)]
        pg_opts: PgOpts,
    },

    /// Read all seven component files per elevation and insert consolidated rows
    Merged {
        /// Lowest elevation to process, in kilometers (inclusive)
        low: i32,

        /// Elevation to stop before, in kilometers (exclusive)
        high: i32,

        #[command(flatten)]
        import_opts: ImportOpts,

        #[command(flatten)]
        pg_opts: PgOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::PerComponent {
            from,
            to,
            import_opts,
            pg_opts,
        } => {
            let elevations = elevation::inclusive_range(from, to)?;
            let store = MagStore::connect(&pg_opts)
                .await
                .context("failed to connect to the mag database")?;
            import::per_component::run(&store, &import_opts, elevations).await?;
        }
        Commands::Merged {
            low,
            high,
            import_opts,
            pg_opts,
        } => {
            let elevations = elevation::exclusive_range(low, high)?;
            let store = MagStore::connect(&pg_opts)
                .await
                .context("failed to connect to the mag database")?;
            import::merged::run(&store, &import_opts, elevations).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_takes_positional_bounds() {
        let cli = Cli::parse_from([
            "mag-import",
            "merged",
            "100",
            "102",
            "--db-user",
            "mag",
            "--db-password",
            "secret",
        ]);
        match cli.command {
            Commands::Merged { low, high, .. } => {
                assert_eq!(low, 100);
                assert_eq!(high, 102);
            }
            _ => panic!("expected merged subcommand"),
        }
    }

    #[test]
    fn per_component_defaults_to_the_full_band() {
        let cli = Cli::parse_from([
            "mag-import",
            "per-component",
            "--db-user",
            "mag",
            "--db-password",
            "secret",
        ]);
        match cli.command {
            Commands::PerComponent {
                from,
                to,
                import_opts,
                ..
            } => {
                assert_eq!(from, 100);
                assert_eq!(to, 600);
                assert_eq!(import_opts.date.to_string(), "2013-02-01");
                assert!(!import_opts.dry_run);
            }
            _ => panic!("expected per-component subcommand"),
        }
    }
}
