use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_styles, print_empty_list, print_error, print_key_value, print_section_header,
    print_success, TableBuilder,
};
use opensound_analytics::catalog::format_duration;
use opensound_analytics::config::{default_cli_config, AppConfig, CliConfig, SourceKind};
use opensound_analytics::pipeline::run_etl;
use opensound_analytics::source::resolve_query;
use opensound_analytics::EtlSnapshot;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Runs the ETL pipeline once and prints the resulting statistics.
#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Genre preset id (e.g. "rock", "all") or a raw search term.
    pub term: String,

    /// Where to fetch the batch from.
    #[clap(long, value_enum, default_value_t = SourceKind::Deezer)]
    pub source: SourceKind,

    /// Directory of `<term>.json` files, required with `--source file`.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the Deezer API.
    #[clap(long)]
    pub deezer_base_url: Option<String>,

    /// Maximum number of tracks to fetch.
    #[clap(long, default_value_t = 50)]
    pub limit: usize,

    /// Timeout in seconds for catalog requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,

    /// Print the whole snapshot as JSON instead of a summary.
    #[clap(long)]
    pub json: bool,
}

fn print_summary(snapshot: &EtlSnapshot, source_name: &str) {
    print_section_header(&format!("ETL: {}", snapshot.term));
    print_key_value("Source", source_name);
    print_key_value("Fetched at", &snapshot.fetched_at.to_rfc3339());
    print_key_value("Tracks", &snapshot.tracks.len().to_string());

    let stats = match &snapshot.stats {
        Some(stats) => stats,
        None => {
            print_empty_list("No tracks returned, nothing to aggregate");
            return;
        }
    };

    print_key_value(
        "Average duration",
        &format_duration(stats.avg_duration_seconds),
    );
    print_key_value(
        "Explicit",
        &format!("{} ({}%)", stats.explicit_count, stats.explicit_percent),
    );

    print_section_header("Top artists");
    let mut artists = TableBuilder::new(vec!["#", "Artist", "Tracks", "Avg popularity"]);
    for (i, artist) in stats.top_artists.iter().enumerate() {
        artists.add_row(vec![
            (i + 1).to_string(),
            artist.name.clone(),
            artist.track_count.to_string(),
            artist.avg_popularity.to_string(),
        ]);
    }
    artists.print();

    print_section_header("Decades");
    if stats.decade_histogram.is_empty() {
        print_empty_list("No release dates available");
        return;
    }
    let mut decades = TableBuilder::new(vec!["Decade", "Tracks"]);
    for (decade, count) in &stats.decade_histogram {
        decades.add_row(vec![format!("{}s", decade), count.to_string()]);
    }
    decades.print();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Logs go to stderr so that --json output stays machine readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let cli_config = CliConfig {
        source: cli_args.source,
        data_dir: cli_args.data_dir,
        deezer_base_url: cli_args.deezer_base_url,
        page_size: cli_args.limit,
        request_timeout_sec: cli_args.request_timeout_sec,
        ..default_cli_config()
    };
    let config = AppConfig::resolve(&cli_config, None).context("Invalid arguments")?;
    let source = config.source.build()?;

    let query = resolve_query(&cli_args.term);
    let snapshot = match run_etl(source.as_ref(), query, config.source.page_size()).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            if !cli_args.json {
                print_error(&format!("ETL for '{}' failed: {}", query, err));
            }
            return Err(err).with_context(|| format!("ETL for '{}' failed", query));
        }
    };

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot, source.name());
        println!();
        print_success(&format!("Processed {} tracks", snapshot.tracks.len()));
    }

    Ok(())
}
