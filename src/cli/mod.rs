//! Command line entry point.
//!
//! Prints one Alfred script filter document to stdout per invocation.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::alfred::{self, RenderOptions};
use crate::config::Config;
use crate::services::dataset::Dataset;
use crate::services::{emoji, icons};

#[derive(Parser, Debug)]
#[command(name = "emoji-search")]
#[command(about = "Search emoji by name, tag or shortcode", long_about = None)]
pub struct Cli {
    /// Search text; omit to list popular emoji
    pub query: Option<String>,

    /// Config file (default: <config dir>/emoji-search/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// emojibase data.json to search instead of the bundled set
    #[arg(long, value_name = "PATH", requires = "shortcodes")]
    pub data: Option<String>,

    /// Shortcode table (hexcode -> names) joined onto --data
    #[arg(long, value_name = "PATH", requires = "data")]
    pub shortcodes: Option<String>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Log debug output to stderr
    #[arg(long)]
    pub debug: bool,

    /// Write SVG icons and icon-index.json to this directory, then exit
    #[arg(long, value_name = "OUT_DIR")]
    pub generate_icons: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective config: file first, flags on top.
    pub fn config(&self) -> Config {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };

        if self.data.is_some() {
            config.dataset.data_path = self.data.clone();
            config.dataset.shortcodes_path = self.shortcodes.clone();
        }
        if self.compact {
            config.output.pretty = false;
        }
        config
    }
}

/// Install the stderr log subscriber. stdout carries the result document.
pub fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}

/// Run one invocation, writing output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.config();
    let dataset = Dataset::from_config(&config.dataset).context("Failed to load emoji data")?;

    if let Some(dir) = &cli.generate_icons {
        let report = icons::generate(dataset.emojis(), dir)
            .with_context(|| format!("Failed to generate icons in {}", dir.display()))?;
        writeln!(out, "Generated {} emoji icons in {}", report.generated, dir.display())?;
        return Ok(());
    }

    let query = cli.query.as_deref().unwrap_or("");
    let matches = emoji::search_with(dataset.emojis(), query, &config.search.limits());
    let options = RenderOptions {
        icons_dir: config.output.icons_dir.clone(),
    };
    let result = alfred::render(&matches, query, &options);

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alfred::AlfredResult;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("config.toml");
        let mut argv = vec!["emoji-search", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn items(args: &[&str]) -> AlfredResult {
        serde_json::from_str(&run_args(args).unwrap()).unwrap()
    }

    #[test]
    fn test_query_argument() {
        let result = items(&["like"]);
        assert_eq!(result.items[0].uid.as_deref(), Some("1F44D"));
    }

    #[test]
    fn test_missing_query_lists_popular() {
        let result = items(&[]);
        assert_eq!(result.items.len(), emoji::FALLBACK_RESULTS);
        assert!(result.items.iter().all(|i| i.valid == Some(true)));
    }

    #[test]
    fn test_no_match() {
        let result = items(&["xyznonsensequery123"]);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].valid, Some(false));
    }

    #[test]
    fn test_compact_output_is_one_line() {
        let out = run_args(&["--compact", "cat"]).unwrap();
        assert_eq!(out.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_data_requires_shortcodes() {
        assert!(Cli::try_parse_from(["emoji-search", "--data", "x.json"]).is_err());
    }

    #[test]
    fn test_missing_dataset_is_an_error() {
        let err = run_args(&[
            "--data",
            "/nonexistent/data.json",
            "--shortcodes",
            "/nonexistent/github.json",
            "x",
        ])
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load emoji data"));
    }

    #[test]
    fn test_generate_icons() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_args(&["--generate-icons", dir.path().to_str().unwrap()]).unwrap();
        assert!(out.starts_with("Generated "));
        assert!(dir.path().join(icons::INDEX_FILE).exists());
    }

    #[test]
    fn test_rendered_icon_paths_point_at_generated_files() {
        let assets = tempfile::tempdir().unwrap();
        let assets_dir = assets.path().to_str().unwrap();
        run_args(&["--generate-icons", assets_dir]).unwrap();

        let config_dir = tempfile::tempdir().unwrap();
        let config_path = config_dir.path().join("config.toml");
        let mut config = Config::default();
        config.output.icons_dir = Some(assets_dir.to_string());
        config.save(&config_path).unwrap();

        let cli = Cli::try_parse_from([
            "emoji-search",
            "--config",
            config_path.to_str().unwrap(),
            "thumbsup",
        ])
        .unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        let result: AlfredResult = serde_json::from_slice(&out).unwrap();

        let path = result.items[0].icon.as_ref().and_then(|i| i.path.clone()).unwrap();
        assert!(std::path::Path::new(&path).exists(), "missing icon {}", path);
    }
}
