#[macro_use]
extern crate log;

use crate::config::Config;
use crate::scraper::Scraper;
use crate::snapshot::Sanitize;
use anyhow::{anyhow, Context, Result};
use getopts::Options;
use std::env;
use std::path::PathBuf;
use url::Url;

mod client;
mod config;
mod download;
mod error;
mod metadata;
mod models;
mod resolver;
mod scraper;
mod snapshot;
#[cfg(test)]
mod test_helpers;
mod xpath;

/// Parsed command line
#[derive(Debug)]
struct Args {
    url: Url,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    threads: Option<usize>,
    strict: bool,
    legacy_sanitize: bool,
}

fn options() -> Options {
    let mut opts = Options::new();
    // single dash long flags, `-url <URL>`
    opts.long_only(true);
    opts.optopt("", "url", "listing page of the sample gallery", "URL");
    opts.optopt("", "config", "toml config file", "FILE");
    opts.optopt("", "output", "root directory for archived galleries", "DIR");
    opts.optopt("", "threads", "thumbnail downloads in flight", "N");
    opts.optflag("", "strict", "check the payload against the gallery schema");
    opts.optflag("", "legacy-sanitize", "strip escapes instead of re-serializing json");
    opts.optflag("h", "help", "print this help");
    opts
}

/// `Ok(None)` when only help was asked for
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let matches = options().parse(args)?;
    if matches.opt_present("help") {
        return Ok(None);
    }
    let url = matches
        .opt_str("url")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("-url must be provided!"))?;
    let threads = match matches.opt_str("threads") {
        Some(n) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => return Err(anyhow!("-threads expects a positive number, got {:?}", n)),
        },
        None => None,
    };
    Ok(Some(Args {
        url: Url::parse(&url).with_context(|| format!("invalid -url {:?}", url))?,
        config: matches.opt_str("config").map(PathBuf::from),
        output: matches.opt_str("output").map(PathBuf::from),
        threads,
        strict: matches.opt_present("strict"),
        legacy_sanitize: matches.opt_present("legacy-sanitize"),
    }))
}

/// Config file first, then command line flags on top
fn load_config(args: &Args) -> Result<config::Scraper> {
    let mut config = match &args.config {
        Some(path) => Config::new(path).context("failed to load config")?,
        None => Config::default(),
    }
    .scraper;
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    config.strict |= args.strict;
    if args.legacy_sanitize {
        config.sanitize = Sanitize::Legacy;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    debug!("{:?}", config);
    let scraper = Scraper::new(config)?;
    let report = scraper
        .archive(&args.url)
        .await
        .with_context(|| format!("failed to archive {}", args.url))?;
    info!(
        "gallery {} archived to {}: {} snapshots, {} thumbnails",
        report.id,
        report.dir.display(),
        report.snapshots.len(),
        report.thumbnails
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv = env::args().collect::<Vec<_>>();
    let program = argv.first().map(String::as_str).unwrap_or("dpreview-scraper");
    let brief = format!("Usage: {} -url URL [options]", program);

    let args = match parse_args(&argv[1.min(argv.len())..]) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", options().usage(&brief));
            return;
        }
        Err(e) => {
            error!("{}", e);
            eprint!("{}", options().usage(&brief));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn single_dash_url() {
        let parsed = parse_args(&args("-url https://www.dpreview.com/sample-galleries/coastal-trip"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.url.path(), "/sample-galleries/coastal-trip");
        assert!(!parsed.strict);
        assert_eq!(parsed.threads, None);
    }

    #[test]
    fn url_is_required() {
        assert!(parse_args(&args("-threads 4")).is_err());
        assert!(parse_args(&args("-url")).is_err());
        assert!(parse_args(&args("-url not-a-url")).is_err());
    }

    #[test]
    fn help_needs_no_url() {
        assert!(parse_args(&args("-help")).unwrap().is_none());
    }

    #[test]
    fn flags_override_config() {
        let parsed = parse_args(&args(
            "--url https://x/sample-galleries/g -output /tmp/out -threads 3 -strict -legacy-sanitize",
        ))
        .unwrap()
        .unwrap();
        let config = load_config(&parsed).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.threads, 3);
        assert!(config.strict);
        assert_eq!(config.sanitize, Sanitize::Legacy);
        assert_eq!(config.user_agent, client::DEFAULT_USER_AGENT);
    }

    #[test]
    fn rejects_zero_threads() {
        assert!(parse_args(&args("-url https://x/g -threads 0")).is_err());
    }

    #[test]
    fn config_file_then_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scraper.toml");
        std::fs::write(&path, "[scraper]\nthreads = 6\noutput_dir = \"archive\"\n").unwrap();
        let parsed = parse_args(&args(&format!(
            "-url https://x/g -config {} -output elsewhere",
            path.display()
        )))
        .unwrap()
        .unwrap();
        let config = load_config(&parsed).unwrap();
        assert_eq!(config.threads, 6);
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
    }
}
