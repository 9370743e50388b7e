use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use turkic_analyzer_lib::{output, Analyzer, AnalyzerConfig};

#[derive(Parser)]
#[command(name = "turkic-analyzer", about = "Turkic morphological analyser")]
struct Cli {
    /// Text to analyse. If omitted, reads from stdin.
    input: Option<String>,

    /// Language code (default: $TURKIC_LANGUAGE or "tat").
    #[arg(short, long)]
    language: Option<String>,

    /// Directory holding lexicon_<language>.{json,xml}.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Lexicon file to load instead of looking in the data directory.
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Analyse the first two words of each line as a known pair.
    #[arg(long)]
    pair: bool,

    /// Output in bracketed {value:tag} format.
    #[arg(long)]
    bracketed: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log per-word results to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::from_env();
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(path) = &self.lexicon {
            config.lexicon_path = Some(path.clone());
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    let analyzer = Analyzer::open(&config)
        .with_context(|| format!("failed to open lexicon for language {}", config.language))?;

    match cli.input {
        Some(ref text) => process_line(text, &analyzer, &cli)?,
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read stdin")?;
                if !line.trim().is_empty() {
                    process_line(&line, &analyzer, &cli)?;
                }
            }
        }
    }

    Ok(())
}

fn process_line(line: &str, analyzer: &Analyzer, cli: &Cli) -> Result<()> {
    tracing::debug!(line, pair = cli.pair, "processing line");
    if cli.pair {
        let tokens = analyzer.alphabet().tokenize(line);
        let Some(word) = tokens.first() else {
            return Ok(());
        };
        let analysis = analyzer.analyze_pair(word, tokens.get(1).map(String::as_str))?;
        if analysis.is_none() {
            tracing::info!(word = %word, "no analysis");
        }
        if cli.bracketed {
            println!("{}", output::analysis_to_bracketed(analysis.as_deref()));
        } else {
            print_json(&analysis, cli.pretty)?;
        }
        return Ok(());
    }

    if cli.bracketed {
        for parse in analyzer.analyze_text(line) {
            let parse = parse?;
            println!(
                "{}\t{}",
                parse.word,
                output::analysis_to_bracketed(parse.analysis.as_deref())
            );
        }
    } else {
        let parse = analyzer.parse_sentence(line)?;
        print_json(&parse, cli.pretty)?;
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", json.context("JSON serialization failed")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_JSON: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../turkic-analyzer-lib/tests/fixtures/lexicon_demo.json"
    );

    #[test]
    fn test_flags_override_the_environment() {
        let cli = Cli::parse_from(["turkic-analyzer", "-l", "kaz", "--lexicon", DEMO_JSON]);
        let config = cli.config();
        assert_eq!(config.language, "kaz");
        assert_eq!(config.lexicon_path.as_deref(), Some(std::path::Path::new(DEMO_JSON)));
    }

    #[test]
    fn test_process_line_in_every_mode() {
        let config = Cli::parse_from(["turkic-analyzer", "--lexicon", DEMO_JSON]).config();
        let analyzer = Analyzer::open(&config).unwrap();
        for args in [
            vec!["turkic-analyzer"],
            vec!["turkic-analyzer", "--bracketed"],
            vec!["turkic-analyzer", "--pair"],
            vec!["turkic-analyzer", "--pair", "--bracketed"],
        ] {
            let cli = Cli::parse_from(args);
            process_line("bar ide", &analyzer, &cli).unwrap();
            process_line("zzz", &analyzer, &cli).unwrap();
        }
    }
}
