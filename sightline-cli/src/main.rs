//! Sightline command line
//!
//! Scans HTML email bodies for text a reader can't see.
//!
//! - sightline mails/ -o out/          # one JSONL file per document
//! - sightline --html '<p>...</p>'     # analyze an inline string

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use owo_colors::OwoColorize;
use sightline_cli::{BatchOptions, BatchRunner, BatchSummary, Ledger};
use sightline_detect::{DetectionConfig, DocumentAnalyzer, build_tree};
use sightline_html::print_tree;

/// Sightline: hidden-text detector for HTML email
#[derive(Parser, Debug)]
#[command(name = "sightline")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Scan a directory, writing records next to each other under out/
    sightline ./mails -o ./out

    # Also copy flagged documents and their records aside
    sightline ./mails -o ./out --flagged-dir ./flagged

    # Analyze an inline string and print the pruned tree
    sightline --dump-tree --html '<p style="color:#fff">hi</p>'

    # Use custom thresholds
    sightline ./mails --config sightline.toml
"#)]
struct Cli {
    /// HTML files or directories to scan (directories are searched for *.html and *.htm)
    #[arg(value_name = "PATH")]
    inputs: Vec<PathBuf>,

    /// Analyze an HTML string directly instead of files
    #[arg(long, value_name = "HTML", conflicts_with = "inputs")]
    html: Option<String>,

    /// Directory for per-document JSONL output (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Copy documents with hidden text and their records here
    #[arg(long, value_name = "DIR")]
    flagged_dir: Option<PathBuf>,

    /// Ledger of processed documents, used to resume a batch
    #[arg(long, value_name = "FILE", default_value = "sightline_ledger.txt")]
    ledger: PathBuf,

    /// Print the pruned DOM tree before the records
    #[arg(long)]
    dump_tree: bool,

    /// Detection thresholds (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = match &cli.config {
        Some(path) => DetectionConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DetectionConfig::default(),
    };
    let analyzer = DocumentAnalyzer::new(config);

    if let Some(html) = &cli.html {
        return analyze_inline(&analyzer, html, cli.dump_tree);
    }
    if cli.inputs.is_empty() {
        bail!("no input paths given (try --help)");
    }

    let ledger = Ledger::open(&cli.ledger)
        .with_context(|| format!("opening ledger {}", cli.ledger.display()))?;
    let options = BatchOptions {
        output_dir: cli.output_dir.clone(),
        flagged_dir: cli.flagged_dir.clone(),
        dump_tree: cli.dump_tree,
    };
    let mut runner = BatchRunner::new(analyzer, options, ledger);

    let stdout = io::stdout();
    let summary = runner.run(&cli.inputs, &mut stdout.lock());
    print_summary(&summary);

    if summary.failed > 0 && summary.failed == summary.total() {
        bail!("every document failed");
    }
    Ok(())
}

fn analyze_inline(analyzer: &DocumentAnalyzer, html: &str, dump_tree: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if dump_tree {
        let tree = build_tree(html);
        let mut rendered = String::new();
        print_tree(&tree, tree.root(), 0, &mut rendered)?;
        writeln!(stdout, "=== DOM Tree ===\n{rendered}")?;
    }

    let report = analyzer.analyze_html(html);
    stdout.write_all(report.to_jsonl()?.as_bytes())?;

    if report.all_visible {
        eprintln!("{}", "all text visible".green());
    } else {
        eprintln!(
            "{} {} hidden",
            "found invisible text:".red().bold(),
            report.hidden().count()
        );
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    eprintln!(
        "{} {} visible, {} flagged, {} skipped, {} failed",
        "Summary:".bold(),
        summary.visible.green(),
        summary.flagged.red(),
        summary.skipped.dimmed(),
        summary.failed.yellow()
    );
}
