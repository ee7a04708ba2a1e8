//! Sieve command-line scraper
//!
//! Run with: cargo run --bin sieve -- page.html --class courselist-c
//!
//! Parses a page with the quirk-tolerant subset parser and prints either the
//! whole tree or the elements carrying a class, as an indented tree or JSON.

mod rules;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sieve_common::warning::set_warnings_enabled;
use sieve_dom::{Node, print_tree};
use sieve_html::{ParserConfig, SuppressionRule};
use sieve_scrape::{InlineSource, InputProvider, Scraper, source_for};

use rules::{parse_collapse, parse_skip};

/// Sieve: pull class-tagged sections out of loosely-formed HTML
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the whole tree
    sieve ./page.html

    # Print every element with a class
    sieve ./page.html --class courselist-c

    # Only the first match, as JSON
    sieve https://example.com --class title --first --json

    # Parse inline HTML
    sieve --html '<div class="a">x</div>' --class a

    # Skip the first two infolist tables, collapse repeated summaries
    sieve ./page.html --reference-rules

    # Custom rules
    sieve ./page.html --skip nav-body=table:1 --collapse 'text-align:right;'
"#)]
struct Cli {
    /// Path to HTML file or URL to scrape
    #[arg(value_name = "FILE|URL", required_unless_present = "html")]
    path: Option<String>,

    /// Parse HTML string directly instead of file/URL
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the elements whose class list contains NAME
    #[arg(short, long, value_name = "NAME")]
    class: Option<String>,

    /// Print only the first matching element
    #[arg(long, requires = "class")]
    first: bool,

    /// Print JSON instead of an indented tree
    #[arg(long)]
    json: bool,

    /// Load suppression rules from a JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "reference_rules")]
    rules: Option<PathBuf>,

    /// Use the built-in course-list rule set
    #[arg(long)]
    reference_rules: bool,

    /// Skip elements carrying VALUE up to the next </ANCHOR>, at most N times
    ///
    /// A trailing `:` followed only by digits is always read as N.
    #[arg(long, value_name = "VALUE=ANCHOR[:N]", value_parser = parse_skip)]
    skip: Vec<SuppressionRule>,

    /// Collapse every element carrying VALUE after the first, at most N times
    ///
    /// A trailing `:` followed only by digits is always read as N, so a VALUE
    /// ending in `:digits` needs an explicit count, as in `margin-top:5:1`.
    #[arg(long, value_name = "VALUE[:N]", value_parser = parse_collapse)]
    collapse: Vec<SuppressionRule>,

    /// Do not print recovery warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_warnings_enabled(!cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", format!("error: {error:#}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let scraper = Scraper::new(build_config(cli)?);
    let source = input_source(cli)?;
    let document = scraper.load(source.as_ref())?;

    let Some(class_name) = cli.class.as_deref() else {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&document)?);
        } else {
            print!("{document}");
        }
        return Ok(());
    };

    let matches: Vec<&Node> = if cli.first {
        match Scraper::extract_first(&document, class_name) {
            Some(node) => vec![node],
            None => bail!("no element with class '{class_name}' in {}", source.describe()),
        }
    } else {
        Scraper::extract(&document, class_name)
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for node in matches {
            print_tree(node, 0);
        }
    }
    Ok(())
}

/// Rules file or built-in set first, then `--skip` and `--collapse` in
/// command-line order.
fn build_config(cli: &Cli) -> Result<ParserConfig> {
    let mut config = if let Some(ref path) = cli.rules {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read rules '{}'", path.display()))?;
        serde_json::from_str::<ParserConfig>(&text)
            .with_context(|| format!("invalid rules file '{}'", path.display()))?
    } else if cli.reference_rules {
        ParserConfig::reference()
    } else {
        ParserConfig::new()
    };

    config.rules.extend(cli.skip.iter().cloned());
    config.rules.extend(cli.collapse.iter().cloned());
    Ok(config)
}

/// Load source from CLI arguments
fn input_source(cli: &Cli) -> Result<Box<dyn InputProvider>> {
    if let Some(ref html) = cli.html {
        Ok(Box::new(InlineSource::labelled("--html", html.as_str())))
    } else if let Some(ref path) = cli.path {
        Ok(source_for(path))
    } else {
        bail!("no input: pass a FILE|URL or --html")
    }
}
