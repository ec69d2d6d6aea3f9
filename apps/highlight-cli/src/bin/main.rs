use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use highlight_core::config::Config;
use highlight_engine::{FieldOptions, HighlightContext, HighlightedField, Highlighter};
use highlight_text::{Analysis, AnalyzedFieldLoader, QueryBuilder, STEMMED_FIELD, TEXT_FIELD};

const USAGE: &str = "Usage: highlight <query> <path> [--fragmenter scan|sentence|none] [--fragments N] [--order score|source] [--no-match N] [--json]";

#[derive(Debug, Default)]
struct Args {
    query: String,
    path: PathBuf,
    fragmenter: Option<String>,
    fragments: Option<usize>,
    score_ordered: Option<bool>,
    no_match: Option<usize>,
    json: bool,
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next().with_context(|| format!("missing value for {flag}"))
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = env::args().skip(1);
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fragmenter" => parsed.fragmenter = Some(value(&mut args, &arg)?),
            "--fragments" => parsed.fragments = Some(value(&mut args, &arg)?.parse().context("--fragments takes a number")?),
            "--order" => {
                parsed.score_ordered = Some(match value(&mut args, &arg)?.as_str() {
                    "score" => true,
                    "source" => false,
                    other => bail!("unknown order: {other}"),
                })
            }
            "--no-match" => parsed.no_match = Some(value(&mut args, &arg)?.parse().context("--no-match takes a number")?),
            "--json" => parsed.json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            _ => positional.push(arg),
        }
    }
    let [query, path]: [String; 2] = positional.try_into().map_err(|_| anyhow::anyhow!("expected <query> and <path>"))?;
    parsed.query = query;
    parsed.path = PathBuf::from(path);
    Ok(parsed)
}

fn field_options(config: &Config, args: &Args) -> anyhow::Result<FieldOptions> {
    let mut options = FieldOptions::from_config(config)?;
    if options.matched_fields.is_none() {
        options.matched_fields = Some(vec![TEXT_FIELD.to_string(), STEMMED_FIELD.to_string()]);
    }
    if let Some(fragmenter) = &args.fragmenter {
        options.segmenter.fragmenter = Some(fragmenter.clone());
    }
    if let Some(n) = args.fragments {
        options.number_of_fragments = n;
    }
    if let Some(score_ordered) = args.score_ordered {
        options.score_ordered = score_ordered;
    }
    if let Some(n) = args.no_match {
        options.no_match_size = n;
    }
    // Bad segmenter settings should fail before any file is read.
    options.segmenter.build()?;
    Ok(options)
}

#[derive(Serialize)]
struct Line<'a> {
    path: &'a Path,
    #[serde(flatten)]
    highlighted: &'a HighlightedField,
}

fn print(path: &Path, highlighted: &HighlightedField, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&Line { path, highlighted })?);
    } else {
        println!("{}:", path.display());
        for fragment in &highlighted.fragments {
            println!("  {}", fragment);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args().map_err(|e| {
        eprintln!("{USAGE}");
        e
    })?;
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let options = field_options(&config, &args)?;

    let analysis = Analysis::default();
    let query = QueryBuilder::new(&analysis, [TEXT_FIELD, STEMMED_FIELD]).build(&args.query)?;
    let context = HighlightContext::new(query);

    let mut files = 0usize;
    let mut highlighted = 0usize;
    let entries = WalkDir::new(&args.path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"));
    for entry in entries {
        files += 1;
        let text = match fs::read_to_string(entry.path()) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        let field = analysis.field(TEXT_FIELD, Some(&text))?;
        let loader = AnalyzedFieldLoader::new(&analysis, &text);
        let Some(result) = Highlighter.highlight(&context, &options, Box::new(field), &loader)? else {
            debug!(path = %entry.path().display(), "nothing to show");
            continue;
        };
        highlighted += 1;
        print(entry.path(), &result, args.json)?;
    }
    info!(files, highlighted, "done");
    Ok(())
}
