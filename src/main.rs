use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Parser;
use itertools::Itertools;

use lexpat::{Category, Pattern, Source};

/// Scan text for lexical patterns and print the matched spans.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to scan (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Find delimited string literals, e.g. --strings '"'
    #[arg(long, value_name = "DELIM")]
    strings: Option<String>,

    /// Escape introducer for --strings, e.g. --escape '\'
    #[arg(long, value_name = "ESC", requires = "strings")]
    escape: Option<String>,

    /// Find line comments introduced by this delimiter
    #[arg(long, value_name = "DELIM")]
    line_comment: Option<String>,

    /// Find nestable block comments, e.g. --block-comment '/*' '*/'
    #[arg(long, num_args = 2, value_names = ["OPEN", "CLOSE"])]
    block_comment: Option<Vec<String>>,

    /// Find runs of a character class (letter, digit, punctuation, ...)
    #[arg(long, value_name = "CLASS")]
    class: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let text = read_input(&args)?;
    let pattern = build_pattern(&args)?;

    let src = Source::new(&text);
    let mut pos = 0;
    while let Some(m) = pattern.find(&src, pos) {
        println!("{}..{}: {}", m.start, m.end, src.text(m.start, m.end));
        // A zero-width match must not stall the scan.
        pos = if m.end > m.start { m.end } else { m.end + 1 };
    }
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    match &args.file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}")),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn build_pattern(args: &Args) -> Result<Pattern> {
    if let Some(delim) = &args.strings {
        return Ok(match &args.escape {
            Some(esc) => Pattern::string_literal_escaped(delim, esc),
            None => Pattern::string_literal(delim),
        });
    }
    if let Some(delim) = &args.line_comment {
        return Ok(Pattern::line_comment(delim));
    }
    if let Some(pair) = &args.block_comment {
        return Ok(Pattern::block_comment(&pair[0], &pair[1]));
    }
    if let Some(name) = &args.class {
        let Some(cat) = Category::from_name(name) else {
            bail!(
                "unknown class '{}'; expected one of: {}",
                name,
                Category::names().join(", ")
            );
        };
        return Ok(Pattern::category(cat).many());
    }
    bail!("nothing to scan for; pass --strings, --line-comment, --block-comment or --class");
}
