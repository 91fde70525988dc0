//! linetint - colorize source files on the terminal
//!
//! A small host around the line-colorization engine: detects the
//! language, threads lexical state line to line, and renders each line
//! with ANSI styling.

use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use linetint::config::Config;
use linetint::error::{Result, TintError};
use linetint::render::{self, Theme};
use linetint::syntax::{Grammar, LineState, SyntaxManager};

struct Options {
    files: Vec<PathBuf>,
    language: Option<String>,
    config: Option<PathBuf>,
    line_numbers: bool,
    list_languages: bool,
}

fn main() {
    match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => {
            if let Err(e) = run(&options) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'linetint --help'");
            process::exit(2);
        }
    }
}

/// Parse command line arguments. `Ok(None)` means help/version was
/// printed and there is nothing left to do.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        files: Vec::new(),
        language: None,
        config: None,
        line_numbers: false,
        list_languages: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--list-languages" => options.list_languages = true,
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--language" | "-l" => {
                let name = args
                    .next()
                    .ok_or_else(|| TintError::Usage(format!("{arg} needs a value")))?;
                options.language = Some(name);
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| TintError::Usage(format!("{arg} needs a value")))?;
                options.config = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => {
                return Err(TintError::Usage(format!("unknown option: {other}")));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    if !options.list_languages && options.files.is_empty() {
        return Err(TintError::Usage("no input files".to_string()));
    }
    Ok(Some(options))
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let mut manager = SyntaxManager::new();
    manager.apply_config(&config);

    let mut theme = Theme::new();
    for (token, style) in &config.styles {
        theme.set(*token, *style);
    }

    if options.list_languages {
        for name in manager.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in &options.files {
        colorize_file(&manager, &theme, &config, options, path, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn colorize_file<W: Write>(
    manager: &SyntaxManager,
    theme: &Theme,
    config: &Config,
    options: &Options,
    path: &Path,
    out: &mut W,
) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let grammar = pick_grammar(manager, options, path, &text)?;

    let line_count = text.lines().count();
    let gutter_width = line_count.max(1).to_string().len();
    let line_numbers = options.line_numbers || config.line_numbers;

    let mut state = LineState::Normal;
    for (idx, line) in text.lines().enumerate() {
        if line_numbers {
            render::render_gutter(out, idx + 1, gutter_width)?;
        }
        match grammar {
            Some(grammar) => {
                let result = grammar.colorize_line(line, state);
                state = result.end_state;
                render::render_line(out, line, &result.spans, theme, config.tab_width)?;
            }
            None => render::render_line(out, line, &[], theme, config.tab_width)?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Choose the grammar for a file: an explicit override, then the
/// extension map, then the shebang line. No match means plain output.
fn pick_grammar<'a>(
    manager: &'a SyntaxManager,
    options: &Options,
    path: &Path,
    text: &str,
) -> Result<Option<&'a Grammar>> {
    if let Some(name) = &options.language {
        let grammar = manager
            .get_language(name)
            .ok_or_else(|| TintError::UnknownLanguage(name.clone()))?;
        return Ok(Some(grammar));
    }
    let name = manager
        .detect_language(path)
        .or_else(|| text.lines().next().and_then(|l| manager.detect_shebang(l)));
    Ok(name.and_then(|n| manager.get_language(n)))
}

fn print_usage() {
    println!(
        "linetint {} - colorize source files on the terminal",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: linetint [OPTIONS] FILE...");
    println!();
    println!("Options:");
    println!("  -l, --language NAME  Force a language instead of detecting it");
    println!("  -n, --line-numbers   Show a line-number gutter");
    println!("      --config PATH    Use PATH instead of ~/.linetint.toml");
    println!("      --list-languages List supported languages");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Language is detected from the file extension, then from a");
    println!("shebang line. Files with no detected language print plain.");
}

fn print_version() {
    println!("linetint {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Options>> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_files_and_flags() {
        let options = parse(&["-n", "-l", "Lua", "a.lua", "b.lua"])
            .unwrap()
            .unwrap();
        assert!(options.line_numbers);
        assert_eq!(options.language.as_deref(), Some("Lua"));
        assert_eq!(options.files.len(), 2);
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(parse(&["--frobnicate", "a.lua"]).is_err());
    }

    #[test]
    fn test_parse_needs_files() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--list-languages"]).unwrap().unwrap().list_languages);
    }

    #[test]
    fn test_missing_option_value() {
        assert!(parse(&["-l"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }
}
