//! shear: minify an HTML document from the command line.
//!
//! Reads a file, an inline string, or stdin, and writes the minified document
//! to a file or stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use shear_common::warning::clear_warnings;
use shear_minify::{Minifier, Options};

/// shear: error-tolerant HTML minifier
#[derive(Parser, Debug)]
#[command(name = "shear")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Minify a file to stdout
    shear index.html

    # Minify stdin, collapsing whitespace
    cat index.html | shear --collapse-whitespace

    # Use a JSON options file and write the result
    shear --config shear.json -o index.min.html index.html

    # Minify an inline string and report the savings
    shear --stats --html '<p>  hello  </p>'
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// HTML file to minify (stdin when absent)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Minify this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// JSON file with minifier options (camelCase keys)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Collapse whitespace runs in text
    #[arg(long)]
    collapse_whitespace: bool,

    /// Drop end tags the parser can infer
    #[arg(long)]
    remove_optional_tags: bool,

    /// Drop `<% %>` and `<? ?>` blocks
    #[arg(long)]
    remove_ignored: bool,

    /// Keep ordinary comments
    #[arg(long)]
    keep_comments: bool,

    /// Treat the input as HTML4 (inline elements close before blocks)
    #[arg(long)]
    html4: bool,

    /// Lowercase tag and attribute names
    #[arg(long)]
    lowercase: bool,

    /// Leave `<style>` bodies alone
    #[arg(long)]
    no_cssmin: bool,

    /// Leave `<script>` bodies alone
    #[arg(long)]
    no_jsmin: bool,

    /// Leave attribute values as written (`style`, `on*`, `class`)
    #[arg(long)]
    no_clean_attributes: bool,

    /// Rewrite the doctype to `<!DOCTYPE html>`
    #[arg(long)]
    short_doctype: bool,

    /// Print the size reduction to stderr
    #[arg(long)]
    stats: bool,
}

impl Cli {
    /// Options from the config file, then the flags on top.
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Options::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Options::default(),
        };

        if self.collapse_whitespace {
            options.collapse_whitespace = true;
        }
        if self.remove_optional_tags {
            options.remove_optional_tags = true;
        }
        if self.remove_ignored {
            options.remove_ignored = true;
        }
        if self.keep_comments {
            options.remove_comments = false;
        }
        if self.html4 {
            options.html5 = false;
        }
        if self.lowercase {
            options.case_sensitive = false;
        }
        if self.no_cssmin {
            options.cssmin = false;
        }
        if self.no_jsmin {
            options.jsmin = false;
        }
        if self.no_clean_attributes {
            options.clean_attributes = false;
        }
        if self.short_doctype {
            options.use_short_doctype = true;
        }
        Ok(options)
    }

    fn read_input(&self) -> Result<String> {
        if let Some(html) = &self.html {
            return Ok(html.clone());
        }
        if let Some(path) = &self.path {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let mut input = String::new();
        let _ = io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    }

    fn source_name(&self) -> String {
        if self.html.is_some() {
            "--html".to_string()
        } else {
            self.path
                .as_ref()
                .map_or_else(|| "stdin".to_string(), |path| path.display().to_string())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let options = cli.options()?;
    let input = cli.read_input()?;
    let output = Minifier::new(options)
        .run(&input)
        .with_context(|| format!("failed to minify {}", cli.source_name()))?;

    match &cli.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write stdout")?,
    }

    if cli.stats {
        print_stats(input.len(), output.len());
    }
    Ok(())
}

/// `1234 -> 987 bytes (20.0% smaller)` on stderr.
fn print_stats(before: usize, after: usize) {
    #[allow(clippy::cast_precision_loss)]
    let saved = if before == 0 {
        0.0
    } else {
        (before.saturating_sub(after)) as f64 * 100.0 / before as f64
    };
    eprintln!(
        "{} {} -> {} bytes ({} smaller)",
        "shear".bold(),
        before,
        after.green(),
        format!("{saved:.1}%").green().bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_for(args: &[&str]) -> Options {
        let cli = Cli::try_parse_from(std::iter::once("shear").chain(args.iter().copied()))
            .expect("arguments should parse");
        cli.options().expect("options should build")
    }

    #[test]
    fn test_body_flags_leave_attributes_to_cleanup() {
        let options = options_for(&["--no-cssmin", "--no-jsmin"]);
        assert!(!options.cssmin);
        assert!(!options.jsmin);
        assert!(options.clean_attributes);
    }

    #[test]
    fn test_no_clean_attributes() {
        let options = options_for(&["--no-clean-attributes"]);
        assert!(!options.clean_attributes);
        assert!(options.cssmin);
        assert!(options.jsmin);
    }
}
