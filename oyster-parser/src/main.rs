use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use oyster_parser::export::{OutputFormat, sort_by_date_desc, write_records};
use oyster_parser::statement::{ParserConfig, parse_statement};

/// Convert text extracted from Oyster PDF statements into a journey table.
///
/// Input files are the plain-text output of a PDF extractor such as
/// `pdftotext`.
#[derive(Debug, Parser)]
#[command(name = "oyster-parser", about, version)]
struct Cli {
    /// Extracted statement text to parse (repeatable)
    #[arg(long, value_name = "FILE")]
    file: Vec<PathBuf>,

    /// Directory to search for extracted statements (*.txt)
    #[arg(long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Where to write the journey table ('-' for stdout)
    #[arg(long, value_name = "PATH", default_value = "journeys.csv")]
    output: PathBuf,

    /// Output format. Default: inferred from the output extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// JSON file overriding the ignorable line prefixes
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ParserConfig::default(),
    };

    let filenames = input_files(&cli)?;

    let mut journeys = Vec::new();
    for filename in &filenames {
        info!(file = %filename.display(), "processing");
        let text = std::fs::read_to_string(filename)
            .with_context(|| format!("reading {}", filename.display()))?;
        let parsed = parse_statement(&text, &config)
            .with_context(|| format!("parsing {}", filename.display()))?;
        journeys.extend(parsed);
    }

    sort_by_date_desc(&mut journeys);

    let format = cli
        .format
        .map(OutputFormat::from)
        .unwrap_or_else(|| OutputFormat::from_path(&cli.output));

    if cli.output.as_os_str() == "-" {
        let stdout = io::stdout();
        write_records(&journeys, format, stdout.lock()).context("writing to stdout")?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("creating {}", cli.output.display()))?;
        let mut writer = BufWriter::new(file);
        write_records(&journeys, format, &mut writer)
            .with_context(|| format!("writing {}", cli.output.display()))?;
        writer.flush()?;
    }

    info!(
        rows = journeys.len(),
        output = %cli.output.display(),
        "wrote journeys"
    );

    Ok(())
}

/// Collect the files named on the command line, then the directory's
/// `*.txt` files sorted by name.
fn input_files(cli: &Cli) -> Result<Vec<PathBuf>> {
    let mut filenames = cli.file.clone();

    if let Some(dir) = &cli.directory {
        let mut found = Vec::new();
        for entry in
            std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?
        {
            let path = entry?.path();
            let is_txt = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
            if path.is_file() && is_txt {
                found.push(path);
            }
        }
        found.sort();
        filenames.extend(found);
    }

    if filenames.is_empty() {
        bail!("no input: pass --file or --directory");
    }

    Ok(filenames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("oyster-parser").chain(args.iter().copied()))
    }

    #[test]
    fn directory_txt_files_sorted_after_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.pdf", "d.TXT"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let dir_arg = dir.path().to_str().unwrap();
        let files = input_files(&cli(&["--file", "first.txt", "--directory", dir_arg])).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("first.txt"),
                dir.path().join("a.txt"),
                dir.path().join("b.txt"),
                dir.path().join("d.TXT"),
            ]
        );
    }

    #[test]
    fn no_input_is_an_error() {
        assert!(input_files(&cli(&[])).is_err());
    }

    #[test]
    fn format_flag() {
        let parsed = cli(&["--file", "x.txt", "--format", "json"]);
        assert!(matches!(parsed.format, Some(FormatArg::Json)));
        assert_eq!(parsed.output, PathBuf::from("journeys.csv"));
    }
}
