//! CLI argument definitions for `donor-table`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use donor_export::DateLocale;

#[derive(Parser)]
#[command(
    name = "donor-table",
    version,
    about = "Search, filter, sort and export donor tables",
    long_about = "Search, filter, sort and export donor and donation tables.\n\n\
                  Records are read from JSON or CSV files; the table layout \
                  (columns, types, toggles) comes from a TOML or JSON configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow donor values and search terms to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current view of a table.
    Query(QueryArgs),

    /// Export the table (or the current view) as delimited text.
    Export(ExportArgs),

    /// List the configured columns and table toggles.
    Columns(ColumnsArgs),
}

/// Where the records and the table layout come from.
#[derive(Args)]
pub struct SourceArgs {
    /// Records file (.json array of objects or .csv with a header row).
    #[arg(long = "records", value_name = "FILE")]
    pub records: PathBuf,

    /// Table configuration (.toml or .json).
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,
}

/// Search, filter and sort flags shared by `query` and `export`.
#[derive(Args, Default)]
pub struct ViewArgs {
    /// Free-text search across all columns.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Per-column substring filter; repeat for several columns.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter_arg)]
    pub filters: Vec<FilterArg>,

    /// Column key to sort by.
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Page to print (1-based).
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (0 prints every row).
    #[arg(long = "page-size", value_name = "N", default_value_t = 25)]
    pub page_size: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Export every record, ignoring search, filters and sort.
    #[arg(long = "all")]
    pub all: bool,

    /// Output file, or a directory to receive `<records>-YYYY-MM-DD.csv`
    /// (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Field delimiter, a single ASCII character or `tab`.
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter
    )]
    pub delimiter: u8,

    /// Quote fields containing delimiters, quotes or line breaks (RFC 4180).
    #[arg(long = "quote")]
    pub quote: bool,

    /// Date layout for date columns (en-US, en-GB, he-IL, iso).
    #[arg(long = "locale", value_name = "LOCALE", default_value = "en-US")]
    pub locale: DateLocale,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Table configuration (.toml or .json).
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,
}

/// A `KEY=VALUE` filter from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub key: String,
    pub value: String,
}

/// Parse `KEY=VALUE`. The value may be empty or contain further `=`.
pub fn parse_filter_arg(raw: &str) -> Result<FilterArg, String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got `{raw}`"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing column key in `{raw}`"));
    }
    Ok(FilterArg {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse a delimiter argument into a single byte.
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("tab") || raw == "\\t" {
        return Ok(b'\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch != '\n' && ch != '\r' => u8::try_from(ch)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("delimiter must be ASCII, got `{raw}`")),
        _ => Err(format!(
            "delimiter must be a single character, got `{raw}`"
        )),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_args_split_on_first_equals() {
        assert_eq!(
            parse_filter_arg("note=a=b").unwrap(),
            FilterArg {
                key: "note".to_string(),
                value: "a=b".to_string()
            }
        );
        assert_eq!(parse_filter_arg("status=").unwrap().value, "");
        assert!(parse_filter_arg("status").is_err());
        assert!(parse_filter_arg("=paid").is_err());
    }

    #[test]
    fn delimiters_are_single_ascii_bytes() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("א").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
