use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linesift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort the lines of text files into integers, floats and strings")]
#[command(
    long_about = "LineSift reads text files line by line, classifies every non-blank line as an \
                  integer, a float or a string, and writes each kind to its own file \
                  (integers.txt, floats.txt, strings.txt)."
)]
#[command(after_help = "EXAMPLES:\n  \
    linesift in1.txt in2.txt\n  \
    linesift -o results -p sample- -s in1.txt\n  \
    linesift -a -f data/*.txt\n  \
    linesift --output-format json -f in1.txt")]
pub struct Cli {
    /// Input files, processed in the order given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory for the output files (relative to the working directory)
    #[arg(short = 'o', long = "output", value_name = "DIR", allow_hyphen_values = true)]
    pub output: Option<PathBuf>,

    /// Prefix prepended to every output file name
    #[arg(short = 'p', long = "prefix", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Append to existing output files instead of overwriting them
    #[arg(short = 'a', long)]
    pub append: bool,

    /// Print short statistics (counts per category)
    #[arg(short = 's', long = "short")]
    pub short_stats: bool,

    /// Print full statistics (min, max, sum, average, string lengths)
    #[arg(short = 'f', long = "full")]
    pub full_stats: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for statistics and messages
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress and informational output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Plain => "plain",
        }
    }
}

/// How a single command-line token relates to the declared options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    /// A complete option, including any value attached with `=` or inline.
    Option,
    /// An option whose value is the next token.
    OptionWithValue,
    /// Anything else: an input file, even when it starts with `-`.
    File,
}

fn token_kind(command: &clap::Command, token: &str) -> TokenKind {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };

        return match command.get_arguments().find(|a| a.get_long() == Some(name)) {
            Some(arg) if arg.get_action().takes_values() && !inline_value => {
                TokenKind::OptionWithValue
            }
            Some(_) => TokenKind::Option,
            None => TokenKind::File,
        };
    }

    let cluster = match token.strip_prefix('-') {
        Some(cluster) if !cluster.is_empty() => cluster,
        _ => return TokenKind::File,
    };

    // `-sf` is two flags, `-ofoo` is `-o foo`, `-sx` names no option at all.
    for (index, short) in cluster.char_indices() {
        match command.get_arguments().find(|a| a.get_short() == Some(short)) {
            None => return TokenKind::File,
            Some(arg) if arg.get_action().takes_values() => {
                return if index + short.len_utf8() < cluster.len() {
                    TokenKind::Option
                } else {
                    TokenKind::OptionWithValue
                };
            }
            Some(_) => {}
        }
    }

    TokenKind::Option
}

/// Reorders raw arguments so that every token naming no declared option is
/// passed to clap as an input file, after `--`, in its original order.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = Cli::command();
    command.build();

    let mut args = args.into_iter().map(Into::into);
    let mut options: Vec<OsString> = args.next().into_iter().collect();
    let mut files = Vec::new();

    while let Some(arg) = args.next() {
        let kind = match arg.to_str() {
            Some("--") => {
                files.extend(args.by_ref());
                break;
            }
            Some(token) => token_kind(&command, token),
            None => TokenKind::File,
        };

        match kind {
            TokenKind::Option => options.push(arg),
            TokenKind::OptionWithValue => {
                options.push(arg);
                options.extend(args.next());
            }
            TokenKind::File => files.push(arg),
        }
    }

    if !files.is_empty() {
        options.push(OsString::from("--"));
        options.extend(files);
    }

    options
}

impl Cli {
    /// Parses the process arguments; unknown dash tokens become input files.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn try_parse_args_from<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output.clone())
            .with_prefix(self.prefix.clone())
            .with_append(self.append)
            .with_short_stats(self.short_stats)
            .with_full_stats(self.full_stats)
            .with_format(self.output_format.map(|f| f.as_str().to_string()))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "linesift", "-o", "out", "-p", "pre_", "-a", "-s", "-f", "a.txt", "b.txt",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.prefix.as_deref(), Some("pre_"));
        assert!(cli.append);
        assert!(cli.short_stats);
        assert!(cli.full_stats);
        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_flags_are_order_independent() {
        let cli = Cli::try_parse_from(["linesift", "a.txt", "-s", "b.txt", "-p", "x"]).unwrap();

        assert!(cli.short_stats);
        assert_eq!(cli.prefix.as_deref(), Some("x"));
        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_prefix_may_start_with_hyphen() {
        let cli = Cli::try_parse_from(["linesift", "-p", "-run", "a.txt"]).unwrap();
        assert_eq!(cli.prefix.as_deref(), Some("-run"));
    }

    #[test]
    fn test_cli_overrides_reach_config() {
        let cli = Cli::try_parse_from([
            "linesift",
            "--output-format",
            "json",
            "-a",
            "-o",
            "results",
            "a.txt",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(config.output.directory, PathBuf::from("results"));
        assert!(config.output.append);
        assert_eq!(config.report.format, "json");
        assert!(config.output.prefix.is_empty());
    }

    #[test]
    fn test_unknown_dash_tokens_are_files() {
        let cli =
            Cli::try_parse_args_from(["linesift", "-s", "in.txt", "-data.txt", "-x", "--nope"])
                .unwrap();

        assert!(cli.short_stats);
        assert_eq!(
            cli.files,
            vec![
                PathBuf::from("in.txt"),
                PathBuf::from("-data.txt"),
                PathBuf::from("-x"),
                PathBuf::from("--nope"),
            ]
        );
    }

    #[test]
    fn test_known_options_still_win() {
        let cli = Cli::try_parse_args_from([
            "linesift",
            "a.txt",
            "-sf",
            "-ores",
            "-p",
            "-run",
            "--output-format=json",
            "-v",
            "b.txt",
        ])
        .unwrap();

        assert!(cli.short_stats);
        assert!(cli.full_stats);
        assert_eq!(cli.output, Some(PathBuf::from("res")));
        assert_eq!(cli.prefix.as_deref(), Some("-run"));
        assert_eq!(cli.output_format, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_normalize_args_keeps_file_order() {
        let args: Vec<String> = normalize_args(["linesift", "x.txt", "-a", "-y", "--", "-s"])
            .into_iter()
            .map(|arg| arg.into_string().unwrap())
            .collect();
        assert_eq!(args, vec!["linesift", "-a", "--", "x.txt", "-y", "-s"]);
    }

    #[test]
    fn test_no_arguments_parse() {
        let cli = Cli::try_parse_args_from(["linesift"]).unwrap();
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["linesift", "-q", "-v", "a.txt"]).is_err());

        let cli = Cli::try_parse_from(["linesift", "-q", "a.txt"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);
    }
}
