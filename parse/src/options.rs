use std::io::Read;

use clap::{ArgAction, Parser};
use isa::Dialect;
use serde::Deserialize;

use crate::{error::Error, stats::StatKey};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Parser)]
#[clap(
    name = "ippcparse",
    version,
    about = "IPPcode23 source analyzer, reads stdin and writes XML to stdout",
    help_template = HELP_TEMPLATE
)]
struct Args {
    /// Write statistics to FILE (must precede the statistic flags)
    #[arg(long, value_name = "FILE", action = ArgAction::Append)]
    stats: Vec<String>,

    /// Lines with instructions
    #[arg(long, action = ArgAction::Count)]
    loc: u8,

    /// Lines with comments
    #[arg(long, action = ArgAction::Count)]
    comments: u8,

    /// Defined labels
    #[arg(long, action = ArgAction::Count)]
    labels: u8,

    /// All jumps, returns included
    #[arg(long, action = ArgAction::Count)]
    jumps: u8,

    /// Jumps to labels defined later
    #[arg(long, action = ArgAction::Count)]
    fwjumps: u8,

    /// Jumps to labels defined earlier
    #[arg(long, action = ArgAction::Count)]
    backjumps: u8,

    /// Jumps to labels never defined
    #[arg(long, action = ArgAction::Count)]
    badjumps: u8,

    /// Most frequent instructions
    #[arg(long, action = ArgAction::Count)]
    frequent: u8,

    /// Print STRING verbatim
    #[arg(long, value_name = "STRING", action = ArgAction::Append)]
    print: Vec<String>,

    /// Empty line
    #[arg(long, action = ArgAction::Count)]
    eol: u8,

    /// Reject IFJcode22 extensions
    #[arg(long)]
    legacy: bool,

    /// Decorated statistics and colored diagnostics
    #[arg(long)]
    fancy: bool,

    /// Indent the XML output
    #[arg(long)]
    pretty: bool,

    /// Read the program from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    source: Option<String>,

    /// YAML file with default settings
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
}

impl Args {
    fn stat_flag_count(&self) -> usize {
        [
            self.loc,
            self.comments,
            self.labels,
            self.jumps,
            self.fwjumps,
            self.backjumps,
            self.badjumps,
            self.frequent,
            self.eol,
        ]
        .iter()
        .map(|n| *n as usize)
        .sum::<usize>()
            + self.print.len()
    }
}

// ----------------------------------------------------------------------------
// Settings file

/// Contents of a `--config` file. Missing keys keep their defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dialect: Dialect,
    pub fancy: bool,
    pub pretty: bool,
}

impl Settings {
    pub fn load(path: &str) -> Result<Settings, Error> {
        let mut text = String::new();
        std::fs::File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .map_err(|e| Error::FileOpen(path.to_string(), e))?;
        Settings::from_yaml(path, &text)
    }

    fn from_yaml(path: &str, text: &str) -> Result<Settings, Error> {
        if text.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(text).map_err(|e| Error::ConfigFormat(path.to_string(), e))
    }
}

// ----------------------------------------------------------------------------
// Options

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub stats_file: Option<String>,
    /// Requested statistics in command-line order.
    pub keys: Vec<StatKey>,
    pub dialect: Dialect,
    pub fancy: bool,
    pub pretty: bool,
    pub source: Option<String>,
}

impl Options {
    /// Parse a full argument vector, program name first.
    pub fn parse_from<I, T>(argv: I) -> Result<Options, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let args = Args::try_parse_from(&argv)?;

        if args.stats.len() > 1 {
            return Err(Error::DuplicateStats);
        }
        let stats_file = match args.stats.first() {
            Some(file) if file.is_empty() => return Err(Error::MissingStatsFile),
            file => file.cloned(),
        };

        // clap keeps counts but not positions, so recover the order from argv
        let mut keys = vec![];
        let mut stats_seen = false;
        let mut prints = args.print.iter();
        for name in long_flags(&argv) {
            if name == "stats" {
                stats_seen = true;
                continue;
            }
            let value = if name == "print" { prints.next().map(String::as_str) } else { None };
            let Some(key) = StatKey::from_flag(name, value) else {
                continue;
            };
            if !stats_seen {
                return Err(Error::StatsNotFirst(name.to_string()));
            }
            keys.push(key);
        }
        // clap saturates counts, so argv may hold more
        debug_assert!(keys.len() >= args.stat_flag_count());

        let settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let dialect = if args.legacy {
            Dialect::Legacy
        } else {
            settings.dialect
        };

        Ok(Options {
            stats_file,
            keys,
            dialect,
            fancy: args.fancy || settings.fancy,
            pretty: args.pretty || settings.pretty,
            source: args.source,
        })
    }
}

/// `--stats` and statistic flag names in order of appearance.
fn long_flags(argv: &[String]) -> Vec<&str> {
    const VALUED: [&str; 4] = ["stats", "print", "source", "config"];

    let mut names = vec![];
    let mut tokens = argv.iter().skip(1);
    while let Some(token) = tokens.next() {
        if token == "--" {
            break;
        }
        let Some(flag) = token.strip_prefix("--") else {
            continue;
        };
        let name = match flag.split_once('=') {
            Some((name, _)) => name,
            None => {
                if VALUED.contains(&flag) {
                    tokens.next();
                }
                flag
            }
        };
        if name == "stats" || StatKey::is_flag(name) {
            names.push(name);
        }
    }
    names
}
