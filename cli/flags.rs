use anvil_core::events::event::Severity;
use anvil_core::{Config, ConfigError, ExecutorKind, Properties};
use std::path::PathBuf;
use structopt::StructOpt;

pub const BUILD_FILE: &str = "anvil.json";

#[derive(Debug, Clone, StructOpt)]
pub struct Flags {
    #[structopt(
        help = r"The build file to load targets from.",
        short = "f",
        long = "file",
        default_value = BUILD_FILE
    )]
    pub(crate) file: PathBuf,

    #[structopt(
        help = r"Keep running targets that do not depend on a failed target.",
        short = "k",
        long = "keep-going"
    )]
    pub(crate) keep_going: bool,

    #[structopt(
        help = r"The executor to plan targets with: default, single-check, or ignore-dependencies.",
        short = "e",
        long = "executor"
    )]
    pub(crate) executor: Option<ExecutorKind>,

    #[structopt(
        help = r"Set a property, as in -D skip.tests=true. Can be repeated.",
        short = "D",
        number_of_values = 1,
        parse(try_from_str = parse_property)
    )]
    pub(crate) properties: Vec<(String, String)>,

    #[structopt(help = r"Only print warnings and errors.", short = "q", long = "quiet")]
    pub(crate) quiet: bool,

    #[structopt(help = r"Print verbose messages too.", short = "v", long = "verbose")]
    pub(crate) verbose: bool,

    #[structopt(help = r"Print everything, including debug messages.", short = "d", long = "debug")]
    pub(crate) debug: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            file: PathBuf::from(BUILD_FILE),
            keep_going: false,
            executor: None,
            properties: vec![],
            quiet: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Flags {
    /// The least important severity that will still be printed.
    pub fn severity(&self) -> Severity {
        if self.debug {
            Severity::Debug
        } else if self.verbose {
            Severity::Verbose
        } else if self.quiet {
            Severity::Warn
        } else {
            Severity::Info
        }
    }

    pub fn properties(&self) -> Properties {
        self.properties.iter().cloned().collect()
    }
}

impl TryFrom<Flags> for Config {
    type Error = ConfigError;

    fn try_from(flags: Flags) -> Result<Self, Self::Error> {
        let mut config = Config::builder();

        config.keep_going(flags.keep_going);

        if let Some(executor) = flags.executor {
            config.executor(executor);
        }

        config.build()
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Err(format!("Missing property name in {:?}", s)),
        Some((key, value)) => Ok((key.trim().to_string(), value.to_string())),
        None => Ok((s.trim().to_string(), "true".to_string())),
    }
}
