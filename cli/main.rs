mod buildfile;
mod commands;
pub mod flags;
mod reporter;
mod tasks;

use commands::*;
use structopt::StructOpt;
use tracing::{error, log};

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "anvil",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Runs the targets of a build file in dependency order"
)]
struct Anvil {
    #[structopt(subcommand, help = "the command to run")]
    cmd: Option<Command>,
}

impl Anvil {
    fn run(mut self) -> Result<i32, anyhow::Error> {
        human_panic::setup_panic!(Metadata {
            name: "anvil".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            authors: env!("CARGO_PKG_AUTHORS").into(),
            homepage: "".into(),
        });

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .format_timestamp_micros()
            .format_module_path(false)
            .parse_env("ANVIL_LOG")
            .try_init()?;

        let result = self
            .cmd
            .take()
            .unwrap_or_else(|| Command::Run(RunCommand::default()))
            .run();

        if let Err(ref err) = result {
            error!("{:?}", &err);
        };

        result
    }
}

#[derive(StructOpt, Debug, Clone)]
enum Command {
    Run(RunCommand),
    Targets(TargetsCommand),
}

impl Command {
    fn run(self) -> Result<i32, anyhow::Error> {
        match self {
            Command::Run(x) => x.run().map(|status| if status.is_success() { 0 } else { 1 }),
            Command::Targets(x) => x.run().map(|_| 0),
        }
    }
}

fn main() {
    let code = match Anvil::from_args().run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", console::Style::new().red().bold().apply_to("error:"), err);
            2
        }
    };
    std::process::exit(code)
}
