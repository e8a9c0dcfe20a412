use crate::buildfile::BuildFile;
use crate::flags::Flags;
use crate::reporter::ConsoleReporter;
use crate::tasks::TaskRegistry;
use anvil_core::events::TracingListener;
use anvil_core::*;
use anyhow::*;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone, Default)]
#[structopt(
    name = "run",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Runs targets and everything they depend on"
)]
pub struct RunCommand {
    #[structopt(help = r"The targets to run, in order.

When no target is given, the default target of the build file is used.
")]
    targets: Vec<String>,

    #[structopt(flatten)]
    flags: Flags,
}

impl RunCommand {
    #[tracing::instrument(name = "RunCommand::run", skip(self))]
    pub fn run(self) -> Result<BuildStatus, anyhow::Error> {
        let registry = TaskRegistry::new();
        let graph = BuildFile::read_from_file(&self.flags.file)?.into_graph(&registry)?;

        let targets: Vec<TargetName> = if self.targets.is_empty() {
            match graph.default_target() {
                Some(target) => vec![target.clone()],
                None => bail!("No target specified"),
            }
        } else {
            self.targets.iter().map(TargetName::from).collect()
        };

        let config = Config::try_from(self.flags.clone())?;
        let request = ExecutionRequest::from_config(&config, targets);

        let mut engine = Engine::new(graph, config);
        engine.add_listener(TracingListener::new());
        engine.add_listener(ConsoleReporter::new(self.flags.severity()));

        let result = engine.execute(&request, &self.flags.properties());
        Ok(result.status())
    }
}
