use crate::buildfile::BuildFile;
use crate::flags::Flags;
use crate::tasks::TaskRegistry;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "targets",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Lists the targets in the build file"
)]
pub struct TargetsCommand {
    #[structopt(flatten)]
    flags: Flags,
}

impl TargetsCommand {
    pub fn run(self) -> Result<(), anyhow::Error> {
        let bold = console::Style::new().bold();
        let dim = console::Style::new().dim();

        let graph = BuildFile::read_from_file(&self.flags.file)?.into_graph(&TaskRegistry::new())?;

        println!("Targets of {}:", bold.apply_to(graph.project()));
        for target in graph.targets() {
            let name = if target.is_extension_point() {
                format!("{} (extension point)", target.name())
            } else {
                target.name().to_string()
            };
            match target.description() {
                Some(description) => println!("  {:<24} {}", name, dim.apply_to(description)),
                None => println!("  {}", name),
            }
        }

        if let Some(default_target) = graph.default_target() {
            println!();
            println!("Default target: {}", default_target);
        }

        if let Err(err) = graph.validate() {
            let yellow = console::Style::new().yellow().bold();
            eprintln!();
            eprintln!("{} {}", yellow.apply_to("warning:"), err);
        }

        Ok(())
    }
}
