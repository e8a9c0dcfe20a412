use anvil_core::events::event::*;
use anvil_core::events::Listener;
use anvil_core::{BuildStatus, TargetName};

/// Prints a build to the console as it happens.
///
/// Every attempted target gets a `name:` header, task messages are printed under it prefixed with
/// the kind of task, and the build ends with a one line summary. Messages less important than
/// `threshold` are dropped.
///
#[derive(Debug)]
pub struct ConsoleReporter {
    threshold: Severity,
    current_target: Option<TargetName>,
}

impl ConsoleReporter {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            current_target: None,
        }
    }

    fn shows(&self, severity: Severity) -> bool {
        severity <= self.threshold
    }

    /// Print the header of the current target, unless it was already printed.
    fn print_header(&mut self, target: &TargetName) {
        if self.current_target.as_ref() == Some(target) {
            return;
        }
        println!();
        println!("{}:", target);
        self.current_target = Some(target.clone());
    }
}

impl Listener for ConsoleReporter {
    fn on_build_event(&mut self, event: &BuildEvent) {
        let green_bold = console::Style::new().green().bold();
        let red_bold = console::Style::new().red().bold();

        if let BuildEvent::BuildFinished {
            status,
            failures,
            total_duration,
            ..
        } = event
        {
            let total = humantime::format_duration(std::time::Duration::from_millis(
                total_duration.as_millis() as u64,
            ));
            println!();
            match status {
                BuildStatus::Succeeded => {
                    if self.shows(Severity::Info) {
                        println!("{}", green_bold.apply_to("BUILD SUCCESSFUL"));
                        println!("Total time: {}", total);
                    }
                }
                BuildStatus::Failed | BuildStatus::PartiallyFailed => {
                    eprintln!("{}", red_bold.apply_to("BUILD FAILED"));
                    for failure in failures {
                        eprintln!("{}", failure);
                    }
                    eprintln!();
                    eprintln!("Total time: {}", total);
                }
            }
        }
    }

    fn on_target_event(&mut self, event: &TargetEvent) {
        if let TargetEvent::TargetStarted { target } = event {
            if self.shows(Severity::Info) {
                self.print_header(target);
            }
        }
    }

    fn on_log_event(&mut self, event: &LogEvent) {
        let yellow = console::Style::new().yellow();
        let red = console::Style::new().red();
        let dim = console::Style::new().dim();

        let LogEvent::MessageLogged {
            severity,
            message,
            target,
            task,
        } = event;

        if !self.shows(*severity) {
            return;
        }

        if let Some(target) = target {
            self.print_header(target);
        }

        let line = match task {
            Some(task) => format!("{:>12} {}", format!("[{}]", task), message),
            None => message.to_string(),
        };

        match severity {
            Severity::Error => eprintln!("{}", red.apply_to(line)),
            Severity::Warn => println!("{}", yellow.apply_to(line)),
            Severity::Info => println!("{}", line),
            Severity::Verbose | Severity::Debug => println!("{}", dim.apply_to(line)),
        }
    }
}
