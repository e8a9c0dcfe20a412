use anvil_core::events::event::*;
use anvil_core::events::EventChannel;
use anvil_core::*;

/// Does nothing, successfully.
#[derive(Debug)]
pub struct Noop;

impl TaskDescriptor for Noop {
    fn kind(&self) -> &str {
        "noop"
    }

    fn execute(&self, _ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Fail(pub &'static str);

impl TaskDescriptor for Fail {
    fn kind(&self) -> &str {
        "fail"
    }

    fn execute(&self, _ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        Err(anyhow::anyhow!(self.0))
    }
}

/// Logs the value of a property, or fails if it isn't there.
#[derive(Debug)]
pub struct Echo(pub &'static str);

impl TaskDescriptor for Echo {
    fn kind(&self) -> &str {
        "echo"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        let value = ctx
            .property(self.0)
            .ok_or_else(|| anyhow::anyhow!("property {} is not set", self.0))?;
        ctx.log(Severity::Info, value);
        Ok(())
    }
}

/// `compile` depends on `init`, `test` depends on `compile`, and `clean` stands alone.
pub fn chain() -> TargetGraph {
    TargetGraph::builder()
        .project("chain")
        .target(Target::builder("init").task(Noop))
        .target(Target::builder("compile").depends_on(["init"]).task(Noop))
        .target(Target::builder("test").depends_on(["compile"]).task(Noop))
        .target(Target::builder("clean").task(Noop))
        .build()
        .unwrap()
}

/// `A` and `B` both depend on `C`.
pub fn diamond() -> TargetGraph {
    TargetGraph::builder()
        .target(Target::builder("A").depends_on(["C"]).task(Noop))
        .target(Target::builder("B").depends_on(["C"]).task(Noop))
        .target(Target::builder("C").task(Noop))
        .build()
        .unwrap()
}

pub fn engine(graph: TargetGraph, executor: ExecutorKind) -> (Engine, EventChannel) {
    let config = Config::builder().executor(executor).build().unwrap();
    let mut engine = Engine::new(graph, config);
    let channel = EventChannel::new();
    engine.add_listener(channel.clone());
    (engine, channel)
}

pub fn started_targets(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::TargetEvent(TargetEvent::TargetStarted { target }) => {
                Some(target.to_string())
            }
            _ => None,
        })
        .collect()
}

pub fn started_tasks(events: &[Event], target_name: &str) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(e, Event::TaskEvent(TaskEvent::TaskStarted { target, .. }) if target == target_name)
        })
        .count()
}

pub fn messages(events: &[Event], severity: Severity) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::LogEvent(LogEvent::MessageLogged {
                severity: s,
                message,
                ..
            }) if *s == severity => Some(message.clone()),
            _ => None,
        })
        .collect()
}

pub fn names(names: &[TargetName]) -> Vec<&str> {
    names.iter().map(|n| n.as_str()).collect()
}
