use super::event::*;

/// Something that wants to know what the engine is doing.
///
/// Implement `on_event` to see every event as-is, or any of the narrower `on_*` hooks to only look
/// at one family of events. Listeners are invoked in-line on the thread running the build, so a
/// slow listener slows the build down.
///
pub trait Listener {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::Noop => (),
            Event::BuildEvent(e) => self.on_build_event(e),
            Event::TargetEvent(e) => self.on_target_event(e),
            Event::TaskEvent(e) => self.on_task_event(e),
            Event::LogEvent(e) => self.on_log_event(e),
        }
    }

    fn on_build_event(&mut self, _event: &BuildEvent) {}
    fn on_target_event(&mut self, _event: &TargetEvent) {}
    fn on_task_event(&mut self, _event: &TaskEvent) {}
    fn on_log_event(&mut self, _event: &LogEvent) {}
}

/// The listeners registered with an engine, in registration order.
///
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Box<dyn Listener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<L>(&mut self, listener: L)
    where
        L: Listener + 'static,
    {
        self.listeners.push(Box::new(listener))
    }

    pub fn fire<E>(&mut self, event: E)
    where
        E: Into<Event>,
    {
        let event = event.into();
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;
    use crate::model::TargetName;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct TargetCounter {
        started: Rc<RefCell<usize>>,
    }

    impl Listener for TargetCounter {
        fn on_target_event(&mut self, event: &TargetEvent) {
            if let TargetEvent::TargetStarted { .. } = event {
                *self.started.borrow_mut() += 1;
            }
        }
    }

    #[test]
    fn hooks_only_see_their_own_family_of_events() {
        let counter = TargetCounter::default();
        let mut listeners = Listeners::new();
        listeners.add(counter.clone());

        let target = TargetName::from("compile");
        listeners.fire(TargetEvent::TargetStarted {
            target: target.clone(),
        });
        listeners.fire(LogEvent::target_message(Severity::Info, &target, "hello"));
        listeners.fire(TargetEvent::TargetStarted { target });

        assert_eq!(*counter.started.borrow(), 2);
    }

    #[quickcheck]
    fn every_listener_sees_every_event(events: Vec<Event>) {
        let a = EventChannel::new();
        let b = EventChannel::new();
        let mut listeners = Listeners::new();
        listeners.add(a.clone());
        listeners.add(b.clone());
        assert_eq!(listeners.len(), 2);

        for event in &events {
            listeners.fire(event.clone());
        }

        assert_eq!(a.consumer().drain(), events);
        assert_eq!(b.consumer().drain(), events);
    }
}
