//! Input hooks and script event dispatch

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};

use crate::foundation::time::FrameClock;
use crate::render::{shared, RenderContext, Shared};
use crate::scene::ScriptBinding;
use crate::subsystem::{CreateExtra, Subsystem, SubsystemError, SubsystemKind};

/// Input event delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// Event name, matched against [`ScriptBinding::events`]
    pub name: String,
    /// Pointer position in container pixels, when relevant
    pub position: Option<(f32, f32)>,
}

impl InputEvent {
    /// Event without a position
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), position: None }
    }

    /// Pointer event at `(x, y)`
    pub fn pointer(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self { name: name.into(), position: Some((x, y)) }
    }
}

#[derive(Debug, Default)]
struct InputQueueState {
    hooks: usize,
    events: VecDeque<InputEvent>,
}

/// Host-side input hook point
///
/// Events pushed while no hook is attached are dropped, so nothing queues up
/// between sessions.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    state: Shared<InputQueueState>,
}

impl InputQueue {
    /// Create an empty queue with no hooks
    pub fn new() -> Self {
        Self { state: shared(InputQueueState::default()) }
    }

    /// Deliver an event; returns whether a hook accepted it
    pub fn push(&self, event: InputEvent) -> bool {
        let mut state = self.state.borrow_mut();
        if state.hooks == 0 {
            log::trace!("Dropping input event '{}' (no hooks)", event.name);
            return false;
        }
        state.events.push_back(event);
        true
    }

    /// Number of attached hooks
    pub fn listener_count(&self) -> usize {
        self.state.borrow().hooks
    }

    fn attach(&self) {
        self.state.borrow_mut().hooks += 1;
    }

    fn detach(&self) {
        let mut state = self.state.borrow_mut();
        state.hooks = state.hooks.saturating_sub(1);
        if state.hooks == 0 {
            state.events.clear();
        }
    }

    fn drain(&self) -> Vec<InputEvent> {
        self.state.borrow_mut().events.drain(..).collect()
    }
}

/// Event-handling subsystem dispatching input to scene scripts
pub struct ScriptEventHandler {
    input: InputQueue,
    scripts: Vec<ScriptBinding>,
    invocations: Shared<HashMap<String, u64>>,
    listening: bool,
    context: Option<RenderContext>,
}

impl ScriptEventHandler {
    /// Create a handler hooked to `input` once started
    pub fn new(input: InputQueue) -> Self {
        Self {
            input,
            scripts: Vec::new(),
            invocations: shared(HashMap::new()),
            listening: false,
            context: None,
        }
    }

    /// Per-script invocation counts for the current session
    pub fn invocations(&self) -> Shared<HashMap<String, u64>> {
        self.invocations.clone()
    }

    fn unhook(&mut self) {
        if self.listening {
            self.input.detach();
            self.listening = false;
        }
    }
}

#[async_trait(?Send)]
impl Subsystem for ScriptEventHandler {
    fn kind(&self) -> SubsystemKind {
        SubsystemKind::EventHandler
    }

    async fn create(&mut self, context: RenderContext, extra: CreateExtra) -> Result<(), SubsystemError> {
        let scripts = match extra {
            CreateExtra::Scripts(scripts) => scripts,
            _ => Vec::new(),
        };
        if let Some(script) = scripts.iter().find(|s| s.name.trim().is_empty()) {
            return Err(SubsystemError::Setup(format!(
                "script bound to {:?} has no name",
                script.events
            )));
        }
        log::debug!("Event handler bound {} script(s)", scripts.len());
        self.scripts = scripts;
        self.context = Some(context);
        Ok(())
    }

    fn start(&mut self) {
        if !self.listening {
            self.input.attach();
            self.listening = true;
        }
    }

    fn update(&mut self, _clock: &FrameClock, _delta_time: f32) {
        if !self.listening {
            return;
        }
        let mut invocations = self.invocations.borrow_mut();
        for event in self.input.drain() {
            for script in self.scripts.iter().filter(|s| s.events.contains(&event.name)) {
                log::trace!("Dispatching '{}' to script '{}'", event.name, script.name);
                *invocations.entry(script.name.clone()).or_insert(0) += 1;
            }
        }
    }

    fn stop(&mut self) {
        self.unhook();
    }

    fn dispose(&mut self) {
        self.unhook();
        self.scripts.clear();
        self.invocations.borrow_mut().clear();
        self.context = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drops_events_without_hooks() {
        let queue = InputQueue::new();
        assert!(!queue.push(InputEvent::new("click")));
        queue.attach();
        assert!(queue.push(InputEvent::pointer("click", 1.0, 2.0)));
        assert_eq!(queue.listener_count(), 1);
        queue.detach();
        assert_eq!(queue.listener_count(), 0);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_start_and_stop_balance_hooks() {
        let queue = InputQueue::new();
        let mut handler = ScriptEventHandler::new(queue.clone());
        handler.start();
        handler.start();
        assert_eq!(queue.listener_count(), 1);
        handler.stop();
        handler.stop();
        assert_eq!(queue.listener_count(), 0);
    }

    #[test]
    fn test_dispatch_to_subscribed_scripts() {
        let queue = InputQueue::new();
        let mut handler = ScriptEventHandler::new(queue.clone());
        handler.scripts = vec![
            ScriptBinding { name: "a".into(), source: String::new(), events: vec!["click".into()] },
            ScriptBinding { name: "b".into(), source: String::new(), events: vec!["keydown".into()] },
        ];
        handler.start();
        queue.push(InputEvent::new("click"));
        queue.push(InputEvent::new("click"));
        handler.update(&FrameClock::new(), 0.016);

        let invocations = handler.invocations();
        assert_eq!(invocations.borrow().get("a"), Some(&2));
        assert_eq!(invocations.borrow().get("b"), None);
    }
}
