use super::types::{InputEvent, Key, KeyState};

/// Source of buffered, already-translated input events.
pub trait EventSource {
    /// Returns the oldest pending event, if any.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Events lost because the source's buffer was full.
    fn dropped_events(&self) -> u64 {
        0
    }
}

/// Control signals derived from input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlSignal {
    /// Window close was requested.
    Quit,
    /// Escape was pressed.
    KeyEscape,
}

impl ControlSignal {
    /// Maps an event to the signal it carries. Every other event is ignored.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match event {
            InputEvent::Quit => Some(ControlSignal::Quit),
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
                ..
            } => Some(ControlSignal::KeyEscape),
            _ => None,
        }
    }
}

/// How many pending events the poller consumes per frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum EventPolicy {
    /// Exactly one pending event per frame. Under bursts the rest wait for later
    /// frames, so a quit request may be observed a few frames late.
    #[default]
    Single,
    /// Drain until no event is pending or a signal is found.
    Drain,
}

/// Consumes pending input once per frame.
#[derive(Debug, Default)]
pub struct InputPoller {
    policy: EventPolicy,
    consumed: u64,
}

impl InputPoller {
    pub fn new(policy: EventPolicy) -> Self {
        Self { policy, consumed: 0 }
    }

    /// Total number of events consumed so far.
    #[inline]
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Polls `source` per policy and returns the first control signal observed.
    pub fn poll<S: EventSource + ?Sized>(&mut self, source: &mut S) -> Option<ControlSignal> {
        match self.policy {
            EventPolicy::Single => {
                let event = source.poll_event()?;
                self.consume(&event)
            }
            EventPolicy::Drain => {
                while let Some(event) = source.poll_event() {
                    if let Some(signal) = self.consume(&event) {
                        return Some(signal);
                    }
                }
                None
            }
        }
    }

    fn consume(&mut self, event: &InputEvent) -> Option<ControlSignal> {
        self.consumed += 1;
        let signal = ControlSignal::from_event(event);
        if let Some(signal) = signal {
            log::debug!("input signal {signal:?}");
        } else {
            log::trace!("ignored input event {event:?}");
        }
        signal
    }
}
