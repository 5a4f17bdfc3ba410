//! Synchronous change notifications.
//!
//! [`InputEvents`] is a small typed bus with three channels. Handlers on each
//! channel run in registration order, on the caller's stack, before the
//! triggering call returns. Key channels are cancelable: any handler may call
//! [`KeyNotification::prevent_default`], and the raw-event caller learns about
//! it through the returned [`KeyDispatch`].

use std::fmt;

use crate::action_map::ActionMap;
use crate::key::CanonicalKey;
use crate::modifiers::Modifiers;

/// Notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// A recognized key went down (or repeated). Cancelable.
    InputPressed,
    /// A recognized key went up. Cancelable.
    InputReleased,
    /// The action map was replaced. Not cancelable.
    ActionsUpdated,
}

/// Payload of the cancelable key channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotification {
    /// The translated key.
    pub key: CanonicalKey,
    /// Modifiers carried by the raw event.
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyNotification {
    fn new(key: CanonicalKey, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// Ask the platform layer to suppress the event's default behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of feeding one raw key event to an [`ActionInput`](crate::ActionInput).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    /// The raw key name has no canonical key; nothing changed.
    Unrecognized,
    /// State was updated and listeners were notified.
    Delivered {
        /// Whether a listener called `prevent_default`.
        default_prevented: bool,
    },
}

impl KeyDispatch {
    /// True when the platform's default handling should be suppressed.
    #[must_use]
    pub fn default_prevented(self) -> bool {
        matches!(
            self,
            Self::Delivered {
                default_prevented: true
            }
        )
    }
}

/// Handle returned on registration, used to remove the listener later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type KeyListener = Box<dyn FnMut(&mut KeyNotification) + Send>;
type ActionsListener = Box<dyn FnMut(&ActionMap) + Send>;

/// Listener registry for the three notification channels.
#[derive(Default)]
pub struct InputEvents {
    next_id: u64,
    input_pressed: Vec<(ListenerId, KeyListener)>,
    input_released: Vec<(ListenerId, KeyListener)>,
    actions_updated: Vec<(ListenerId, ActionsListener)>,
}

impl fmt::Debug for InputEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputEvents")
            .field("input_pressed", &self.input_pressed.len())
            .field("input_released", &self.input_released.len())
            .field("actions_updated", &self.actions_updated.len())
            .finish()
    }
}

impl InputEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Subscribe to [`Channel::InputPressed`].
    pub fn on_input_pressed(
        &mut self,
        listener: impl FnMut(&mut KeyNotification) + Send + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.input_pressed.push((id, Box::new(listener)));
        id
    }

    /// Subscribe to [`Channel::InputReleased`].
    pub fn on_input_released(
        &mut self,
        listener: impl FnMut(&mut KeyNotification) + Send + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.input_released.push((id, Box::new(listener)));
        id
    }

    /// Subscribe to [`Channel::ActionsUpdated`]. The listener sees the merged map.
    pub fn on_actions_updated(
        &mut self,
        listener: impl FnMut(&ActionMap) + Send + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.actions_updated.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener from whichever channel holds it.
    ///
    /// Returns `false` if the id was never registered or is already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.len();
        self.input_pressed.retain(|(lid, _)| *lid != id);
        self.input_released.retain(|(lid, _)| *lid != id);
        self.actions_updated.retain(|(lid, _)| *lid != id);
        self.len() != before
    }

    /// Number of listeners registered on `channel`.
    #[must_use]
    pub fn listener_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::InputPressed => self.input_pressed.len(),
            Channel::InputReleased => self.input_released.len(),
            Channel::ActionsUpdated => self.actions_updated.len(),
        }
    }

    fn len(&self) -> usize {
        self.input_pressed.len() + self.input_released.len() + self.actions_updated.len()
    }

    /// Run every handler of a key channel; returns the prevent-default flag.
    pub(crate) fn emit_key(
        &mut self,
        channel: Channel,
        key: CanonicalKey,
        modifiers: Modifiers,
    ) -> bool {
        let listeners = match channel {
            Channel::InputPressed => &mut self.input_pressed,
            Channel::InputReleased => &mut self.input_released,
            Channel::ActionsUpdated => return false,
        };
        let mut notification = KeyNotification::new(key, modifiers);
        for (_, listener) in listeners.iter_mut() {
            listener(&mut notification);
        }
        notification.default_prevented()
    }

    pub(crate) fn emit_actions_updated(&mut self, actions: &ActionMap) {
        for (_, listener) in &mut self.actions_updated {
            listener(actions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut events = InputEvents::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            events.on_input_pressed(move |_| log.lock().unwrap().push(tag));
        }
        events.emit_key(Channel::InputPressed, CanonicalKey::A, Modifiers::NONE);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_any_handler_can_prevent_default() {
        let mut events = InputEvents::new();
        let calls = Arc::new(Mutex::new(0));
        events.on_input_released(|n| n.prevent_default());
        let counter = Arc::clone(&calls);
        events.on_input_released(move |n| {
            assert!(n.default_prevented());
            *counter.lock().unwrap() += 1;
        });
        assert!(events.emit_key(Channel::InputReleased, CanonicalKey::Tab, Modifiers::NONE));
        assert_eq!(*calls.lock().unwrap(), 1, "later handlers still run");
        assert!(!events.emit_key(Channel::InputPressed, CanonicalKey::Tab, Modifiers::NONE));
    }

    #[test]
    fn test_key_payload_reaches_listener() {
        let mut events = InputEvents::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        events.on_input_pressed(move |n| *sink.lock().unwrap() = Some((n.key, n.modifiers)));
        events.emit_key(Channel::InputPressed, CanonicalKey::F5, Modifiers::ALT);
        assert_eq!(*seen.lock().unwrap(), Some((CanonicalKey::F5, Modifiers::ALT)));
    }

    #[test]
    fn test_remove_listener() {
        let mut events = InputEvents::new();
        let id = events.on_actions_updated(|_| {});
        events.on_input_pressed(|_| {});
        assert_eq!(events.listener_count(Channel::ActionsUpdated), 1);
        assert!(events.remove(id));
        assert!(!events.remove(id));
        assert_eq!(events.listener_count(Channel::ActionsUpdated), 0);
        assert_eq!(events.listener_count(Channel::InputPressed), 1);
    }

    #[test]
    fn test_dispatch_default_prevented() {
        assert!(!KeyDispatch::Unrecognized.default_prevented());
        assert!(!KeyDispatch::Delivered { default_prevented: false }.default_prevented());
        assert!(KeyDispatch::Delivered { default_prevented: true }.default_prevented());
    }
}
