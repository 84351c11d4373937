//! Notification fan-out to the connected front-end

use std::fmt;
use std::sync::Mutex;

use crate::domain::config::Favorites;
use crate::domain::weather::WeatherSnapshot;

/// Polling status as reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollStatus {
    Started,
    #[default]
    Stopped,
}

impl PollStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for PollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A state-change event published to the connected client.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    StatusChange { status: PollStatus },
    LinkChange { is_linked: bool },
    OverrideChange { is_overridden: bool },
    CurrentOverrideChange { current_override: u8 },
    Favorites { favorites: Favorites },
    StatusMessage { message: String, repeat: u32 },
    WeatherData { snapshot: WeatherSnapshot },
}

impl EngineEvent {
    /// The wire name the transport layer publishes this event under.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StatusChange { .. } => "statuschange",
            Self::LinkChange { .. } => "linkchange",
            Self::OverrideChange { .. } => "overrchange",
            Self::CurrentOverrideChange { .. } => "currentOverrchange",
            Self::Favorites { .. } => "favs",
            Self::StatusMessage { .. } => "statusMessage",
            Self::WeatherData { .. } => "weatherdata",
        }
    }
}

/// Opaque handle returned at subscribe time; passing it back to
/// [`NotificationBus::unsubscribe`] removes exactly the subscriber it was
/// issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&EngineEvent) + Send + Sync>;

struct BusInner {
    next_id: u64,
    subscribers: Vec<(u64, Subscriber)>,
}

/// Synchronous fan-out of engine events.
///
/// Delivery runs subscribers to completion in registration order before
/// `publish` returns; there is no queuing and no retry. Subscribers must not
/// call back into the bus.
pub struct NotificationBus {
    inner: Mutex<BusInner>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BusInner {
                next_id: 1,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Register a subscriber for all events.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(subscriber)));
        SubscriptionId(id)
    }

    /// Remove a subscriber. Returns whether the handle was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id.0);
        inner.subscribers.len() != before
    }

    /// Deliver an event to every subscriber in registration order.
    pub fn publish(&self, event: &EngineEvent) {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        for (_, subscriber) in &inner.subscribers {
            subscriber(event);
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
