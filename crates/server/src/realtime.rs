//! # Real-time Notification Registry
//!
//! Process-wide ephemeral state for the real-time collaborator: who is
//! connected, and per-project broadcast channels carrying membership events.
//! Entries are populated on connect and purged on disconnect. This registry
//! holds no membership truth and never gates a write — the database is the
//! single source of truth for the member counter.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Event name for a member joining a project
pub const EVENT_MEMBER_JOINED: &str = "member:joined";
/// Event name for a member leaving a project
pub const EVENT_MEMBER_LEFT: &str = "member:left";
/// Event name for a new join request on a project
pub const EVENT_REQUEST_RECEIVED: &str = "request:received";

/// Capacity of each per-project broadcast channel
const CHANNEL_CAPACITY: usize = 64;

/// A membership event broadcast to a project's subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEvent {
    /// Event name (see the `EVENT_*` constants)
    pub event:      &'static str,
    /// Project the event concerns
    pub project_id: uuid::Uuid,
    /// User the event concerns
    pub user_id:    uuid::Uuid,
}

impl ProjectEvent {
    /// Create a new project event.
    #[must_use]
    pub fn new(event: &'static str, project_id: uuid::Uuid, user_id: uuid::Uuid) -> Self {
        Self {
            event,
            project_id,
            user_id,
        }
    }
}

/// Connection presence and per-project event channels.
pub struct Realtime {
    /// Connected socket ids per user
    presence: Mutex<HashMap<uuid::Uuid, HashSet<uuid::Uuid>>>,
    /// Broadcast sender per project
    channels: Mutex<HashMap<uuid::Uuid, broadcast::Sender<ProjectEvent>>>,
}

impl Realtime {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            presence: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Register a connection for a user. Returns the number of live
    /// connections the user now has.
    pub fn connect(&self, user_id: uuid::Uuid, connection_id: uuid::Uuid) -> usize {
        let mut presence = self.presence.lock().expect("presence lock poisoned");
        let connections = presence.entry(user_id).or_default();
        connections.insert(connection_id);
        connections.len()
    }

    /// Remove a connection for a user, purging the entry once the last
    /// connection is gone.
    pub fn disconnect(&self, user_id: uuid::Uuid, connection_id: uuid::Uuid) {
        let mut presence = self.presence.lock().expect("presence lock poisoned");
        if let Some(connections) = presence.get_mut(&user_id) {
            connections.remove(&connection_id);
            if connections.is_empty() {
                presence.remove(&user_id);
            }
        }
    }

    /// Whether a user has at least one live connection.
    pub fn is_online(&self, user_id: uuid::Uuid) -> bool {
        self.presence
            .lock()
            .expect("presence lock poisoned")
            .contains_key(&user_id)
    }

    /// Number of users with at least one live connection.
    pub fn online_count(&self) -> usize {
        self.presence
            .lock()
            .expect("presence lock poisoned")
            .len()
    }

    /// Subscribe to a project's event channel.
    pub fn subscribe(&self, project_id: uuid::Uuid) -> broadcast::Receiver<ProjectEvent> {
        let mut channels = self.channels.lock().expect("channels lock poisoned");
        channels
            .entry(project_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publish an event to a project's subscribers.
    ///
    /// Events for projects nobody is watching are dropped.
    pub fn publish(&self, project_id: uuid::Uuid, event: ProjectEvent) {
        let channels = self.channels.lock().expect("channels lock poisoned");
        if let Some(sender) = channels.get(&project_id) {
            let delivered = sender.send(event).unwrap_or(0);
            debug!(project_id = %project_id, delivered, "Project event published");
        }
    }
}

impl Default for Realtime {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Realtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realtime")
            .field("online_users", &self.online_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_and_disconnect() {
        let realtime = Realtime::new();
        let user = uuid::Uuid::new_v4();
        let conn_a = uuid::Uuid::new_v4();
        let conn_b = uuid::Uuid::new_v4();

        assert!(!realtime.is_online(user));
        assert_eq!(realtime.connect(user, conn_a), 1);
        assert_eq!(realtime.connect(user, conn_b), 2);
        assert!(realtime.is_online(user));

        realtime.disconnect(user, conn_a);
        assert!(realtime.is_online(user));

        realtime.disconnect(user, conn_b);
        assert!(!realtime.is_online(user));
        assert_eq!(realtime.online_count(), 0);
    }

    #[test]
    fn test_disconnect_unknown_user_is_noop() {
        let realtime = Realtime::new();
        realtime.disconnect(uuid::Uuid::new_v4(), uuid::Uuid::new_v4());
        assert_eq!(realtime.online_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let realtime = Realtime::new();
        let project = uuid::Uuid::new_v4();
        let user = uuid::Uuid::new_v4();

        let mut receiver = realtime.subscribe(project);
        realtime.publish(project, ProjectEvent::new(EVENT_MEMBER_JOINED, project, user));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event, EVENT_MEMBER_JOINED);
        assert_eq!(event.project_id, project);
        assert_eq!(event.user_id, user);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let realtime = Realtime::new();
        let project = uuid::Uuid::new_v4();
        // No subscribe call; publish must not panic or leak a channel.
        realtime.publish(
            project,
            ProjectEvent::new(EVENT_REQUEST_RECEIVED, project, uuid::Uuid::new_v4()),
        );
    }

    #[tokio::test]
    async fn test_channels_are_isolated_per_project() {
        let realtime = Realtime::new();
        let project_a = uuid::Uuid::new_v4();
        let project_b = uuid::Uuid::new_v4();
        let user = uuid::Uuid::new_v4();

        let mut rx_a = realtime.subscribe(project_a);
        let _rx_b = realtime.subscribe(project_b);

        realtime.publish(
            project_a,
            ProjectEvent::new(EVENT_MEMBER_LEFT, project_a, user),
        );

        let event = rx_a.recv().await.unwrap();
        assert_eq!(event.project_id, project_a);
        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn test_event_serializes_with_name() {
        let event = ProjectEvent::new(
            EVENT_REQUEST_RECEIVED,
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("request:received"));
    }
}
