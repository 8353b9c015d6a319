/**
 * Chat Hub
 *
 * Routes real-time events to users. Each user gets one broadcast channel,
 * created on first subscribe; every open WebSocket of that user holds a
 * receiver on it. Publishing to a user with no open socket is a no-op.
 *
 * Channels whose receivers are all gone are dropped by
 * `cleanup_inactive_channels`, which the server runs periodically.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::backend::realtime::broadcast::{broadcast_event, channel, RealtimeEventBroadcast};
use crate::shared::RealtimeEvent;

#[derive(Clone, Default)]
pub struct ChatHub {
    channels: Arc<Mutex<HashMap<Uuid, RealtimeEventBroadcast>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, RealtimeEventBroadcast>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.channels.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to events addressed to `user_id`
    pub fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<RealtimeEvent> {
        self.lock().entry(user_id).or_insert_with(channel).subscribe()
    }

    /// Deliver an event to every open connection of `user_id`
    ///
    /// Returns the number of receivers reached.
    pub fn publish(&self, user_id: Uuid, event: RealtimeEvent) -> usize {
        let sender = self.lock().get(&user_id).cloned();
        match sender {
            Some(sender) => broadcast_event(&sender, event),
            None => 0,
        }
    }

    /// Deliver the same event to several users
    pub fn publish_many(&self, user_ids: &[Uuid], event: RealtimeEvent) -> usize {
        user_ids
            .iter()
            .map(|user_id| self.publish(*user_id, event.clone()))
            .sum()
    }

    /// Clean up channels without subscribers
    pub fn cleanup_inactive_channels(&self) -> usize {
        let mut channels = self.lock();
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    /// Number of open connections for a user
    pub fn subscriber_count(&self, user_id: Uuid) -> usize {
        self.lock()
            .get(&user_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    pub fn channel_count(&self) -> usize {
        self.lock().len()
    }
}
