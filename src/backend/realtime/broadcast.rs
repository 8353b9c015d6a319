/**
 * Real-time Event Broadcasting
 *
 * This module provides the broadcast sender type and the send helper used
 * by the hub. Events are sent with `tokio::sync::broadcast`, so every
 * receiver subscribed to a channel gets its own copy.
 */

use crate::shared::RealtimeEvent;
use tokio::sync::broadcast;

/// Capacity of each per-user channel. A receiver that falls further behind
/// than this skips the oldest events.
pub const CHANNEL_CAPACITY: usize = 100;

/// Real-time update event broadcast
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Create a new broadcast channel sender
pub fn channel() -> RealtimeEventBroadcast {
    broadcast::channel(CHANNEL_CAPACITY).0
}

/// Broadcast a real-time event to all subscribers of one channel
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no subscribers)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(e) => {
            tracing::debug!("[Realtime] No subscribers to receive event: {:?}", e.0.event_type);
            0
        }
    }
}
