//! ChatHub behaviour across several connections

use pretty_assertions::assert_eq;
use uuid::Uuid;

use scoutlink::backend::ChatHub;
use scoutlink::shared::{EventType, RealtimeEvent};

#[tokio::test]
async fn test_every_connection_of_a_user_receives_events() {
    let hub = ChatHub::new();
    let user = Uuid::new_v4();
    let mut phone = hub.subscribe(user);
    let mut laptop = hub.subscribe(user);

    let reached = hub.publish(user, RealtimeEvent::notification("New offer", "Harbour FC"));
    assert_eq!(reached, 2);
    assert_eq!(phone.recv().await.unwrap().event_type, EventType::Notification);
    assert_eq!(laptop.recv().await.unwrap().event_type, EventType::Notification);
}

#[tokio::test]
async fn test_events_stay_with_their_user() {
    let hub = ChatHub::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let mut alice_rx = hub.subscribe(alice);
    let _bob_rx = hub.subscribe(bob);

    hub.publish(bob, RealtimeEvent::typing(Uuid::new_v4(), alice, true));
    assert!(alice_rx.try_recv().is_err());
}

#[test]
fn test_cleanup_after_disconnect() {
    let hub = ChatHub::new();
    let user = Uuid::new_v4();
    {
        let _rx = hub.subscribe(user);
        assert_eq!(hub.subscriber_count(user), 1);
    }
    assert_eq!(hub.cleanup_inactive_channels(), 1);
    assert_eq!(hub.channel_count(), 0);
    assert_eq!(hub.publish(user, RealtimeEvent::status("pong", None)), 0);
}
