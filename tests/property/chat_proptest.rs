//! Chat participant ordering and message page limits

use proptest::prelude::*;
use uuid::Uuid;

use scoutlink::shared::scouting::chat::{ordered_pair, MAX_MESSAGE_PAGE};
use scoutlink::shared::scouting::ListMessagesQuery;

proptest! {
    #[test]
    fn ordered_pair_is_symmetric(a in any::<u128>(), b in any::<u128>()) {
        let (a, b) = (Uuid::from_u128(a), Uuid::from_u128(b));
        prop_assert_eq!(ordered_pair(a, b), ordered_pair(b, a));
        let (low, high) = ordered_pair(a, b);
        prop_assert!(low <= high);
    }

    #[test]
    fn message_limit_stays_in_bounds(limit in proptest::option::of(any::<u32>())) {
        let query = ListMessagesQuery { limit, before: None, before_id: None };
        prop_assert!((1..=MAX_MESSAGE_PAGE).contains(&query.limit()));
    }
}
