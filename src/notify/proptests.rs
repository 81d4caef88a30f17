//! Property-based tests for the notification store
//!
//! The store is driven with arbitrary mutation sequences and compared
//! against an independently tracked model, so a cached counter that drifts
//! would be caught immediately.

use super::*;
use chrono::{Duration, Utc};
use proptest::prelude::*;
use uuid::Uuid;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_kind() -> impl Strategy<Value = NotificationKind> {
    prop_oneof![
        Just(NotificationKind::Info),
        Just(NotificationKind::Success),
        Just(NotificationKind::Warning),
    ]
}

fn arb_notification() -> impl Strategy<Value = Notification> {
    ("[a-zA-Z ]{1,20}", "[a-zA-Z ]{1,40}", arb_kind(), any::<bool>(), 0i64..10_000).prop_map(
        |(title, message, kind, read, age_minutes)| {
            Notification::new(
                title,
                message,
                kind,
                Utc::now() - Duration::minutes(age_minutes),
                read,
            )
        },
    )
}

/// A mutation against the store. Index-based ops are resolved against the
/// current list so they stay meaningful as entries are dismissed.
#[derive(Debug, Clone)]
enum Op {
    MarkRead(usize),
    MarkReadUnknown,
    Dismiss(usize),
    DismissUnknown,
    DismissWelcome,
    WelcomeTimerFired(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::MarkRead),
        Just(Op::MarkReadUnknown),
        (0usize..8).prop_map(Op::Dismiss),
        Just(Op::DismissUnknown),
        Just(Op::DismissWelcome),
        (0u64..4).prop_map(Op::WelcomeTimerFired),
    ]
}

fn target_id(store: &NotificationStore, index: usize) -> Option<Uuid> {
    let notifications = store.notifications();
    if notifications.is_empty() {
        None
    } else {
        Some(notifications[index % notifications.len()].id)
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: unread_count always equals an independent recount of the
    // model after any mutation sequence
    #[test]
    fn prop_unread_count_never_drifts(
        seed in proptest::collection::vec(arb_notification(), 0..8),
        ops in proptest::collection::vec(arb_op(), 0..30),
    ) {
        let mut store = NotificationStore::new();
        // Model: (id, read) pairs tracked independently of the store
        let mut model: Vec<(Uuid, bool)> = Vec::new();
        for notification in seed {
            model.push((notification.id, notification.read));
            store.push(notification);
        }

        for op in ops {
            match op {
                Op::MarkRead(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.mark_read(id);
                        for entry in &mut model {
                            if entry.0 == id {
                                entry.1 = true;
                            }
                        }
                    }
                }
                Op::MarkReadUnknown => {
                    store.mark_read(Uuid::new_v4());
                }
                Op::Dismiss(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.dismiss(id);
                        model.retain(|entry| entry.0 != id);
                    }
                }
                Op::DismissUnknown => {
                    store.dismiss(Uuid::new_v4());
                }
                Op::DismissWelcome => {
                    store.dismiss_welcome();
                }
                Op::WelcomeTimerFired(seq) => {
                    store.welcome_timer_fired(seq);
                }
            }

            let expected = model.iter().filter(|(_, read)| !read).count();
            prop_assert_eq!(
                store.unread_count(),
                expected,
                "unread_count drifted from the model"
            );
            prop_assert_eq!(store.notifications().len(), model.len());
        }
    }

    // Invariant 2: read flags only ever go false -> true
    #[test]
    fn prop_read_flags_are_one_directional(
        seed in proptest::collection::vec(arb_notification(), 1..8),
        ops in proptest::collection::vec(arb_op(), 0..30),
    ) {
        let mut store = NotificationStore::new();
        for notification in seed {
            store.push(notification);
        }

        let mut read_ids: Vec<Uuid> = store
            .notifications()
            .iter()
            .filter(|n| n.read)
            .map(|n| n.id)
            .collect();

        for op in ops {
            match op {
                Op::MarkRead(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.mark_read(id);
                    }
                }
                Op::Dismiss(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.dismiss(id);
                    }
                }
                Op::MarkReadUnknown => {
                    store.mark_read(Uuid::new_v4());
                }
                Op::DismissUnknown
                | Op::DismissWelcome
                | Op::WelcomeTimerFired(_) => {}
            }

            // Everything read before is still read (unless dismissed)
            for id in &read_ids {
                if let Some(n) = store.notifications().iter().find(|n| n.id == *id) {
                    prop_assert!(n.read, "read flag reverted to unread");
                }
            }
            read_ids = store
                .notifications()
                .iter()
                .filter(|n| n.read)
                .map(|n| n.id)
                .collect();
        }
    }

    // Invariant 3: once hidden, the welcome banner never reappears
    #[test]
    fn prop_welcome_never_reappears(ops in proptest::collection::vec(arb_op(), 1..30)) {
        let mut store = NotificationStore::with_seed_data();
        let mut hidden = false;

        for op in ops {
            match op {
                Op::DismissWelcome => {
                    store.dismiss_welcome();
                }
                Op::WelcomeTimerFired(seq) => {
                    store.welcome_timer_fired(seq);
                }
                Op::MarkRead(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.mark_read(id);
                    }
                }
                Op::Dismiss(index) => {
                    if let Some(id) = target_id(&store, index) {
                        store.dismiss(id);
                    }
                }
                Op::MarkReadUnknown | Op::DismissUnknown => {}
            }

            if hidden {
                prop_assert!(!store.welcome_visible(), "welcome banner reappeared");
            }
            hidden = hidden || !store.welcome_visible();
        }
    }

    // Invariant 4: dismiss removes exactly the targeted entry
    #[test]
    fn prop_dismiss_removes_only_the_target(
        seed in proptest::collection::vec(arb_notification(), 1..8),
        index in 0usize..8,
    ) {
        let mut store = NotificationStore::new();
        for notification in seed {
            store.push(notification);
        }

        let target = target_id(&store, index).unwrap();
        let survivors: Vec<Uuid> = store
            .notifications()
            .iter()
            .map(|n| n.id)
            .filter(|id| *id != target)
            .collect();

        prop_assert!(store.dismiss(target));

        let remaining: Vec<Uuid> = store.notifications().iter().map(|n| n.id).collect();
        prop_assert_eq!(remaining, survivors);
    }
}
