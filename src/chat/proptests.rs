//! Property-based tests for the chat state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::matcher::ResponseMatcher;
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ChatContext {
    ChatContext::new(
        Duration::from_millis(1000),
        ResponseMatcher::portfolio_rules(),
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_waiting_state() -> impl Strategy<Value = ChatState> {
    ("[a-zA-Z ?!]{1,30}", 1u64..100).prop_map(|(user_text, reply_seq)| ChatState::AwaitingReply {
        user_text,
        reply_seq,
    })
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![
        Just(ChatState::Closed),
        Just(ChatState::Idle),
        arb_waiting_state(),
    ]
}

fn arb_submit_event() -> impl Strategy<Value = Event> {
    ("[a-zA-Z ?!]{0,30}", 1u64..100).prop_map(|(text, seq)| Event::Submit { text, seq })
}

fn arb_whitespace_submit_event() -> impl Strategy<Value = Event> {
    ("[ \t]{0,8}", 1u64..100).prop_map(|(text, seq)| Event::Submit { text, seq })
}

fn arb_timer_event() -> impl Strategy<Value = Event> {
    (1u64..100).prop_map(|seq| Event::ReplyTimerFired { seq })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::ToggleOpen),
        arb_submit_event(),
        arb_whitespace_submit_event(),
        arb_timer_event(),
    ]
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_state(state: &ChatState) -> bool {
    match state {
        // An accepted submission is never empty after trimming
        ChatState::AwaitingReply { user_text, .. } => !user_text.trim().is_empty(),
        ChatState::Closed | ChatState::Idle => true,
    }
}

fn effects_are_valid(effects: &[Effect], new_state: &ChatState) -> bool {
    let schedules = effects
        .iter()
        .any(|e| matches!(e, Effect::ScheduleReply { .. }));
    let appends_bot = effects
        .iter()
        .any(|e| matches!(e, Effect::AppendBotMessage { .. }));

    // A reply timer is only scheduled when we end up waiting for it
    if schedules && !matches!(new_state, ChatState::AwaitingReply { .. }) {
        return false;
    }

    // A bot message only lands once the wait is over
    if appends_bot && !matches!(new_state, ChatState::Idle) {
        return false;
    }

    true
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: valid state and effects after any event sequence
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..20)) {
        let mut state = ChatState::Closed;
        let ctx = test_context();

        for event in events {
            match transition(&state, &ctx, event) {
                Ok(result) => {
                    prop_assert!(
                        effects_are_valid(&result.effects, &result.new_state),
                        "Invalid effects for state {:?}: {:?}",
                        result.new_state,
                        result.effects
                    );
                    state = result.new_state;
                    prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
                }
                Err(_) => { /* Rejected submission, state untouched */ }
            }
        }
    }

    // Invariant 2: an accepted submission always lands in the transcript
    #[test]
    fn prop_accepted_submit_appends_the_user_text(
        text in "[a-zA-Z ?!]{1,30}",
        seq in 1u64..100,
    ) {
        prop_assume!(!text.trim().is_empty());

        let result = transition(
            &ChatState::Idle,
            &test_context(),
            Event::Submit { text: text.clone(), seq },
        );
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert!(result.new_state.is_typing());
        prop_assert!(
            result.effects.contains(&Effect::AppendUserMessage { text }),
            "User text missing from effects: {:?}",
            result.effects
        );
    }

    // Invariant 3: every way out of AwaitingReply either consumes the timer
    // or cancels it; the timer can never outlive its state
    #[test]
    fn prop_leaving_waiting_consumes_or_cancels_timer(
        state in arb_waiting_state(),
        event in arb_event(),
    ) {
        let ctx = test_context();
        if let Ok(result) = transition(&state, &ctx, event) {
            if !matches!(result.new_state, ChatState::AwaitingReply { .. }) {
                let consumed = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::AppendBotMessage { .. }));
                let cancelled = result.effects.contains(&Effect::CancelReply);
                prop_assert!(
                    consumed || cancelled,
                    "Left AwaitingReply without consuming or cancelling: {:?}",
                    result.effects
                );
            }
        }
    }

    // Invariant 4: whitespace-only submissions never change anything
    #[test]
    fn prop_whitespace_submit_is_a_noop(
        text in "[ \t\n]{0,10}",
        seq in 1u64..100,
        state in arb_state(),
    ) {
        if let Ok(result) = transition(&state, &test_context(), Event::Submit { text, seq }) {
            prop_assert_eq!(result.new_state, state);
            prop_assert!(result.effects.is_empty());
        }
    }

    // Invariant 5: a timer fire with the wrong seq never mutates anything
    #[test]
    fn prop_mismatched_timer_fire_is_a_noop(
        state in arb_state(),
        seq in 1u64..100,
    ) {
        let live_seq = match &state {
            ChatState::AwaitingReply { reply_seq, .. } => Some(*reply_seq),
            _ => None,
        };
        prop_assume!(live_seq != Some(seq));

        let result = transition(&state, &test_context(), Event::ReplyTimerFired { seq });
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert_eq!(result.new_state, state);
        prop_assert!(result.effects.is_empty());
    }

    // Invariant 6: the bot reply always comes from the matcher applied to
    // the original submitted text
    #[test]
    fn prop_reply_matches_original_text(text in "[a-zA-Z ?!]{1,30}", seq in 1u64..100) {
        prop_assume!(!text.trim().is_empty());
        let ctx = test_context();

        let submitted = transition(
            &ChatState::Idle,
            &ctx,
            Event::Submit { text: text.clone(), seq },
        ).unwrap();
        let fired = transition(
            &submitted.new_state,
            &ctx,
            Event::ReplyTimerFired { seq },
        ).unwrap();

        let expected = ctx.matcher.respond(&text).to_string();
        prop_assert!(
            fired.effects.contains(&Effect::AppendBotMessage { text: expected }),
            "Reply did not come from the matcher: {:?}",
            fired.effects
        );
    }
}

// ============================================================================
// Sequence Tests
// ============================================================================

/// Transcript appends across a long random-ish session only ever grow, and
/// bot messages never outnumber accepted user messages.
#[test]
fn test_append_only_transcript_over_session() {
    let ctx = test_context();
    let mut state = ChatState::Closed;
    let mut user_appends = 0usize;
    let mut bot_appends = 0usize;
    let mut seq = 0u64;

    let script: Vec<Event> = vec![
        Event::ToggleOpen,
        submit("hello", &mut seq),
        Event::ReplyTimerFired { seq: 1 },
        submit("  ", &mut seq),
        submit("where are you located", &mut seq),
        Event::ToggleOpen,
        Event::ReplyTimerFired { seq: 3 },
        Event::ToggleOpen,
        submit("available?", &mut seq),
        Event::ReplyTimerFired { seq: 4 },
    ];

    for event in script {
        if let Ok(result) = transition(&state, &ctx, event) {
            for effect in &result.effects {
                match effect {
                    Effect::AppendUserMessage { .. } => user_appends += 1,
                    Effect::AppendBotMessage { .. } => bot_appends += 1,
                    _ => {}
                }
            }
            state = result.new_state;
        }
    }

    // hello + where + available submitted; the "where" reply was abandoned
    // by the close, its later fire ignored
    assert_eq!(user_appends, 3);
    assert_eq!(bot_appends, 2);
    assert_eq!(state, ChatState::Idle);
}

fn submit(text: &str, seq: &mut u64) -> Event {
    *seq += 1;
    Event::Submit {
        text: text.to_string(),
        seq: *seq,
    }
}
