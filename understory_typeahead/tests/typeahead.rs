// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-ahead behavior as a list host sees it.

use understory_typeahead::{Candidate, TypeAhead, TypeAheadConfig};

/// Feeds `text` one character per `step` milliseconds, moving focus as a host would.
fn type_text(
    typeahead: &mut TypeAhead,
    text: &str,
    start: u64,
    step: u64,
    candidates: &[Candidate<'_>],
    mut focus: Option<usize>,
) -> Option<usize> {
    let mut now = start;
    for ch in text.chars() {
        focus = typeahead.on_char(ch, now, candidates, focus).or(focus);
        now += step;
    }
    focus
}

#[test]
fn cumulative_prefix_prefers_first_ordinal() {
    let candidates = [
        Candidate::new(0, "Apple"),
        Candidate::new(1, "Apricot"),
        Candidate::new(2, "Blueberry"),
    ];
    let mut typeahead = TypeAhead::default();
    let focus = type_text(&mut typeahead, "ap", 0, 100, &candidates, None);
    assert_eq!(focus, Some(0));
}

#[test]
fn cumulative_prefix_refines_to_later_item() {
    let candidates = [
        Candidate::new(0, "Apple"),
        Candidate::new(1, "Apricot"),
        Candidate::new(2, "Blueberry"),
    ];
    let mut typeahead = TypeAhead::default();
    let focus = type_text(&mut typeahead, "apr", 0, 100, &candidates, None);
    assert_eq!(focus, Some(1));
}

#[test]
fn slow_typing_starts_over() {
    let candidates = [
        Candidate::new(0, "Apple"),
        Candidate::new(1, "Pear"),
        Candidate::new(2, "Plum"),
    ];
    let mut typeahead = TypeAhead::default();
    // 600 ms between keys: "a" then a fresh "p".
    let focus = type_text(&mut typeahead, "ap", 0, 600, &candidates, None);
    assert_eq!(focus, Some(1));
    assert_eq!(typeahead.buffer(), "p");
}

#[test]
fn disabled_match_loses_to_enabled_match() {
    let candidates = [
        Candidate::new(0, "Lemon"),
        Candidate::new(1, "Kiwi").with_disabled(true),
        Candidate::new(2, "Kumquat"),
    ];
    let mut typeahead = TypeAhead::default();
    assert_eq!(typeahead.on_char('k', 0, &candidates, Some(0)), Some(2));
}

#[test]
fn disabled_match_is_used_when_it_is_the_only_one() {
    let candidates = [
        Candidate::new(0, "Lemon"),
        Candidate::new(1, "Kiwi").with_disabled(true),
    ];
    let mut typeahead = TypeAhead::new(TypeAheadConfig::default());
    assert_eq!(typeahead.on_char('k', 0, &candidates, Some(0)), Some(1));
}

#[test]
fn sparse_candidates_wrap_by_ordinal() {
    // Only some rows of a lazy list have labels.
    let candidates = [
        Candidate::new(3, "Cherry"),
        Candidate::new(10, "Cranberry"),
        Candidate::new(42, "Currant"),
    ];
    let mut typeahead = TypeAhead::default();
    assert_eq!(typeahead.on_char('c', 0, &candidates, Some(20)), Some(42));
    assert_eq!(typeahead.on_char('c', 50, &candidates, Some(42)), Some(3));
}

#[test]
fn spaces_continue_an_active_buffer() {
    let candidates = [
        Candidate::new(0, "New Jersey"),
        Candidate::new(1, "New York"),
        Candidate::new(2, "Newark"),
    ];
    let mut typeahead = TypeAhead::default();
    let focus = type_text(&mut typeahead, "new y", 0, 50, &candidates, None);
    assert_eq!(focus, Some(1));
}

#[test]
fn cancel_clears_deadline() {
    let candidates = [Candidate::new(0, "Apple")];
    let mut typeahead = TypeAhead::default();
    typeahead.on_char('a', 1_000, &candidates, None);
    assert_eq!(typeahead.deadline(), Some(1_500));
    typeahead.cancel();
    assert_eq!(typeahead.deadline(), None);
    assert!(!typeahead.on_timer(2_000));
}

#[test]
fn custom_timeout() {
    let candidates = [Candidate::new(0, "Apple"), Candidate::new(1, "Apricot")];
    let mut typeahead = TypeAhead::new(TypeAheadConfig::default().with_timeout_ms(2_000));
    let focus = type_text(&mut typeahead, "apr", 0, 900, &candidates, None);
    assert_eq!(focus, Some(1));
}
