// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type-ahead buffer and its search.

use core::fmt;

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str, chars};

/// Type-ahead tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAheadConfig {
    /// Idle time after which the buffer resets, in milliseconds.
    pub timeout_ms: u64,
    /// Prefer enabled matches over disabled ones.
    pub skip_disabled: bool,
}

impl Default for TypeAheadConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 500,
            skip_disabled: true,
        }
    }
}

impl TypeAheadConfig {
    /// Sets the idle timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets whether disabled items lose to enabled ones.
    #[must_use]
    pub fn with_skip_disabled(mut self, skip_disabled: bool) -> Self {
        self.skip_disabled = skip_disabled;
        self
    }
}

/// One searchable item.
///
/// Candidates are passed in ordinal order. They need not be contiguous: a
/// lazy list only offers the rows it has labels for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The item's ordinal in the list.
    pub ordinal: usize,
    /// The text matched against the buffer.
    pub label: &'a str,
    /// Whether the item is disabled.
    pub disabled: bool,
}

impl<'a> Candidate<'a> {
    /// Creates an enabled candidate.
    #[must_use]
    pub const fn new(ordinal: usize, label: &'a str) -> Self {
        Self {
            ordinal,
            label,
            disabled: false,
        }
    }

    /// Sets the disabled flag.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Cumulative prefix search with a timeout-based reset.
///
/// See the [crate docs](crate) for the search rules.
pub struct TypeAhead {
    config: TypeAheadConfig,
    buffer: String,
    last_input_at: Option<u64>,
    matcher: Matcher,
    utf32: Vec<char>,
}

impl fmt::Debug for TypeAhead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAhead")
            .field("config", &self.config)
            .field("buffer", &self.buffer)
            .field("last_input_at", &self.last_input_at)
            .finish_non_exhaustive()
    }
}

impl Default for TypeAhead {
    fn default() -> Self {
        Self::new(TypeAheadConfig::default())
    }
}

impl TypeAhead {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new(config: TypeAheadConfig) -> Self {
        Self {
            config,
            buffer: String::new(),
            last_input_at: None,
            matcher: Matcher::new(Config::DEFAULT),
            utf32: Vec::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> TypeAheadConfig {
        self.config
    }

    /// Replaces the configuration. The buffer is kept.
    pub fn set_config(&mut self, config: TypeAheadConfig) {
        self.config = config;
    }

    /// The normalized characters typed so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` while a buffer is pending expiry.
    ///
    /// Hosts use this to let Space extend the buffer instead of activating.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// When the buffer expires, if it is active.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        if self.buffer.is_empty() {
            return None;
        }
        self.last_input_at
            .map(|at| at.saturating_add(self.config.timeout_ms))
    }

    /// Clears the buffer and its deadline.
    pub fn cancel(&mut self) {
        self.buffer.clear();
        self.last_input_at = None;
    }

    /// Expires the buffer if `now` is at or past the deadline.
    ///
    /// Returns `true` if the buffer was cleared.
    pub fn on_timer(&mut self, now: u64) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                log::debug!("type-ahead buffer {:?} expired", self.buffer);
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Feeds one typed character.
    ///
    /// `candidates` must be in ordinal order and `current` is the ordinal of
    /// the focused item, if any. Returns the ordinal focus should move to, or
    /// `None` to leave focus where it is.
    pub fn on_char(
        &mut self,
        ch: char,
        now: u64,
        candidates: &[Candidate<'_>],
        current: Option<usize>,
    ) -> Option<usize> {
        self.on_timer(now);
        let ch = normalize(ch);
        if ch.is_control() {
            return None;
        }
        self.buffer.push(ch);
        self.last_input_at = Some(now);

        let buffer = core::mem::take(&mut self.buffer);
        let found = self.find(&buffer, candidates, current);
        self.buffer = buffer;
        if found.is_some() {
            return found;
        }

        if self.buffer.chars().count() > 1 {
            log::debug!("type-ahead restarting from {ch:?}");
            let mut single = [0; 4];
            let found = self.search(ch.encode_utf8(&mut single), candidates, current, false);
            if found.is_some() {
                self.buffer.clear();
                self.buffer.push(ch);
                return found;
            }
        }
        self.cancel();
        None
    }

    fn find(
        &mut self,
        buffer: &str,
        candidates: &[Candidate<'_>],
        current: Option<usize>,
    ) -> Option<usize> {
        let mut chars = buffer.chars();
        let first = chars.next()?;
        if chars.as_str().is_empty() {
            return self.search(buffer, candidates, current, false);
        }
        let found = self.search(buffer, candidates, current, true);
        if found.is_some() || !buffer.chars().all(|c| c == first) {
            return found;
        }
        let mut single = [0; 4];
        self.search(first.encode_utf8(&mut single), candidates, current, false)
    }

    /// Scans `candidates` for a label starting with `needle`, beginning at
    /// (or after) `current` and wrapping around.
    fn search(
        &mut self,
        needle: &str,
        candidates: &[Candidate<'_>],
        current: Option<usize>,
        inclusive: bool,
    ) -> Option<usize> {
        let atom = Atom::new(
            needle,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Prefix,
            false,
        );
        let start = current.map_or(0, |current| {
            candidates
                .iter()
                .position(|c| {
                    if inclusive {
                        c.ordinal >= current
                    } else {
                        c.ordinal > current
                    }
                })
                .unwrap_or(candidates.len())
        });
        let (before, after) = candidates.split_at(start);

        let mut disabled_match = None;
        for candidate in after.iter().chain(before) {
            let haystack = Utf32Str::new(candidate.label, &mut self.utf32);
            if atom.score(haystack, &mut self.matcher).is_none() {
                continue;
            }
            if !candidate.disabled || !self.config.skip_disabled {
                return Some(candidate.ordinal);
            }
            disabled_match.get_or_insert(candidate.ordinal);
        }
        disabled_match
    }
}

/// Case-folds `ch` and strips Latin diacritics.
fn normalize(ch: char) -> char {
    chars::to_lower_case(chars::normalize(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates<'a>(labels: &[&'a str]) -> Vec<Candidate<'a>> {
        labels
            .iter()
            .enumerate()
            .map(|(ordinal, label)| Candidate::new(ordinal, label))
            .collect()
    }

    #[test]
    fn single_character_searches_after_current() {
        let items = candidates(&["Apple", "Apricot", "Avocado", "Banana"]);
        let mut ta = TypeAhead::default();
        assert_eq!(ta.on_char('a', 0, &items, Some(0)), Some(1));
    }

    #[test]
    fn repeated_character_cycles() {
        let items = candidates(&["Apple", "Apricot", "Banana", "Avocado"]);
        let mut ta = TypeAhead::default();
        let mut focus = None;
        let mut seen = Vec::new();
        for t in 0..4 {
            focus = ta.on_char('a', t * 10, &items, focus).or(focus);
            seen.push(focus);
        }
        assert_eq!(seen, [Some(0), Some(1), Some(3), Some(0)]);
        assert_eq!(ta.buffer(), "aaaa");
    }

    #[test]
    fn diacritics_and_case_are_ignored() {
        let items = candidates(&["apple", "Éclair", "eggplant"]);
        let mut ta = TypeAhead::default();
        assert_eq!(ta.on_char('E', 0, &items, None), Some(1));
        assert_eq!(ta.buffer(), "e");
        assert_eq!(ta.on_char('C', 1, &items, Some(1)), Some(1));
    }

    #[test]
    fn no_match_restarts_from_new_character() {
        let items = candidates(&["Apple", "Banana", "Cherry"]);
        let mut ta = TypeAhead::default();
        assert_eq!(ta.on_char('a', 0, &items, None), Some(0));
        assert_eq!(ta.on_char('c', 10, &items, Some(0)), Some(2));
        assert_eq!(ta.buffer(), "c");
    }

    #[test]
    fn no_match_at_all_clears_buffer() {
        let items = candidates(&["Apple", "Banana"]);
        let mut ta = TypeAhead::default();
        ta.on_char('a', 0, &items, None);
        assert_eq!(ta.on_char('z', 10, &items, Some(0)), None);
        assert!(!ta.is_active());
        assert_eq!(ta.deadline(), None);
    }

    #[test]
    fn expiry_starts_a_fresh_buffer() {
        let items = candidates(&["Apple", "Banana", "Pear"]);
        let mut ta = TypeAhead::default();
        ta.on_char('a', 0, &items, None);
        assert_eq!(ta.deadline(), Some(500));
        assert!(!ta.on_timer(499));
        // Late input after the deadline does not extend "a" into "ap".
        assert_eq!(ta.on_char('p', 700, &items, Some(0)), Some(2));
        assert_eq!(ta.buffer(), "p");
    }

    #[test]
    fn control_characters_are_ignored() {
        let items = candidates(&["Apple"]);
        let mut ta = TypeAhead::default();
        assert_eq!(ta.on_char('\n', 0, &items, None), None);
        assert!(!ta.is_active());
    }

    #[test]
    fn first_match_wins_without_skip_disabled() {
        let items = vec![
            Candidate::new(0, "Bread").with_disabled(true),
            Candidate::new(1, "Butter"),
        ];
        let mut ta = TypeAhead::new(TypeAheadConfig::default().with_skip_disabled(false));
        assert_eq!(ta.on_char('b', 0, &items, None), Some(0));
    }
}
