extern crate self as sibyl;

#[macro_use]
mod macros;

mod api;
mod engine;
mod script;

pub use api::Session;
pub use script::{Language, Messages, Script, ScriptError};

use std::collections::VecDeque;

use regex::Regex;

// --- Internal types ---------------------------------------------------------

/// Fixed reply emitted when a session crosses the insult threshold, and for
/// every turn after that.
pub const PARITY_ERROR: &str = "PARITY ERROR!!! PARITY ERROR!!! SESSION TERMINATED.";

/// Insult-rule activations that push a session into the terminal state.
pub(crate) const INSULT_THRESHOLD: u32 = 4;

/// Reply used when a script ships without a catch-all fallback rule.
pub(crate) const DEFAULT_FALLBACK: &str = "Please go on.";

/// One keyword rule: the substring trigger that makes it a candidate, the
/// priority deciding its place in the candidate order, and the decomposition
/// units tried against the input once it is selected.
///
/// Rules are immutable after [`Script`] compilation; all per-conversation
/// bookkeeping lives in [`SessionState`].
#[derive(Debug)]
pub(crate) struct Rule {
    /// Normalized trigger, or the literal `@none` fallback sentinel.
    pub(crate) keyword: String,
    /// Higher wins; equal priorities keep script order.
    pub(crate) priority: i32,
    /// Replies from this rule count toward the parity threshold.
    pub(crate) insult: bool,
    pub(crate) units: Vec<DecompUnit>,
}

/// A decomposition pattern and the reassembly templates cycled through each
/// time it matches. The cycle position is session state, not rule state.
#[derive(Debug)]
pub(crate) struct DecompUnit {
    /// Compiled case-insensitively from accent-stripped pattern text.
    pub(crate) pattern: Regex,
    /// Non-empty; enforced at script load.
    pub(crate) reassemblies: Vec<String>,
}

/// What trying one rule against one input line produced.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// A visible reply; the turn is over.
    Reply(String),
    /// A memory directive fired: text was queued for a later turn and the
    /// matcher keeps trying lower-priority candidates.
    MemoryStored,
    /// No unit matched; the matcher moves on.
    NoMatch,
}

/// Mutable per-conversation state.
///
/// `cursors` is a table of round-robin positions parallel to the script's
/// rules and their units, so any number of sessions can share one immutable
/// [`Script`] without observing each other.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) cursors: Vec<Vec<usize>>,
    pub(crate) memory: VecDeque<String>,
    pub(crate) insult_count: u32,
}

impl SessionState {
    pub(crate) fn for_script(script: &Script) -> Self {
        SessionState {
            cursors: script.rules.iter().map(|rule| vec![0; rule.units.len()]).collect(),
            memory: VecDeque::new(),
            insult_count: 0,
        }
    }

    /// Current reassembly index for a unit, advancing the cursor modulo `len`.
    pub(crate) fn next_reassembly_index(&mut self, rule: usize, unit: usize, len: usize) -> usize {
        let slot = &mut self.cursors[rule][unit];
        let index = *slot;
        *slot = (*slot + 1) % len;
        index
    }

    pub(crate) fn terminated(&self) -> bool {
        self.insult_count >= INSULT_THRESHOLD
    }

    /// Back to the initial state: empty memory, zero insults, all cursors at 0.
    pub(crate) fn reset(&mut self) {
        self.memory.clear();
        self.insult_count = 0;
        for row in &mut self.cursors {
            row.fill(0);
        }
    }
}
