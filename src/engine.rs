//! Response-generation engine.
//!
//! This module is the entry point for the conversational core. The engine is
//! split into focused submodules under `src/engine/` while keeping crate
//! paths stable (for example `crate::engine::select_response`).
//!
//! ## How the parts work together
//!
//! At a high level, answering one line of input is a pipeline:
//!
//! ```text
//! input ── normalize ────────── (normalize.rs)
//!              │
//!              v
//!       keyword scan ────────── (matcher.rs)
//!        - substring candidates, fallback sentinel excluded
//!        - descending priority, ties keep script order
//!              │
//!              v
//!       unit trial per rule ─── (reassembly.rs)
//!        - first matching decomposition wins
//!        - round-robin template pick, cursor in session state
//!        - {N} filled with reflected captures (reflect.rs)
//!              │
//!        ┌─────┼──────────────┐
//!        v     v              v
//!     reply   memory        no match
//!        │    queued           │
//!        │      │              v
//!        │      └──> keep trying lower-priority rules
//!        │                     │
//!        v                     v
//!     output        memory recall, else fallback rule
//! ```
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: canonical input form (case, whitespace, trailing
//!   punctuation, diacritics).
//! - `matcher.rs`: candidate selection, priority ordering, insult accounting
//!   against the parity threshold, memory recall and the fallback reply.
//! - `reassembly.rs`: decomposition trial, round-robin template cycling and
//!   placeholder filling, including the `@memory:` store directive.
//! - `reflect.rs`: word-by-word pronoun reflection of captured text.
//!
//! ## Public surface
//!
//! The engine is internal; library consumers go through
//! [`Session`](crate::Session), which owns the per-conversation state and
//! delegates each turn to [`select_response`].
//!
//! ## Debugging
//!
//! The engine emits `tracing` debug events for each turn: candidate counts, the
//! rule that replied, memory stores and recalls, insult activations. Run the
//! binary with `RUST_LOG=sibyl=debug` to see them on stderr.

#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/reassembly.rs"]
mod reassembly;
#[path = "engine/reflect.rs"]
mod reflect;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

#[allow(unused_imports)]
pub(crate) use matcher::select_response;
#[allow(unused_imports)]
pub(crate) use normalize::{normalize, strip_accents};
#[allow(unused_imports)]
pub(crate) use reflect::reflect;
