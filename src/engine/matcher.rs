//! Keyword selection and turn orchestration.

use tracing::debug;

use crate::engine::normalize::normalize;
use crate::engine::reassembly::apply;
use crate::script::FALLBACK_KEYWORD;
use crate::{DEFAULT_FALLBACK, INSULT_THRESHOLD, Outcome, PARITY_ERROR, Script, SessionState};

/// Produce the reply for one turn, mutating `state`.
///
/// Candidates are every rule whose keyword occurs in the normalized input,
/// fallback sentinel excluded, tried in descending priority; equal priorities
/// keep script order. A rule that queues a memory entry instead of replying
/// keeps the scan going, and also blocks the memory recall below: an entry is
/// never replayed on the turn that created it.
pub(crate) fn select_response(script: &Script, state: &mut SessionState, input: &str) -> String {
    if state.terminated() {
        return PARITY_ERROR.to_string();
    }

    let text = normalize(input);

    let mut candidates: Vec<usize> = (0..script.rules.len())
        .filter(|&index| {
            let rule = &script.rules[index];
            rule.keyword != FALLBACK_KEYWORD && text.contains(&rule.keyword)
        })
        .collect();
    candidates.sort_by(|&a, &b| script.rules[b].priority.cmp(&script.rules[a].priority));

    debug!(input = %text, candidates = candidates.len(), "turn started");

    let mut stored_memory = false;
    for index in candidates {
        match apply(script, index, &text, state) {
            Outcome::Reply(reply) => {
                let rule = &script.rules[index];
                if rule.insult {
                    state.insult_count += 1;
                    debug!(keyword = %rule.keyword, count = state.insult_count, "insult rule fired");
                    if state.insult_count >= INSULT_THRESHOLD {
                        return PARITY_ERROR.to_string();
                    }
                }
                debug!(keyword = %rule.keyword, priority = rule.priority, "rule replied");
                return reply;
            }
            Outcome::MemoryStored => {
                stored_memory = true;
            }
            Outcome::NoMatch => {}
        }
    }

    if !stored_memory {
        if let Some(entry) = state.memory.pop_front() {
            debug!(entry = %entry, "recalled memory");
            return entry;
        }
    }

    fallback_reply(script, state)
}

/// Next reply from the `@none` rule's first unit, or the fixed default when
/// the pack ships no fallback rule.
fn fallback_reply(script: &Script, state: &mut SessionState) -> String {
    let Some(index) = script.fallback else {
        return DEFAULT_FALLBACK.to_string();
    };
    let unit = &script.rules[index].units[0];
    let slot = state.next_reassembly_index(index, 0, unit.reassemblies.len());
    debug!(slot, "fallback reply");
    regex!(r"\{\d+\}").replace_all(&unit.reassemblies[slot], "").into_owned()
}
