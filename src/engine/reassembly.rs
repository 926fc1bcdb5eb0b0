//! Decomposition and reassembly: one rule against one line.

use tracing::debug;

use crate::engine::reflect::reflect;
use crate::{Outcome, Script, SessionState};

/// Prefix marking a reassembly template as a memory-store directive.
pub(crate) const MEMORY_PREFIX: &str = "@memory:";

/// Try the units of `rule_index` in declared order against `text`.
///
/// The first unit whose pattern matches settles the turn for this rule: its
/// round-robin cursor advances and its selected template is either filled
/// into a direct [`Outcome::Reply`] or, for a memory directive, filled and
/// queued on the session. Unit order inside a rule is significant and never
/// re-sorted.
pub(crate) fn apply(script: &Script, rule_index: usize, text: &str, state: &mut SessionState) -> Outcome {
    let rule = &script.rules[rule_index];
    for (unit_index, unit) in rule.units.iter().enumerate() {
        let Some(caps) = unit.pattern.captures(text) else {
            continue;
        };

        let slot = state.next_reassembly_index(rule_index, unit_index, unit.reassemblies.len());
        let template = &unit.reassemblies[slot];

        return match template.strip_prefix(MEMORY_PREFIX) {
            Some(deferred) => {
                let entry = fill_template(script, deferred, &caps);
                debug!(keyword = %rule.keyword, entry = %entry, "queued memory");
                state.memory.push_back(entry);
                Outcome::MemoryStored
            }
            None => Outcome::Reply(fill_template(script, template, &caps)),
        };
    }
    Outcome::NoMatch
}

/// Replace each `{N}` placeholder with the reflected, trimmed text of capture
/// group N. Placeholders whose group is absent or out of range are dropped.
fn fill_template(script: &Script, template: &str, caps: &regex::Captures<'_>) -> String {
    let mut filled = template.to_string();
    for group in 1..caps.len() {
        let Some(capture) = caps.get(group) else {
            continue;
        };
        let reflected = reflect(capture.as_str().trim(), &script.reflections);
        filled = filled.replace(&format!("{{{group}}}"), &reflected);
    }
    regex!(r"\{\d+\}").replace_all(&filled, "").into_owned()
}
