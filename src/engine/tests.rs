//! Behavioral tests for the response pipeline, driven by small inline packs.

use std::sync::Arc;

use crate::{PARITY_ERROR, Script, Session};

const NO_REFLECTIONS: &str = "reflections: {}\n";

fn session(rules_yaml: &str) -> Session {
    let script = Script::from_yaml(rules_yaml, NO_REFLECTIONS).expect("fixture pack compiles");
    Session::new(Arc::new(script))
}

#[test]
fn reassemblies_cycle_round_robin() {
    let mut session = session(
        r#"
rules:
  - keyword: "ping"
    priority: 1
    patterns:
      - decomposition: 'ping'
        reassemblies: ["A", "B", "C"]
"#,
    );
    let replies: Vec<String> = (0..4).map(|_| session.respond("ping")).collect();
    assert_eq!(replies, ["A", "B", "C", "A"]);
}

#[test]
fn higher_priority_rule_is_tried_first() {
    let mut session = session(
        r#"
rules:
  - keyword: "alpha"
    priority: 1
    patterns:
      - decomposition: 'alpha'
        reassemblies: ["low"]
  - keyword: "alpha"
    priority: 9
    patterns:
      - decomposition: 'alpha (\d+)'
        reassemblies: ["high {1}"]
"#,
    );
    assert_eq!(session.respond("alpha 42"), "high 42");
}

#[test]
fn no_structural_match_falls_through_to_lower_priority() {
    let mut session = session(
        r#"
rules:
  - keyword: "alpha"
    priority: 9
    patterns:
      - decomposition: 'alpha (\d+)'
        reassemblies: ["high {1}"]
  - keyword: "alpha"
    priority: 1
    patterns:
      - decomposition: 'alpha'
        reassemblies: ["low"]
"#,
    );
    assert_eq!(session.respond("alpha beta"), "low");
}

#[test]
fn equal_priorities_keep_script_order() {
    let mut session = session(
        r#"
rules:
  - keyword: "tie"
    priority: 5
    patterns:
      - decomposition: 'tie'
        reassemblies: ["first"]
  - keyword: "tie"
    priority: 5
    patterns:
      - decomposition: 'tie'
        reassemblies: ["second"]
"#,
    );
    assert_eq!(session.respond("tie"), "first");
}

#[test]
fn units_inside_a_rule_keep_declared_order() {
    let mut session = session(
        r#"
rules:
  - keyword: "cat"
    priority: 1
    patterns:
      - decomposition: 'cat named (\w+)'
        reassemblies: ["named {1}"]
      - decomposition: 'cat'
        reassemblies: ["plain cat"]
"#,
    );
    assert_eq!(session.respond("my cat named Felix"), "named felix");
    assert_eq!(session.respond("a cat appeared"), "plain cat");
}

#[test]
fn patterns_match_case_insensitively() {
    let mut session = session(
        r#"
rules:
  - keyword: "shout"
    priority: 1
    patterns:
      - decomposition: 'SHOUT (.*)'
        reassemblies: ["heard {1}"]
"#,
    );
    assert_eq!(session.respond("shout hello"), "heard hello");
}

#[test]
fn accented_keywords_and_patterns_match_stripped_input() {
    let mut session = session(
        r#"
rules:
  - keyword: "mère"
    priority: 3
    patterns:
      - decomposition: 'mère'
        reassemblies: ["about her"]
"#,
    );
    assert_eq!(session.respond("Ma MÈRE est là"), "about her");
    assert_eq!(session.respond("ma mere est la"), "about her");
}

#[test]
fn memory_is_not_replayed_on_the_turn_that_stored_it() {
    let mut session = session(
        r#"
rules:
  - keyword: "remember"
    priority: 5
    patterns:
      - decomposition: 'remember (.*)'
        reassemblies: ["@memory:You mentioned {1} before."]
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["go on"]
"#,
    );
    assert_eq!(session.respond("remember the lake"), "go on");
    assert_eq!(session.respond("something else"), "You mentioned the lake before.");
    assert_eq!(session.respond("something else"), "go on");
}

#[test]
fn memory_drains_in_fifo_order_and_never_while_storing() {
    let mut session = session(
        r#"
rules:
  - keyword: "remember"
    priority: 5
    patterns:
      - decomposition: 'remember (.*)'
        reassemblies: ["@memory:first you said {1}"]
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["go on"]
"#,
    );
    assert_eq!(session.respond("remember apples"), "go on");
    // A second store happens this turn, so the first entry must stay queued.
    assert_eq!(session.respond("remember pears"), "go on");
    assert_eq!(session.respond("hm"), "first you said apples");
    assert_eq!(session.respond("hm"), "first you said pears");
    assert_eq!(session.respond("hm"), "go on");
}

#[test]
fn insult_threshold_terminates_the_session() {
    let mut session = session(
        r#"
rules:
  - keyword: "jerk"
    priority: 9
    insult: true
    patterns:
      - decomposition: 'jerk'
        reassemblies: ["rude"]
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["go on"]
"#,
    );
    for _ in 0..3 {
        assert_eq!(session.respond("jerk"), "rude");
        assert!(!session.has_parity_error());
    }
    assert_eq!(session.respond("jerk"), PARITY_ERROR);
    assert!(session.has_parity_error());
}

#[test]
fn terminated_sessions_short_circuit_every_turn() {
    let mut session = session(
        r#"
rules:
  - keyword: "jerk"
    priority: 9
    insult: true
    patterns:
      - decomposition: 'jerk'
        reassemblies: ["rude"]
"#,
    );
    for _ in 0..4 {
        session.respond("jerk");
    }
    assert_eq!(session.respond("a perfectly polite line"), PARITY_ERROR);
    assert_eq!(session.respond("jerk"), PARITY_ERROR);
}

#[test]
fn reset_restores_a_fresh_session() {
    let mut session = session(
        r#"
rules:
  - keyword: "ping"
    priority: 1
    patterns:
      - decomposition: 'ping'
        reassemblies: ["A", "B"]
  - keyword: "jerk"
    priority: 9
    insult: true
    patterns:
      - decomposition: 'jerk'
        reassemblies: ["rude"]
  - keyword: "remember"
    priority: 5
    patterns:
      - decomposition: 'remember (.*)'
        reassemblies: ["@memory:you said {1}"]
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["go on"]
"#,
    );
    for _ in 0..4 {
        session.respond("jerk");
    }
    session.respond("ping");
    session.respond("remember things");
    assert!(session.has_parity_error());

    session.reset();
    assert!(!session.has_parity_error());
    // Cursors, insult count and memory are all back to their initial state.
    assert_eq!(session.respond("ping"), "A");
    assert_eq!(session.respond("anything"), "go on");
    assert_eq!(session.respond("jerk"), "rude");
}

#[test]
fn fallback_cycles_its_own_templates() {
    let mut session = session(
        r#"
rules:
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["one", "two"]
"#,
    );
    assert_eq!(session.respond("zzz"), "one");
    assert_eq!(session.respond("zzz"), "two");
    assert_eq!(session.respond("zzz"), "one");
}

#[test]
fn missing_fallback_rule_uses_the_default_phrase() {
    let mut session = session(
        r#"
rules:
  - keyword: "ping"
    priority: 1
    patterns:
      - decomposition: 'ping'
        reassemblies: ["pong"]
"#,
    );
    assert_eq!(session.respond("no keywords here"), "Please go on.");
}

#[test]
fn blank_input_takes_the_fallback_path() {
    let mut session = session(
        r#"
rules:
  - keyword: "@none"
    priority: 0
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["say something"]
"#,
    );
    assert_eq!(session.respond("   "), "say something");
    assert_eq!(session.respond("..."), "say something");
}

#[test]
fn fallback_sentinel_is_never_a_keyword_candidate() {
    let mut session = session(
        r#"
rules:
  - keyword: "@none"
    priority: 9
    patterns:
      - decomposition: '(.*)'
        reassemblies: ["sentinel"]
  - keyword: "none"
    priority: 1
    patterns:
      - decomposition: 'none'
        reassemblies: ["plain none"]
"#,
    );
    // Typing the sentinel literally must not select the fallback rule as an
    // ordinary candidate; the "none" rule matches by substring instead.
    assert_eq!(session.respond("@none"), "plain none");
}

#[test]
fn unfilled_placeholders_are_dropped() {
    let mut session = session(
        r#"
rules:
  - keyword: "say"
    priority: 1
    patterns:
      - decomposition: 'say (.*)'
        reassemblies: ["you said {1} and {7}"]
"#,
    );
    assert_eq!(session.respond("say hi"), "you said hi and ");
}

#[test]
fn captures_are_reflected_before_substitution() {
    let rules = r#"
rules:
  - keyword: "i need"
    priority: 3
    patterns:
      - decomposition: 'i need (.*)'
        reassemblies: ["why do you need {1}?"]
"#;
    let reflections = r#"
reflections:
  "me": "you"
  "you": "I"
  "my": "your"
"#;
    let script = Script::from_yaml(rules, reflections).expect("fixture pack compiles");
    let mut session = Session::new(Arc::new(script));
    assert_eq!(session.respond("I need you to help me"), "why do you need I to help you?");
}

#[test]
fn sessions_sharing_a_script_stay_isolated() {
    let script = Arc::new(
        Script::from_yaml(
            r#"
rules:
  - keyword: "ping"
    priority: 1
    patterns:
      - decomposition: 'ping'
        reassemblies: ["A", "B"]
"#,
            NO_REFLECTIONS,
        )
        .expect("fixture pack compiles"),
    );
    let mut left = Session::new(Arc::clone(&script));
    let mut right = Session::new(Arc::clone(&script));

    assert_eq!(left.respond("ping"), "A");
    assert_eq!(left.respond("ping"), "B");
    // The other session still starts from the top of the cycle.
    assert_eq!(right.respond("ping"), "A");
}
