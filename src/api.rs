//! Public conversation API.

use std::sync::Arc;

use crate::engine::select_response;
use crate::script::{Language, Script, ScriptError};
use crate::SessionState;

/// One conversation over a shared [`Script`].
///
/// A session owns everything that changes from turn to turn: the round-robin
/// positions of every reassembly cycle, the deferred-memory queue and the
/// insult counter. The script itself stays immutable, so any number of
/// sessions can run over one `Arc<Script>` without affecting each other.
///
/// # Examples
///
/// ```
/// use sibyl::{Language, Session};
///
/// let mut session = Session::builtin(Language::Us)?;
/// let reply = session.respond("I am tired");
/// assert_eq!(reply, "How long have you been tired?");
/// # Ok::<(), sibyl::ScriptError>(())
/// ```
#[derive(Debug)]
pub struct Session {
    script: Arc<Script>,
    state: SessionState,
}

impl Session {
    /// Start a conversation over `script`.
    pub fn new(script: Arc<Script>) -> Self {
        let state = SessionState::for_script(&script);
        Session { script, state }
    }

    /// Start a conversation over the built-in pack for `lang`.
    pub fn builtin(lang: Language) -> Result<Self, ScriptError> {
        Ok(Session::new(Arc::new(Script::builtin(lang)?)))
    }

    /// Produce the reply for one line of user input.
    ///
    /// Never fails and never returns an empty string: input without any
    /// keyword match falls back to a memory recall or the catch-all rule.
    /// Once the session has hit its parity error, every further call returns
    /// the fixed terminal message.
    pub fn respond(&mut self, input: &str) -> String {
        select_response(&self.script, &mut self.state, input)
    }

    /// True once the insult threshold has been crossed. The conversation is
    /// over at that point; only [`reset`](Session::reset) revives it.
    pub fn has_parity_error(&self) -> bool {
        self.state.terminated()
    }

    /// Return the session to its initial state, keeping the loaded script:
    /// memory cleared, insult counter zeroed, every reassembly cycle back to
    /// its first template.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// The script this session is speaking from.
    pub fn script(&self) -> &Arc<Script> {
        &self.script
    }
}
