//! Interactive console: banner, greeting, read loop and the crash screen.

use std::thread;
use std::time::Duration;

use rand::seq::SliceRandom;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sibyl::{Messages, Session};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Run the conversation loop until a quit word, end of input or a parity
/// error ends it.
pub fn run_shell(session: &mut Session, messages: &Messages, color: bool) -> anyhow::Result<()> {
    let palette = ansi::Palette::new(color);
    print_banner(messages, &palette);

    if let Some(greeting) = messages.greetings.choose(&mut rand::thread_rng()) {
        println!("{} {}\n", palette.bold("ELIZA:"), greeting);
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("You:   ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(input);

                if is_quit_word(input, messages) {
                    println!("\n{} {}", palette.bold("ELIZA:"), messages.goodbye);
                    break;
                }

                let reply = session.respond(input);
                println!("{} {}\n", palette.bold("ELIZA:"), reply);

                if session.has_parity_error() {
                    print_crash_dump(&palette);
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{} {}", palette.bold("ELIZA:"), messages.goodbye);
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn is_quit_word(input: &str, messages: &Messages) -> bool {
    let lowered = input.to_lowercase();
    messages.quit_words.iter().any(|word| word.to_lowercase() == lowered)
}

fn print_banner(messages: &Messages, palette: &ansi::Palette) {
    let lines = [
        "╔══════════════════════════════════════════════════╗",
        "║                    E L I Z A                     ║",
        "║      A Rogerian Psychotherapist Simulation       ║",
        "║                                                  ║",
        "║    Based on Joseph Weizenbaum's 1966 program     ║",
        "╚══════════════════════════════════════════════════╝",
    ];
    println!();
    for line in lines {
        println!("{}", palette.paint(line, ansi::CYAN));
    }
    let quit_word = messages.quit_words.first().map(String::as_str).unwrap_or("quit");
    println!("{}\n", palette.dim(format!("Type \"{quit_word}\" to end the session.")));
}

fn print_crash_dump(palette: &ansi::Palette) {
    thread::sleep(Duration::from_millis(500));
    let lines = [
        "    *** SYSTEM HALTED ***",
        "    *** MEMORY DUMP: 0x0000 - 0xFFFF ***",
        "    *** FATAL EXCEPTION IN MODULE ELIZA.EXE ***",
        "    *** REBOOT REQUIRED ***",
    ];
    for line in lines {
        println!("{}", palette.paint(line, ansi::RED));
    }
    println!();
}
