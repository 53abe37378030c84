// UI layer: the interactive read loop. One headline per cycle, one request
// per headline, and every classification failure is reported and swallowed
// so only an explicit exit (or end of input) stops the program.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::api::{Classify, ClassifyError};
use crate::report;

const PROMPT: &str = "Headline";

/// Where headlines come from.
pub trait HeadlineSource {
    /// Next raw line, or `None` once input is exhausted.
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Whether a person is typing. Interactive sources draw their own prompt
    /// and get a spinner while a request is in flight.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Terminal prompt backed by `dialoguer`.
pub struct TerminalPrompt;

impl HeadlineSource for TerminalPrompt {
    fn next_line(&mut self) -> Result<Option<String>> {
        // Empty input must reach the loop so it can answer it, instead of
        // dialoguer silently re-prompting.
        let line: String = Input::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(line))
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Line-by-line reader for piped input.
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader { reader }
    }
}

impl<R: BufRead> HeadlineSource for LineReader<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// What one line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Empty,
    Classify(String),
}

/// Trim the line and decide what to do with it. `exit` and `q` are matched
/// without regard to case.
pub fn parse_command(line: &str) -> Command {
    let headline = line.trim();
    if headline.eq_ignore_ascii_case("exit") || headline.eq_ignore_ascii_case("q") {
        Command::Exit
    } else if headline.is_empty() {
        Command::Empty
    } else {
        Command::Classify(headline.to_string())
    }
}

enum State {
    AwaitingInput,
    Classifying(String),
    Exiting,
}

/// Print the welcome banner and run the loop until the operator exits.
///
/// Only I/O failures on `input` or `out` end the loop early.
pub fn run<C, S, W>(classifier: &C, topics: &[String], input: &mut S, out: &mut W) -> Result<()>
where
    C: Classify,
    S: HeadlineSource,
    W: Write,
{
    writeln!(out, "Welcome! Type a news headline and I'll guess the topic.")?;
    writeln!(out, "Topics: {}", topics.join(", "))?;
    writeln!(out, "Type 'exit/q' to stop.")?;
    writeln!(out)?;

    let mut state = State::AwaitingInput;
    loop {
        state = match state {
            State::AwaitingInput => await_input(input, out)?,
            State::Classifying(headline) => {
                classify_and_report(classifier, &headline, input.is_interactive(), out)?;
                State::AwaitingInput
            }
            State::Exiting => {
                writeln!(out, "Bye! Keep coding")?;
                out.flush()?;
                return Ok(());
            }
        };
    }
}

fn await_input<S: HeadlineSource, W: Write>(input: &mut S, out: &mut W) -> Result<State> {
    if !input.is_interactive() {
        write!(out, "{PROMPT}: ")?;
        out.flush()?;
    }
    let Some(line) = input.next_line()? else {
        debug!("end of input");
        writeln!(out)?;
        return Ok(State::Exiting);
    };

    Ok(match parse_command(&line) {
        Command::Exit => State::Exiting,
        Command::Empty => {
            writeln!(out, "Please type a headline (not empty).")?;
            writeln!(out)?;
            State::AwaitingInput
        }
        Command::Classify(headline) => State::Classifying(headline),
    })
}

fn classify_and_report<C: Classify, W: Write>(
    classifier: &C,
    headline: &str,
    interactive: bool,
    out: &mut W,
) -> Result<()> {
    let spinner = interactive.then(start_spinner);
    let outcome = classifier.classify(headline);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        Ok(predictions) => match report::render(headline, &predictions) {
            Some(text) => write!(out, "{text}")?,
            None => writeln!(out, "Oops! Unexpected reply: []")?,
        },
        Err(ClassifyError::Unexpected { payload }) => {
            writeln!(out, "Oops! Unexpected reply: {payload}")?;
        }
        Err(e) => {
            debug!(error = %e, "classification failed");
            writeln!(out)?;
            writeln!(out, "⚠️ Oops! Something went wrong.")?;
            writeln!(out, "Reason: {e}")?;
            writeln!(out, "Tip: Check HF_API_KEY + internet.")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Classifying...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
