use std::io::{self, BufRead, Write};

pub const CONFIRMATION_QUESTION: &str = "Are you sure? (y/n) ";

pub trait Confirmer {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Only the first character of the response counts.
pub fn is_affirmative(response: &str) -> bool {
    matches!(response.chars().next(), Some('y' | 'Y'))
}

/// Asks on `output` and reads one response line from `input`, so the operator
/// must press Enter after answering. End of input counts as a refusal.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut response = String::new();
        self.input.read_line(&mut response)?;
        writeln!(self.output)?;
        Ok(is_affirmative(&response))
    }
}
