use std::io::Write;

use tracing::debug;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Banner,
    Progress,
    Detail,
    Success,
    Warning,
    Failure,
}

/// Operator-facing console output.
pub trait Reporter {
    fn message(&mut self, level: MessageLevel, text: &str);

    fn banner(&mut self, text: &str) {
        self.message(MessageLevel::Banner, text);
    }

    fn progress(&mut self, text: &str) {
        self.message(MessageLevel::Progress, text);
    }

    fn detail(&mut self, text: &str) {
        self.message(MessageLevel::Detail, text);
    }

    fn success(&mut self, text: &str) {
        self.message(MessageLevel::Success, text);
    }

    fn warning(&mut self, text: &str) {
        self.message(MessageLevel::Warning, text);
    }

    fn failure(&mut self, text: &str) {
        self.message(MessageLevel::Failure, text);
    }
}

pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_message(level: MessageLevel, text: &str) -> String {
    match level {
        MessageLevel::Banner => {
            let rule = "=".repeat(RULE_WIDTH);
            format!("{rule}\n{text}\n{rule}")
        }
        MessageLevel::Progress => format!("\n📋 {text}"),
        MessageLevel::Detail => format!("  {text}"),
        MessageLevel::Success => format!("✅ {text}"),
        MessageLevel::Warning => format!("⚠️  {text}"),
        MessageLevel::Failure => format!("❌ {text}"),
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn message(&mut self, level: MessageLevel, text: &str) {
        if let Err(error) = writeln!(self.out, "{}", format_message(level, text)) {
            debug!(event = "core.report.write_failed", error = %error);
        }
    }
}
