use std::io::Write;

const INDENT: &str = "    ";

/// The display layer: everything the user reads goes through here.
pub struct Ui<W: Write> {
    out: W,
    separator: String,
}

impl<W: Write> Ui<W> {
    pub fn new(out: W, separator: impl Into<String>) -> Self {
        Self {
            out,
            separator: separator.into(),
        }
    }

    pub fn greet(&mut self) -> std::io::Result<()> {
        self.show("Hello! I'm your task tracker.\nWhat can I do for you?")
    }

    pub fn farewell(&mut self) -> std::io::Result<()> {
        self.show("Bye. Hope to see you again soon!")
    }

    /// Writes an indented message followed by the separator line.
    pub fn show(&mut self, message: &str) -> std::io::Result<()> {
        for line in message.lines() {
            writeln!(self.out, "{INDENT}{line}")?;
        }
        writeln!(self.out, "{}", self.separator)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
