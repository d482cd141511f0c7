//! Where `.` `,` write to and `&` `~` read from.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::Value;

/// The interpreter's I/O port.
pub trait Console {
    /// Read the next line of input without its line terminator.
    /// `Ok(None)` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write a number in decimal, without separators.
    fn write_int(&mut self, value: Value) -> io::Result<()>;

    fn write_char(&mut self, ch: char) -> io::Result<()>;

    /// Push pending output to its destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console bound to the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole {
    _private: (),
}

impl StdConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }

    fn write_int(&mut self, value: Value) -> io::Result<()> {
        write!(io::stdout(), "{value}")
    }

    fn write_char(&mut self, ch: char) -> io::Result<()> {
        write!(io::stdout(), "{ch}")
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// In-memory console: queued input lines and captured output.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    input: VecDeque<String>,
    output: String,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that will answer reads with `lines`, in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Console for MemoryConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_int(&mut self, value: Value) -> io::Result<()> {
        self.output.push_str(&value.to_string());
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> io::Result<()> {
        self.output.push(ch);
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_console_replays_input_then_reports_eof() {
        let mut console = MemoryConsole::with_input(["12", "x"]);
        assert_eq!(console.read_line().unwrap().as_deref(), Some("12"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("x"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn memory_console_captures_output() {
        let mut console = MemoryConsole::new();
        console.write_int(-42).unwrap();
        console.write_char('!').unwrap();
        assert_eq!(console.output(), "-42!");
        assert_eq!(console.take_output(), "-42!");
        assert_eq!(console.output(), "");
    }

    #[test]
    fn line_endings_are_stripped() {
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
    }
}
