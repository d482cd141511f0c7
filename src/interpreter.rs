//! The Befunge virtual machine.
//!
//! Behaviors:
//! - The cursor starts at (0, 0) heading east with string mode off.
//! - Each tick fetches the cell under the cursor; `@` stops the run before
//!   dispatch, anything else is dispatched and the cursor advances one cell.
//! - Every fault (empty stack, out-of-grid access, zero divisor, bad input)
//!   aborts the run with a [`BefungeError`] carrying the cursor position.
//! - After a halt the stack and cursor are reset so the same instance can run
//!   again; grid writes made with `p` persist.

use std::io;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::console::{Console, StdConsole};
use crate::cursor::{Cursor, Direction, Position};
use crate::grid::{self, Grid, OutOfBounds};
use crate::opcode::{HALT, Opcode, QUOTE};
use crate::stack::Stack;
use crate::Value;

/// Errors that can occur while running a Befunge program.
#[derive(Debug, thiserror::Error)]
pub enum BefungeError {
    /// Pop or peek on an empty stack.
    #[error("Stack underflow at {at} (op='{op}')")]
    StackUnderflow { at: Position, op: char },

    /// The cursor, or a `g`/`p` coordinate pair, left the grid.
    #[error("Cell ({x}, {y}) is outside the grid (cursor at {at})")]
    OutOfBounds { x: Value, y: Value, at: Position },

    /// `/` or `%` with a zero divisor.
    #[error("Division by zero at {at} (op='{op}')")]
    DivisionByZero { at: Position, op: char },

    /// `&` or `~` could not make a value out of the input.
    #[error("Malformed input at {at}: {reason}")]
    MalformedInput { at: Position, reason: InputFault },

    /// The console failed to read or write.
    #[error("I/O error at {at}: {source}")]
    Io {
        at: Position,
        #[source]
        source: io::Error,
    },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },
}

impl BefungeError {
    /// Cursor position at the time of the fault, if the fault has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            BefungeError::StackUnderflow { at, .. }
            | BefungeError::OutOfBounds { at, .. }
            | BefungeError::DivisionByZero { at, .. }
            | BefungeError::MalformedInput { at, .. }
            | BefungeError::Io { at, .. } => Some(*at),
            BefungeError::StepLimitExceeded { .. } => None,
        }
    }
}

/// Why an input line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputFault {
    #[error("end of input")]
    EndOfInput,
    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),
    #[error("expected a character, got an empty line")]
    EmptyLine,
}

/// Limits applied to a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepControl {
    pub max_steps: Option<usize>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>) -> Self {
        Self { max_steps }
    }
}

/// A Befunge interpreter.
///
/// The interpreter maintains:
/// - the program grid, which `p` may rewrite,
/// - the operand stack,
/// - the cursor (position, direction, string mode),
/// - the console used by `.` `,` `&` `~`,
/// - the random source used by `?`.
pub struct Interpreter<C: Console = StdConsole> {
    grid: Grid,
    stack: Stack,
    cursor: Cursor,
    console: C,
    rng: StdRng,
}

impl Interpreter<StdConsole> {
    /// Create an interpreter for `source` that talks to stdin and stdout.
    pub fn new(source: &str) -> Self {
        Self::with_console(source, StdConsole::new())
    }
}

impl<C: Console> Interpreter<C> {
    /// Create an interpreter for `source` with a custom console.
    pub fn with_console(source: &str, console: C) -> Self {
        Self::from_grid(Grid::from_source(source), console)
    }

    pub fn from_grid(grid: Grid, console: C) -> Self {
        Self {
            grid,
            stack: Stack::new(),
            cursor: Cursor::new(),
            console,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make `?` deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run the program until it halts.
    ///
    /// Returns `Ok(())` on halt or a [`BefungeError`] on failure.
    pub fn execute(&mut self) -> Result<(), BefungeError> {
        self.run(None)
    }

    /// Run the program with a step limit.
    pub fn execute_with_control(&mut self, control: StepControl) -> Result<(), BefungeError> {
        self.run(Some(&control))
    }

    /// Internal executor shared by execute and execute_with_control.
    fn run(&mut self, control: Option<&StepControl>) -> Result<(), BefungeError> {
        self.reset();
        let result = self.run_until_halt(control);
        match result {
            Ok(()) => {
                let at = self.cursor.position;
                self.console
                    .flush()
                    .map_err(|source| BefungeError::Io { at, source })?;
                self.reset();
                Ok(())
            }
            Err(err) => {
                // The run is already failing; a flush error would only mask it.
                let _ = self.console.flush();
                Err(err)
            }
        }
    }

    fn run_until_halt(&mut self, control: Option<&StepControl>) -> Result<(), BefungeError> {
        let max_steps = control.and_then(|c| c.max_steps);
        let mut step: usize = 0;

        loop {
            let at = self.cursor.position;
            let cell = self
                .grid
                .get(at.x, at.y)
                .map_err(|OutOfBounds { x, y }| BefungeError::OutOfBounds { x, y, at })?;

            if cell == HALT {
                return Ok(());
            }

            if let Some(limit) = max_steps {
                if step >= limit {
                    return Err(BefungeError::StepLimitExceeded { limit });
                }
            }

            self.tick(cell)?;
            self.cursor.advance();
            step += 1;
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.cursor.reset();
    }

    /// Apply the effect of a single cell.
    fn tick(&mut self, cell: Value) -> Result<(), BefungeError> {
        if self.cursor.string_mode && cell != QUOTE {
            self.stack.push(cell);
            return Ok(());
        }

        let at = self.cursor.position;
        let op = grid::cell_char(cell);

        match Opcode::decode(cell) {
            Opcode::Digit(d) => self.stack.push(d),
            Opcode::Arith(arith) => {
                let a = self.pop(op)?;
                let b = self.pop(op)?;
                let result = arith
                    .apply(b, a)
                    .ok_or(BefungeError::DivisionByZero { at, op })?;
                self.stack.push(result);
            }
            Opcode::Not => {
                let v = self.pop(op)?;
                self.stack.push(Value::from(v == 0));
            }
            Opcode::Greater => {
                let a = self.pop(op)?;
                let b = self.pop(op)?;
                self.stack.push(Value::from(b > a));
            }
            Opcode::Go(direction) => self.cursor.direction = direction,
            Opcode::Random => self.cursor.direction = self.rng.r#gen(),
            Opcode::HorizontalIf => {
                self.cursor.direction = if self.pop(op)? == 0 {
                    Direction::East
                } else {
                    Direction::West
                };
            }
            Opcode::VerticalIf => {
                self.cursor.direction = if self.pop(op)? == 0 {
                    Direction::South
                } else {
                    Direction::North
                };
            }
            Opcode::StringMode => self.cursor.toggle_string_mode(),
            Opcode::Duplicate => {
                let v = self
                    .stack
                    .peek()
                    .map_err(|_| BefungeError::StackUnderflow { at, op })?;
                self.stack.push(v);
            }
            Opcode::Swap => {
                let a = self.pop(op)?;
                let b = self.pop(op)?;
                self.stack.push(a);
                self.stack.push(b);
            }
            Opcode::Discard => {
                self.pop(op)?;
            }
            Opcode::OutputInt => {
                let v = self.pop(op)?;
                self.console
                    .write_int(v)
                    .map_err(|source| BefungeError::Io { at, source })?;
            }
            Opcode::OutputChar => {
                let v = self.pop(op)?;
                self.console
                    .write_char(grid::cell_char(v))
                    .map_err(|source| BefungeError::Io { at, source })?;
            }
            Opcode::Bridge => self.cursor.advance(),
            Opcode::Get => {
                let y = self.pop(op)?;
                let x = self.pop(op)?;
                let v = self
                    .grid
                    .get(x, y)
                    .map_err(|OutOfBounds { x, y }| BefungeError::OutOfBounds { x, y, at })?;
                self.stack.push(v);
            }
            Opcode::Put => {
                let y = self.pop(op)?;
                let x = self.pop(op)?;
                let v = self.pop(op)?;
                self.grid
                    .set(x, y, v)
                    .map_err(|OutOfBounds { x, y }| BefungeError::OutOfBounds { x, y, at })?;
            }
            Opcode::InputInt => {
                let line = self.read_line()?;
                let value = line.trim().parse::<Value>().map_err(|_| {
                    BefungeError::MalformedInput {
                        at,
                        reason: InputFault::NotAnInteger(line.clone()),
                    }
                })?;
                self.stack.push(value);
            }
            Opcode::InputChar => {
                let line = self.read_line()?;
                let ch = line.chars().next().ok_or(BefungeError::MalformedInput {
                    at,
                    reason: InputFault::EmptyLine,
                })?;
                self.stack.push(ch as Value);
            }
            // `@` never reaches dispatch; the run loop stops on it first.
            Opcode::Halt | Opcode::Nop => {}
        }

        Ok(())
    }

    fn pop(&mut self, op: char) -> Result<Value, BefungeError> {
        let at = self.cursor.position;
        self.stack
            .pop()
            .map_err(|_| BefungeError::StackUnderflow { at, op })
    }

    /// Blocking read of one input line. Pending output is flushed first so
    /// prompts are visible.
    fn read_line(&mut self) -> Result<String, BefungeError> {
        let at = self.cursor.position;
        self.console
            .flush()
            .map_err(|source| BefungeError::Io { at, source })?;
        self.console
            .read_line()
            .map_err(|source| BefungeError::Io { at, source })?
            .ok_or(BefungeError::MalformedInput {
                at,
                reason: InputFault::EndOfInput,
            })
    }
}
