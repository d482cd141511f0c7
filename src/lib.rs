//! A Befunge interpreter library.
//!
//! Source text is laid out on a fixed-size grid and a cursor walks it in one
//! of four directions, executing the character under it against a single
//! integer stack.
//!
//! Features and behaviors:
//! - The grid is as wide as the longest (right-trimmed) line and as tall as
//!   the number of lines; short lines are padded with spaces.
//! - Strict bounds: the cursor leaving the grid, or `g`/`p` addressing a cell
//!   outside it, is an error rather than a wraparound.
//! - Popping an empty stack, dividing by zero and unparseable input are
//!   errors carrying the cursor position.
//! - `&` and `~` read whole lines from the console; `.` and `,` write to it.
//! - `?` picks one of the four directions from a seedable random source.
//! - After `@` the stack and cursor are reset; grid writes made with `p`
//!   survive, so the same interpreter can run its modified program again.
//!
//! Quick start:
//!
//! ```no_run
//! use befunge::Interpreter;
//!
//! // Prints "Hello, World!"
//! let code = r#"0"!dlroW ,olleH">:#,_@"#;
//! let mut vm = Interpreter::new(code);
//! vm.execute().expect("program should run");
//! println!(); // ensure a trailing newline for readability
//! ```
//!
//! Capturing output instead of writing to stdout:
//!
//! ```
//! use befunge::{Interpreter, MemoryConsole};
//!
//! let mut vm = Interpreter::with_console("&&*.@", MemoryConsole::with_input(["6", "7"]));
//! vm.execute().unwrap();
//! assert_eq!(vm.console().output(), "42");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod console;
pub mod cursor;
pub mod grid;
pub mod interpreter;
pub mod opcode;
pub mod stack;
pub mod theme;

/// The type of every grid cell and stack entry.
pub type Value = i32;

pub use console::{Console, MemoryConsole, StdConsole};
pub use cursor::{Cursor, Direction, Position};
pub use grid::Grid;
pub use interpreter::{BefungeError, InputFault, Interpreter, StepControl};
pub use stack::Stack;
