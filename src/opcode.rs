use crate::Value;
use crate::cursor::Direction;

/// Cell value that stops the program.
pub const HALT: Value = b'@' as Value;

/// Cell value that toggles string mode.
pub const QUOTE: Value = b'"' as Value;

/// Binary arithmetic operators. Operands are popped `a` first, then `b`,
/// and the result is `b op a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arith {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Arith {
    /// Compute `b op a`, wrapping on overflow. `None` on a zero divisor.
    pub fn apply(self, b: Value, a: Value) -> Option<Value> {
        match self {
            Arith::Add => Some(b.wrapping_add(a)),
            Arith::Subtract => Some(b.wrapping_sub(a)),
            Arith::Multiply => Some(b.wrapping_mul(a)),
            Arith::Divide if a == 0 => None,
            Arith::Divide => Some(b.wrapping_div(a)),
            Arith::Modulo if a == 0 => None,
            Arith::Modulo => Some(b.wrapping_rem(a)),
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `0`-`9`
    Digit(Value),
    Arith(Arith),
    /// `!`
    Not,
    /// `` ` ``
    Greater,
    /// `<` `>` `^` `v`
    Go(Direction),
    /// `?`
    Random,
    /// `_`
    HorizontalIf,
    /// `|`
    VerticalIf,
    /// `"`
    StringMode,
    /// `:`
    Duplicate,
    /// `\`
    Swap,
    /// `$`
    Discard,
    /// `.`
    OutputInt,
    /// `,`
    OutputChar,
    /// `#`
    Bridge,
    /// `g`
    Get,
    /// `p`
    Put,
    /// `&`
    InputInt,
    /// `~`
    InputChar,
    /// `@`
    Halt,
    /// Space and every unassigned character.
    Nop,
}

impl Opcode {
    /// Map a cell value to its instruction.
    pub fn decode(cell: Value) -> Opcode {
        let Some(ch) = u32::try_from(cell).ok().and_then(char::from_u32) else {
            return Opcode::Nop;
        };
        match ch {
            '0'..='9' => Opcode::Digit(cell - b'0' as Value),
            '+' => Opcode::Arith(Arith::Add),
            '-' => Opcode::Arith(Arith::Subtract),
            '*' => Opcode::Arith(Arith::Multiply),
            '/' => Opcode::Arith(Arith::Divide),
            '%' => Opcode::Arith(Arith::Modulo),
            '!' => Opcode::Not,
            '`' => Opcode::Greater,
            '<' => Opcode::Go(Direction::West),
            '>' => Opcode::Go(Direction::East),
            '^' => Opcode::Go(Direction::North),
            'v' => Opcode::Go(Direction::South),
            '?' => Opcode::Random,
            '_' => Opcode::HorizontalIf,
            '|' => Opcode::VerticalIf,
            '"' => Opcode::StringMode,
            ':' => Opcode::Duplicate,
            '\\' => Opcode::Swap,
            '$' => Opcode::Discard,
            '.' => Opcode::OutputInt,
            ',' => Opcode::OutputChar,
            '#' => Opcode::Bridge,
            'g' => Opcode::Get,
            'p' => Opcode::Put,
            '&' => Opcode::InputInt,
            '~' => Opcode::InputChar,
            '@' => Opcode::Halt,
            _ => Opcode::Nop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(ch: char) -> Opcode {
        Opcode::decode(ch as Value)
    }

    #[test]
    fn digits_decode_to_their_value() {
        for (i, ch) in ('0'..='9').enumerate() {
            assert_eq!(decode(ch), Opcode::Digit(i as Value));
        }
    }

    #[test]
    fn direction_arrows() {
        assert_eq!(decode('<'), Opcode::Go(Direction::West));
        assert_eq!(decode('>'), Opcode::Go(Direction::East));
        assert_eq!(decode('^'), Opcode::Go(Direction::North));
        assert_eq!(decode('v'), Opcode::Go(Direction::South));
    }

    #[test]
    fn unassigned_characters_are_nops() {
        for ch in [' ', 'a', 'V', 'x', '[', '\u{263A}'] {
            assert_eq!(decode(ch), Opcode::Nop, "{ch:?}");
        }
        assert_eq!(Opcode::decode(-1), Opcode::Nop);
        assert_eq!(Opcode::decode(0xD800), Opcode::Nop);
    }

    #[test]
    fn arithmetic_takes_b_op_a() {
        assert_eq!(Arith::Subtract.apply(7, 2), Some(5));
        assert_eq!(Arith::Divide.apply(7, 2), Some(3));
        assert_eq!(Arith::Divide.apply(-7, 2), Some(-3));
        assert_eq!(Arith::Modulo.apply(-7, 2), Some(-1));
        assert_eq!(Arith::Modulo.apply(7, -2), Some(1));
    }

    #[test]
    fn zero_divisor_has_no_result() {
        assert_eq!(Arith::Divide.apply(1, 0), None);
        assert_eq!(Arith::Modulo.apply(1, 0), None);
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(Arith::Add.apply(Value::MAX, 1), Some(Value::MIN));
        assert_eq!(Arith::Divide.apply(Value::MIN, -1), Some(Value::MIN));
        assert_eq!(Arith::Modulo.apply(Value::MIN, -1), Some(0));
    }

    #[test]
    fn sentinels_match_their_characters() {
        assert_eq!(Opcode::decode(HALT), Opcode::Halt);
        assert_eq!(Opcode::decode(QUOTE), Opcode::StringMode);
    }
}
