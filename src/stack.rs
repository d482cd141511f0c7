use crate::Value;

/// Pop or peek on an empty stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stack underflow")]
pub struct StackUnderflow;

/// The operand stack. Push and pop happen at the top only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, StackUnderflow> {
        self.values.pop().ok_or(StackUnderflow)
    }

    pub fn peek(&self) -> Result<Value, StackUnderflow> {
        self.values.last().copied().ok_or(StackUnderflow)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom-to-top view of the stack.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
