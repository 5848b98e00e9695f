use crate::runtime::{
    data_structures::value::Value,
    error::{self, ScriptError, StackError, TypeError},
};

/// The number of slots a stack gets when no capacity is requested.
pub const DEFAULT_STACK_CAPACITY: usize = 4096;

/// The bounded data stack managed by the interpreter.  The top of the stack is the most recently
/// pushed value.
///
/// Operations that take more than one operand name them in push order, A being the deepest.  So
/// for `a b subtract` A is `a` and B is `b`, which sits on top.
#[derive(Clone, Debug)]
pub struct ValueStack {
    values: Vec<Value>,
    capacity: usize,
}

impl Default for ValueStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the error for an operand pair an operation can't handle.  If A alone is acceptable the
/// problem is the pairing, otherwise A itself is the wrong type.
fn operand_error(a: &Value, b: &Value, supported: &[&str]) -> ScriptError {
    if supported.contains(&a.type_name()) {
        TypeError::TypeMismatch {
            a: a.type_name(),
            b: b.type_name(),
        }
        .into()
    } else {
        invalid_type(a)
    }
}

fn invalid_type(value: &Value) -> ScriptError {
    TypeError::InvalidType {
        found: value.type_name(),
    }
    .into()
}

impl ValueStack {
    /// Create a stack with the default capacity.
    pub fn new() -> ValueStack {
        ValueStack::with_capacity(DEFAULT_STACK_CAPACITY)
    }

    /// Create a stack that can hold at most `capacity` values.  A capacity of zero selects the
    /// default.
    pub fn with_capacity(capacity: usize) -> ValueStack {
        let capacity = if capacity == 0 {
            DEFAULT_STACK_CAPACITY
        } else {
            capacity
        };

        ValueStack {
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The maximum number of values the stack can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of values currently on the stack.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there is nothing to pop.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Push a value onto the top of the stack.
    pub fn push(&mut self, value: Value) -> error::Result<()> {
        if self.values.len() == self.capacity {
            return Err(StackError::Overflow.into());
        }

        self.values.push(value);
        Ok(())
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> error::Result<Value> {
        self.values.pop().ok_or(StackError::Underflow.into())
    }

    /// Look at the value `index` positions below the top without removing it, `peek(0)` being the
    /// top itself.
    pub fn peek(&self, index: usize) -> error::Result<&Value> {
        if index >= self.values.len() {
            return Err(StackError::Underflow.into());
        }

        Ok(&self.values[self.values.len() - 1 - index])
    }

    /// Make sure at least `count` values are available before an operation starts consuming them.
    fn require(&self, count: usize) -> error::Result<()> {
        if self.values.len() < count {
            return Err(StackError::Underflow.into());
        }

        Ok(())
    }

    /// Pop B then A, returning them in push order.
    fn pop_pair(&mut self) -> error::Result<(Value, Value)> {
        self.require(2)?;

        let b = self.pop()?;
        let a = self.pop()?;

        Ok((a, b))
    }

    /// Discard the top value.
    ///
    /// Signature: `a -- `
    pub fn drop_top(&mut self) -> error::Result<()> {
        let _ = self.pop()?;
        Ok(())
    }

    /// Pop an integer index and push a copy of the value that many positions below the new top.
    ///
    /// Signature: `... n -- ... copy`
    pub fn pick(&mut self) -> error::Result<()> {
        let index = match self.pop()? {
            Value::Integer(index) => index,
            other => return Err(invalid_type(&other)),
        };

        if index < 0 {
            return Err(StackError::Underflow.into());
        }

        let value = self.peek(index as usize)?.clone();
        self.push(value)
    }

    /// Exchange the top two values.
    ///
    /// Signature: `a b -- b a`
    pub fn swap(&mut self) -> error::Result<()> {
        self.require(2)?;

        let len = self.values.len();
        self.values.swap(len - 1, len - 2);

        Ok(())
    }

    /// Bring the third value up to the top.
    ///
    /// Signature: `a b c -- b c a`
    pub fn rot(&mut self) -> error::Result<()> {
        self.require(3)?;

        let len = self.values.len();
        self.values[len - 3..].rotate_left(1);

        Ok(())
    }

    /// Signature: `a b -- a==b`
    pub fn is_equal(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => return Err(operand_error(&a, &b, &["boolean", "integer", "float", "text"])),
        };

        self.push(Value::Boolean(result))
    }

    /// Signature: `a b -- a>b`
    pub fn is_greater(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => a > b,
            (Value::Float(a), Value::Float(b)) => a > b,
            (Value::Text(a), Value::Text(b)) => a > b,
            _ => return Err(operand_error(&a, &b, &["integer", "float", "text"])),
        };

        self.push(Value::Boolean(result))
    }

    /// Signature: `a b -- a<b`
    pub fn is_smaller(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => a < b,
            (Value::Float(a), Value::Float(b)) => a < b,
            (Value::Text(a), Value::Text(b)) => a < b,
            _ => return Err(operand_error(&a, &b, &["integer", "float", "text"])),
        };

        self.push(Value::Boolean(result))
    }

    /// Add two numbers, or concatenate two texts.
    ///
    /// Signature: `a b -- a+b`
    pub fn add(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_add(*b)),
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (Value::Text(a), Value::Text(b)) => Value::Text(format!("{}{}", a, b)),
            _ => return Err(operand_error(&a, &b, &["integer", "float", "text"])),
        };

        self.push(result)
    }

    /// Signature: `a b -- a-b`
    pub fn subtract(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_sub(*b)),
            (Value::Float(a), Value::Float(b)) => Value::Float(a - b),
            _ => return Err(operand_error(&a, &b, &["integer", "float"])),
        };

        self.push(result)
    }

    /// Signature: `a b -- a*b`
    pub fn multiply(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_mul(*b)),
            (Value::Float(a), Value::Float(b)) => Value::Float(a * b),
            _ => return Err(operand_error(&a, &b, &["integer", "float"])),
        };

        self.push(result)
    }

    /// Integer division truncates toward zero and wraps like the other integer operations, so the
    /// smallest integer divided by -1 is itself.  Dividing an integer by zero panics, exactly like
    /// the native operator.  Float division follows IEEE rules.
    ///
    /// Signature: `a b -- a/b`
    pub fn divide(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_div(*b)),
            (Value::Float(a), Value::Float(b)) => Value::Float(a / b),
            _ => return Err(operand_error(&a, &b, &["integer", "float"])),
        };

        self.push(result)
    }

    /// The remainder of a truncating division, zero for the smallest integer modulo -1.  For floats
    /// this is the floating point remainder, which carries the sign of A.
    ///
    /// Signature: `a b -- a%b`
    pub fn modulo(&mut self) -> error::Result<()> {
        let (a, b) = self.pop_pair()?;

        let result = match (&a, &b) {
            (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_rem(*b)),
            (Value::Float(a), Value::Float(b)) => Value::Float(a % b),
            _ => return Err(operand_error(&a, &b, &["integer", "float"])),
        };

        self.push(result)
    }

    /// Convert a number to text.  Floats always get 5 decimal digits.
    ///
    /// Signature: `a -- text`
    pub fn to_text(&mut self) -> error::Result<()> {
        let result = match self.pop()? {
            Value::Text(text) => Value::Text(text),
            Value::Integer(value) => Value::Text(value.to_string()),
            Value::Float(value) => Value::Text(format!("{:.5}", value)),
            other => return Err(invalid_type(&other)),
        };

        self.push(result)
    }

    /// Convert to an integer.  Floats are truncated.  Text that doesn't parse doesn't fail the
    /// operation, the description of the parse failure is pushed in place of the integer.
    ///
    /// Signature: `a -- integer-or-error-text`
    pub fn to_integer(&mut self) -> error::Result<()> {
        let result = match self.pop()? {
            Value::Integer(value) => Value::Integer(value),
            Value::Float(value) => Value::Integer(value as i64),
            Value::Text(text) => match text.parse::<i64>() {
                Ok(value) => Value::Integer(value),
                Err(error) => Value::Text(format!("parsing {:?}: {}", text, error)),
            },
            other => return Err(invalid_type(&other)),
        };

        self.push(result)
    }

    /// Boolean negation.
    ///
    /// Signature: `a -- !a`
    pub fn invert(&mut self) -> error::Result<()> {
        match self.pop()? {
            Value::Boolean(value) => self.push(Value::Boolean(!value)),
            other => Err(invalid_type(&other)),
        }
    }
}
