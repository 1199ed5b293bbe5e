use crate::Vec;
use core::fmt;

/// Operand stack of the reference machine.
///
/// Frames live on the same stack as operands: a frame's parameters are the
/// arguments left in place by the caller and its locals are pushed by
/// `Alloc`. Cells are therefore addressed both from the top (push/pop) and
/// by absolute index (frame pointer + offset).
///
/// The stack also remembers the largest length it ever reached, which is
/// how callers observe frame growth.
///
/// # Examples
///
/// ```ignore
/// use stackc_core::vm::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(42);
/// stack.push(17);
/// assert_eq!(stack.pop(), Some(17));
/// assert_eq!(stack.peek(), Some(&42));
/// assert_eq!(stack.high_water_mark(), 2);
/// ```
pub struct Stack<T> {
    /// The underlying storage for stack elements.
    items: Vec<T>,
    /// Largest length observed since creation.
    high_water_mark: usize,
}

impl<T: Copy> Stack<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(256),
            high_water_mark: 0,
        }
    }

    /// Pushes a value onto the stack.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
        if self.items.len() > self.high_water_mark {
            self.high_water_mark = self.items.len();
        }
    }

    /// Removes and returns the top value from the stack.
    ///
    /// Returns `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Value at absolute index `index` (0 is the bottom).
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    /// Overwrites the value at absolute index `index`.
    ///
    /// Returns `false` if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Removes the top `n` elements from the stack.
    ///
    /// Returns `false` (and leaves the stack untouched) if fewer than `n`
    /// elements are present.
    #[inline]
    pub fn pop_n(&mut self, n: usize) -> bool {
        match self.items.len().checked_sub(n) {
            Some(new_len) => {
                self.items.truncate(new_len);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest number of elements the stack has ever held.
    #[inline]
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }
}

impl<T: Copy> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.items)
            .field("high_water_mark", &self.high_water_mark)
            .finish()
    }
}
