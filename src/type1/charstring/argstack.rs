// This file is derived from ttf-parser, licenced under Apache-2.0.
// https://github.com/RazrFalcon/ttf-parser/blob/439aaaebd50eb8aed66302e3c1b51fae047f85b2/src/tables/cff/argstack.rs

use std::fmt::Debug;

use crate::error::CharStringError;

/// Storage for the Type 1 operand stack while processing charstrings.
pub struct ArgumentsStack<'a, T>
where
    T: Debug,
{
    pub data: &'a mut [T],
    pub len: usize,
    pub max_len: usize,
}

impl<'a, T> ArgumentsStack<'a, T>
where
    T: Copy + Debug,
{
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, n: T) -> Result<(), CharStringError> {
        if self.len == self.max_len {
            Err(CharStringError::ArgumentsStackLimitReached)
        } else {
            self.data[self.len] = n;
            self.len += 1;
            Ok(())
        }
    }

    pub fn pop(&mut self) -> Result<T, CharStringError> {
        if self.is_empty() {
            return Err(CharStringError::InvalidArgumentsStackLength);
        }
        self.len -= 1;
        Ok(self.data[self.len])
    }

    /// Pop the top `n` values from the stack, returned bottom first.
    pub fn pop_n(&mut self, n: usize) -> Result<&[T], CharStringError> {
        if n > self.len {
            return Err(CharStringError::InvalidArgumentsStackLength);
        }
        self.len -= n;
        Ok(&self.data[self.len..self.len + n])
    }

    pub fn pop_array<const N: usize>(&mut self) -> Result<[T; N], CharStringError> {
        let args = self.pop_n(N)?;
        // NOTE(unwrap): `pop_n` returned exactly `N` values
        Ok(<[T; N]>::try_from(args).unwrap())
    }

    /// Take the operands of an operator that clears the stack.
    pub fn take<const N: usize>(&mut self) -> Result<[T; N], CharStringError> {
        let args = self.pop_array::<N>()?;
        self.clear();
        Ok(args)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<T: Debug> Debug for ArgumentsStack<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.data[..self.len]).finish()
    }
}
