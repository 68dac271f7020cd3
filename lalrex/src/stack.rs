//! The parser stack: one frame per shifted or reduced symbol.
//!
//! State, semantic value and span live together in a [`StackFrame`], so
//! they are always pushed and popped in lock-step. The bottom frame is a
//! sentinel holding state 0; it is never popped by the parser.

use crate::{Span, StateID};
use thiserror::Error;

/// One entry of the parse stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackFrame<V> {
    pub state: StateID,
    /// `None` for the sentinel and for synthetic error-token frames.
    pub value: Option<V>,
    pub span: Span,
}

/// A push would exceed the configured maximum depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stack depth limit {max_depth} reached")]
pub struct StackExhausted {
    pub max_depth: usize,
}

/// A bounded, growable stack of [`StackFrame`]s.
///
/// Logical capacity starts at the initial depth and doubles whenever a push
/// would exceed it, never going past the maximum depth. Depth counts the
/// sentinel and may reach the maximum exactly.
#[derive(Debug)]
pub struct ParseStack<V> {
    frames: Vec<StackFrame<V>>,
    capacity: usize,
    max_depth: usize,
}

impl<V> ParseStack<V> {
    /// Creates a stack holding only the sentinel frame.
    ///
    /// A zero `max_depth` is raised to 1 (the sentinel alone); an
    /// `initial_depth` outside `1..=max_depth` is clamped into it.
    pub fn new(initial_depth: usize, max_depth: usize, bottom: Span) -> Self {
        let max_depth = max_depth.max(1);
        let capacity = initial_depth.clamp(1, max_depth);
        let mut frames = Vec::with_capacity(capacity);
        frames.push(StackFrame {
            state: StateID(0),
            value: None,
            span: bottom,
        });
        Self {
            frames,
            capacity,
            max_depth,
        }
    }

    /// Number of frames, sentinel included. Always at least 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The topmost frame.
    #[inline]
    pub fn top(&self) -> &StackFrame<V> {
        // the sentinel is never popped
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    pub fn top_state(&self) -> StateID {
        self.top().state
    }

    /// The frame `index` positions below the top: 0 = top, 1 = below top...
    pub fn peek(&self, index: usize) -> Option<&StackFrame<V>> {
        let n = self.frames.len();
        if index < n {
            self.frames.get(n - 1 - index)
        } else {
            None
        }
    }

    /// Makes room for one more frame, doubling the capacity if needed.
    ///
    /// Returns whether the capacity changed.
    pub fn grow_if_needed(&mut self) -> Result<bool, StackExhausted> {
        if self.frames.len() < self.capacity {
            return Ok(false);
        }
        if self.capacity >= self.max_depth {
            return Err(StackExhausted {
                max_depth: self.max_depth,
            });
        }
        let capacity = self.capacity.saturating_mul(2).min(self.max_depth);
        log::debug!("Stack size increased to {}", capacity);
        self.frames.reserve(capacity - self.frames.len());
        self.capacity = capacity;
        Ok(true)
    }

    /// Pushes a frame, growing first if needed.
    pub fn push(
        &mut self,
        state: StateID,
        value: Option<V>,
        span: Span,
    ) -> Result<(), StackExhausted> {
        self.grow_if_needed()?;
        self.frames.push(StackFrame { state, value, span });
        Ok(())
    }

    /// Removes the top `n` frames and yields them bottom-most first.
    ///
    /// The sentinel is never removed: `n` is capped at `depth() - 1`.
    pub fn pop(&mut self, n: usize) -> std::vec::Drain<'_, StackFrame<V>> {
        let keep = self.frames.len().saturating_sub(n).max(1);
        self.frames.drain(keep..)
    }

    /// Removes the top frame unless it is the sentinel.
    pub fn pop_frame(&mut self) -> Option<StackFrame<V>> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Frames from the sentinel up.
    pub fn iter(&self) -> std::slice::Iter<'_, StackFrame<V>> {
        self.frames.iter()
    }
}
