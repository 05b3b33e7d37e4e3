//! Column-major matrix traversal.
//!
//! Walks a `side x side` matrix of `element`-byte elements and yields one read
//! per step. Step `k` covers byte position `pos = k * element`; the row is
//! `pos / side`, the column `pos % side`, and the address is
//! `column * side + row * element`. Consecutive steps therefore jump a full
//! column stride apart, which is what makes the pattern cache-hostile.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::config::TraversalConfig;

/// One step of a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Access {
    /// Step index, starting at 0.
    pub step: usize,
    /// Row coordinate.
    pub row: usize,
    /// Column coordinate (a multiple of the element size).
    pub column: usize,
    /// Byte address read.
    pub address: u64,
    /// Bytes read.
    pub size: usize,
}

/// Iterator over the reads of a column-major traversal.
#[derive(Clone, Debug)]
pub struct ColumnMajor {
    side: usize,
    element: usize,
    next: usize,
    steps: usize,
}

impl ColumnMajor {
    /// Creates a traversal of a `matrix_side` matrix with `element_size`-byte elements.
    pub const fn new(matrix_side: usize, element_size: usize) -> Self {
        let steps = if element_size == 0 {
            0
        } else {
            matrix_side.saturating_mul(matrix_side) / element_size
        };
        Self {
            side: matrix_side,
            element: element_size,
            next: 0,
            steps,
        }
    }

    /// Creates the traversal described by `config`.
    pub const fn from_config(config: &TraversalConfig) -> Self {
        Self::new(config.matrix_side, config.element_bytes)
    }

    /// Access for step `step`, without advancing.
    pub const fn at(&self, step: usize) -> Option<Access> {
        if step >= self.steps {
            return None;
        }
        let pos = step * self.element;
        let row = pos / self.side;
        let column = pos % self.side;
        Some(Access {
            step,
            row,
            column,
            address: (column * self.side + row * self.element) as u64,
            size: self.element,
        })
    }
}

impl Iterator for ColumnMajor {
    type Item = Access;

    fn next(&mut self) -> Option<Access> {
        let access = self.at(self.next)?;
        self.next += 1;
        Some(access)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ColumnMajor {}

impl FusedIterator for ColumnMajor {}
