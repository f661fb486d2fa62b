//! Fixed-capacity sequence used for every per-event buffer.
//!
//! Pushing past the capacity is not a panic and not a silent drop: it returns
//! [`CapacityError`] so the caller decides how to report the truncation.

use serde::{Serialize, Serializer};
use std::ops::Deref;

/// Returned when pushing into a full [`BoundedVec`].
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("capacity of {capacity} elements exceeded")]
pub struct CapacityError {
    pub capacity: usize,
}

/// A `Vec` that refuses to grow past a capacity chosen at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedVec<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn push(&mut self, value: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError {
                capacity: self.capacity,
            });
        }
        self.items.push(value);
        Ok(())
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Ord> BoundedVec<T> {
    pub fn sort(&mut self) {
        self.items.sort();
    }
}

impl<T> Deref for BoundedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a BoundedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for BoundedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}
