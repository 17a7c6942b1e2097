//! Generic LIFO stack.
//!
//! Every way of walking the stack (borrowed `iter()`, owned `into_iter()`)
//! yields items in pop order: top first.

use std::fmt;
use std::iter::{FromIterator, Rev};
use std::slice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Borrowing iterator, top of the stack first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter().rev(),
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Iteration
// ============================================================================

pub struct Iter<'a, T> {
    inner: Rev<slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator; drains the stack by popping.
pub struct IntoIter<T> {
    stack: Stack<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.stack.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

// Bottom to top, the order the items were pushed.
impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_peek_empty() {
        let mut stack: Stack<String> = Stack::default();
        assert!(stack.peek().is_none());
        assert!(stack.peek_mut().is_none());
        assert!(stack.pop().is_none());
        assert_eq!(stack.iter().count(), 0);
    }

    #[test]
    fn test_peek_mut_changes_top() {
        let mut stack: Stack<i32> = [1, 2].into_iter().collect();
        if let Some(top) = stack.peek_mut() {
            *top *= 10;
        }
        assert_eq!(stack.peek(), Some(&20));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_borrowed_iteration_top_first() {
        let stack: Stack<&str> = vec!["bottom", "middle", "top"].into_iter().collect();

        let items: Vec<&&str> = (&stack).into_iter().collect();
        assert_eq!(items, vec![&"top", &"middle", &"bottom"]);

        // Still usable after borrowing iteration
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek(), Some(&"top"));
    }

    #[test]
    fn test_iter_double_ended() {
        let stack: Stack<i32> = (1..=4).collect();
        let bottom_up: Vec<i32> = stack.iter().rev().copied().collect();
        assert_eq!(bottom_up, vec![1, 2, 3, 4]);
        assert_eq!(stack.iter().len(), 4);
    }

    #[test]
    fn test_owned_iteration_drains() {
        let mut stack = Stack::with_capacity(4);
        stack.extend(vec!["a".to_string(), "b".to_string()]);
        stack.push("c".to_string());

        let items: Vec<String> = stack.into_iter().collect();
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut stack: Stack<u8> = (0..10).collect();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn test_display_bottom_to_top() {
        let stack: Stack<i32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(stack.to_string(), "[1, 2, 3]");
        assert_eq!(Stack::<i32>::new().to_string(), "[]");
    }

    proptest! {
        #[test]
        fn test_iteration_matches_pop_order(items: Vec<i32>) {
            let stack: Stack<i32> = items.iter().copied().collect();
            let borrowed: Vec<i32> = stack.iter().copied().collect();

            let mut popped = Vec::new();
            let mut drain = stack.clone();
            while let Some(item) = drain.pop() {
                popped.push(item);
            }

            prop_assert_eq!(&borrowed, &popped);
            let owned: Vec<i32> = stack.into_iter().collect();
            prop_assert_eq!(owned, popped);
        }

        #[test]
        fn test_len_tracks_pushes_and_pops(pushes in 0usize..50, pops in 0usize..60) {
            let mut stack = Stack::new();
            for i in 0..pushes {
                stack.push(i);
            }
            let mut successful = 0;
            for _ in 0..pops {
                if stack.pop().is_some() {
                    successful += 1;
                }
            }
            prop_assert_eq!(stack.len(), pushes - successful);
        }
    }
}
