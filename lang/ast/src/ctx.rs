//! Persistent association lists from identifiers to bindings.
//!
//! An [`Environment`] is a cons-list: [`Environment::push`] allocates a new head that
//! points at the unchanged parent, so any number of checker branches can extend the
//! same prefix without copying it.

use std::fmt;
use std::rc::Rc;

use miette::Diagnostic;
use pretty::DocAllocator;
use strata_lang_printer::{
    Alloc, Builder, Precedence, Print, PrintCfg,
    tokens::{COLON, COMMA},
    util::sep_by,
};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Unbound identifier: {identifier}")]
#[diagnostic(code("E-001"))]
pub struct Unbound {
    pub identifier: String,
}

pub struct Environment<T> {
    head: Option<Rc<Node<T>>>,
}

struct Node<T> {
    identifier: String,
    binding: T,
    next: Environment<T>,
}

impl<T> Environment<T> {
    pub fn empty() -> Self {
        Environment { head: None }
    }

    /// Extend the environment with a new binding. `self` is left untouched.
    pub fn push(&self, identifier: impl Into<String>, binding: T) -> Self {
        let node = Node { identifier: identifier.into(), binding, next: self.clone() };
        Environment { head: Some(Rc::new(node)) }
    }

    /// The most recent binding of `identifier`.
    pub fn lookup(&self, identifier: &str) -> Result<&T, Unbound> {
        self.get(identifier).ok_or_else(|| Unbound { identifier: identifier.to_owned() })
    }

    pub fn get(&self, identifier: &str) -> Option<&T> {
        self.iter().find(|(name, _)| *name == identifier).map(|(_, binding)| binding)
    }

    pub fn maps(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over the bindings, most recent first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.head.as_deref() }
    }

    /// Map every binding, keeping identifiers and order.
    pub fn fmap<U, F>(&self, mut f: F) -> Environment<U>
    where
        F: FnMut(&str, &T) -> U,
    {
        let mapped: Vec<(&str, U)> =
            self.iter().map(|(identifier, binding)| (identifier, f(identifier, binding))).collect();
        mapped
            .into_iter()
            .rev()
            .fold(Environment::empty(), |env, (identifier, binding)| env.push(identifier, binding))
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for Environment<T> {
    fn clone(&self) -> Self {
        Environment { head: self.head.clone() }
    }
}

/// Unlink the list iteratively so that long environments do not overflow the stack.
impl<T> Drop for Environment<T> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Rc::try_unwrap(node) {
                Ok(mut node) => head = node.next.head.take(),
                Err(_) => break,
            }
        }
    }
}

/// Bindings are pushed in iteration order, so the last element is the most recent binding.
impl<S: Into<String>, T> FromIterator<(S, T)> for Environment<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        iter.into_iter().fold(Environment::empty(), |env, (identifier, binding)| {
            env.push(identifier, binding)
        })
    }
}

pub struct Iter<'e, T> {
    next: Option<&'e Node<T>>,
}

impl<'e, T> Iterator for Iter<'e, T> {
    type Item = (&'e str, &'e T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.head.as_deref();
        Some((node.identifier.as_str(), &node.binding))
    }
}

impl<T: fmt::Debug> fmt::Debug for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T: Print> Print for Environment<T> {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let mut bindings: Vec<_> = self
            .iter()
            .map(|(identifier, binding)| {
                alloc
                    .text(identifier)
                    .append(alloc.space())
                    .append(COLON)
                    .append(alloc.space())
                    .append(binding.print(cfg, alloc))
            })
            .collect();
        // Outermost binding first
        bindings.reverse();
        sep_by(alloc, bindings, COMMA).group()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_binding_wins() {
        let env = Environment::empty().push("x", 1).push("y", 2).push("x", 3);
        assert_eq!(env.lookup("x"), Ok(&3));
        assert_eq!(env.lookup("y"), Ok(&2));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn lookup_of_missing_identifier_fails() {
        let env: Environment<u8> = Environment::empty().push("x", 1);
        assert_eq!(env.lookup("z"), Err(Unbound { identifier: "z".to_owned() }));
        assert!(!env.maps("z"));
    }

    #[test]
    fn push_leaves_parent_unchanged() {
        let parent = Environment::empty().push("a", 'a');
        let left = parent.push("b", 'b');
        let right = parent.push("c", 'c');
        assert!(!parent.maps("b"));
        assert!(left.maps("b") && !left.maps("c"));
        assert!(right.maps("c") && right.maps("a"));
    }

    #[test]
    fn fmap_preserves_order() {
        let env: Environment<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let doubled = env.fmap(|_, n| n * 2);
        let entries: Vec<_> = doubled.iter().map(|(id, n)| (id.to_owned(), *n)).collect();
        assert_eq!(entries, vec![("c".to_owned(), 6), ("b".to_owned(), 4), ("a".to_owned(), 2)]);
    }

    #[test]
    fn dropping_a_long_environment_does_not_overflow() {
        let env: Environment<usize> = (0..200_000).map(|i| (format!("x{i}"), i)).collect();
        assert!(env.maps("x0"));
        drop(env);
    }

    #[test]
    fn prints_outermost_binding_first() {
        let env = Environment::empty().push("a", "A".to_owned()).push("b", "B".to_owned());
        assert_eq!(env.print_to_string(None), "a : A, b : B");
    }
}
