use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use string_interner::symbol::SymbolUsize;

/// Stack of name → binding frames, innermost last.
#[derive(Debug)]
pub struct ScopeChain<V> {
    frames: Vec<HashMap<SymbolUsize, V>>,
}

impl<V> Default for ScopeChain<V> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<V> ScopeChain<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop(&mut self) -> Option<HashMap<SymbolUsize, V>> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Binds `name` in the innermost frame. Hands the value back if the name
    /// is already bound there or no frame is open.
    pub fn define(&mut self, name: SymbolUsize, value: V) -> Result<(), V> {
        match self.frames.last_mut() {
            Some(frame) if !frame.contains_key(&name) => {
                frame.insert(name, value);
                Ok(())
            }
            _ => Err(value),
        }
    }

    pub fn is_defined_in_innermost(&self, name: SymbolUsize) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains_key(&name))
    }

    /// Innermost binding of `name`.
    pub fn get(&self, name: SymbolUsize) -> Option<&V> {
        self.frames.iter().rev().find_map(|frame| frame.get(&name))
    }
}

/// Anything that owns a scope chain and can be handed out through a
/// [`ScopeGuard`].
pub trait ScopeOwner {
    type Binding;

    fn scope_chain(&mut self) -> &mut ScopeChain<Self::Binding>;
}

impl<V> ScopeOwner for ScopeChain<V> {
    type Binding = V;

    fn scope_chain(&mut self) -> &mut ScopeChain<V> {
        self
    }
}

/// Pushes a frame on creation and pops it on drop, so the frame is released
/// on every exit path including `?`.
pub struct ScopeGuard<'g, O: ScopeOwner> {
    owner: &'g mut O,
}

pub fn enter<O: ScopeOwner>(owner: &mut O) -> ScopeGuard<'_, O> {
    owner.scope_chain().push();
    ScopeGuard { owner }
}

impl<O: ScopeOwner> Deref for ScopeGuard<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.owner
    }
}

impl<O: ScopeOwner> DerefMut for ScopeGuard<'_, O> {
    fn deref_mut(&mut self) -> &mut O {
        self.owner
    }
}

impl<O: ScopeOwner> Drop for ScopeGuard<'_, O> {
    fn drop(&mut self) {
        self.owner.scope_chain().pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Interner;

    #[test]
    fn lookup_prefers_innermost_binding() {
        let mut interner = Interner::new();
        let x = interner.get_or_intern("x");
        let mut chain = ScopeChain::new();

        chain.push();
        chain.define(x, 1).unwrap();
        {
            let mut inner = enter(&mut chain);
            inner.define(x, 2).unwrap();
            assert_eq!(inner.get(x), Some(&2));
            assert_eq!(inner.depth(), 2);
        }
        assert_eq!(chain.get(x), Some(&1));
        assert_eq!(chain.depth(), 1);
    }

    #[test]
    fn redefinition_in_same_frame_is_refused() {
        let mut interner = Interner::new();
        let x = interner.get_or_intern("x");
        let mut chain = ScopeChain::new();
        chain.push();
        chain.define(x, 1).unwrap();
        assert_eq!(chain.define(x, 2), Err(2));
        assert_eq!(chain.get(x), Some(&1));
        assert!(chain.is_defined_in_innermost(x));
    }

    #[test]
    fn define_without_frame_fails() {
        let mut interner = Interner::new();
        let x = interner.get_or_intern("x");
        let mut chain: ScopeChain<i32> = ScopeChain::new();
        assert_eq!(chain.define(x, 1), Err(1));
    }

    #[test]
    fn guard_pops_on_early_return() {
        fn fails(chain: &mut ScopeChain<i32>, name: SymbolUsize) -> Result<(), String> {
            let mut scope = enter(chain);
            scope.define(name, 7).map_err(|_| "taken".to_string())?;
            Err("bail".to_string())
        }

        let mut interner = Interner::new();
        let x = interner.get_or_intern("x");
        let mut chain = ScopeChain::new();
        chain.push();
        assert!(fails(&mut chain, x).is_err());
        assert_eq!(chain.depth(), 1);
        assert_eq!(chain.get(x), None);
    }
}
