// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::collections::HashMap;
use std::hash::Hash;

/// Hands out dense ids `0..n` to labels in order of first appearance.
pub struct Identifier<T> {
    original_to_new: HashMap<T, usize>,
    new_to_original: Vec<T>,
}

impl<T> Identifier<T>
where
    T: Clone + Hash + Eq,
{
    pub fn new() -> Self {
        return Identifier {
            original_to_new: HashMap::new(),
            new_to_original: Vec::new(),
        };
    }

    pub fn identify(
        &mut self,
        original: T,
    ) -> usize {
        return match self.original_to_new.get(&original) {
            Some(id) => *id,
            None => {
                let new_id: usize = self.new_to_original.len();
                self.original_to_new.insert(original.clone(), new_id);
                self.new_to_original.push(original);
                new_id
            }
        };
    }

    pub fn id_for<Q>(
        &self,
        original: &Q,
    ) -> Option<usize>
    where
        T: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        return self.original_to_new.get(original).cloned();
    }

    pub fn len(&self) -> usize {
        return self.new_to_original.len();
    }

    pub fn finish(self) -> (HashMap<T, usize>, Vec<T>) {
        return (self.original_to_new, self.new_to_original);
    }
}
