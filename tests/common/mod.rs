#![allow(dead_code)]

use perseg::Monoid;

/// String concatenation: associative, not commutative
#[derive(Debug, Clone, Copy)]
pub struct Concat;

impl Monoid for Concat {
    type Value = String;

    fn identity(&self) -> String {
        String::new()
    }

    fn combine(&self, left: &String, right: &String) -> String {
        format!("{left}{right}")
    }
}

/// Plain `Vec` snapshots mirroring every version of a tree
#[derive(Debug, Clone)]
pub struct History<T> {
    pub versions: Vec<Vec<T>>,
    pub current: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: &[T]) -> Self {
        Self {
            versions: vec![initial.to_vec()],
            current: 0,
        }
    }

    pub fn update(&mut self, index: usize, value: T) -> usize {
        let mut next = self.versions[self.current].clone();
        next[index] = value;
        self.versions.push(next);
        self.current = self.versions.len() - 1;
        self.current
    }

    pub fn fold<M: Monoid<Value = T>>(&self, monoid: &M, version: usize, left: usize, right: usize) -> T {
        perseg::algebra::fold(monoid, &self.versions[version][left..=right])
    }
}

pub fn letters(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| char::from(b'a' + (i % 26) as u8).to_string())
        .collect()
}
