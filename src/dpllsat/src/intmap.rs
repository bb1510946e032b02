/*****************************************************************************************[intmap.rs]
Copyright (c) 2018-2018, Masaki Hara

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or
substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
**************************************************************************************************/

use bit_vec::BitVec;
use std::collections::VecDeque;
use std::iter;
use std::marker::PhantomData;
use std::ops;

pub trait AsIndex: Copy {
    fn as_index(self) -> usize;
    fn from_index(index: usize) -> Self;
}

/// A dense map from an index type to values, backed by a `Vec`.
#[derive(Debug, Clone)]
pub struct IntMap<K: AsIndex, V> {
    map: Vec<V>,
    _marker: PhantomData<fn(K)>, // contravariance
}

impl<K: AsIndex, V> Default for IntMap<K, V> {
    fn default() -> Self {
        Self { map: Vec::new(), _marker: PhantomData, }
    }
}

impl<K: AsIndex, V> IntMap<K, V> {
    pub fn new() -> Self { Self::default() }

    /// Map with `len` keys, each mapped to `V::default()`.
    pub fn with_len(len: usize) -> Self where V: Default {
        let mut m = Self::new();
        m.map.extend((0..len).map(|_| V::default()));
        m
    }

    #[inline]
    pub fn has(&self, k: K) -> bool {
        k.as_index() < self.map.len()
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn push(&mut self, val: V) -> K {
        let k = K::from_index(self.map.len());
        self.map.push(val);
        k
    }
    pub fn keys(&self) -> impl iter::Iterator<Item=K> {
        (0..self.map.len()).map(K::from_index)
    }
    pub fn values(&self) -> impl iter::Iterator<Item=&V> {
        self.map.iter()
    }
    pub fn iter(&self) -> impl iter::Iterator<Item=(K,&V)> {
        self.map.iter().enumerate().map(|(k, v)| (K::from_index(k), v))
    }
    pub fn iter_mut(&mut self) -> impl iter::Iterator<Item=(K,&mut V)> {
        self.map.iter_mut().enumerate().map(|(k, v)| (K::from_index(k), v))
    }
}

impl<K: AsIndex, V> ops::Index<K> for IntMap<K, V> {
    type Output = V;
    #[inline]
    fn index(&self, index: K) -> &Self::Output {
        &self.map[index.as_index()]
    }
}
impl<K: AsIndex, V> ops::IndexMut<K> for IntMap<K, V> {
    #[inline]
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        &mut self.map[index.as_index()]
    }
}

#[derive(Debug,Clone)]
pub struct IntMapBool<K : AsIndex> {
    map: BitVec,
    _marker: PhantomData<fn(K)>, // contravariance
}

impl<K: AsIndex> Default for IntMapBool<K> {
    fn default() -> Self { IntMapBool::new() }
}

impl<K: AsIndex> ops::Index<K> for IntMapBool<K> {
    type Output = bool;
    #[inline]
    fn index(&self, index: K) -> &Self::Output {
        &self.map[index.as_index()]
    }
}

impl<K: AsIndex> IntMapBool<K> {
    pub fn new() -> Self {
        Self { map: BitVec::new(), _marker: PhantomData::default(), }
    }
    #[inline]
    pub fn has(&self, k: K) -> bool {
        k.as_index() < self.map.len()
    }
    #[inline]
    pub fn set(&mut self, k: K, b: bool) {
        self.map.set(k.as_index(), b);
    }
    pub fn reserve(&mut self, key: K) {
        let index = key.as_index();
        let len = self.map.len();
        if index >= len {
            self.map.grow(index - len + 1, false);
        }
        debug_assert!(self.map.capacity() > index);
    }
    #[inline]
    pub fn insert(&mut self, key: K) {
        self.reserve(key);
        self.map.set(key.as_index(), true);
    }
}

/// A FIFO queue that holds each key at most once.
///
/// Pushing a key that is already waiting in the queue is a no-op; once
/// popped, the key can be pushed again.
#[derive(Debug,Clone)]
pub struct IntQueue<K: AsIndex> {
    in_queue: IntMapBool<K>,
    xs: VecDeque<K>,
}

impl<K: AsIndex> Default for IntQueue<K> {
    fn default() -> Self {
        Self {
            in_queue: IntMapBool::default(),
            xs: VecDeque::new(),
        }
    }
}

impl<K: AsIndex> IntQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.xs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
    pub fn has(&self, k: K) -> bool {
        self.in_queue.has(k) && self.in_queue[k]
    }
    /// Push `k` at the back, unless it is already queued.
    ///
    /// Returns `true` if `k` was added.
    pub fn push(&mut self, k: K) -> bool {
        self.in_queue.reserve(k);
        if self.in_queue[k] {
            false
        } else {
            self.in_queue.set(k, true);
            self.xs.push_back(k);
            true
        }
    }
    pub fn pop(&mut self) -> Option<K> {
        let k = self.xs.pop_front()?;
        self.in_queue.set(k, false);
        Some(k)
    }
    pub fn clear(&mut self) {
        let in_queue = &mut self.in_queue;
        for &k in self.xs.iter() {
            in_queue.set(k, false);
        }
        self.xs.clear()
    }
    pub fn iter(&self) -> impl iter::Iterator<Item=&K> {
        self.xs.iter()
    }
}
