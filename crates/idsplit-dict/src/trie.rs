use idsplit_core::{IdsplitError, SplitIdentification, SplitPosition};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A character trie node. `value` is set independently of `is_end`.
#[derive(Debug, Clone)]
pub struct TrieNode<T> {
    children: HashMap<char, TrieNode<T>>,
    is_end: bool,
    value: Option<T>,
}

impl<T> Default for TrieNode<T> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            is_end: false,
            value: None,
        }
    }
}

impl<T> TrieNode<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_child(&self, ch: char) -> Option<&TrieNode<T>> {
        self.children.get(&ch)
    }

    /// Add a fresh child edge. Adding an edge that already exists is a
    /// caller bug and is reported as `DuplicateEdge`.
    pub fn add_child(&mut self, ch: char) -> Result<&mut TrieNode<T>, IdsplitError> {
        match self.children.entry(ch) {
            Entry::Occupied(_) => Err(IdsplitError::DuplicateEdge(ch)),
            Entry::Vacant(slot) => Ok(slot.insert(TrieNode::new())),
        }
    }

    fn child_or_insert(&mut self, ch: char) -> &mut TrieNode<T> {
        self.children.entry(ch).or_default()
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn set_end(&mut self, is_end: bool) {
        self.is_end = is_end;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn set_value(&mut self, value: T) {
        self.value = Some(value);
    }
}

/// A prefix tree over characters with an optional payload per entry.
///
/// Keys are stored as given; dictionaries lower-case before inserting.
#[derive(Debug, Clone)]
pub struct Trie<T = ()> {
    root: TrieNode<T>,
    len: usize,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mark `key` as an entry, creating missing edges, and return its node.
    pub fn insert(&mut self, key: &str) -> &mut TrieNode<T> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.child_or_insert(ch);
        }
        if !node.is_end {
            node.is_end = true;
            self.len += 1;
        }
        node
    }

    /// Insert `key` and replace its payload.
    pub fn insert_value(&mut self, key: &str, value: T) {
        self.insert(key).set_value(value);
    }

    /// The node reached by walking `key`, whether or not it ends an entry.
    pub fn find(&self, key: &str) -> Option<&TrieNode<T>> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.get_child(ch)?;
        }
        Some(node)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some_and(TrieNode::is_end)
    }

    /// True when some path starts with `prefix`. The empty prefix always does.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Payload of the entry `key`, if `key` is an entry.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.find(key)
            .filter(|node| node.is_end)
            .and_then(TrieNode::value)
    }

    /// Every offset `i` in `start..=end` such that `term[start..=i]` is an
    /// entry. Walks the trie once; `end` is clamped to the last character.
    pub fn end_positions(&self, term: &[char], start: usize, end: usize) -> Vec<usize> {
        let mut positions = Vec::new();
        if term.is_empty() || start >= term.len() {
            return positions;
        }
        let end = end.min(term.len() - 1);
        let mut node = &self.root;
        for (offset, ch) in term[start..=end].iter().enumerate() {
            match node.get_child(*ch) {
                Some(child) => node = child,
                None => break,
            }
            if node.is_end {
                positions.push(start + offset);
            }
        }
        positions
    }

    /// `end_positions` tagged with a classification.
    pub fn split_positions(
        &self,
        term: &[char],
        start: usize,
        end: usize,
        identification: SplitIdentification,
    ) -> Vec<SplitPosition> {
        self.end_positions(term, start, end)
            .into_iter()
            .map(|pos| SplitPosition::new(pos, identification))
            .collect()
    }
}
