/// Prefix trie for longest-match lookups over rule-table keys.
use std::collections::HashMap;

/// A simple Trie (prefix tree) over table keys.
///
/// Rule tables build one of these at load time so onset and rime matching
/// can find the longest key starting at a position without re-sorting the
/// key set for every syllable.
///
/// # Example
/// ```
/// use libbraille_core::trie::TrieNode;
///
/// let mut trie = TrieNode::new();
/// trie.insert("n");
/// trie.insert("ng");
///
/// assert!(trie.contains_word("ng"));
/// assert!(!trie.contains_word("g"));
/// assert_eq!(trie.longest_prefix("ngai"), Some("ng"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: HashMap<char, Box<TrieNode>>,
    is_end: bool,
    /// When `is_end` is true, `word` contains the full key.
    word: Option<String>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            is_end: false,
            word: None,
        }
    }

    /// Build a trie from an iterator of keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for key in keys {
            trie.insert(key.as_ref());
        }
        trie
    }

    /// Insert a key into the trie.
    ///
    /// The empty key marks the root as a word; callers that treat the empty
    /// string as "absent" should filter it out first.
    pub fn insert(&mut self, key: &str) {
        let mut node = self;
        for ch in key.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
        node.is_end = true;
        node.word = Some(key.to_string());
    }

    /// Check whether the trie contains exactly the given key.
    ///
    /// Returns `true` only if `word` exists as a complete key,
    /// not just as a prefix.
    ///
    /// # Example
    /// ```
    /// use libbraille_core::trie::TrieNode;
    ///
    /// let mut trie = TrieNode::new();
    /// trie.insert("iau");
    ///
    /// assert!(trie.contains_word("iau"));
    /// assert!(!trie.contains_word("ia"));  // prefix, not a complete key
    /// ```
    pub fn contains_word(&self, word: &str) -> bool {
        let mut node = self;
        for ch in word.chars() {
            if let Some(child) = node.children.get(&ch) {
                node = child;
            } else {
                return false;
            }
        }
        node.is_end
    }

    /// Walk the trie along `input` and return every key that is a prefix of
    /// it.
    ///
    /// Returns `(end_byte, key)` pairs in order of increasing length, where
    /// `end_byte` is the exclusive byte offset in `input` after the match.
    /// The empty key is never reported.
    pub fn walk_prefixes<'a>(&'a self, input: &str) -> Vec<(usize, &'a str)> {
        let mut res = Vec::new();
        let mut node = self;
        for (idx, ch) in input.char_indices() {
            match node.children.get(&ch) {
                Some(child) => {
                    node = child;
                    if node.is_end {
                        if let Some(w) = &node.word {
                            res.push((idx + ch.len_utf8(), w.as_str()));
                        }
                    }
                }
                None => break,
            }
        }
        res
    }

    /// Return the longest non-empty key that is a prefix of `input`.
    pub fn longest_prefix<'a>(&'a self, input: &str) -> Option<&'a str> {
        self.walk_prefixes(input).pop().map(|(_, key)| key)
    }
}
