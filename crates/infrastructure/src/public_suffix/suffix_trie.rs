use compact_str::CompactString;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;

/// A node in the reversed-label suffix trie.
#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    /// A plain rule ends here (`co.uk` at the "co" node under "uk").
    rule: bool,
    /// `*.ck` sets `wildcard` at the "ck" node: any one label below it is
    /// also a public suffix.
    wildcard: bool,
    /// `!www.ck` sets `exception` at the "www" node under "ck".
    exception: bool,
}

/// Public suffix rules stored as reversed label paths.
///
/// Lookup for `shop.example.co.uk`:
///   Reversed labels: ["uk", "co", "example", "shop"]
///   Walk: root → "uk" (rule) → "co" (rule) → "example" (missing, stop)
///   Longest suffix: 2 labels (`co.uk`)
#[derive(Default)]
pub(crate) struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Inserts one rule in list syntax: `co.uk`, `*.ck` or `!www.ck`.
    /// Labels must already be lower case.
    pub(crate) fn insert(&mut self, rule: &str) {
        let (exception, rule) = match rule.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, rule),
        };
        let (wildcard, rule) = match rule.strip_prefix("*.") {
            Some(rest) => (true, rest),
            None => (false, rule),
        };
        if rule.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for label in rule.split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }

        if exception {
            node.exception = true;
        } else if wildcard {
            node.wildcard = true;
        } else {
            node.rule = true;
        }
        self.len += 1;
    }

    /// Number of trailing labels of `domain` that form its public suffix.
    ///
    /// Exception rules win over everything else; otherwise the longest
    /// matching rule counts, and the implicit `*` rule makes the last label
    /// a public suffix when nothing matches.
    pub(crate) fn suffix_labels(&self, domain: &str) -> usize {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();
        let mut node = &self.root;
        let mut longest = 1;

        for (i, label) in labels.iter().enumerate() {
            if node.wildcard {
                longest = longest.max(i + 1);
            }
            match node.children.get(*label) {
                Some(child) => {
                    if child.exception {
                        return i;
                    }
                    if child.rule {
                        longest = longest.max(i + 1);
                    }
                    node = child;
                }
                None => break,
            }
        }

        longest
    }
}
