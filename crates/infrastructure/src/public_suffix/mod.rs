pub mod suffix_list;
mod suffix_trie;

pub use suffix_list::PublicSuffixList;
