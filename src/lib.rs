//! String-keyed prefix dictionaries.
//!
//! Two independent structures implement the same [`PrefixDictionary`] contract:
//!
//! - [`Trie`]: one node per character position, children kept in an ordered map.
//! - [`TernarySearchTree`]: one node per character comparison, with `lo`/`eq`/`hi` links.
//!
//! Both support exact lookup, deletion with pruning of dead nodes, and prefix enumeration in
//! ascending code-point order.
//!
//! ```rust
//! use prefix_dict::{PrefixDictionary, Trie};
//!
//! let mut trie = Trie::new();
//! trie.insert("foo", 1).unwrap();
//! trie.insert("foobar", 2).unwrap();
//! trie.insert("fo", 3).unwrap();
//!
//! let keys = trie.keys_with_prefix("fo");
//! assert_eq!(keys, vec!["fo", "foo", "foobar"]);
//! assert_eq!(trie.delete("foobar"), Ok(true));
//! assert_eq!(trie.get("foo"), Ok(Some(&1)));
//! ```

use crate::error::DictError;
use crate::keys::CharKey;

pub mod error;
pub mod keys;
pub mod stats;
pub mod trie;
pub mod tst;
pub mod utils;

pub use crate::trie::Trie;
pub use crate::tst::TernarySearchTree;

/// The shared contract of every prefix dictionary in this crate.
///
/// Keyed operations reject the zero-length key with [`DictError::EmptyKey`]. Prefix operations
/// accept the empty prefix, which matches every stored key.
pub trait PrefixDictionary {
    type Value;
    type PrefixIter<'a>: Iterator<Item = (String, &'a Self::Value)>
    where
        Self: 'a;

    /// Insert a key-value pair.
    ///
    /// Returns the previous value if the key was already present, in which case the length of
    /// the dictionary is unchanged.
    fn insert<K>(&mut self, key: K, value: Self::Value) -> Result<Option<Self::Value>, DictError>
    where
        K: Into<CharKey>,
    {
        self.insert_k(&key.into(), value)
    }
    fn insert_k(
        &mut self,
        key: &CharKey,
        value: Self::Value,
    ) -> Result<Option<Self::Value>, DictError>;

    /// Remove a key, pruning nodes no other key depends on. Returns whether the key was present.
    fn delete<K>(&mut self, key: K) -> Result<bool, DictError>
    where
        K: Into<CharKey>,
    {
        self.delete_k(&key.into())
    }
    fn delete_k(&mut self, key: &CharKey) -> Result<bool, DictError>;

    fn get<K>(&self, key: K) -> Result<Option<&Self::Value>, DictError>
    where
        K: Into<CharKey>,
    {
        self.get_k(&key.into())
    }
    fn get_k(&self, key: &CharKey) -> Result<Option<&Self::Value>, DictError>;

    fn get_mut<K>(&mut self, key: K) -> Result<Option<&mut Self::Value>, DictError>
    where
        K: Into<CharKey>,
    {
        self.get_mut_k(&key.into())
    }
    fn get_mut_k(&mut self, key: &CharKey) -> Result<Option<&mut Self::Value>, DictError>;

    fn contains<K>(&self, key: K) -> Result<bool, DictError>
    where
        K: Into<CharKey>,
    {
        Ok(self.get_k(&key.into())?.is_some())
    }

    /// Lazily enumerate every entry whose key starts with `prefix`, in ascending order.
    fn prefix_iter<K>(&self, prefix: K) -> Self::PrefixIter<'_>
    where
        K: Into<CharKey>,
    {
        self.prefix_iter_k(&prefix.into())
    }
    fn prefix_iter_k(&self, prefix: &CharKey) -> Self::PrefixIter<'_>;

    /// Collect every entry whose key starts with `prefix`, in ascending order.
    fn starts_with<K>(&self, prefix: K) -> Vec<(String, &Self::Value)>
    where
        K: Into<CharKey>,
    {
        self.prefix_iter(prefix).collect()
    }

    /// Like [`starts_with`](Self::starts_with), keys only.
    fn keys_with_prefix<K>(&self, prefix: K) -> Vec<String>
    where
        K: Into<CharKey>,
    {
        self.prefix_iter(prefix).map(|(k, _)| k).collect()
    }

    /// All entries in ascending key order.
    fn iter(&self) -> Self::PrefixIter<'_> {
        self.prefix_iter_k(&CharKey::default())
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}
