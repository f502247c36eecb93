use std::fmt;

use crate::error::DictError;

/// An owned dictionary key: a sequence of Unicode scalar values.
///
/// Keys compare by raw code point, one character at a time; no normalization is applied, so
/// `"é"` (U+00E9) and `"e\u{301}"` are distinct keys.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CharKey {
    chars: Box<[char]>,
}

impl CharKey {
    pub fn new_from_str(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }

    pub fn new_from_slice(chars: &[char]) -> Self {
        Self {
            chars: chars.into(),
        }
    }

    #[inline]
    pub fn at(&self, pos: usize) -> char {
        self.chars[pos]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Reject the zero-length key, which no dictionary stores.
    pub(crate) fn non_empty(&self) -> Result<&[char], DictError> {
        if self.chars.is_empty() {
            return Err(DictError::EmptyKey);
        }
        Ok(&self.chars)
    }
}

impl AsRef<[char]> for CharKey {
    fn as_ref(&self) -> &[char] {
        &self.chars
    }
}

impl fmt::Display for CharKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<&str> for CharKey {
    fn from(s: &str) -> Self {
        Self::new_from_str(s)
    }
}

impl From<String> for CharKey {
    fn from(s: String) -> Self {
        Self::new_from_str(&s)
    }
}

impl From<&String> for CharKey {
    fn from(s: &String) -> Self {
        Self::new_from_str(s)
    }
}

impl From<Vec<char>> for CharKey {
    fn from(chars: Vec<char>) -> Self {
        Self {
            chars: chars.into_boxed_slice(),
        }
    }
}

impl From<&[char]> for CharKey {
    fn from(chars: &[char]) -> Self {
        Self::new_from_slice(chars)
    }
}

impl From<&CharKey> for CharKey {
    fn from(key: &CharKey) -> Self {
        key.clone()
    }
}
