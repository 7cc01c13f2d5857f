//! Cache key types.
//!
//! A [`CacheKey`] is a namespace prefix plus an ordered list of [`KeyPart`]s.
//! Keys compare structurally, part by part, so two requests map to the same
//! entry exactly when every discriminating parameter is equal. A part without
//! a value is distinct from a part with any value, including the empty string,
//! which is how an absent optional parameter is encoded.
//!
//! ## Format
//!
//! The `Display` form is `{prefix}:name=value&name`. It is meant for logs; two
//! keys may share a display string only if a value contains `&` or `=`, and
//! they still compare unequal.
//!
//! ```
//! use embox_core::{CacheKey, KeyPart};
//!
//! let key = CacheKey::new("emby.list", vec![
//!     KeyPart::new("page", Some("2")),
//!     KeyPart::new("parentId", None::<&str>),
//! ]);
//! assert_eq!(key.to_string(), "emby.list:page=2&parentId");
//!
//! let fixed = CacheKey::new("emby.views", Vec::new());
//! assert_eq!(fixed.to_string(), "emby.views");
//! ```

use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct CacheKeyInner {
    prefix: SmolStr,
    parts: Vec<KeyPart>,
}

/// A cache key identifying a cached response.
///
/// `CacheKey` wraps its data in [`Arc`], so `clone()` only bumps a reference
/// count. Keys are cloned on every backend write.
#[derive(Clone, Debug)]
pub struct CacheKey {
    inner: Arc<CacheKeyInner>,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.prefix)?;
        for (i, part) in self.inner.parts.iter().enumerate() {
            let separator = match (i, self.inner.prefix.is_empty()) {
                (0, true) => "",
                (0, false) => ":",
                _ => "&",
            };
            write!(f, "{separator}{part}")?;
        }
        Ok(())
    }
}

impl CacheKey {
    /// Creates a new cache key from a prefix and its parts.
    pub fn new(prefix: impl Into<SmolStr>, parts: Vec<KeyPart>) -> Self {
        CacheKey {
            inner: Arc::new(CacheKeyInner {
                prefix: prefix.into(),
                parts,
            }),
        }
    }
}

/// A single named component of a cache key.
///
/// ```
/// use embox_core::KeyPart;
///
/// let page = KeyPart::new("page", Some("1"));
/// assert_eq!(page.to_string(), "page=1");
///
/// let parent = KeyPart::new("parentId", None::<&str>);
/// assert_eq!(parent.to_string(), "parentId");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyPart {
    key: SmolStr,
    value: Option<SmolStr>,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if let Some(value) = &self.value {
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

impl KeyPart {
    /// Creates a new key part.
    pub fn new<K: AsRef<str>, V: AsRef<str>>(key: K, value: Option<V>) -> Self {
        KeyPart {
            key: SmolStr::new(key),
            value: value.map(SmolStr::new),
        }
    }
}
