use std::fmt;

use serde_json::Value;

/// Iterator over the members of a [`ClosedSet`]
pub type Members = std::iter::Copied<std::slice::Iter<'static, &'static str>>;

/// A fixed, ordered set of string tokens known at build time
///
/// Registries are declared as `static` items, so [`ClosedSet::new`] is
/// evaluated by the compiler: an empty set, an empty token, or a duplicate
/// token fails the build instead of surfacing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSet {
    domain: &'static str,
    members: &'static [&'static str],
}

impl ClosedSet {
    /// Create a closed set for `domain` holding `members` in insertion order
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty, contains an empty token, or contains the
    /// same token twice. In a `static` initializer this is a compile error.
    pub const fn new(domain: &'static str, members: &'static [&'static str]) -> Self {
        assert!(!members.is_empty(), "closed set must have at least one member");

        let mut i = 0;
        while i < members.len() {
            assert!(!members[i].is_empty(), "closed set members must be non-empty");

            let mut j = i + 1;
            while j < members.len() {
                assert!(!tokens_equal(members[i], members[j]), "closed set contains a duplicate member");
                j += 1;
            }
            i += 1;
        }

        Self { domain, members }
    }

    /// Human-readable name of the domain (e.g. "ISO 639-1 language code")
    pub const fn domain(&self) -> &'static str {
        self.domain
    }

    /// Canonical members, in the order they were declared
    pub const fn members(&self) -> &'static [&'static str] {
        self.members
    }

    pub const fn len(&self) -> usize {
        self.members.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> Members {
        self.members.iter().copied()
    }

    /// Whether `token` is a member of the set
    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(&token)
    }

    /// Return the canonical `'static` spelling of `token` if it is a member
    pub fn resolve(&self, token: &str) -> Option<&'static str> {
        self.iter().find(|member| *member == token)
    }

    /// Membership test for untrusted values
    ///
    /// Total: anything that is not a JSON string is not a member.
    pub fn is_member(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|token| self.contains(token))
    }
}

impl fmt::Display for ClosedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain)
    }
}

impl IntoIterator for &ClosedSet {
    type Item = &'static str;
    type IntoIter = Members;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}

/// A typed value drawn from a [`ClosedSet`]
///
/// The static type is a convenience on top of the runtime set; the set stays
/// the source of truth for what is valid.
pub trait Enumerated: Sized + Copy + 'static {
    /// The registry this type draws its values from
    fn closed_set() -> &'static ClosedSet;

    /// Wire spelling of this value
    fn token(self) -> &'static str;

    /// Parse a wire spelling, `None` if it is not a member
    fn from_token(token: &str) -> Option<Self>;
}

const fn tokens_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
