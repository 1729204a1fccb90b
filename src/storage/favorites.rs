//! In-memory favorites set.

use std::collections::HashSet;

/// Set of favorite identities. Membership is the only query the filter needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: HashSet<String>,
}

impl FavoritesSet {
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.ids.contains(identity)
    }

    /// Flips membership and returns whether the identity is now a favorite.
    ///
    /// ```
    /// use marquee::storage::FavoritesSet;
    ///
    /// let mut favorites = FavoritesSet::default();
    /// assert!(favorites.toggle("tt0468569"));
    /// assert!(!favorites.toggle("tt0468569"));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, identity: &str) -> bool {
        if self.ids.remove(identity) {
            false
        } else {
            self.ids.insert(identity.to_string());
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted snapshot for persistence, so the file is stable across writes.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }
}
