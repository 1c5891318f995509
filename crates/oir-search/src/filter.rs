//! Predicate-based filtering of record collections
//!
//! A [`FilterState`] pairs a free-text query with an on/off flag per
//! category. [`filter`] keeps the items that match both, in insertion order,
//! or ranked by relevance when the items carry a score.
//!
//! Filtering borrows its input and never mutates it: the same collection and
//! state always produce the same output.

use crate::query::TextQuery;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Closed set of categories a collection is partitioned into
pub trait Category: Copy + Eq + Hash + Debug + 'static {
    /// Every category, in display order
    const ALL: &'static [Self];

    /// Stable identifier used by clients
    fn key(self) -> &'static str;

    /// Whether the category is shown before the user touches the filter
    #[inline]
    fn default_enabled(self) -> bool {
        true
    }

    /// Look up a category by key
    #[must_use]
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// Record that can be matched by text and category
pub trait Searchable {
    type Category: Category;

    /// Category the item belongs to
    fn category(&self) -> Self::Category;

    /// Fields the text query is matched against
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Ranking score, higher first
    #[inline]
    fn relevance(&self) -> Option<f64> {
        None
    }
}

/// Query plus per-category flags
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState<C: Category> {
    query: TextQuery,
    flags: IndexMap<C, bool>,
}

impl<C: Category> FilterState<C> {
    /// Blank query, every category at its default
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: TextQuery::default(),
            flags: C::ALL.iter().map(|c| (*c, c.default_enabled())).collect(),
        }
    }

    /// Blank query, every category enabled
    #[must_use]
    pub fn all_enabled() -> Self {
        Self {
            query: TextQuery::default(),
            flags: C::ALL.iter().map(|c| (*c, true)).collect(),
        }
    }

    /// Replace the query
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<TextQuery>) -> Self {
        self.query = query.into();
        self
    }

    /// Replace the query in place
    #[inline]
    pub fn set_query(&mut self, query: impl Into<TextQuery>) {
        self.query = query.into();
    }

    /// Current query
    #[inline]
    #[must_use]
    pub fn query(&self) -> &TextQuery {
        &self.query
    }

    /// Whether items of `category` are shown
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, category: C) -> bool {
        self.flags
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_enabled())
    }

    /// Set one flag
    #[inline]
    pub fn set(&mut self, category: C, enabled: bool) {
        self.flags.insert(category, enabled);
    }

    /// Set one flag, builder style
    #[inline]
    #[must_use]
    pub fn with(mut self, category: C, enabled: bool) -> Self {
        self.set(category, enabled);
        self
    }

    /// Flip one flag, returning the new value
    pub fn toggle(&mut self, category: C) -> bool {
        let next = !self.is_enabled(category);
        self.set(category, next);
        next
    }

    /// Enable `category` and disable every other one
    pub fn enable_only(&mut self, category: C) {
        for c in C::ALL {
            self.flags.insert(*c, *c == category);
        }
    }

    /// Enabled categories, in display order
    pub fn enabled(&self) -> impl Iterator<Item = C> + '_ {
        C::ALL.iter().copied().filter(|c| self.is_enabled(*c))
    }

    /// Flags in display order, keyed by category key
    pub fn flags(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        C::ALL.iter().map(|c| (c.key(), self.is_enabled(*c)))
    }

    /// Whether `item` passes both predicates
    #[must_use]
    pub fn admits<T>(&self, item: &T) -> bool
    where
        T: Searchable<Category = C> + ?Sized,
    {
        self.is_enabled(item.category()) && self.query.matches_any(item.search_fields())
    }
}

impl<C: Category> Default for FilterState<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Items admitted by `state`
///
/// Insertion order is kept unless some item carries a relevance score, in
/// which case items are ranked highest first (ties keep insertion order).
#[must_use]
pub fn filter<'a, T>(items: &'a [T], state: &FilterState<T::Category>) -> Vec<&'a T>
where
    T: Searchable,
{
    filter_where(items, state, |_| true)
}

/// Items admitted by `state` and by an extra predicate
///
/// The predicate composes conjunctively with the query and category flags,
/// e.g. to scope documents to one union.
#[must_use]
pub fn filter_where<'a, T, P>(
    items: &'a [T],
    state: &FilterState<T::Category>,
    mut predicate: P,
) -> Vec<&'a T>
where
    T: Searchable,
    P: FnMut(&T) -> bool,
{
    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| state.admits(*item) && predicate(*item))
        .collect();

    if matched.iter().any(|item| item.relevance().is_some()) {
        matched.sort_by(|a, b| rank(*b).total_cmp(&rank(*a)));
    }

    matched
}

/// Number of items admitted by `state`
#[must_use]
pub fn count<T>(items: &[T], state: &FilterState<T::Category>) -> usize
where
    T: Searchable,
{
    items.iter().filter(|item| state.admits(*item)).count()
}

#[inline]
fn rank<T: Searchable + ?Sized>(item: &T) -> f64 {
    item.relevance().unwrap_or(f64::NEG_INFINITY)
}
