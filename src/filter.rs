//! Filterable collections
//!
//! A single derived-view abstraction shared by the pages: items, a filter
//! made of independent predicates, and the indices of the items that pass.
//! The derivation is recomputed only when the filter actually changes, and
//! the filter can only be changed through [`FilteredView::set_filter`], so
//! the visible set is never stale.

use std::fmt::Display;
use std::str::FromStr;

/// A selector value where `All` is the sentinel meaning "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// True for the sentinel, otherwise on equality.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: PartialEq + Clone> Selection<T> {
    /// Next option in selector order: `All`, each option in turn, back to `All`.
    /// A value not among the options also goes back to `All`.
    pub fn cycle(&self, options: &[T]) -> Self {
        let next = match self {
            Selection::All => options.first(),
            Selection::Only(current) => options
                .iter()
                .position(|option| option == current)
                .and_then(|index| options.get(index + 1)),
        };
        next.cloned().map_or(Selection::All, Selection::Only)
    }
}

impl<T: Display> Selection<T> {
    /// Text shown in a selector, using `sentinel` for `All`.
    pub fn label(&self, sentinel: &str) -> String {
        match self {
            Selection::All => sentinel.to_string(),
            Selection::Only(value) => value.to_string(),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// `all` (any case) or an empty string select the sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            trimmed.parse().map(Selection::Only)
        }
    }
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A predicate over one record type.
pub trait RecordFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Applies a filter to a borrowed slice, keeping the original order.
pub fn filter_slice<'a, T, F: RecordFilter<T>>(items: &'a [T], filter: &F) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Owned items plus a memoized filtered view of them.
#[derive(Debug, Clone)]
pub struct FilteredView<T, F> {
    items: Vec<T>,
    filter: F,
    visible: Vec<usize>,
    derivations: usize,
}

impl<T, F> FilteredView<T, F>
where
    F: RecordFilter<T> + PartialEq,
{
    pub fn new(items: Vec<T>, filter: F) -> Self {
        let mut view = Self {
            items,
            filter,
            visible: Vec::new(),
            derivations: 0,
        };
        view.derive();
        view
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Replaces the filter. Returns whether the view was recomputed.
    pub fn set_filter(&mut self, filter: F) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.derive();
        true
    }

    /// Edits a copy of the filter and applies it through [`Self::set_filter`].
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut F)) -> bool
    where
        F: Clone,
    {
        let mut next = self.filter.clone();
        edit(&mut next);
        self.set_filter(next)
    }

    /// Items passing the current filter.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|&index| self.items.get(index))
    }

    pub fn visible_at(&self, position: usize) -> Option<&T> {
        self.visible
            .get(position)
            .and_then(|&index| self.items.get(index))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Every item, ignoring the filter.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many times the visible set has been computed.
    pub fn derivations(&self) -> usize {
        self.derivations
    }

    fn derive(&mut self) {
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.matches(item))
            .map(|(index, _)| index)
            .collect();
        self.derivations += 1;
    }
}
