use std::iter::FusedIterator;

use super::NavigationState;

/// One element of the breadcrumb trail.
///
/// `jump_index` is the history index to hand to `NavigationStack::jump_to`
/// when the crumb is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breadcrumb<'a> {
    pub label: &'a str,
    pub is_active: bool,
    pub jump_index: usize,
}

/// Lazy iterator over the breadcrumb trail.
///
/// Borrows the history and allocates nothing. A clone taken before iterating
/// replays the trail independently.
#[derive(Debug, Clone)]
pub struct Breadcrumbs<'a> {
    trail: &'a [NavigationState],
    next: usize,
}

impl<'a> Breadcrumbs<'a> {
    pub(super) fn new(trail: &'a [NavigationState]) -> Self {
        Self { trail, next: 0 }
    }
}

impl<'a> Iterator for Breadcrumbs<'a> {
    type Item = Breadcrumb<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.trail.get(self.next)?;
        let index = self.next;
        self.next += 1;
        Some(Breadcrumb {
            label: state.breadcrumb_label(),
            is_active: index + 1 == self.trail.len(),
            jump_index: index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trail.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Breadcrumbs<'_> {}

impl FusedIterator for Breadcrumbs<'_> {}
