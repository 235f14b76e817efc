//! Page Table arena.
//!
//! The page table is a dense, owned arena of [`Page`] records. Page ids are
//! resolved to arena indices through [`PageTable::index_of`]; the mapping is the
//! identity because pages are created in id order and never removed, but all
//! lookups go through it so the rule lives in one place.
//!
//! # Layout at creation
//!
//! - Pages `0..rm` are resident in frames `0..rm`.
//! - Pages `rm..vm` are stored in swap slots `0..vm-rm`.

use std::collections::HashMap;
use std::fmt;

use crate::common::constants::TABLE_RULE;
use crate::common::error::InvariantViolation;
use crate::common::ids::{FrameId, PageId, SwapSlot};

use super::page::{Location, Page};

/// Ordered collection of every virtual page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTable {
    pages: Vec<Page>,
}

impl PageTable {
    /// Builds the initial table for `virtual_memory_size` pages and
    /// `real_memory_size` frames.
    ///
    /// The caller validates the geometry first; this constructor only lays the
    /// pages out.
    pub fn new(virtual_memory_size: usize, real_memory_size: usize) -> Self {
        let pages = (0..virtual_memory_size)
            .map(|i| {
                let location = if i < real_memory_size {
                    Location::Frame(FrameId::new(i))
                } else {
                    Location::Swap(SwapSlot::new(i - real_memory_size))
                };
                Page::new(PageId::new(i), location)
            })
            .collect();
        Self { pages }
    }

    /// Wraps an existing set of pages.
    ///
    /// Only the id ordering is checked; residency rules are left to
    /// [`check_invariants`](Self::check_invariants) so that broken tables can be
    /// constructed and inspected.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::UnknownPage`] if a page's id does not match
    /// its position.
    pub fn from_pages(pages: Vec<Page>) -> Result<Self, InvariantViolation> {
        let len = pages.len();
        if let Some((_, page)) = pages
            .iter()
            .enumerate()
            .find(|(i, page)| page.id().val() != *i)
        {
            return Err(InvariantViolation::UnknownPage {
                page: page.id(),
                len,
            });
        }
        Ok(Self { pages })
    }

    /// Maps a page id to its arena index.
    #[inline]
    pub const fn index_of(&self, id: PageId) -> Option<usize> {
        if id.val() < self.pages.len() {
            Some(id.val())
        } else {
            None
        }
    }

    /// Number of pages in the table.
    #[inline]
    pub const fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if the table has no pages.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Looks up a page by id.
    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.index_of(id).map(|i| &self.pages[i])
    }

    /// Looks up a page by id for mutation.
    pub fn get_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.index_of(id).map(|i| &mut self.pages[i])
    }

    /// Iterates over pages in ascending id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Iterates mutably over pages in ascending id order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Page> {
        self.pages.iter_mut()
    }

    /// Number of pages currently holding a frame.
    pub fn resident_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_resident()).count()
    }

    /// Usage counters in id order.
    pub fn counters(&self) -> Vec<u8> {
        self.pages.iter().map(|p| p.counter).collect()
    }

    /// Verifies the residency bookkeeping.
    ///
    /// Checks that exactly `expected_resident` pages hold a frame and that no
    /// frame or swap slot is claimed twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self, expected_resident: usize) -> Result<(), InvariantViolation> {
        let mut frames: HashMap<FrameId, PageId> = HashMap::with_capacity(expected_resident);
        let mut slots: HashMap<SwapSlot, PageId> = HashMap::new();

        for page in &self.pages {
            match page.location() {
                Location::Frame(frame) => {
                    if let Some(first) = frames.insert(frame, page.id()) {
                        return Err(InvariantViolation::DuplicateFrame {
                            frame,
                            first,
                            second: page.id(),
                        });
                    }
                }
                Location::Swap(slot) => {
                    if let Some(first) = slots.insert(slot, page.id()) {
                        return Err(InvariantViolation::DuplicateSwapSlot {
                            slot,
                            first,
                            second: page.id(),
                        });
                    }
                }
            }
        }

        if frames.len() != expected_resident {
            return Err(InvariantViolation::ResidentCount {
                expected: expected_resident,
                found: frames.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PageTable {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl<'a> IntoIterator for &'a mut PageTable {
    type Item = &'a mut Page;
    type IntoIter = std::slice::IterMut<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter_mut()
    }
}

impl fmt::Display for PageTable {
    /// Renders every page between two rule lines, one page per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TABLE_RULE}")?;
        for page in &self.pages {
            writeln!(f, "{page}")?;
        }
        write!(f, "{TABLE_RULE}")
    }
}
