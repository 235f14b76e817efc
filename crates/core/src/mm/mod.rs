//! Memory model.
//!
//! Pages and the page table arena. Nothing here decides *which* page moves;
//! that is the job of the policy units in [`crate::nfu`].

/// Virtual page record and its location.
pub mod page;

/// Dense page table arena.
pub mod page_table;

pub use page::{Location, Page};
pub use page_table::PageTable;
