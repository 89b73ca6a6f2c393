//! The in-memory document model.
//!
//! One tree per compound: structural metadata (`compound`) holding nested
//! mixed-content description trees (`doc`), plus the index model (`index`)
//! that ties the forest together.

pub mod compound;
pub mod doc;
pub mod index;
