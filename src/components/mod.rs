//! Page-level UI components: canvas, search box and inspector cards.

pub mod force_graph;
pub mod inspector;
pub mod search;
