//! Reusable HTML components for preview pages
//!
//! Maud component functions used by the command line when a rendered
//! fragment is wrapped into a standalone document.

pub mod layout;
