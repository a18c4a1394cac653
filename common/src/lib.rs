//! Common library exports shared between the search client engine and its embedders.

extern crate serde;


pub mod collection;
pub mod facet_model;
pub mod page_window;
pub mod search_const;
pub mod search_state;
