//! Serialized shapes returned by the HTTP layer. Field names follow the
//! camelCase convention the catalog frontend expects.

pub mod categories;
pub mod search;
pub mod software;
pub mod subcategories;
