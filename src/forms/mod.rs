pub mod categories;
pub mod software;
pub mod subcategories;
