pub mod category;
pub mod software;
pub mod subcategory;
pub mod types;
