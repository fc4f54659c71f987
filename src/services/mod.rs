pub use self::errors::{CascadeStage, ServiceError, ServiceResult};

pub mod cascade;
pub mod categories;
pub mod errors;
pub mod search;
pub mod software;
pub mod subcategories;
