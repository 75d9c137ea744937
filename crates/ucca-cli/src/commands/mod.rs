pub mod enumerate;
pub mod summary;
pub mod validate;
