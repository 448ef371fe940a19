pub mod build;
pub mod list;
pub mod validate;

mod summary;
