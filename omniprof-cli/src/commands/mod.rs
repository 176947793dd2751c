pub mod classes;
pub mod export;
pub mod import;
