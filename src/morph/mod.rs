pub mod driver;
pub mod path;
