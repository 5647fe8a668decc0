pub mod fade;
pub mod horizontal;
pub mod trigger;
