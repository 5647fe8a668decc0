//! The product story view: layout measurement and the mounted component.

pub mod component;
pub mod layout;
