pub mod model;
pub mod player;
