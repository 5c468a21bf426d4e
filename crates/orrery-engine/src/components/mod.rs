pub mod entity;
pub mod material;
pub mod motion;
