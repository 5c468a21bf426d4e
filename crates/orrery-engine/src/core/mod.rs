pub mod clock;
pub mod frame;
pub mod scene;
pub mod time;
