pub mod camera;
pub mod comet;
pub mod field;
pub mod kinematics;
pub mod labels;
pub mod lighting;
pub mod loading;
pub mod meteor;
pub mod orbit;
pub mod rng;
pub mod selection;
pub mod trail;
pub mod uniforms;
