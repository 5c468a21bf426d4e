/// Galaxy presets: layered particle fields inside a tilted group.

use std::f32::consts::PI;

use glam::Vec3;
use orrery_engine::{ColorRule, LayerSpec, Placement, SizeRule, SpiralArms};

/// One distant galaxy, drawn as a stack of particle layers sharing a
/// world position and tilt.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyPreset {
    /// Pick identifier. `None` keeps the group out of picking.
    pub identifier: Option<&'static str>,
    pub label: &'static str,
    pub position: Vec3,
    /// Euler tilt (XYZ), radians.
    pub tilt: Vec3,
    /// Rotation about the local y axis, radians per frame.
    pub spin: f32,
    pub pick_radius: f32,
    /// Label offset from the group origin.
    pub label_offset: Vec3,
    pub layers: Vec<LayerSpec>,
}

fn rgb8(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

pub const LABEL_SIZE: f32 = 3.0;

pub fn milky_way() -> GalaxyPreset {
    let indigo = rgb8(75, 0, 130);
    let arms = SpiralArms {
        arms: 4,
        radius: 300.0,
        thickness: 10.0,
        tightness: 3.4,
        log_factor: 0.019,
        growth: 1.7,
        harmonic: 1.4,
        bias: 1.3,
        scale: 0.8,
        acceptance: 0.4,
        spread: 0.4,
    };
    let outer_arms = SpiralArms {
        radius: 700.0,
        thickness: 15.0,
        log_factor: 0.018,
        growth: 1.8,
        harmonic: 1.5,
        bias: 1.4,
        scale: 0.9,
        spread: 0.3,
        ..arms
    };

    GalaxyPreset {
        identifier: Some("milkyway"),
        label: "Milky Way",
        position: Vec3::new(4000.0, 0.0, 0.0),
        tilt: Vec3::new(PI / 6.6, 0.0, PI / 8.0),
        spin: 0.00015,
        pick_radius: 800.0,
        label_offset: Vec3::new(0.0, 200.0, 0.0),
        layers: vec![
            LayerSpec {
                count: 25_000,
                placement: Placement::Disk { radius: 300.0, stretch: 1.2, thickness: 10.0 },
                color: ColorRule::Solid { rgb: indigo },
                size: SizeRule::new(0.5, 0.6),
            },
            LayerSpec {
                count: 2_500,
                placement: Placement::Spiral(arms),
                color: ColorRule::RadialSplit {
                    inner: rgb8(147, 112, 219),
                    outer: indigo,
                    threshold: 240.0,
                },
                size: SizeRule::new(0.7, 0.7),
            },
            LayerSpec {
                count: 25_000,
                placement: Placement::Disk { radius: 700.0, stretch: 1.4, thickness: 15.0 },
                color: ColorRule::Solid { rgb: rgb8(25, 25, 112) },
                size: SizeRule::new(0.6, 0.7),
            },
            LayerSpec {
                count: 4_300,
                placement: Placement::Spiral(outer_arms),
                color: ColorRule::Solid { rgb: rgb8(70, 130, 180) },
                size: SizeRule::new(0.7, 0.7),
            },
            // halo
            LayerSpec {
                count: 300,
                placement: Placement::Sphere { radius: 700.0, stretch: 1.5, power: 2.0, squash: 0.5 },
                color: ColorRule::Solid { rgb: [1.2, 1.1, 1.9] },
                size: SizeRule::new(0.8, 1.9),
            },
            // bulge
            LayerSpec {
                count: 5_000,
                placement: Placement::Sphere { radius: 100.0, stretch: 1.0, power: 1.5, squash: 0.4 },
                color: ColorRule::Solid { rgb: [1.0, 140.0 / 255.0, 0.0] },
                size: SizeRule::new(1.0, 1.4),
            },
        ],
    }
}

pub fn andromeda() -> GalaxyPreset {
    let blue = [0.4, 0.8, 1.0];
    let warm = [1.0, 0.9, 0.5];
    let arms = SpiralArms {
        arms: 5,
        radius: 600.0,
        thickness: 15.0,
        tightness: 1.1,
        log_factor: 0.015,
        growth: 1.0,
        harmonic: 1.0,
        bias: 1.0,
        scale: 0.5,
        acceptance: 0.5,
        spread: 0.3,
    };
    let outer_arms = SpiralArms {
        radius: 840.0,
        thickness: 25.0,
        log_factor: 0.022,
        spread: 0.25,
        ..arms
    };
    let arm_color = ColorRule::Jitter { base: blue, lo: -0.075, hi: 0.075, blue_gain: 1.5 };
    let core_color = ColorRule::Jitter { base: warm, lo: -0.05, hi: 0.05, blue_gain: 1.0 };

    GalaxyPreset {
        identifier: None,
        label: "Andromeda Galaxy",
        position: Vec3::new(5000.0, -2500.0, -5000.0),
        tilt: Vec3::new(PI / 6.0, 0.0, -PI / 6.0),
        spin: 0.0,
        pick_radius: 0.0,
        label_offset: Vec3::new(0.0, 200.0, 0.0),
        layers: vec![
            LayerSpec {
                count: 20_000,
                placement: Placement::Disk { radius: 600.0, stretch: 1.0, thickness: 15.0 },
                color: ColorRule::Jitter { base: blue, lo: -0.08, hi: 0.02, blue_gain: 1.8 },
                size: SizeRule::new(0.5, 0.6),
            },
            LayerSpec {
                count: 9_800,
                placement: Placement::Spiral(arms),
                color: arm_color,
                size: SizeRule::new(0.6, 0.6),
            },
            LayerSpec {
                count: 10_000,
                placement: Placement::Spiral(outer_arms),
                color: arm_color,
                size: SizeRule::new(0.6, 0.6),
            },
            LayerSpec {
                count: 1_000,
                placement: Placement::Sphere { radius: 840.0, stretch: 1.5, power: 2.0, squash: 0.5 },
                color: ColorRule::Jitter { base: [0.8, 0.8, 1.0], lo: -0.025, hi: 0.025, blue_gain: 1.0 },
                size: SizeRule::new(0.4, 0.4),
            },
            LayerSpec {
                count: 2_000,
                placement: Placement::Bar { half_length: 45.0, width: 10.0, thickness: 5.0 },
                color: core_color,
                size: SizeRule::new(0.8, 1.0),
            },
            LayerSpec {
                count: 2_000,
                placement: Placement::Sphere { radius: 100.0, stretch: 1.0, power: 1.5, squash: 0.4 },
                color: core_color,
                size: SizeRule::new(1.0, 1.2),
            },
        ],
    }
}

/// The background star cube around everything.
pub fn star_field() -> LayerSpec {
    LayerSpec {
        count: 20_000,
        placement: Placement::Cube { spread: 10_000.0 },
        color: ColorRule::Solid { rgb: [1.0, 1.0, 1.0] },
        size: SizeRule::new(1.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::generate_field;

    #[test]
    fn milky_way_layer_counts() {
        let counts: Vec<usize> = milky_way().layers.iter().map(|l| l.count).collect();
        assert_eq!(counts, vec![25_000, 2_500, 25_000, 4_300, 300, 5_000]);
    }

    #[test]
    fn andromeda_has_a_central_bar() {
        let bar = andromeda()
            .layers
            .into_iter()
            .find(|l| matches!(l.placement, Placement::Bar { .. }))
            .expect("bar layer");
        let field = generate_field(&bar, 5);
        assert_eq!(field.len(), 2_000);
        assert!(field.samples().iter().all(|s| s.position[0].abs() <= 45.0));
    }

    #[test]
    fn arm_layers_keep_fewer_than_drawn() {
        for layer in milky_way().layers.iter().chain(andromeda().layers.iter()) {
            let field = generate_field(layer, 11);
            match layer.placement {
                Placement::Spiral(_) => assert!(field.len() < layer.count),
                _ => assert_eq!(field.len(), layer.count),
            }
        }
    }
}
