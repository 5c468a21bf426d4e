// systems/field.rs
//
// Procedural particle fields: star cubes, galaxy disks, logarithmic spiral
// arms, halos, bulges and bars. Every field is generated once from a seed
// and never mutated afterwards; per-frame animation goes through shared
// uniforms instead.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::rng::Rng;

/// One point of a particle field.
/// Wire format (8 floats / 32 bytes): `[x, y, z, r, g, b, size, phase]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarSample {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
    /// Twinkle phase in [0, 2π).
    pub phase: f32,
}

impl StarSample {
    pub const FLOATS: usize = 8;
}

/// How candidate positions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Placement {
    /// Uniform cube: each axis is `(U - 0.5) * spread`.
    Cube { spread: f32 },
    /// Uniform-area disk with a rim taper on the height.
    Disk {
        radius: f32,
        /// Multiplier on the sampled radius (the taper still uses `radius`).
        stretch: f32,
        thickness: f32,
    },
    /// Rejection-sampled logarithmic spiral arms.
    Spiral(SpiralArms),
    /// Centre-weighted sphere, squashed on y.
    Sphere {
        radius: f32,
        stretch: f32,
        /// r = U^power; power > 1 concentrates toward the centre.
        power: f32,
        squash: f32,
    },
    /// Straight bar along x: `x = (2U - 1) * half_length`.
    Bar {
        half_length: f32,
        width: f32,
        thickness: f32,
    },
}

/// Parameters of a logarithmic spiral arm layer.
///
/// `base = arm * 2π/arms + ln(1 + r * tightness * log_factor) * growth`
/// `density = (sin(base * arms * harmonic) + bias) * scale`
/// A candidate survives when `U <= density * acceptance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralArms {
    pub arms: u32,
    pub radius: f32,
    pub thickness: f32,
    pub tightness: f32,
    pub log_factor: f32,
    pub growth: f32,
    pub harmonic: f32,
    pub bias: f32,
    pub scale: f32,
    pub acceptance: f32,
    /// Angular jitter around the arm crest: `(U - 0.5) * spread`.
    pub spread: f32,
}

impl SpiralArms {
    /// Arm crest angle at radius `r`.
    pub fn base_angle(&self, arm: u32, r: f32) -> f32 {
        let arms = self.arms.max(1) as f32;
        arm as f32 * (TAU / arms) + (1.0 + r * self.tightness * self.log_factor).ln() * self.growth
    }

    /// Density function evaluated at an arm's base angle.
    pub fn density(&self, base_angle: f32) -> f32 {
        ((base_angle * self.arms.max(1) as f32 * self.harmonic).sin() + self.bias) * self.scale
    }

    /// Probability that a candidate at (arm, r) is kept.
    pub fn acceptance_probability(&self, arm: u32, r: f32) -> f32 {
        (self.density(self.base_angle(arm, r)) * self.acceptance).clamp(0.0, 1.0)
    }

    /// Expected kept fraction over the candidate distribution, by midpoint
    /// quadrature over `u` (r = sqrt(u) * radius) for every arm.
    pub fn expected_acceptance(&self, steps: usize) -> f32 {
        let steps = steps.max(1);
        let arms = self.arms.max(1);
        let mut total = 0.0;
        for arm in 0..arms {
            for i in 0..steps {
                let u = (i as f32 + 0.5) / steps as f32;
                total += self.acceptance_probability(arm, u.sqrt() * self.radius);
            }
        }
        total / (arms as usize * steps) as f32
    }
}

/// Per-sample colour rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ColorRule {
    Solid { rgb: [f32; 3] },
    /// `outer` beyond `threshold` (absolute radius in the disk plane), else `inner`.
    RadialSplit {
        inner: [f32; 3],
        outer: [f32; 3],
        threshold: f32,
    },
    /// `base + (v, v, v * blue_gain)` with `v` uniform in `[lo, hi)`.
    Jitter {
        base: [f32; 3],
        lo: f32,
        hi: f32,
        blue_gain: f32,
    },
}

impl ColorRule {
    fn sample(&self, rng: &mut Rng, planar_radius: f32) -> [f32; 3] {
        match *self {
            ColorRule::Solid { rgb } => rgb,
            ColorRule::RadialSplit { inner, outer, threshold } => {
                if planar_radius > threshold {
                    outer
                } else {
                    inner
                }
            }
            ColorRule::Jitter { base, lo, hi, blue_gain } => {
                let v = rng.range(lo, hi);
                [base[0] + v, base[1] + v, base[2] + v * blue_gain]
            }
        }
    }
}

/// `base + U * spread`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRule {
    pub base: f32,
    pub spread: f32,
}

impl SizeRule {
    pub const fn new(base: f32, spread: f32) -> Self {
        Self { base, spread }
    }
}

/// Everything needed to generate one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Number of candidates drawn. Rejection may keep fewer.
    pub count: usize,
    pub placement: Placement,
    pub color: ColorRule,
    pub size: SizeRule,
}

/// A generated, immutable set of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    samples: Vec<StarSample>,
    candidates: usize,
}

impl ParticleField {
    /// Accepted samples only; rejected candidates are never stored.
    pub fn samples(&self) -> &[StarSample] {
        &self.samples
    }

    /// Flat float view for upload (`StarSample::FLOATS` per sample).
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of candidates drawn during generation.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Kept / drawn.
    pub fn acceptance_ratio(&self) -> f32 {
        if self.candidates == 0 {
            0.0
        } else {
            self.samples.len() as f32 / self.candidates as f32
        }
    }
}

/// Generate a layer deterministically from `seed`.
pub fn generate_field(spec: &LayerSpec, seed: u64) -> ParticleField {
    let mut rng = Rng::new(seed);
    let mut samples = Vec::with_capacity(spec.count);

    for _ in 0..spec.count {
        let Some(position) = place(&spec.placement, &mut rng) else {
            continue;
        };
        let planar = (position[0] * position[0] + position[2] * position[2]).sqrt();
        let phase = rng.angle();
        let color = spec.color.sample(&mut rng, planar);
        let size = spec.size.base + rng.next_f32() * spec.size.spread;
        samples.push(StarSample { position, color, size, phase });
    }

    ParticleField {
        samples,
        candidates: spec.count,
    }
}

fn place(placement: &Placement, rng: &mut Rng) -> Option<[f32; 3]> {
    match *placement {
        Placement::Cube { spread } => Some([
            rng.centered(spread),
            rng.centered(spread),
            rng.centered(spread),
        ]),
        Placement::Disk { radius, stretch, thickness } => {
            let r = rng.next_f32().sqrt() * radius * stretch;
            let theta = rng.angle();
            let y = rng.centered(thickness) * taper(r, radius);
            Some([r * theta.cos(), y, r * theta.sin()])
        }
        Placement::Spiral(arms) => {
            let arm = rng.next_int(arms.arms.max(1));
            let r = rng.next_f32().sqrt() * arms.radius;
            let base = arms.base_angle(arm, r);
            if rng.next_f32() > arms.density(base) * arms.acceptance {
                return None;
            }
            let theta = base + rng.centered(arms.spread);
            let y = rng.centered(arms.thickness) * taper(r, arms.radius);
            Some([r * theta.cos(), y, r * theta.sin()])
        }
        Placement::Sphere { radius, stretch, power, squash } => {
            let r = rng.next_f32().powf(power) * radius * stretch;
            let theta = rng.angle();
            let phi = rng.next_f32() * PI;
            Some([
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin() * squash,
                r * phi.cos(),
            ])
        }
        Placement::Bar { half_length, width, thickness } => {
            let t = rng.next_f32() * 2.0 - 1.0;
            Some([t * half_length, rng.centered(thickness), rng.centered(width)])
        }
    }
}

/// Height falloff toward the rim; zero outside the nominal radius.
fn taper(r: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        0.0
    } else {
        (1.0 - r / radius).max(0.0)
    }
}
