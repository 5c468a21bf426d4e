/// Body catalog: orbital elements, spin rates and visual properties.
///
/// Distances and radii are scene units chosen for readability, not to
/// scale. Angular speeds are radians per millisecond of clock time; spins
/// are radians per frame about the body's y axis.

use glam::Vec3;

// ── Orbits ───────────────────────────────────────────────────────────

/// Elliptical orbit about the parent (or the sun when `parent` is `None`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSpec {
    pub semi_major: f64,
    pub eccentricity: f64,
    /// Radians per millisecond.
    pub speed: f64,
    /// Orbit path line color (0xRRGGBB).
    pub path_color: u32,
}

/// Translucent shell drawn just outside the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereSpec {
    pub radius: f32,
    pub color: u32,
    pub intensity: f32,
}

/// Everything needed to compose one named body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    /// Registry identifier, also the info-store key.
    pub id: &'static str,
    pub label: &'static str,
    pub radius: f32,
    /// Placeholder / fallback color.
    pub color: u32,
    pub emissive: Option<(u32, f32)>,
    pub parent: Option<&'static str>,
    pub orbit: Option<OrbitSpec>,
    pub spin: f32,
    /// Vertical bob amplitude along the orbit.
    pub bob: f32,
    pub label_size: f32,
    /// Height of the label above the body centre.
    pub label_height: f32,
    pub atmosphere: Option<AtmosphereSpec>,
}

const ROCK_GLOW: Option<(u32, f32)> = Some((0x555555, 0.3));

pub const SUN: BodySpec = BodySpec {
    id: "sun",
    label: "Sun",
    radius: 10.0,
    color: 0xFFD700,
    emissive: Some((0xFFD700, 0.8)),
    parent: None,
    orbit: None,
    spin: 0.0002,
    bob: 0.0,
    label_size: 2.0,
    label_height: 12.0,
    atmosphere: Some(AtmosphereSpec { radius: 10.6, color: 0xFFA500, intensity: 1.2 }),
};

/// Every body in composition order: a parent always precedes its moons.
pub const BODIES: [BodySpec; 11] = [
    SUN,
    BodySpec {
        id: "mercury",
        label: "Mercury",
        radius: 2.0,
        color: 0xAAAAAA,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 40.0, eccentricity: 0.2056, speed: 0.0009, path_color: 0xB0BEC5 }),
        spin: 0.0051,
        bob: 0.0,
        label_size: 0.8,
        label_height: 3.0,
        atmosphere: None,
    },
    BodySpec {
        id: "venus",
        label: "Venus",
        radius: 4.0,
        color: 0xFF8C00,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 60.0, eccentricity: 0.0067, speed: 0.0005, path_color: 0xFF8C00 }),
        spin: 0.00395,
        bob: 0.0,
        label_size: 1.0,
        label_height: 5.0,
        atmosphere: Some(AtmosphereSpec { radius: 4.2, color: 0xFF8C00, intensity: 0.3 }),
    },
    BodySpec {
        id: "earth",
        label: "Earth",
        radius: 6.0,
        color: 0x0000FF,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 90.0, eccentricity: 0.0167, speed: 0.0004, path_color: 0x4682B4 }),
        spin: 0.0043,
        bob: 0.0,
        label_size: 0.5,
        label_height: 8.0,
        atmosphere: Some(AtmosphereSpec { radius: 6.2, color: 0x00A3CC, intensity: 0.3 }),
    },
    BodySpec {
        id: "moon",
        label: "Moon",
        radius: 1.5,
        color: 0xCCCCCC,
        emissive: None,
        parent: Some("earth"),
        orbit: Some(OrbitSpec { semi_major: 9.0, eccentricity: 0.0549, speed: 0.00036, path_color: 0xA9A9A9 }),
        spin: 0.0038,
        bob: 0.0,
        label_size: 0.5,
        label_height: 1.5,
        atmosphere: None,
    },
    BodySpec {
        id: "mars",
        label: "Mars",
        radius: 3.0,
        color: 0xFF4040,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 140.0, eccentricity: 0.0934, speed: 0.0002, path_color: 0x8B0000 }),
        spin: 0.0023,
        bob: 0.0,
        label_size: 1.0,
        label_height: 4.0,
        atmosphere: None,
    },
    BodySpec {
        id: "phobos",
        label: "Phobos",
        radius: 0.5,
        color: 0x888888,
        emissive: ROCK_GLOW,
        parent: Some("mars"),
        orbit: Some(OrbitSpec { semi_major: 4.5, eccentricity: 0.0151, speed: 0.003, path_color: 0x696969 }),
        spin: 0.0025,
        bob: 0.0,
        label_size: 0.3,
        label_height: 1.0,
        atmosphere: None,
    },
    BodySpec {
        id: "deimos",
        label: "Deimos",
        radius: 0.3,
        color: 0x888888,
        emissive: ROCK_GLOW,
        parent: Some("mars"),
        orbit: Some(OrbitSpec { semi_major: 6.8, eccentricity: 0.0002, speed: 0.001, path_color: 0x696969 }),
        spin: -0.001,
        bob: 0.5,
        label_size: 0.2,
        label_height: 0.8,
        atmosphere: None,
    },
    BodySpec {
        id: "jupiter",
        label: "Jupiter",
        radius: 8.0,
        color: 0xCC7A00,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 190.0, eccentricity: 0.0489, speed: 0.0001, path_color: 0xDAA520 }),
        spin: 0.0014,
        bob: 0.0,
        label_size: 1.5,
        label_height: 10.0,
        atmosphere: Some(AtmosphereSpec { radius: 8.3, color: 0xCC7A00, intensity: 0.2 }),
    },
    BodySpec {
        id: "saturn",
        label: "Saturn",
        radius: 9.0,
        color: 0xD4A880,
        emissive: None,
        parent: None,
        orbit: Some(OrbitSpec { semi_major: 240.0, eccentricity: 0.0557, speed: 0.00006, path_color: 0xD4A880 }),
        spin: 0.00135,
        bob: 0.0,
        label_size: 1.5,
        label_height: 11.0,
        atmosphere: None,
    },
    BodySpec {
        id: "titan",
        label: "Titan",
        radius: 1.9,
        color: 0xAAAAAA,
        emissive: ROCK_GLOW,
        parent: Some("saturn"),
        orbit: Some(OrbitSpec { semi_major: 18.0, eccentricity: 0.0288, speed: 0.0005, path_color: 0xC0C0C0 }),
        spin: 0.0016,
        bob: 0.0,
        label_size: 0.3,
        label_height: 0.8,
        atmosphere: None,
    },
];

pub fn find(id: &str) -> Option<&'static BodySpec> {
    BODIES.iter().find(|b| b.id == id)
}

// ── Saturn's ring ────────────────────────────────────────────────────

pub const RING_INNER: f32 = 10.0;
pub const RING_OUTER: f32 = 16.0;
pub const RING_COLOR: u32 = 0xD4A880;
pub const RING_OPACITY: f32 = 0.9;
/// Tilt of the ring plane about x, radians from Saturn's orbital plane.
pub const RING_TILT: f32 = std::f32::consts::PI / 2.2 - std::f32::consts::FRAC_PI_2;
/// Ring thickness squash along its normal.
pub const RING_SQUASH: f32 = 0.1;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_INTENSITY: f32 = 0.1;
pub const SUN_LIGHT: (u32, f32, f32) = (0xFFD700, 2.0, 200.0);
pub const METEOR_LIGHT: (u32, f32, f32) = (0xD4D4D4, 2.0, 25.0);

// ── Asteroid belt ────────────────────────────────────────────────────

pub const ASTEROID_COUNT: usize = 5000;
pub const ASTEROID_INNER: f64 = 280.0;
pub const ASTEROID_OUTER: f64 = 320.0;
pub const ASTEROID_HEIGHT: f32 = 30.0;
pub const ASTEROID_COLOR: u32 = 0x1A1A1A;
pub const ASTEROID_GLOW: (u32, f32) = (0x8A2BE2, 0.5);
/// Added to the asteroid shader's own time every frame.
pub const ASTEROID_TIME_STEP: f32 = 0.01;
pub const BELT_PATH_ECCENTRICITY: f64 = 0.03;
pub const BELT_PATH_COLOR: u32 = 0x808080;

// ── Comets & meteor ──────────────────────────────────────────────────

pub const COMET_RADIUS: f32 = 0.2;
pub const COMET_COLOR: u32 = 0xDCDCDC;
pub const COMET_GLOW: (u32, f32) = (0x00BFFF, 0.6);
pub const COMET_TAIL_SEGMENTS: usize = 12;

pub const METEOR_RADIUS: f32 = 1.5;
pub const METEOR_COLOR: u32 = 0xC0C0C0;
pub const METEOR_GLOW: (u32, f32) = (0xD4D4D4, 0.5);
pub const METEOR_START: Vec3 = Vec3::new(-250.0, 10.0, 50.0);
pub const METEOR_END: Vec3 = Vec3::new(250.0, -10.0, 50.0);
pub const METEOR_TRAIL_POINTS: usize = 100;
pub const METEOR_TRAIL_DECAY: f32 = 0.95;

// ── Orbit paths ──────────────────────────────────────────────────────

pub const PATH_SEGMENTS: usize = 256;
pub const PATH_OPACITY: f32 = 0.6;

// ── Navigation ───────────────────────────────────────────────────────

/// Focus command: fly to `body` and follow it from `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPreset {
    pub body: &'static str,
    pub offset: Vec3,
}

/// Indexed by the focus command's argument.
pub const NAV_PRESETS: [NavPreset; 8] = [
    NavPreset { body: "sun", offset: Vec3::new(20.0, 10.0, 20.0) },
    NavPreset { body: "mercury", offset: Vec3::new(10.0, 3.0, 10.0) },
    NavPreset { body: "venus", offset: Vec3::new(12.0, 4.0, 12.0) },
    NavPreset { body: "earth", offset: Vec3::new(15.0, 5.0, 15.0) },
    NavPreset { body: "moon", offset: Vec3::new(5.0, 2.0, 5.0) },
    NavPreset { body: "mars", offset: Vec3::new(15.0, 5.0, 15.0) },
    NavPreset { body: "jupiter", offset: Vec3::new(20.0, 5.0, 20.0) },
    NavPreset { body: "saturn", offset: Vec3::new(20.0, 5.0, 20.0) },
];

/// Galaxy overview framing.
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(3100.0, 60.0, 60.0);
pub const OVERVIEW_TARGET: Vec3 = Vec3::new(3500.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_precede_moons() {
        for (i, body) in BODIES.iter().enumerate() {
            if let Some(parent) = body.parent {
                let p = BODIES.iter().position(|b| b.id == parent).unwrap();
                assert!(p < i, "{} listed before its parent {}", body.id, parent);
            }
        }
    }

    #[test]
    fn every_preset_names_a_body() {
        for preset in NAV_PRESETS {
            assert!(find(preset.body).is_some(), "unknown preset body {}", preset.body);
        }
    }

    #[test]
    fn orbits_are_closed_ellipses() {
        for body in BODIES.iter().filter_map(|b| b.orbit) {
            assert!((0.0..1.0).contains(&body.eccentricity));
            assert!(body.speed > 0.0);
        }
    }
}
