//! Where new shapes land on the canvas.
//!
//! The first shape of each kind goes to a fixed, kind-specific spot; every
//! later one goes to a uniformly random spot that keeps it fully on the canvas.

use crate::error::EditorError;
use crate::scene::{DVec2, ShapeKind};

/// Source of uniformly distributed numbers in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> Result<f64, EditorError>;
}

/// Browser/OS entropy through `getrandom`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> Result<f64, EditorError> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes)?;
        Ok(unit_from_bits(u64::from_le_bytes(bytes)))
    }
}

/// Top 53 bits as a float in `[0, 1)`
fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

/// Fixed coordinate (left, top) for the first shape of each kind
pub fn first_position(kind: ShapeKind) -> DVec2 {
    match kind {
        ShapeKind::Rectangle => DVec2::new(50.0, 50.0),
        ShapeKind::Circle => DVec2::new(310.0, 310.0),
        ShapeKind::TextBox => DVec2::new(50.0, 200.0),
        ShapeKind::Path => DVec2::new(70.0, 290.0),
        ShapeKind::Image => DVec2::new(530.0, 30.0),
    }
}

/// One "not placed yet" flag per shape kind. Flags only ever go from true to
/// false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstPlacement {
    pending: [bool; ShapeKind::ALL.len()],
}

impl Default for FirstPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstPlacement {
    pub fn new() -> Self {
        Self {
            pending: [true; ShapeKind::ALL.len()],
        }
    }

    pub fn is_pending(&self, kind: ShapeKind) -> bool {
        self.pending[kind.index()]
    }

    /// Returns whether this is the first placement of `kind`, and marks it done
    pub fn take(&mut self, kind: ShapeKind) -> bool {
        std::mem::replace(&mut self.pending[kind.index()], false)
    }
}

/// Random top-left corner so that `footprint` fits inside `canvas`. Axes where
/// the shape is larger than the canvas pin to 0.
pub fn random_position(
    rng: &mut impl RandomSource,
    footprint: DVec2,
    canvas: DVec2,
) -> Result<DVec2, EditorError> {
    let span = (canvas - footprint).max(DVec2::ZERO);
    let x = rng.next_unit()? * span.x;
    let y = rng.next_unit()? * span.y;
    Ok(DVec2::new(x, y))
}

/// Placement policy: per-kind first-placement flags plus a random source
#[derive(Debug, Clone)]
pub struct Placer<R> {
    flags: FirstPlacement,
    rng: R,
}

impl<R: RandomSource> Placer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            flags: FirstPlacement::new(),
            rng,
        }
    }

    pub fn flags(&self) -> &FirstPlacement {
        &self.flags
    }

    /// Position for a new shape of `kind` with the given effective size
    pub fn place(&mut self, kind: ShapeKind, footprint: DVec2, canvas: DVec2) -> DVec2 {
        if self.flags.take(kind) {
            return first_position(kind);
        }

        match random_position(&mut self.rng, footprint, canvas) {
            Ok(position) => position,
            Err(err) => {
                log::warn!("{err}; placing {kind} at its default position");
                first_position(kind)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deterministic splitmix64 generator, for reproducible layouts
    #[derive(Debug, Clone)]
    pub(crate) struct SeededRandom {
        state: u64,
    }

    impl SeededRandom {
        pub(crate) fn new(seed: u64) -> Self {
            Self { state: seed }
        }
    }

    impl RandomSource for SeededRandom {
        fn next_unit(&mut self) -> Result<f64, EditorError> {
            self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = self.state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            Ok(unit_from_bits(z ^ (z >> 31)))
        }
    }

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> Result<f64, EditorError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl RandomSource for Broken {
        fn next_unit(&mut self) -> Result<f64, EditorError> {
            Err(EditorError::Random("no entropy".into()))
        }
    }

    const CANVAS: DVec2 = DVec2::new(1000.0, 500.0);

    #[test]
    fn test_first_placement_flags_flip_once() {
        let mut flags = FirstPlacement::new();
        assert!(flags.is_pending(ShapeKind::Circle));
        assert!(flags.take(ShapeKind::Circle));
        assert!(!flags.take(ShapeKind::Circle));
        assert!(!flags.is_pending(ShapeKind::Circle));
        assert!(flags.is_pending(ShapeKind::Rectangle));
    }

    #[test]
    fn test_first_then_random() {
        let mut placer = Placer::new(Fixed(0.5));
        let footprint = DVec2::new(400.0, 100.0);

        let first = placer.place(ShapeKind::Rectangle, footprint, CANVAS);
        assert_eq!(first, DVec2::new(50.0, 50.0));

        let second = placer.place(ShapeKind::Rectangle, footprint, CANVAS);
        assert_eq!(second, DVec2::new(300.0, 200.0));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut placer = Placer::new(Fixed(0.0));
        placer.place(ShapeKind::Rectangle, DVec2::ONE, CANVAS);
        let circle = placer.place(ShapeKind::Circle, DVec2::splat(100.0), CANVAS);
        assert_eq!(circle, DVec2::new(310.0, 310.0));
    }

    #[test]
    fn test_oversized_shape_pins_to_origin() {
        let pos = random_position(&mut Fixed(0.9), DVec2::new(1200.0, 100.0), CANVAS).unwrap();
        assert_eq!(pos.x, 0.0);
        assert!((pos.y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_failure_falls_back_to_first_position() {
        let mut placer = Placer::new(Broken);
        placer.place(ShapeKind::Path, DVec2::splat(150.0), CANVAS);
        let pos = placer.place(ShapeKind::Path, DVec2::splat(150.0), CANVAS);
        assert_eq!(pos, first_position(ShapeKind::Path));
    }

    #[test]
    fn test_seeded_random_stays_in_unit_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            let v = rng.next_unit().unwrap();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_random_positions_keep_shape_visible() {
        let mut rng = SeededRandom::new(7);
        let footprint = DVec2::new(400.0, 100.0);
        for _ in 0..200 {
            let pos = random_position(&mut rng, footprint, CANVAS).unwrap();
            assert!(pos.x >= 0.0 && pos.x < 600.0);
            assert!(pos.y >= 0.0 && pos.y < 400.0);
        }
    }
}
