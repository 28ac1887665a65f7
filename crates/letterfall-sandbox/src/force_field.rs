//! Radial push applied around a pointer click

use crate::registry::LetterBody;
use crate::sling::SlingConfig;
use letterfall_core::{LetterId, Vec2};
use letterfall_physics::PhysicsEngine;

/// One impulse delivered by a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingImpulse {
    pub letter: LetterId,
    pub impulse: Vec2,
    pub distance: f32,
}

/// Impulse for a body at `body` when the pointer is at `pointer`.
///
/// Points away from the pointer with magnitude `power * (1 - d / radius)`.
/// Returns `None` outside the radius and for a body exactly under the
/// pointer, where the direction is undefined.
pub fn sling_impulse(body: Vec2, pointer: Vec2, sling: &SlingConfig) -> Option<Vec2> {
    let offset = body - pointer;
    let distance = offset.length();
    if !distance.is_finite() || distance >= sling.radius() || distance == 0.0 {
        return None;
    }
    let strength = sling.power() * (1.0 - distance / sling.radius());
    Some(offset / distance * strength)
}

/// Push every letter within range of `pointer`.
///
/// Each body's position is read once and it receives at most one impulse,
/// applied at that position so the click adds no spin.
pub fn apply_at<E: PhysicsEngine + ?Sized>(
    pointer: Vec2,
    sling: &SlingConfig,
    letters: &[LetterBody],
    engine: &mut E,
) -> Vec<SlingImpulse> {
    let mut applied = Vec::new();
    for letter in letters {
        let Some(transform) = engine.transform(letter.handle) else {
            log::trace!("Sling skipped stale letter {}", letter.id);
            continue;
        };
        let position = transform.position;
        let Some(impulse) = sling_impulse(position, pointer, sling) else {
            continue;
        };
        if engine.apply_impulse(letter.handle, impulse, position) {
            applied.push(SlingImpulse {
                letter: letter.id,
                impulse,
                distance: position.distance(pointer),
            });
        }
    }

    log::debug!(
        "Click at ({:.1}, {:.1}) pushed {}/{} letters (radius {}, power {})",
        pointer.x,
        pointer.y,
        applied.len(),
        letters.len(),
        sling.radius(),
        sling.power()
    );
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LetterConfig;
    use crate::registry::{HitboxMode, LetterRegistry, LetterTemplate};
    use letterfall_physics::MockEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_impulse_falls_off_linearly() {
        let sling = SlingConfig::new(200.0, 0.25).unwrap();
        let v = sling_impulse(Vec2::new(150.0, 0.0), Vec2::ZERO, &sling).unwrap();
        assert!(approx(v.x, 0.25 * (1.0 - 150.0 / 200.0)));
        assert!(approx(v.y, 0.0));

        let near = sling_impulse(Vec2::new(0.0, 20.0), Vec2::ZERO, &sling).unwrap();
        assert!(near.length() > v.length());
    }

    #[test]
    fn test_impulse_points_away_from_pointer() {
        let sling = SlingConfig::default();
        let pointer = Vec2::new(100.0, 100.0);
        let v = sling_impulse(Vec2::new(70.0, 60.0), pointer, &sling).unwrap();
        assert!(v.x < 0.0 && v.y < 0.0);
        // 3-4-5 triangle, d = 50
        let expected = 0.25 * (1.0 - 50.0 / 200.0);
        assert!(approx(v.length(), expected));
        assert!(approx(v.x / v.length(), -0.6));
    }

    #[test]
    fn test_no_impulse_at_or_beyond_radius() {
        let sling = SlingConfig::new(100.0, 1.0).unwrap();
        assert!(sling_impulse(Vec2::new(100.0, 0.0), Vec2::ZERO, &sling).is_none());
        assert!(sling_impulse(Vec2::new(0.0, 250.0), Vec2::ZERO, &sling).is_none());
    }

    #[test]
    fn test_no_impulse_at_zero_distance() {
        let sling = SlingConfig::default();
        let p = Vec2::new(40.0, 40.0);
        assert!(sling_impulse(p, p, &sling).is_none());
    }

    #[test]
    fn test_apply_at_pushes_only_letters_in_range() {
        let template = LetterTemplate::from_config(&LetterConfig::default(), 800.0);
        let mut reg = LetterRegistry::new(template, HitboxMode::Hidden);
        let mut engine = MockEngine::new();
        let mut rng = StdRng::seed_from_u64(11);
        let letters = reg.spawn("abc", &mut engine, &mut rng);

        engine.place(letters[0].handle, Vec2::new(100.0, 0.0));
        engine.place(letters[1].handle, Vec2::new(0.0, 0.0));
        engine.place(letters[2].handle, Vec2::new(500.0, 0.0));

        let sling = SlingConfig::default();
        let applied = apply_at(Vec2::ZERO, &sling, &reg.all(), &mut engine);

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].letter, letters[0].id);
        assert!(approx(applied[0].distance, 100.0));
        let recorded = engine.impulses(letters[0].handle);
        assert_eq!(recorded.len(), 1);
        assert!(approx(recorded[0].0.x, 0.125));
        assert_eq!(recorded[0].1, Vec2::new(100.0, 0.0));
        assert!(engine.impulses(letters[1].handle).is_empty());
        assert!(engine.impulses(letters[2].handle).is_empty());
    }

    #[test]
    fn test_apply_at_skips_stale_letters() {
        let template = LetterTemplate::from_config(&LetterConfig::default(), 800.0);
        let mut reg = LetterRegistry::new(template, HitboxMode::Hidden);
        let mut engine = MockEngine::new();
        let mut rng = StdRng::seed_from_u64(12);
        let letters = reg.spawn("ab", &mut engine, &mut rng);
        engine.place(letters[1].handle, Vec2::new(10.0, 0.0));
        engine.remove_body(letters[0].handle);

        let applied = apply_at(Vec2::ZERO, &SlingConfig::default(), &letters, &mut engine);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].letter, letters[1].id);
    }
}
