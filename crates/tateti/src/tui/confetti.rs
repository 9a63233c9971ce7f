//! Falling confetti shown after a win.

use rand::Rng;
use ratatui::style::Color;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Confetti colors.
pub const PALETTE: [Color; 6] = [
    Color::Rgb(0xff, 0x6b, 0x9d),
    Color::Rgb(0x4e, 0xcd, 0xc4),
    Color::Rgb(0x66, 0x7e, 0xea),
    Color::Rgb(0xf5, 0x57, 0x6c),
    Color::Rgb(0xff, 0xd9, 0x3d),
    Color::Rgb(0x6b, 0xcb, 0x77),
];

/// Shape of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Round dot.
    Round,
    /// Tall strip.
    Strip,
}

impl Shape {
    /// Glyph drawn for this shape.
    pub fn symbol(self) -> &'static str {
        match self {
            Shape::Round => "●",
            Shape::Strip => "▮",
        }
    }
}

/// One confetti piece.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Horizontal position as a fraction of the width (0.0-1.0).
    pub x: f32,
    /// Fill color.
    pub color: Color,
    /// Drawn shape.
    pub shape: Shape,
    /// When the piece is added to the screen.
    pub born: Instant,
    /// Wait after `born` before it starts falling.
    pub delay: Duration,
    /// Time to fall from top to bottom.
    pub fall: Duration,
    /// When the piece is removed.
    pub expires: Instant,
}

impl Particle {
    /// Position at `now` as (x, y) fractions of the area, `None` when not on screen.
    pub fn position(&self, now: Instant) -> Option<(f32, f32)> {
        if now >= self.expires {
            return None;
        }
        let elapsed = now.checked_duration_since(self.born)?.checked_sub(self.delay)?;
        let y = elapsed.as_secs_f32() / self.fall.as_secs_f32();
        (y <= 1.0).then_some((self.x, y))
    }
}

/// All live confetti.
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    /// No confetti.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` pieces, one every `stagger`, each living `lifetime`.
    #[instrument(skip(self, rng))]
    pub fn burst<R: Rng>(
        &mut self,
        now: Instant,
        count: usize,
        stagger: Duration,
        lifetime: Duration,
        rng: &mut R,
    ) {
        for i in 0..count {
            let born = now + stagger * i as u32;
            self.particles.push(Particle {
                x: rng.gen_range(0.0..1.0),
                color: PALETTE[rng.gen_range(0..PALETTE.len())],
                shape: if rng.gen_bool(0.5) { Shape::Round } else { Shape::Strip },
                born,
                delay: Duration::from_secs_f32(rng.gen_range(0.0..0.5)),
                fall: Duration::from_secs_f32(rng.gen_range(2.0..4.0)),
                expires: born + lifetime,
            });
        }
        debug!(count, live = self.particles.len(), "Confetti burst");
    }

    /// Drops expired pieces.
    pub fn prune(&mut self, now: Instant) {
        self.particles.retain(|p| now < p.expires);
    }

    /// Removes all pieces.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live pieces, including ones not yet on screen.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// True when no piece is left.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_burst_staggers_and_expires() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let start = Instant::now();
        let mut confetti = Confetti::new();
        confetti.burst(
            start,
            50,
            Duration::from_millis(30),
            Duration::from_secs(4),
            &mut rng,
        );

        let particles = confetti.particles();
        assert_eq!(particles.len(), 50);
        assert_eq!(particles[1].born - particles[0].born, Duration::from_millis(30));
        for p in particles {
            assert!((0.0..1.0).contains(&p.x));
            assert!(p.fall >= Duration::from_secs(2) && p.fall <= Duration::from_secs(4));
            assert!(PALETTE.contains(&p.color));
        }

        confetti.prune(start + Duration::from_secs(4));
        assert_eq!(confetti.particles().len(), 49);
        confetti.prune(start + Duration::from_secs(6));
        assert!(confetti.is_empty());
    }

    #[test]
    fn test_particle_falls_after_delay() {
        let born = Instant::now();
        let particle = Particle {
            x: 0.5,
            color: PALETTE[0],
            shape: Shape::Round,
            born,
            delay: Duration::from_millis(500),
            fall: Duration::from_secs(2),
            expires: born + Duration::from_secs(4),
        };

        assert_eq!(particle.position(born), None);
        assert_eq!(particle.position(born + Duration::from_millis(500)), Some((0.5, 0.0)));
        assert_eq!(particle.position(born + Duration::from_millis(1500)), Some((0.5, 0.5)));
        assert_eq!(particle.position(born + Duration::from_secs(3)), None);
    }
}
