//! Stick-throw outcomes.
//!
//! Four half-round sticks are thrown; the number landing flat side up
//! decides how far a piece moves. The two best outcomes grant another throw.

use rand::Rng;

/// The number of sticks in one throw.
pub const STICK_COUNT: u8 = 4;

/// The outcome of one throw of the sticks.
///
/// Ordered by step count, so the smallest sufficient roll sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Roll {
    /// One stick flat side up: move 1.
    Do = 1,
    /// Two sticks flat side up: move 2.
    Gae = 2,
    /// Three sticks flat side up: move 3.
    Geol = 3,
    /// Four sticks flat side up: move 4 and throw again.
    Yut = 4,
    /// No stick flat side up: move 5 and throw again.
    Mo = 5,
}

/// All roll variants in step order.
pub const ALL_ROLLS: [Roll; 5] = [Roll::Do, Roll::Gae, Roll::Geol, Roll::Yut, Roll::Mo];

impl Roll {
    /// Number of edges a piece travels with this roll.
    pub const fn steps(self) -> u8 {
        self as u8
    }

    /// True if this roll earns the thrower another throw.
    pub const fn grants_extra_throw(self) -> bool {
        matches!(self, Roll::Yut | Roll::Mo)
    }

    /// Maps the count of sticks landing flat side up to a roll.
    ///
    /// The mapping is not linear: zero flat sides is the best throw.
    pub const fn from_flat_count(flat: u8) -> Option<Roll> {
        match flat {
            0 => Some(Roll::Mo),
            1 => Some(Roll::Do),
            2 => Some(Roll::Gae),
            3 => Some(Roll::Geol),
            4 => Some(Roll::Yut),
            _ => None,
        }
    }

    /// Returns the roll with the given step count.
    pub const fn from_steps(steps: u8) -> Option<Roll> {
        match steps {
            1 => Some(Roll::Do),
            2 => Some(Roll::Gae),
            3 => Some(Roll::Geol),
            4 => Some(Roll::Yut),
            5 => Some(Roll::Mo),
            _ => None,
        }
    }

    /// Returns the traditional name of this roll.
    pub const fn name(self) -> &'static str {
        match self {
            Roll::Do => "do",
            Roll::Gae => "gae",
            Roll::Geol => "geol",
            Roll::Yut => "yut",
            Roll::Mo => "mo",
        }
    }

    /// Parses a roll from its traditional name.
    pub fn from_name(s: &str) -> Option<Roll> {
        ALL_ROLLS.iter().copied().find(|r| r.name() == s)
    }

    /// Throws the sticks. Each stick independently lands flat side up with
    /// probability `flat_probability`.
    pub fn throw(rng: &mut impl Rng, flat_probability: f64) -> Roll {
        let p = flat_probability.clamp(0.0, 1.0);
        let flat = (0..STICK_COUNT).filter(|_| rng.gen_bool(p)).count() as u8;
        match Roll::from_flat_count(flat) {
            Some(r) => r,
            None => unreachable!("at most {} sticks land flat", STICK_COUNT),
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn flat_count_mapping() {
        assert_eq!(Roll::from_flat_count(0), Some(Roll::Mo));
        assert_eq!(Roll::from_flat_count(1), Some(Roll::Do));
        assert_eq!(Roll::from_flat_count(2), Some(Roll::Gae));
        assert_eq!(Roll::from_flat_count(3), Some(Roll::Geol));
        assert_eq!(Roll::from_flat_count(4), Some(Roll::Yut));
        assert_eq!(Roll::from_flat_count(5), None);
    }

    #[test]
    fn steps_and_extra_throws() {
        let steps: Vec<u8> = ALL_ROLLS.iter().map(|r| r.steps()).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
        assert!(!Roll::Do.grants_extra_throw());
        assert!(!Roll::Geol.grants_extra_throw());
        assert!(Roll::Yut.grants_extra_throw());
        assert!(Roll::Mo.grants_extra_throw());
    }

    #[test]
    fn name_lookup() {
        for r in ALL_ROLLS {
            assert_eq!(Roll::from_name(r.name()), Some(r));
            assert_eq!(Roll::from_steps(r.steps()), Some(r));
        }
        assert_eq!(Roll::from_name("back-do"), None);
        assert_eq!(Roll::from_steps(0), None);
    }

    #[test]
    fn ordering_follows_steps() {
        assert!(Roll::Do < Roll::Gae);
        assert!(Roll::Yut < Roll::Mo);
        assert_eq!(ALL_ROLLS.iter().min(), Some(&Roll::Do));
    }

    #[test]
    fn biased_throws_are_deterministic_at_extremes() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(Roll::throw(&mut rng, 1.0), Roll::Yut);
            assert_eq!(Roll::throw(&mut rng, 0.0), Roll::Mo);
        }
    }

    #[test]
    fn fair_throws_cover_every_outcome() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..2000 {
            seen[Roll::throw(&mut rng, 0.5).steps() as usize] = true;
        }
        assert!(seen[1..].iter().all(|s| *s));
    }
}
