//! Shuffled cyclic rotation over the image sequence.

use rand::Rng;
use tracing::warn;

use crate::events::ImageRef;

/// Uniform Fisher-Yates permutation of `images`; the input stays untouched.
pub fn shuffled<R: Rng + ?Sized>(images: &[ImageRef], rng: &mut R) -> Vec<ImageRef> {
    let mut out = images.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Cyclic position over a shuffled sequence.
///
/// `position` always stays in `[0, len)`; wrapping back to the first slot
/// reshuffles the sequence so consecutive cycles run in a different order.
#[derive(Debug, Clone)]
pub struct Rotation {
    sequence: Vec<ImageRef>,
    position: usize,
}

impl Rotation {
    pub fn new<R: Rng + ?Sized>(images: Vec<ImageRef>, rng: &mut R) -> Self {
        Self {
            sequence: shuffled(&images, rng),
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn sequence(&self) -> &[ImageRef] {
        &self.sequence
    }

    /// Returns the image for this display step and advances the position.
    /// `None` when the sequence is empty.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ImageRef> {
        if self.sequence.is_empty() {
            return None;
        }
        let image = self.sequence[self.position].clone();
        self.position = (self.position + 1) % self.sequence.len();
        if self.position == 0 {
            self.sequence = shuffled(&self.sequence, rng);
        }
        Some(image)
    }
}

/// Two-state display scheduler: Stopped until `start()`, Running after.
///
/// There is no stop path; once running, the timer lives until the process
/// shuts down.
#[derive(Debug)]
pub struct Rotator {
    rotation: Rotation,
    running: bool,
}

impl Rotator {
    pub fn new(rotation: Rotation) -> Self {
        Self {
            rotation,
            running: false,
        }
    }

    /// Stopped -> Running transition. Returns `false` and changes nothing
    /// when already running, so a second caller cannot arm a duplicate timer.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// One display step. An empty sequence is reported and skipped; the next
    /// tick will try again.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ImageRef> {
        let image = self.rotation.advance(rng);
        if image.is_none() {
            warn!("display step skipped: image sequence is empty");
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn images(n: usize) -> Vec<ImageRef> {
        (0..n)
            .map(|i| ImageRef::new("A", "Anywhere", &format!("img_{i:02}.jpg")))
            .collect()
    }

    fn sorted(mut v: Vec<ImageRef>) -> Vec<ImageRef> {
        v.sort();
        v
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = images(16);
        let output = shuffled(&input, &mut rng);
        assert_eq!(output.len(), input.len());
        assert_eq!(sorted(output), sorted(input));
    }

    #[test]
    fn shuffle_leaves_input_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = images(8);
        let before = input.clone();
        let _ = shuffled(&input, &mut rng);
        assert_eq!(input, before);
    }

    #[test]
    fn position_wraps_after_full_cycle() {
        let mut rng = StdRng::seed_from_u64(3);
        let originals = images(5);
        let mut rotation = Rotation::new(originals.clone(), &mut rng);
        for step in 0..5 {
            assert_eq!(rotation.position(), step);
            assert!(rotation.advance(&mut rng).is_some());
        }
        assert_eq!(rotation.position(), 0);
        assert_eq!(sorted(rotation.sequence().to_vec()), sorted(originals));
    }

    #[test]
    fn full_cycle_yields_every_image_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let originals = images(6);
        let mut rotation = Rotation::new(originals.clone(), &mut rng);
        let mut cycle = Vec::new();
        for _ in 0..6 {
            cycle.push(rotation.advance(&mut rng).expect("non-empty"));
        }
        assert_eq!(sorted(cycle), sorted(originals));
    }

    #[test]
    fn empty_sequence_never_advances() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut rotation = Rotation::new(Vec::new(), &mut rng);
        assert!(rotation.is_empty());
        assert_eq!(rotation.advance(&mut rng), None);
        assert_eq!(rotation.position(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotator = Rotator::new(Rotation::new(images(2), &mut rng));
        assert!(!rotator.is_running());
        assert!(rotator.start());
        assert!(rotator.is_running());
        assert!(!rotator.start());
        assert!(rotator.is_running());
    }

    #[test]
    fn empty_rotator_step_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotator = Rotator::new(Rotation::new(Vec::new(), &mut rng));
        rotator.start();
        assert_eq!(rotator.step(&mut rng), None);
    }
}
