use super::{check_size, Sampler};
use crate::error::Error;

/// Exhaustive sampler enumerating every combination of `size` indices
/// from `[0, maximum]` in lexicographic order.
///
/// The first sample is `[0, 1, ..., size - 1]`. After the last combination
/// the enumeration starts over, so `population(size, maximum)` consecutive
/// samples are pairwise distinct and the next one repeats the first.
#[derive(Debug, Clone)]
pub struct OrderedSampler {
    maximum: usize,
    indices: Vec<usize>,
}

impl OrderedSampler {
    /// Create a sampler positioned on the first combination.
    ///
    /// Fails if `size > maximum + 1` or if the index buffer cannot be allocated.
    pub fn new(size: usize, maximum: usize) -> Result<Self, Error> {
        check_size(size, maximum)?;
        let mut indices = Vec::new();
        indices.try_reserve_exact(size)?;
        indices.extend(0..size);
        Ok(Self { maximum, indices })
    }

    /// Move to the next combination, wrapping around after the last one.
    fn advance(&mut self) {
        let size = self.indices.len();
        // Position `pos` can hold at most `maximum - (size - 1 - pos)`.
        let movable = (0..size)
            .rev()
            .find(|&pos| self.indices[pos] < self.maximum - (size - 1 - pos));
        match movable {
            Some(pos) => {
                self.indices[pos] += 1;
                for j in pos + 1..size {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => {
                for (i, index) in self.indices.iter_mut().enumerate() {
                    *index = i;
                }
            }
        }
    }
}

impl Sampler for OrderedSampler {
    fn size(&self) -> usize {
        self.indices.len()
    }

    fn maximum(&self) -> usize {
        self.maximum
    }

    fn sample(&mut self, out: &mut [usize]) {
        out[..self.indices.len()].copy_from_slice(&self.indices);
        self.advance();
    }
}

// Tests #######################################################################

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::population;
    use std::collections::HashSet;

    fn draw(sampler: &mut OrderedSampler) -> Vec<usize> {
        let mut out = vec![0; sampler.size()];
        sampler.sample(&mut out);
        out
    }

    #[test]
    fn lexicographic_pairs() {
        let mut sampler = OrderedSampler::new(2, 3).unwrap();
        let samples: Vec<_> = (0..7).map(|_| draw(&mut sampler)).collect();
        assert_eq!(
            samples,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
                vec![0, 1],
            ]
        );
    }

    #[test]
    fn exhaustive_cycle() {
        for (size, maximum) in [(1, 0), (1, 6), (2, 1), (2, 7), (3, 5), (4, 8), (5, 5), (6, 5)] {
            let mut sampler = OrderedSampler::new(size, maximum).unwrap();
            assert_eq!(sampler.size(), size);
            assert_eq!(sampler.maximum(), maximum);

            let count = population(size, maximum);
            let first = draw(&mut sampler);
            let mut seen = HashSet::new();
            seen.insert(first.clone());
            for _ in 1..count {
                let sample = draw(&mut sampler);
                assert!(sample.windows(2).all(|w| w[0] < w[1]));
                assert!(sample.iter().all(|&i| i <= maximum));
                assert!(seen.insert(sample), "repeated before the cycle ended");
            }
            assert_eq!(seen.len(), count);
            assert_eq!(draw(&mut sampler), first);
        }
    }

    #[test]
    fn empty_sample_width() {
        let mut sampler = OrderedSampler::new(0, 3).unwrap();
        assert!(draw(&mut sampler).is_empty());
        assert!(draw(&mut sampler).is_empty());
    }

    #[test]
    fn too_wide() {
        assert!(matches!(
            OrderedSampler::new(5, 3),
            Err(Error::SampleTooLarge { size: 5, universe: 4 })
        ));
    }
}
