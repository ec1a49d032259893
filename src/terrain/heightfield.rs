//! Heightfield synthesis via diamond-square midpoint displacement.

use bevy::log::debug;
use rand::Rng;

use super::error::{Result, TerrainError, MAX_RESOLUTION};

/// Square grid of elevations, row-major, `side = resolution + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    side: usize,
    data: Vec<f32>,
}

impl Heightfield {
    /// All-zero field with `side * side` samples.
    pub fn flat(side: usize) -> Self {
        Self {
            side,
            data: vec![0.0; side * side],
        }
    }

    /// Fill an `(n+1) x (n+1)` field by diamond-square subdivision.
    ///
    /// Starts with all samples at zero, then at each level (step halving from
    /// `n` down to 2, amplitude halving from `roughness`) sets every cell
    /// center from its four corners, then every edge midpoint from its axis
    /// neighbours, each plus a uniform draw in `[0, amplitude)`. Edge
    /// midpoints on the border average only the three neighbours that exist.
    pub fn diamond_square<R: Rng>(resolution: u32, roughness: f32, rng: &mut R) -> Result<Self> {
        if resolution == 0 || !resolution.is_power_of_two() {
            return Err(TerrainError::InvalidResolution(resolution));
        }
        if resolution > MAX_RESOLUTION {
            return Err(TerrainError::ResolutionTooLarge {
                resolution,
                max: MAX_RESOLUTION,
            });
        }
        if !roughness.is_finite() || roughness < 0.0 {
            return Err(TerrainError::InvalidRoughness(roughness));
        }

        let mut field = Self::flat(resolution as usize + 1);
        let mut step = resolution as usize;
        let mut amplitude = roughness;

        while step > 1 {
            field.diamond_pass(step, amplitude, rng);
            field.square_pass(step, amplitude, rng);
            debug!("diamond-square level step={} amplitude={:.4}", step, amplitude);

            step /= 2;
            amplitude *= 0.5;
        }

        Ok(field)
    }

    fn diamond_pass<R: Rng>(&mut self, step: usize, amplitude: f32, rng: &mut R) {
        let n = self.side - 1;
        let half = step / 2;

        for i in (step..=n).step_by(step) {
            for j in (step..=n).step_by(step) {
                let top_left = self.get(i - step, j - step);
                let top_right = self.get(i - step, j);
                let bottom_left = self.get(i, j - step);
                let bottom_right = self.get(i, j);

                let mid = (top_left + top_right + bottom_left + bottom_right) / 4.0;
                self.set(i - half, j - half, mid + displacement(rng, amplitude));
            }
        }
    }

    fn square_pass<R: Rng>(&mut self, step: usize, amplitude: f32, rng: &mut R) {
        let n = self.side - 1;
        let half = step / 2;

        for i in (0..=n).step_by(half) {
            // Corner rows hold midpoints between columns, center rows on them.
            let offset = if (i / half) % 2 == 0 { half } else { 0 };

            for j in (offset..=n).step_by(step) {
                let mut sum = 0.0;
                let mut count = 0;

                if i >= half {
                    sum += self.get(i - half, j);
                    count += 1;
                }
                if i + half <= n {
                    sum += self.get(i + half, j);
                    count += 1;
                }
                if j >= half {
                    sum += self.get(i, j - half);
                    count += 1;
                }
                if j + half <= n {
                    sum += self.get(i, j + half);
                    count += 1;
                }

                let avg = sum / count as f32;
                self.set(i, j, avg + displacement(rng, amplitude));
            }
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Height at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.side + j]
    }

    pub fn set(&mut self, i: usize, j: usize, height: f32) {
        self.data[i * self.side + j] = height;
    }

    /// Row-major samples, same ordering as the grid's vertex list.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Lowest and highest sample.
    pub fn range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

fn displacement<R: Rng>(rng: &mut R, amplitude: f32) -> f32 {
    rng.gen::<f32>() * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn resolution_one_is_flat() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = Heightfield::diamond_square(1, 2.0, &mut rng).unwrap();
        assert_eq!(field.side(), 2);
        assert!(field.data().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn border_midpoints_average_available_neighbours() {
        // Every draw is just below 1.0, so each displacement is ~amplitude.
        let mut rng = StepRng::new(u64::MAX, 0);
        let field = Heightfield::diamond_square(2, 1.0, &mut rng).unwrap();

        let center = field.get(1, 1);
        assert!((center - 1.0).abs() < 1e-5);

        // Two zero corners plus the center, three neighbours in range.
        let expected_edge = center / 3.0 + 1.0;
        for (i, j) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert!((field.get(i, j) - expected_edge).abs() < 1e-5);
        }
        for (i, j) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert_eq!(field.get(i, j), 0.0);
        }
    }

    #[test]
    fn every_level_fills_all_but_the_corners() {
        for n in [4u32, 8, 64] {
            let mut rng = StepRng::new(u64::MAX, 0);
            let field = Heightfield::diamond_square(n, 1.0, &mut rng).unwrap();
            let last = n as usize;

            for i in 0..=last {
                for j in 0..=last {
                    let h = field.get(i, j);
                    let corner = (i == 0 || i == last) && (j == 0 || j == last);
                    if corner {
                        assert_eq!(h, 0.0, "n={n} corner ({i}, {j})");
                    } else {
                        assert!(h > 0.0, "n={n} unset sample ({i}, {j})");
                    }
                }
            }
        }
    }

    #[test]
    fn zero_roughness_stays_flat() {
        let mut rng = StdRng::seed_from_u64(9);
        let field = Heightfield::diamond_square(16, 0.0, &mut rng).unwrap();
        assert_eq!(field.range(), (0.0, 0.0));
    }

    #[test]
    fn heights_are_finite_and_bounded() {
        let roughness = 0.75;
        for n in [2, 4, 8, 16, 32, 64, 128, 256] {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let field = Heightfield::diamond_square(n, roughness, &mut rng).unwrap();
            assert_eq!(field.data().len(), ((n + 1) * (n + 1)) as usize);
            for &h in field.data() {
                assert!(h.is_finite());
                assert!((0.0..2.0 * roughness).contains(&h), "n={n} h={h}");
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = Heightfield::diamond_square(32, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Heightfield::diamond_square(32, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = Heightfield::diamond_square(32, 1.0, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Heightfield::diamond_square(0, 1.0, &mut rng).unwrap_err(),
            TerrainError::InvalidResolution(0)
        );
        assert_eq!(
            Heightfield::diamond_square(12, 1.0, &mut rng).unwrap_err(),
            TerrainError::InvalidResolution(12)
        );
        assert!(matches!(
            Heightfield::diamond_square(8192, 1.0, &mut rng),
            Err(TerrainError::ResolutionTooLarge { .. })
        ));
        assert!(matches!(
            Heightfield::diamond_square(8, -0.5, &mut rng),
            Err(TerrainError::InvalidRoughness(_))
        ));
        assert!(matches!(
            Heightfield::diamond_square(8, f32::INFINITY, &mut rng),
            Err(TerrainError::InvalidRoughness(_))
        ));
    }
}
