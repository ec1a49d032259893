//! Writes heights into the grid and assigns per-vertex colors by elevation band.

use super::error::{Result, TerrainError};
use super::grid::GridMesh;
use super::heightfield::Heightfield;

pub type Rgba = [f32; 4];

/// Vertices strictly below `below` (and not caught by a lower band) get `color`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBand {
    pub below: f32,
    pub color: Rgba,
}

/// Threshold table mapping elevation to color, lowest band first.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightPalette {
    bands: Vec<ColorBand>,
    top: Rgba,
}

impl HeightPalette {
    /// Build a palette; thresholds must be finite and strictly increasing.
    pub fn new(bands: Vec<ColorBand>, top: Rgba) -> Result<Self> {
        if bands.iter().any(|b| !b.below.is_finite())
            || bands.windows(2).any(|w| w[0].below >= w[1].below)
        {
            return Err(TerrainError::UnorderedPalette);
        }
        Ok(Self { bands, top })
    }

    /// Color of the first band whose threshold lies above `height`.
    pub fn color_for(&self, height: f32) -> Rgba {
        self.bands
            .iter()
            .find(|band| height < band.below)
            .map(|band| band.color)
            .unwrap_or(self.top)
    }

    /// Index of the band `height` falls into; `bands().len()` means the top band.
    pub fn band_index(&self, height: f32) -> usize {
        self.bands
            .iter()
            .position(|band| height < band.below)
            .unwrap_or(self.bands.len())
    }

    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    pub fn top(&self) -> Rgba {
        self.top
    }
}

impl Default for HeightPalette {
    fn default() -> Self {
        Self {
            bands: vec![
                // Deep water
                ColorBand {
                    below: 0.003,
                    color: [0.09, 0.21, 0.45, 1.0],
                },
                // Shallows
                ColorBand {
                    below: 0.013,
                    color: [0.22, 0.46, 0.64, 1.0],
                },
                // Lowland
                ColorBand {
                    below: 0.31,
                    color: [0.30, 0.55, 0.25, 1.0],
                },
                // Highland
                ColorBand {
                    below: 0.61,
                    color: [0.47, 0.40, 0.28, 1.0],
                },
            ],
            // Peaks
            top: [0.93, 0.94, 0.96, 1.0],
        }
    }
}

/// Replace every vertex z with its height and return one color per vertex.
pub fn apply_heights(
    mesh: &mut GridMesh,
    heights: &Heightfield,
    palette: &HeightPalette,
) -> Result<Vec<Rgba>> {
    if heights.side() != mesh.side() {
        return Err(TerrainError::HeightfieldMismatch {
            expected: mesh.side(),
            actual: heights.side(),
        });
    }

    let colors = mesh
        .positions
        .iter_mut()
        .zip(heights.data())
        .map(|(position, &h)| {
            position[2] = h;
            palette.color_for(h)
        })
        .collect();

    Ok(colors)
}
