use crate::core::data::render_chunk::RenderChunk;

/// Tuning for [`partition_chunks`]. The defaults aim for about 250 square
/// chunks between 20 and 1000 pixels on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    pub preferred_count: u32,
    pub min_size: u32,
    pub max_size: u32,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            preferred_count: 250,
            min_size: 20,
            max_size: 1000,
        }
    }
}

/// Side length of a square chunk for a `width` x `height` canvas.
#[must_use]
pub fn chunk_size(width: u32, height: u32, options: &ChunkOptions) -> u32 {
    let total_pixels = width as f64 * height as f64;
    let target_pixels = total_pixels / options.preferred_count.max(1) as f64;
    let size = target_pixels.sqrt().floor() as u32;

    size.min(options.max_size).max(options.min_size).max(1)
}

/// Splits a canvas into non-overlapping chunks that cover every pixel once.
///
/// Chunks come out centre first, then ring by ring around it: each ring runs
/// along its top row left to right, down the right column, back along the
/// bottom row and up the left column. Cells that stick out of the canvas are
/// clipped to their visible part; cells entirely outside are skipped.
#[must_use]
pub fn partition_chunks(width: u32, height: u32, options: ChunkOptions) -> Vec<RenderChunk> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let grid = SpiralGrid::new(width, height, chunk_size(width, height, &options));
    let mut chunks = Vec::new();
    let mut emit = |i: i64, j: i64| {
        if let Some(chunk) = grid.clipped_cell(i, j) {
            chunks.push(chunk);
        }
    };

    emit(0, 0);

    let mut layer: i64 = 1;
    while !grid.covered_by_rings(layer - 1) {
        for i in -layer..=layer {
            emit(i, -layer);
        }
        for j in (-layer + 1)..=layer {
            emit(layer, j);
        }
        for i in (-layer..layer).rev() {
            emit(i, layer);
        }
        for j in ((-layer + 1)..layer).rev() {
            emit(-layer, j);
        }

        layer += 1;
    }

    chunks
}

/// Square grid aligned so that cell `(0, 0)` is centred on the canvas.
struct SpiralGrid {
    width: i64,
    height: i64,
    size: i64,
    origin_x: i64,
    origin_y: i64,
}

impl SpiralGrid {
    fn new(width: u32, height: u32, size: u32) -> Self {
        let (width, height, size) = (width as i64, height as i64, size as i64);

        Self {
            width,
            height,
            size,
            origin_x: width / 2 - size / 2,
            origin_y: height / 2 - size / 2,
        }
    }

    /// Whether rings `0..=layer` already reach every canvas edge.
    fn covered_by_rings(&self, layer: i64) -> bool {
        self.origin_x - layer * self.size <= 0
            && self.origin_y - layer * self.size <= 0
            && self.origin_x + (layer + 1) * self.size >= self.width
            && self.origin_y + (layer + 1) * self.size >= self.height
    }

    fn clipped_cell(&self, i: i64, j: i64) -> Option<RenderChunk> {
        let x = self.origin_x + i * self.size;
        let y = self.origin_y + j * self.size;

        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = (x + self.size).min(self.width);
        let end_y = (y + self.size).min(self.height);

        if end_x <= start_x || end_y <= start_y {
            return None;
        }

        RenderChunk::new(
            start_x as u32,
            start_y as u32,
            (end_x - start_x) as u32,
            (end_y - start_y) as u32,
        )
        .ok()
    }
}
