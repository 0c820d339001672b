use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// Binary PPM (P6) writer. Alpha is dropped, so unpainted pixels come out
/// black.
pub struct PpmFilePresenter {}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, frame: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(filepath)?;
        write_ppm(frame, BufWriter::new(file))
    }
}

impl Default for PpmFilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn write_ppm(frame: &PixelBuffer, mut out: impl Write) -> std::io::Result<()> {
    // PPM header: P6 means binary RGB, then width, height and max_colour
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", frame.width(), frame.height())?;
    writeln!(out, "255")?;

    for pixel in frame.buffer().chunks_exact(BYTES_PER_PIXEL) {
        out.write_all(&pixel[..3])?;
    }

    out.flush()
}
