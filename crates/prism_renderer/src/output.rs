//! Writing rendered images to disk.
//!
//! `.ppm` (or no extension) is written as ASCII P3 with one pixel per line.
//! Any other extension is handed to the `image` crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::renderer::{color_to_rgb, ImageBuffer, RenderResult};

/// Write `image` as an ASCII PPM (P3).
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"))
}

/// Save `image` to `path`, choosing the format from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let path = path.as_ref();

    if is_ppm(path) {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(&mut writer, image)?;
        writer.flush()?;
    } else {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "pixel buffer size mismatch"))?;
        rgb.save(path)?;
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
