use crate::error::*;
use crate::field::*;

/// Render the interior of `field` with the TURBO gradient, `lo` maps to
/// the cold end and `hi` to the hot end. Values outside are clamped.
pub fn field_png<F: AsRef<std::path::Path>>(
    field: &Field,
    s: &F,
    lo: f64,
    hi: f64,
) -> SweResult<()> {
    if !(hi > lo) {
        return Err(SweError::InvalidParameter {
            name: "hi - lo",
            value: hi - lo,
        });
    }
    let gradient = colorous::TURBO;
    let mut img = image::RgbImage::new(field.nx() as u32, field.ny() as u32);
    for coord in field.interior().coord_iter() {
        let r = ((field.get(&coord) - lo) / (hi - lo)).clamp(0.0, 1.0);
        let c = gradient.eval_continuous(r);
        img.put_pixel(
            coord[0] as u32,
            coord[1] as u32,
            image::Rgb(c.as_array()),
        );
    }
    log::debug!("Writing image: {:?}", s.as_ref());
    img.save(s)?;
    Ok(())
}

/// Water depth picture of one time level.
pub fn depth_png<F: AsRef<std::path::Path>>(
    buffers: &BufferSet,
    s: &F,
    lo: f64,
    hi: f64,
) -> SweResult<()> {
    field_png(&buffers.h, s, lo, hi)
}
