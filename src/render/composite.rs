use crate::{
    assets::model::Raster,
    foundation::core::{Offset, SurfaceSize},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` onto `dst`, with extra `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Blend `color` over every pixel of an RGBA8 buffer.
pub fn fill_over_in_place(dst: &mut [u8], color: PremulRgba8, opacity: f32) {
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], color, opacity);
        d.copy_from_slice(&out);
    }
}

/// Blend `src` over a `dst_size` RGBA8 buffer with its top-left corner at `at`.
///
/// Parts of `src` falling outside the destination are clipped.
pub fn blit_over_in_place(dst: &mut [u8], dst_size: SurfaceSize, src: &Raster, at: Offset) {
    let dw = i64::from(dst_size.width);
    let dh = i64::from(dst_size.height);
    let sw = i64::from(src.width);
    let sh = i64::from(src.height);
    if dst.len() as i64 != dw * dh * 4 {
        return;
    }

    let x0 = i64::from(at.x).max(0);
    let y0 = i64::from(at.y).max(0);
    let x1 = (i64::from(at.x) + sw).min(dw);
    let y1 = (i64::from(at.y) + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_px = src.rgba8_premul.as_slice();
    for y in y0..y1 {
        let sy = y - i64::from(at.y);
        for x in x0..x1 {
            let sx = x - i64::from(at.x);
            let si = ((sy * sw + sx) * 4) as usize;
            let di = ((y * dw + x) * 4) as usize;
            let s = [src_px[si], src_px[si + 1], src_px[si + 2], src_px[si + 3]];
            if s[3] == 255 {
                dst[di..di + 4].copy_from_slice(&s);
                continue;
            }
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
