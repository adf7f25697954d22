//! Soft drop shadows for rounded rectangles.
//!
//! Canvas `shadowBlur = b` is a gaussian with `sigma = b / 2`. The shadow is rasterised once as
//! a tinted coverage mask with a transparent margin, blurred with a separable Q16 kernel, and
//! then drawn as an image.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PromoError, PromoResult};

/// A blurred, tinted, premultiplied shadow bitmap.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShadowMask {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Transparent margin around the shape on every side, in pixels.
    pub(crate) pad: u32,
    pub(crate) rgba8_premul: Vec<u8>,
}

/// Shadow bitmap of a `w`×`h` rounded rectangle with corner `radius`.
pub(crate) fn shadow_mask(
    w: f64,
    h: f64,
    radius: f64,
    blur: f64,
    color: Rgba8,
) -> PromoResult<ShadowMask> {
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(PromoError::evaluation("shadow shape must have a positive size"));
    }
    let sigma = (blur / 2.0).max(0.0);
    let blur_radius = (sigma * 3.0).ceil() as u32;
    let pad = blur_radius + 1;
    let width = w.ceil() as u32 + pad * 2;
    let height = h.ceil() as u32 + pad * 2;

    let premul = color.to_premul();
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    let mut coverage = vec![0u8; width as usize * height as usize * 4];
    for y in 0..height {
        for x in 0..width {
            let px = f64::from(x) + 0.5 - f64::from(pad);
            let py = f64::from(y) + 0.5 - f64::from(pad);
            let d = rounded_rect_distance(px, py, w, h, r);
            let c = (0.5 - d).clamp(0.0, 1.0);
            if c == 0.0 {
                continue;
            }
            let i = (y as usize * width as usize + x as usize) * 4;
            for ch in 0..4 {
                coverage[i + ch] = (f64::from(premul[ch]) * c).round() as u8;
            }
        }
    }

    let rgba8_premul = if blur_radius == 0 {
        coverage
    } else {
        blur_rgba8_premul(&coverage, width, height, blur_radius, sigma as f32)?
    };
    Ok(ShadowMask {
        width,
        height,
        pad,
        rgba8_premul,
    })
}

/// Signed distance from `(x, y)` to a rounded rectangle spanning `(0,0)..(w,h)`.
fn rounded_rect_distance(x: f64, y: f64, w: f64, h: f64, r: f64) -> f64 {
    let qx = (x - w / 2.0).abs() - (w / 2.0 - r);
    let qy = (y - h / 2.0).abs() - (h / 2.0 - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> PromoResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PromoError::evaluation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(PromoError::evaluation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PromoResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PromoError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(PromoError::evaluation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/shadow.rs"]
mod tests;
