use crate::foundation::error::{StoryError, StoryResult};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Premultiplied source-over of `src` onto `dst`, scaled by `opacity`.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> StoryResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StoryError::validation(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 {
        return Ok(());
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = add_sat_u8(sc, dc);
        }
    }
    Ok(())
}

/// Angle wrapped into `[0, 2π)`.
pub(crate) fn wrap_turn(rad: f64) -> f64 {
    rad.rem_euclid(std::f64::consts::TAU)
}
