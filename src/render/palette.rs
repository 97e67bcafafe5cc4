use plotters::style::RGBColor;

pub const SET2: [RGBColor; 8] = [
    RGBColor(0x66, 0xc2, 0xa5),
    RGBColor(0xfc, 0x8d, 0x62),
    RGBColor(0x8d, 0xa0, 0xcb),
    RGBColor(0xe7, 0x8a, 0xc3),
    RGBColor(0xa6, 0xd8, 0x54),
    RGBColor(0xff, 0xd9, 0x2f),
    RGBColor(0xe5, 0xc4, 0x94),
    RGBColor(0xb3, 0xb3, 0xb3),
];

pub const TAB20: [RGBColor; 20] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xae, 0xc7, 0xe8),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0xff, 0xbb, 0x78),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0x98, 0xdf, 0x8a),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0xff, 0x98, 0x96),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0xc5, 0xb0, 0xd5),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xc4, 0x9c, 0x94),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0xf7, 0xb6, 0xd2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xc7, 0xc7, 0xc7),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0xdb, 0xdb, 0x8d),
    RGBColor(0x17, 0xbe, 0xcf),
    RGBColor(0x9e, 0xda, 0xe5),
];

const COOLWARM: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (59, 76, 192)),
    (0.25, (141, 176, 254)),
    (0.5, (221, 221, 221)),
    (0.75, (244, 154, 123)),
    (1.0, (180, 4, 38)),
];

pub const LIGHT_GREY: RGBColor = RGBColor(211, 211, 211);

pub fn set2(idx: usize) -> RGBColor {
    SET2[idx % SET2.len()]
}

/// Samples `tab20` at evenly spaced points, one per category.
pub fn tab20_spread(idx: usize, n: usize) -> RGBColor {
    if n <= 1 {
        return TAB20[0];
    }
    let t = idx as f64 / (n - 1) as f64;
    let slot = ((t * TAB20.len() as f64) as usize).min(TAB20.len() - 1);
    TAB20[slot]
}

/// Diverging blue-to-red ramp; `value` is clamped into `[vmin, vmax]`.
pub fn coolwarm(value: f64, vmin: f64, vmax: f64) -> RGBColor {
    let span = vmax - vmin;
    let t = if span > 0.0 {
        ((value - vmin) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    for pair in COOLWARM.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            return RGBColor(lerp(c0.0, c1.0, f), lerp(c0.1, c1.1, f), lerp(c0.2, c1.2, f));
        }
    }
    let (_, last) = COOLWARM[COOLWARM.len() - 1];
    RGBColor(last.0, last.1, last.2)
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/palette.rs"]
mod tests;
