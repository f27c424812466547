/// Float-to-string helpers for DOM attributes.
///
/// These avoid `format!` on floats, which has panicked in core's float
/// formatting on some wasm toolchain/browser combinations. Values are scaled
/// and rounded into an `i64`, then printed as integers.

/// Fixed number of decimals. Non-finite values print as `0` so a bad value
/// never produces an unparsable attribute.
pub fn fmt_f64_fixed(v: f64, decimals: usize) -> String {
    let decimals = decimals.min(9);
    let scale = 10_i64.pow(decimals as u32);
    let scaled = (v * scale as f64).round();
    if !scaled.is_finite() || scaled.abs() > i64::MAX as f64 {
        return "0".to_string();
    }

    let scaled = scaled as i64;
    let mut out = String::new();
    if scaled < 0 {
        out.push('-');
    }
    let abs = scaled.unsigned_abs();
    let scale = scale as u64;
    out.push_str(&(abs / scale).to_string());
    if decimals > 0 {
        let frac = (abs % scale).to_string();
        out.push('.');
        for _ in frac.len()..decimals {
            out.push('0');
        }
        out.push_str(&frac);
    }
    out
}

/// Up to three decimals with trailing zeros dropped: `12.5`, `3`, `-0.25`.
pub fn fmt_attr(v: f64) -> String {
    let s = fmt_f64_fixed(v, 3);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

pub fn fmt_px(v: f64) -> String {
    let mut s = fmt_f64_fixed(v, 0);
    s.push_str("px");
    s
}
