const INC_PREFIXES: [&str; 8] = ["k", "M", "G", "T", "P", "E", "Z", "Y"];
const DEC_PREFIXES: [&str; 8] = ["m", "µ", "n", "p", "f", "a", "z", "y"];

/// Formats `value` with an SI prefix, e.g. `0.0123` as `12.3 m`.
/// Values in `[1, 1000)` are printed as-is; prefixes saturate at `Y` and `y`.
pub fn to_si(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let mut degree = (value.abs().log10() / 3.0).floor() as i32;
    if degree == 0 {
        return format!("{}", value);
    }

    let prefix = if degree > 0 {
        let max = INC_PREFIXES.len() as i32;
        degree = degree.min(max);
        INC_PREFIXES[(degree - 1) as usize]
    } else {
        let max = DEC_PREFIXES.len() as i32;
        degree = degree.max(-max);
        DEC_PREFIXES[(-degree - 1) as usize]
    };

    let scaled = value * 1000f64.powi(-degree);
    format!("{} {}", trim_float(scaled), prefix)
}

fn trim_float(v: f64) -> String {
    let s = format!("{:.3}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
