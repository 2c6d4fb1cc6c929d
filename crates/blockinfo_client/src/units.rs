//! Locale-invariant number formatting shared by every text routine.

use glam::Vec3;

pub const SEPARATOR: &str = ", ";

/// Fixed two decimals with trailing zeros removed: 2.50 -> "2.5", 3.00 -> "3".
pub fn number(value: f32) -> String {
    rounded(value, 2)
}

/// Like [`number`] with a chosen precision.
pub fn rounded(value: f32, decimals: usize) -> String {
    trim_decimals(format!("{value:.decimals$}"))
}

fn trim_decimals(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Integer with thousands separators: 5000 -> "5,000".
pub fn grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped integer part with two fixed decimals.
pub fn grouped_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole: i64 = whole.parse().unwrap_or(0);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac}", grouped(whole))
}

/// Like [`grouped_decimal`] without trailing zero decimals: 5000 -> "5,000".
pub fn grouped_number(value: f64) -> String {
    trim_decimals(grouped_decimal(value))
}

/// Input in MW.
pub fn power(mw: f32) -> String {
    power_watts(f64::from(mw) * 1_000_000.0)
}

pub fn power_watts(watts: f64) -> String {
    if watts >= 1_000_000.0 {
        format!("{:.2} MW", watts / 1_000_000.0)
    } else if watts >= 1_000.0 {
        format!("{:.2} kW", watts / 1_000.0)
    } else {
        format!("{watts:.2} W")
    }
}

/// Input in MWh.
pub fn power_storage(mwh: f32) -> String {
    let wh = f64::from(mwh) * 1_000_000.0;
    if wh >= 1_000_000.0 {
        format!("{:.2} MWh", wh / 1_000_000.0)
    } else if wh >= 1_000.0 {
        format!("{:.2} kWh", wh / 1_000.0)
    } else {
        format!("{wh:.2} Wh")
    }
}

pub fn mass(kg: f32) -> String {
    format!("{} kg", grouped(kg.round() as i64))
}

pub fn distance(meters: f32) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else if meters < 10.0 {
        format!("{meters:.2} m")
    } else {
        format!("{} m", meters.round() as i64)
    }
}

pub fn distance_range(min: f32, max: f32) -> String {
    format!("{}~{}", distance(min), distance(max))
}

/// Whole seconds as minutes and seconds, "01:40".
pub fn time(seconds: f32) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Like [`time`] but keeps sub-second precision for short durations.
pub fn time_precise(seconds: f32) -> String {
    if seconds < 10.0 {
        format!("{:.2}s", seconds.max(0.0))
    } else if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else {
        time(seconds)
    }
}

/// Input in newtons.
pub fn force(newtons: f32) -> String {
    let n = f64::from(newtons);
    if n >= 1_000_000.0 {
        format!("{:.2} MN", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.2} kN", n / 1_000.0)
    } else {
        format!("{n:.2} N")
    }
}

pub fn torque(newton_meters: f32) -> String {
    format!("{} N-m", grouped_decimal(f64::from(newton_meters)))
}

pub fn speed(mps: f32) -> String {
    format!("{} m/s", number(mps))
}

pub fn acceleration(mps2: f32) -> String {
    format!("{} m/s²", number(mps2))
}

/// Degrees per second.
pub fn rotation_speed(deg_per_sec: f32) -> String {
    format!("{}°/s", deg_per_sec.round() as i64)
}

pub fn angle(degrees: f32) -> String {
    format!("{}°", degrees.round() as i64)
}

pub fn angle_rad(radians: f32) -> String {
    angle(radians.to_degrees())
}

/// 0.5 -> "50%".
pub fn percent(proportion: f32) -> String {
    format!("{}%", number(proportion * 100.0))
}

/// Input in m³, printed in liters.
pub fn volume(cubic_meters: f32) -> String {
    let liters = f64::from(cubic_meters) * 1000.0;
    if liters >= 1_000_000.0 {
        format!("{:.2} ML", liters / 1_000_000.0)
    } else if liters >= 1_000.0 {
        format!("{:.2} kL", liters / 1_000.0)
    } else {
        format!("{liters:.2} L")
    }
}

pub fn vector(v: Vec3) -> String {
    format!("{}x{}x{}", v.x, v.y, v.z)
}

/// " (x2)" when `mul` is not 1, otherwise empty.
pub fn multiplier(mul: f32) -> String {
    if (mul - 1.0).abs() < f32::EPSILON {
        String::new()
    } else {
        format!(" (x{})", number(mul))
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
