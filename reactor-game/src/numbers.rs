//! Numeric conversion helpers centralizing the fixed-point casts.

use num_traits::cast::cast;

use crate::constants::CENTI;

/// Convert a centi-unit value into display units.
#[must_use]
pub fn centi_to_units(centi: i32) -> f32 {
    cast::<i32, f32>(centi).unwrap_or(0.0) / cast::<i32, f32>(CENTI).unwrap_or(100.0)
}

/// Convert an unsigned centi-unit value (coolant) into display units.
#[must_use]
pub fn ucenti_to_units(centi: u32) -> f32 {
    cast::<u32, f32>(centi).unwrap_or(0.0) / 100.0
}

/// Round a f32 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f32_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let value = f64::from(value);
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Percentage shown in the HUD for a value already expressed in units.
#[must_use]
pub fn display_pct(units: f32) -> i32 {
    round_f32_to_i32(units).clamp(0, 100)
}

/// Convert a length into the `u32` domain used for rounds and counts.
#[must_use]
pub fn len_to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centi_conversion_is_exact_for_whole_units() {
        assert!((centi_to_units(5_000) - 50.0).abs() < f32::EPSILON);
        assert!((centi_to_units(-250) + 2.5).abs() < f32::EPSILON);
        assert!((ucenti_to_units(50) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f32_to_i32(1.6), 2);
        assert_eq!(round_f32_to_i32(f32::NAN), 0);
        assert_eq!(round_f32_to_i32(f32::MAX), i32::MAX);
        assert_eq!(display_pct(101.2), 100);
        assert_eq!(display_pct(-3.0), 0);
    }

    #[test]
    fn len_conversion_saturates() {
        assert_eq!(len_to_u32(7), 7);
    }
}
