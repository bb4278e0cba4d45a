//! Flight duration codec.
//!
//! Converts between total minutes and (hours, minutes) pairs and renders
//! human-readable duration strings. Per-record formatting treats an absent
//! or zero duration as "unset"; the aggregate formatter treats zero as a
//! valid total and renders it as "0h". That asymmetry is intentional.

/// Sentinel string for an unknown per-record flight time.
pub const UNSET: &str = "unset";

/// Split a total minute count into an (hours, minutes) pair.
///
/// `None` or zero map to `(0, 0)`.
#[must_use]
pub fn minutes_to_hm(total_minutes: Option<u32>) -> (u32, u32) {
    match total_minutes {
        Some(m) if m > 0 => (m / 60, m % 60),
        _ => (0, 0),
    }
}

/// Combine an (hours, minutes) pair into total minutes.
///
/// The unsigned parameters encode the caller contract that inputs are
/// already clamped to be non-negative. Saturates at `u32::MAX` instead of
/// overflowing on absurd hour counts.
#[must_use]
pub fn hm_to_minutes(hours: u32, minutes: u32) -> u32 {
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Format a per-record flight time.
///
/// `None` or zero render as the [`UNSET`] sentinel; otherwise `"{h}h{m}m"`
/// with zero segments omitted (but never both).
#[must_use]
pub fn format_duration(total_minutes: Option<u32>) -> String {
    match total_minutes {
        Some(m) if m > 0 => format_hm(m),
        _ => UNSET.to_string(),
    }
}

/// Format an aggregate flight time total.
///
/// Unlike [`format_duration`], a zero total is a valid value to display and
/// renders as `"0h"` rather than as "unset".
#[must_use]
pub fn format_total_duration(total_minutes: u32) -> String {
    if total_minutes == 0 {
        "0h".to_string()
    } else {
        format_hm(total_minutes)
    }
}

fn format_hm(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_hm() {
        assert_eq!(minutes_to_hm(Some(90)), (1, 30));
        assert_eq!(minutes_to_hm(Some(120)), (2, 0));
        assert_eq!(minutes_to_hm(Some(45)), (0, 45));
        assert_eq!(minutes_to_hm(Some(0)), (0, 0));
        assert_eq!(minutes_to_hm(None), (0, 0));
    }

    #[test]
    fn test_hm_to_minutes() {
        assert_eq!(hm_to_minutes(1, 30), 90);
        assert_eq!(hm_to_minutes(2, 0), 120);
        assert_eq!(hm_to_minutes(0, 0), 0);
    }

    #[test]
    fn test_hm_to_minutes_saturates() {
        assert_eq!(hm_to_minutes(u32::MAX, 0), u32::MAX);
        assert_eq!(hm_to_minutes(u32::MAX, 59), u32::MAX);
        assert_eq!(hm_to_minutes(71_582_788, 15), u32::MAX);
    }

    #[test]
    fn test_round_trip() {
        for m in 0..=600 {
            let (h, rem) = minutes_to_hm(Some(m));
            assert_eq!(hm_to_minutes(h, rem), m);
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "unset");
        assert_eq!(format_duration(Some(0)), "unset");
        assert_eq!(format_duration(Some(90)), "1h30m");
        assert_eq!(format_duration(Some(120)), "2h");
        assert_eq!(format_duration(Some(45)), "45m");
    }

    #[test]
    fn test_format_total_duration_zero_is_valid() {
        // Aggregate zero is a displayable total, distinct from "unset".
        assert_eq!(format_total_duration(0), "0h");
        assert_ne!(format_total_duration(0), format_duration(None));
    }

    #[test]
    fn test_format_total_duration() {
        assert_eq!(format_total_duration(390), "6h30m");
        assert_eq!(format_total_duration(120), "2h");
        assert_eq!(format_total_duration(45), "45m");
    }
}
