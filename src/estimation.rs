//! Heuristic house metrics
//!
//! Pure, deterministic functions deriving house size, window count and
//! energy figures from a geocoded location. All lookups are keyed by the
//! location's property type; anything not in a table resolves to that
//! table's default entry.

use crate::models::LocationRecord;

/// Static table keyed by property type, with an explicit default entry
#[derive(Debug, Clone, Copy)]
pub struct LookupTable {
    entries: &'static [(&'static str, f64)],
    default: f64,
}

impl LookupTable {
    /// Value for `property_type`, or the default entry when absent or unknown
    #[must_use]
    pub fn get(&self, property_type: Option<&str>) -> f64 {
        property_type
            .and_then(|label| {
                self.entries
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(label.trim()))
            })
            .map_or(self.default, |(_, value)| *value)
    }

    #[must_use]
    pub fn default_value(&self) -> f64 {
        self.default
    }
}

/// Base floor area in square feet
pub const HOUSE_SIZE_BY_TYPE: LookupTable = LookupTable {
    entries: &[
        ("house", 2000.0),
        ("residential", 2000.0),
        ("apartment", 1000.0),
        ("condo", 1200.0),
    ],
    default: 1800.0,
};

/// Windows per square foot of floor area
pub const WINDOWS_PER_SQFT_BY_TYPE: LookupTable = LookupTable {
    entries: &[
        ("house", 0.015),
        ("residential", 0.015),
        ("apartment", 0.01),
        ("condo", 0.01),
    ],
    default: 0.012,
};

/// Applied when the house number contains a '/'
pub const MULTI_UNIT_FACTOR: f64 = 0.75;
/// Applied when the address names a building
pub const NAMED_BUILDING_FACTOR: f64 = 0.5;
/// Fallback monthly usage per square foot, kWh
pub const FALLBACK_KWH_PER_SQFT: f64 = 0.5;
/// Flat electricity rate per kWh
pub const ENERGY_RATE_PER_KWH: f64 = 0.12;

/// Label shown for the property type; untyped locations read as residential
#[must_use]
pub fn property_type_label(location: &LocationRecord) -> &str {
    location.property_type.as_deref().unwrap_or("residential")
}

/// Estimated floor area in square feet
#[must_use]
pub fn estimate_house_size(location: &LocationRecord) -> u32 {
    let mut size = HOUSE_SIZE_BY_TYPE.get(location.property_type.as_deref());

    if let Some(details) = &location.address_details {
        if details.is_multi_unit() {
            size *= MULTI_UNIT_FACTOR;
        }
        if details.has_named_building() {
            size *= NAMED_BUILDING_FACTOR;
        }
    }

    size.round() as u32
}

/// Estimated number of windows for a house of `house_size` square feet
#[must_use]
pub fn estimate_window_count(house_size: u32, location: &LocationRecord) -> u32 {
    let ratio = WINDOWS_PER_SQFT_BY_TYPE.get(location.property_type.as_deref());
    (f64::from(house_size) * ratio).round() as u32
}

/// Monthly kWh used when no statistical figure is available
#[must_use]
pub fn estimate_fallback_energy(house_size: u32) -> u32 {
    (f64::from(house_size) * FALLBACK_KWH_PER_SQFT).round() as u32
}

#[must_use]
pub fn annual_energy(monthly_kwh: u64) -> u64 {
    monthly_kwh.saturating_mul(12)
}

/// Monthly cost at the flat rate, rounded to whole currency units
#[must_use]
pub fn estimate_monthly_cost(monthly_kwh: u64) -> u64 {
    (monthly_kwh as f64 * ENERGY_RATE_PER_KWH).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressDetails;
    use proptest::prelude::*;
    use rstest::rstest;

    fn location(property_type: Option<&str>) -> LocationRecord {
        let location = LocationRecord::new("Test", 49.28, -123.12);
        match property_type {
            Some(kind) => location.with_property_type(kind),
            None => location,
        }
    }

    #[rstest]
    #[case(Some("house"), 2000)]
    #[case(Some("residential"), 2000)]
    #[case(Some("apartment"), 1000)]
    #[case(Some("condo"), 1200)]
    #[case(Some("building"), 1800)]
    #[case(Some("castle"), 1800)]
    #[case(None, 1800)]
    fn test_base_house_size(#[case] property_type: Option<&str>, #[case] expected: u32) {
        assert_eq!(estimate_house_size(&location(property_type)), expected);
    }

    #[rstest]
    #[case(Some("house"), 2000, 30)]
    #[case(Some("apartment"), 1000, 10)]
    #[case(Some("condo"), 1200, 12)]
    #[case(Some("yes"), 1800, 22)]
    #[case(None, 1800, 22)]
    fn test_window_count(
        #[case] property_type: Option<&str>,
        #[case] house_size: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(
            estimate_window_count(house_size, &location(property_type)),
            expected
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(HOUSE_SIZE_BY_TYPE.get(Some("Apartment")), 1000.0);
    }

    #[test]
    fn test_multi_unit_adjustment() {
        let location = location(Some("house")).with_address_details(AddressDetails {
            house_number: Some("12/4".into()),
            ..AddressDetails::default()
        });
        assert_eq!(estimate_house_size(&location), 1500);
    }

    #[test]
    fn test_named_building_adjustment() {
        let location = location(Some("apartment")).with_address_details(AddressDetails {
            building: Some("Harbour Tower".into()),
            ..AddressDetails::default()
        });
        assert_eq!(estimate_house_size(&location), 500);
    }

    #[test]
    fn test_both_adjustments_compose() {
        let location = location(None).with_address_details(AddressDetails {
            house_number: Some("7/2".into()),
            road: Some("Main St".into()),
            building: Some("Block C".into()),
        });
        // 1800 * 0.75 * 0.5
        assert_eq!(estimate_house_size(&location), 675);
    }

    #[test]
    fn test_plain_address_details_leave_size_unchanged() {
        let location = location(Some("house")).with_address_details(AddressDetails {
            house_number: Some("123".into()),
            road: Some("Main St".into()),
            building: None,
        });
        assert_eq!(estimate_house_size(&location), 2000);
    }

    #[test]
    fn test_cost_and_annual() {
        assert_eq!(annual_energy(1000), 12_000);
        assert_eq!(estimate_monthly_cost(1000), 120);
        assert_eq!(estimate_monthly_cost(900), 108);
    }

    proptest! {
        #[test]
        fn fallback_energy_is_half_of_size(size in 0u32..1_000_000) {
            prop_assert_eq!(
                estimate_fallback_energy(size),
                (f64::from(size) * 0.5).round() as u32
            );
        }

        #[test]
        fn window_count_is_monotonic(
            a in 0u32..100_000,
            b in 0u32..100_000,
            kind in prop::sample::select(vec!["house", "apartment", "condo", "hut"]),
        ) {
            let location = location(Some(kind));
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                estimate_window_count(small, &location) <= estimate_window_count(large, &location)
            );
        }

        #[test]
        fn unknown_types_use_default_entry(kind in "[a-z]{1,12}") {
            prop_assume!(!["house", "residential", "apartment", "condo"].contains(&kind.as_str()));
            prop_assert_eq!(HOUSE_SIZE_BY_TYPE.get(Some(kind.as_str())), HOUSE_SIZE_BY_TYPE.default_value());
            prop_assert_eq!(
                WINDOWS_PER_SQFT_BY_TYPE.get(Some(kind.as_str())),
                WINDOWS_PER_SQFT_BY_TYPE.default_value()
            );
        }
    }
}
