//! Pincode proximity heuristic and city lookup.
//!
//! This is a placeholder for geocoding: two pincodes are "nearby" when they
//! share a postal sorting district (first three digits) or are numerically
//! close. Distances are a linear scale of the numeric difference and carry no
//! geographic meaning.

/// Pincodes whose numeric difference is below this are treated as nearby.
pub const NEARBY_THRESHOLD: u32 = 1000;

/// Kilometres per [`NEARBY_THRESHOLD`] of numeric difference.
pub const KM_PER_THRESHOLD: u32 = 50;

/// Length of the postal sorting district prefix.
const DISTRICT_PREFIX_LEN: usize = 3;

/// Static city → representative pincode table. Order matters for the
/// substring fallback in [`pincode_for_city`]: the first hit wins.
const CITY_PINCODES: &[(&str, &str)] = &[
    ("mumbai", "400001"),
    ("navi mumbai", "400703"),
    ("delhi", "110001"),
    ("new delhi", "110001"),
    ("bangalore", "560001"),
    ("bengaluru", "560001"),
    ("chennai", "600001"),
    ("kolkata", "700001"),
    ("hyderabad", "500001"),
    ("pune", "411001"),
    ("ahmedabad", "380001"),
    ("jaipur", "302001"),
    ("lucknow", "226001"),
    ("tirupati", "517501"),
    ("chittoor", "517001"),
    ("vijayawada", "520001"),
    ("visakhapatnam", "530001"),
    ("guntur", "522001"),
    ("nellore", "524001"),
    ("kochi", "682001"),
    ("coimbatore", "641001"),
    ("madurai", "625001"),
    ("mysore", "570001"),
    ("nagpur", "440001"),
    ("indore", "452001"),
    ("bhopal", "462001"),
    ("chandigarh", "160017"),
    ("patna", "800001"),
    ("guwahati", "781001"),
];

/// Returns `true` if `pincode` is exactly six ASCII digits.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

fn parse(pincode: &str) -> Option<u32> {
    if is_valid_pincode(pincode) {
        pincode.parse().ok()
    } else {
        None
    }
}

/// Returns `true` if both pincodes are valid and either share the district
/// prefix or differ by less than [`NEARBY_THRESHOLD`].
#[must_use]
pub fn is_pincode_nearby(a: &str, b: &str) -> bool {
    let (Some(x), Some(y)) = (parse(a), parse(b)) else {
        return false;
    };
    a.get(..DISTRICT_PREFIX_LEN) == b.get(..DISTRICT_PREFIX_LEN) || x.abs_diff(y) < NEARBY_THRESHOLD
}

/// Approximate distance in kilometres: `round(|a - b| / 1000 * 50)`.
///
/// Returns `None` if either pincode is invalid.
#[must_use]
pub fn approximate_distance_km(a: &str, b: &str) -> Option<u32> {
    let diff = parse(a)?.abs_diff(parse(b)?);
    // round(diff * 50 / 1000) with halves rounded up, in integers.
    let half = NEARBY_THRESHOLD / 2;
    Some((diff * KM_PER_THRESHOLD + half) / NEARBY_THRESHOLD)
}

/// Resolves a city name to a representative pincode.
///
/// Tries an exact case-insensitive match first, then substring containment
/// in either direction. Empty names resolve to `None`.
#[must_use]
pub fn pincode_for_city(city: &str) -> Option<&'static str> {
    let needle = city.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    CITY_PINCODES
        .iter()
        .find(|(name, _)| *name == needle)
        .or_else(|| {
            CITY_PINCODES
                .iter()
                .find(|(name, _)| needle.contains(name) || name.contains(needle.as_str()))
        })
        .map(|(_, pincode)| *pincode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_district_is_nearby() {
        assert!(is_pincode_nearby("517501", "517502"));
        assert!(is_pincode_nearby("517001", "517999"));
    }

    #[test]
    fn distant_pincodes_are_not_nearby() {
        assert!(!is_pincode_nearby("110001", "700001"));
    }

    #[test]
    fn numeric_closeness_crosses_districts() {
        // Different prefix (516 vs 517), difference 2.
        assert!(is_pincode_nearby("516999", "517001"));
        assert!(!is_pincode_nearby("516000", "517000"));
    }

    #[test]
    fn invalid_pincodes_are_never_nearby() {
        assert!(!is_pincode_nearby("51750", "517501"));
        assert!(!is_pincode_nearby("abcdef", "abcdef"));
        assert!(!is_valid_pincode("5175011"));
        assert!(is_valid_pincode("517501"));
    }

    #[test]
    fn distance_is_linear() {
        assert_eq!(approximate_distance_km("517501", "517501"), Some(0));
        assert_eq!(approximate_distance_km("517501", "517502"), Some(0));
        assert_eq!(approximate_distance_km("517000", "518000"), Some(50));
        assert_eq!(approximate_distance_km("110001", "700001"), Some(29_500));
        // 10 / 1000 * 50 = 0.5 rounds up.
        assert_eq!(approximate_distance_km("517500", "517510"), Some(1));
        assert_eq!(approximate_distance_km("bad", "517510"), None);
    }

    #[test]
    fn city_lookup_exact_then_substring() {
        assert_eq!(pincode_for_city("Tirupati"), Some("517501"));
        assert_eq!(pincode_for_city("  MUMBAI "), Some("400001"));
        assert_eq!(pincode_for_city("Greater Hyderabad"), Some("500001"));
        assert_eq!(pincode_for_city("bengal"), Some("560001"));
        assert_eq!(pincode_for_city("Atlantis"), None);
        assert_eq!(pincode_for_city(""), None);
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        // "mumbai" comes first in the table and is contained in the query.
        assert_eq!(pincode_for_city("Navi Mumbai"), Some("400703"));
        assert_eq!(pincode_for_city("mumbai"), Some("400001"));
        assert_eq!(pincode_for_city("navi mumbai sector 17"), Some("400001"));
        assert_eq!(pincode_for_city("Tirupati Urban"), Some("517501"));
        assert_eq!(pincode_for_city("atlantis"), None);
    }
}
