//! Static city catalog: the closed set of places the widget can display.
//!
//! Every entry carries the coordinates used for the weather query and the
//! map viewport, plus the IANA zone used for the local clock. The set is
//! fixed at build time; nothing else in the crate assumes how many entries
//! there are.

/// One displayable city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityEntry {
    /// Short stable identifier; this is the value persisted in settings.
    pub key: &'static str,
    /// Human-readable label shown as the widget title.
    pub label: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// IANA time zone name, e.g. "America/New_York".
    pub tz: &'static str,
}

/// The catalog. The first entry doubles as the default city.
pub const CITIES: &[CityEntry] = &[
    CityEntry {
        key: "richmond",
        label: "Richmond, VA",
        lat: 37.5407, lon: -77.4360,
        tz: "America/New_York",
    },
    CityEntry {
        key: "dc",
        label: "Washington, DC",
        lat: 38.9072, lon: -77.0369,
        tz: "America/New_York",
    },
    CityEntry {
        key: "nyc",
        label: "New York City",
        lat: 40.7128, lon: -74.0060,
        tz: "America/New_York",
    },
    CityEntry {
        key: "london",
        label: "London",
        lat: 51.5072, lon: -0.1276,
        tz: "Europe/London",
    },
    CityEntry {
        key: "bristol",
        label: "Bristol",
        lat: 51.4545, lon: -2.5879,
        tz: "Europe/London",
    },
];

/// Look up an entry by its exact key.
pub fn lookup(key: &str) -> Option<&'static CityEntry> {
    CITIES.iter().find(|c| c.key == key)
}

/// The city shown when no valid choice has been saved yet.
pub fn default_city() -> &'static CityEntry {
    &CITIES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn test_lookup_known_key() {
        let city = lookup("london").unwrap();
        assert_eq!(city.label, "London");
        assert_eq!(city.tz, "Europe/London");
    }

    #[test]
    fn test_lookup_unknown_key() {
        assert!(lookup("atlantis").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        // Validation elsewhere relies on exact matching, not fuzzy.
        assert!(lookup("London").is_none());
        assert!(lookup(" london").is_none());
    }

    #[test]
    fn test_default_city() {
        assert_eq!(default_city().key, "richmond");
        assert_eq!(default_city().label, "Richmond, VA");
    }

    #[test]
    fn test_keys_unique() {
        for (i, a) in CITIES.iter().enumerate() {
            for b in &CITIES[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate catalog key {}", a.key);
            }
        }
    }

    #[test]
    fn test_every_zone_is_valid_iana() {
        for city in CITIES {
            assert!(
                city.tz.parse::<Tz>().is_ok(),
                "catalog entry {} has unparseable zone {}",
                city.key,
                city.tz
            );
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        for city in CITIES {
            assert!((-90.0..=90.0).contains(&city.lat), "{}", city.key);
            assert!((-180.0..=180.0).contains(&city.lon), "{}", city.key);
        }
    }
}
