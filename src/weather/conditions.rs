//! WMO weather-code descriptions.
//!
//! Open-Meteo reports conditions as WMO interpretation codes; this maps
//! the codes the widget cares about to short labels.

/// Translate a WMO weather code into display text.
///
/// Total over all of `i32`: codes outside the table come back as
/// `"Weather code {code}"` so the widget never shows a blank.
pub fn describe(code: i32) -> String {
    match known_label(code) {
        Some(label) => label.to_string(),
        None => format!("Weather code {}", code),
    }
}

fn known_label(code: i32) -> Option<&'static str> {
    let label = match code {
        0 => "Clear",
        1 => "Mostly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Heavy drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        80 | 81 => "Rain showers",
        82 => "Heavy rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm (hail)",
        99 => "Thunderstorm (heavy hail)",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_labels() {
        let expected = [
            (0, "Clear"),
            (1, "Mostly clear"),
            (2, "Partly cloudy"),
            (3, "Overcast"),
            (45, "Fog"),
            (48, "Rime fog"),
            (51, "Light drizzle"),
            (53, "Drizzle"),
            (55, "Heavy drizzle"),
            (61, "Light rain"),
            (63, "Rain"),
            (65, "Heavy rain"),
            (71, "Light snow"),
            (73, "Snow"),
            (75, "Heavy snow"),
            (80, "Rain showers"),
            (81, "Rain showers"),
            (82, "Heavy rain showers"),
            (95, "Thunderstorm"),
            (96, "Thunderstorm (hail)"),
            (99, "Thunderstorm (heavy hail)"),
        ];
        for (code, label) in expected {
            assert_eq!(describe(code), label, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_code_embeds_the_number() {
        assert_eq!(describe(7), "Weather code 7");
        assert!(describe(7).contains('7'));
        assert_eq!(describe(-1), "Weather code -1");
    }

    #[test]
    fn test_total_over_extremes() {
        for code in [i32::MIN, -1000, 4, 50, 100, 1000, i32::MAX] {
            assert!(!describe(code).is_empty());
        }
    }
}
