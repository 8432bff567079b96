// Sensor domain model

#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub unit: Option<String>,
    pub area: Option<String>,
}

impl Sensor {
    pub fn new(id: String, name: Option<String>, kind: String, unit: Option<String>, area: Option<String>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| Self::format_name(&id));
        Self {
            id,
            name,
            kind,
            unit,
            area,
        }
    }

    /// Descriptor for a sensor id the listing did not include
    pub fn from_id(id: &str) -> Self {
        Self::new(id.to_string(), None, "unknown".to_string(), None, None)
    }

    fn format_name(id: &str) -> String {
        // Convert "soil_ph_01" to "Soil Ph 01"
        id.trim_matches('_')
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        let sensor = Sensor::from_id("soil_ph_01");
        assert_eq!(sensor.name, "Soil Ph 01");

        let sensor = Sensor::from_id("_greenhouse__radiation_");
        assert_eq!(sensor.name, "Greenhouse Radiation");
    }

    #[test]
    fn test_explicit_name_wins() {
        let sensor = Sensor::new(
            "s-17".to_string(),
            Some("North Field pH".to_string()),
            "ph".to_string(),
            Some("pH".to_string()),
            Some("North Field".to_string()),
        );
        assert_eq!(sensor.name, "North Field pH");

        let sensor = Sensor::new("tank_level".to_string(), Some("  ".to_string()), "level".to_string(), None, None);
        assert_eq!(sensor.name, "Tank Level");
    }
}
