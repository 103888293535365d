use serde::{Deserialize, Serialize};

/// Educational attainment for one county, as published in the statistics feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStatistic {
    #[serde(rename = "fips")]
    pub id: u32,
    /// State abbreviation.
    #[serde(rename = "state")]
    pub parent_name: String,
    #[serde(rename = "area_name")]
    pub name: String,
    /// Percent of adults with a bachelor's degree or higher, 0..=100.
    #[serde(rename = "bachelorsOrHigher")]
    pub value: f64,
}

pub fn parse_statistics(bytes: &[u8]) -> Result<Vec<RegionStatistic>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Format a percentage the way the feed prints it: no trailing `.0`.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_field_names() {
        let json = r#"[
            {"fips": 1001, "state": "AL", "area_name": "Autauga County", "bachelorsOrHigher": 21.9},
            {"fips": 1003, "state": "AL", "area_name": "Baldwin County", "bachelorsOrHigher": 28.6}
        ]"#;
        let stats = parse_statistics(json.as_bytes()).expect("statistics should parse");
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].id, 1001);
        assert_eq!(stats[0].parent_name, "AL");
        assert_eq!(stats[0].name, "Autauga County");
        assert_eq!(stats[1].value, 28.6);
    }

    #[test]
    fn rejects_records_missing_value() {
        let json = r#"[{"fips": 1001, "state": "AL", "area_name": "Autauga County"}]"#;
        assert!(parse_statistics(json.as_bytes()).is_err());
    }

    #[test]
    fn percent_formatting_drops_integral_fraction() {
        assert_eq!(format_percent(21.9), "21.9%");
        assert_eq!(format_percent(30.0), "30%");
    }
}
