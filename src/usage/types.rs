use serde::{Deserialize, Serialize};

/// Time spent on one language, project or editor over the stats window.
///
/// Mirrors the per-item shape of the WakaTime stats endpoint. `hours` and
/// `minutes` decompose `total_seconds`; `minutes` always stays below 60.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UsageItem {
    pub name: String,
    #[serde(default)]
    pub total_seconds: f64,
    #[serde(default)]
    pub percent: f64,
    /// "H:MM" as reported by the backend
    #[serde(default)]
    pub digital: String,
    /// "H.DD" as reported by the backend
    #[serde(default)]
    pub decimal: String,
    /// Human readable duration, e.g. "3 hrs 12 mins"
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub minutes: u64,
}

impl UsageItem {
    /// Sum two items into a new one, carrying whole hours out of `minutes`.
    ///
    /// The result keeps `self.name`; grouping renames it afterwards.
    pub fn combine(&self, other: &UsageItem) -> UsageItem {
        let mut hours = self.hours + other.hours;
        let mut minutes = self.minutes + other.minutes;

        if minutes >= 60 {
            hours += minutes / 60;
            minutes %= 60;
        }

        UsageItem {
            name: self.name.clone(),
            total_seconds: self.total_seconds + other.total_seconds,
            percent: self.percent + other.percent,
            digital: format!("{}:{}", hours, minutes),
            decimal: format_decimal(hours, minutes),
            text: format_text(hours, minutes),
            hours,
            minutes,
        }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Minutes are scaled by 1/0.6 into "hundredths" and rounded. Downstream
/// consumers read this exact format, so it is not zero-padded.
fn format_decimal(hours: u64, minutes: u64) -> String {
    let hundredths = (minutes as f64 / 0.6).round() as u64;
    format!("{}.{}", hours, hundredths)
}

fn format_text(hours: u64, minutes: u64) -> String {
    if hours == 0 {
        format!("{} mins", minutes)
    } else {
        format!("{} hrs {} mins", hours, minutes)
    }
}

/// The three category lists of one stats window
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsData {
    #[serde(default)]
    pub languages: Option<Vec<UsageItem>>,
    #[serde(default)]
    pub projects: Option<Vec<UsageItem>>,
    #[serde(default)]
    pub editors: Option<Vec<UsageItem>>,
}

/// Envelope returned by `/users/{user}/stats/{range}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsResponse {
    pub data: StatsData,
}

/// A `(name, color)` pair from the remote language registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageColor {
    pub name: String,
    pub color: String,
}

impl LanguageColor {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[cfg(test)]
pub(crate) fn item(name: &str, total_seconds: f64, hours: u64, minutes: u64) -> UsageItem {
    UsageItem {
        name: name.to_string(),
        total_seconds,
        percent: 0.0,
        digital: format!("{}:{:02}", hours, minutes),
        decimal: String::new(),
        text: String::new(),
        hours,
        minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_carries_minutes_into_hours() {
        let a = item("Rust", 2400.0, 0, 40);
        let b = item("Go", 2100.0, 1, 35);
        let c = a.combine(&b);

        assert_eq!(c.hours, 2);
        assert_eq!(c.minutes, 15);
        assert_eq!(c.digital, "2:15");
        assert_eq!(c.decimal, "2.25");
        assert_eq!(c.text, "2 hrs 15 mins");
        assert!((c.total_seconds - 4500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_combine_keeps_first_name_and_inputs() {
        let a = item("C", 100.0, 0, 1);
        let b = item("C++", 50.0, 0, 0);
        let c = a.combine(&b);

        assert_eq!(c.name, "C");
        assert_eq!(a.total_seconds, 100.0);
        assert_eq!(b.total_seconds, 50.0);
    }

    #[test]
    fn test_combine_sums_percent() {
        let mut a = item("Python", 10.0, 0, 0);
        let mut b = item("Go", 10.0, 0, 0);
        a.percent = 60.5;
        b.percent = 20.25;
        let c = a.combine(&b);
        assert!((c.percent - 80.75).abs() < 1e-9);
    }

    #[test]
    fn test_text_omits_zero_hours() {
        let c = item("a", 0.0, 0, 10).combine(&item("b", 0.0, 0, 5));
        assert_eq!(c.text, "15 mins");
        assert_eq!(c.digital, "0:15");
    }

    #[test]
    fn test_decimal_scaling_is_not_padded() {
        assert_eq!(format_decimal(1, 5), "1.8");
        assert_eq!(format_decimal(3, 30), "3.50");
        assert_eq!(format_decimal(0, 59), "0.98");
    }

    #[test]
    fn test_parse_stats_response() {
        let json = r#"{"data": {"languages": [{
            "name": "Python", "total_seconds": 3600.5, "percent": 60.0,
            "digital": "1:00", "decimal": "1.00", "text": "1 hr",
            "hours": 1, "minutes": 0
        }]}}"#;
        let response: StatsResponse = serde_json::from_str(json).unwrap();
        let languages = response.data.languages.unwrap();
        assert_eq!(languages.len(), 1);
        assert!(languages[0].is_named("python"));
        assert!(response.data.projects.is_none());
    }
}
