//! Display formatting for slugs, plans, and dates.

use chrono::{DateTime, Datelike, Utc};

/// Short month labels used by chart series.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Convert a kebab-case slug to Title Case (`health-tech` -> `Health Tech`).
#[must_use]
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display string for a subscription plan tag.
///
/// Unrecognized tags pass through unchanged.
#[must_use]
pub fn plan_display(plan: &str) -> String {
    match plan {
        "trial" => "Free Trial".to_owned(),
        "basic" => "$50 Plan".to_owned(),
        "premium" => "$100 Plan".to_owned(),
        "professional" => "$80 Plan".to_owned(),
        other => other.to_owned(),
    }
}

/// Short month label for a timestamp ("Jan".."Dec").
#[must_use]
pub fn month_label(ts: DateTime<Utc>) -> &'static str {
    MONTHS[ts.month0() as usize]
}

/// Human-readable date ("Mar 5, 2026").
#[must_use]
pub fn format_date(ts: DateTime<Utc>) -> String {
    format!("{} {}, {}", month_label(ts), ts.day(), ts.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slug_to_title_case() {
        assert_eq!(title_case_slug("health-tech"), "Health Tech");
        assert_eq!(title_case_slug("fin-tech"), "Fin Tech");
        assert_eq!(title_case_slug("ecommerce"), "Ecommerce");
    }

    #[test]
    fn slug_edge_cases() {
        assert_eq!(title_case_slug(""), "");
        assert_eq!(title_case_slug("a--b"), "A B");
    }

    #[test]
    fn plan_display_known_and_passthrough() {
        assert_eq!(plan_display("trial"), "Free Trial");
        assert_eq!(plan_display("basic"), "$50 Plan");
        assert_eq!(plan_display("premium"), "$100 Plan");
        assert_eq!(plan_display("professional"), "$80 Plan");
        assert_eq!(plan_display("enterprise"), "enterprise");
    }

    #[test]
    fn dates() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(month_label(ts), "Mar");
        assert_eq!(format_date(ts), "Mar 5, 2026");
    }
}
