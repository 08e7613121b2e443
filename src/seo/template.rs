//! SEO template rendering
//!
//! Category descriptions and FAQ entries are stored with placeholders and
//! rendered per review. Substitution is a single left-to-right pass over a
//! fixed whitelist; substituted values are never rescanned, and anything
//! that is not a known placeholder passes through verbatim.

use chrono::{Datelike, NaiveDate};

/// German month names, indexed by month-1
const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Customer fields exposed to templates
#[derive(Debug, Clone, Copy)]
pub struct CustomerRef<'a> {
    pub salutation: &'a str,
    pub lastname: &'a str,
}

/// Review fields exposed to templates
///
/// `installation_date` stays the raw stored string: a value that fails ISO
/// parsing degrades `{installation_month}` / `{installation_year}` to empty
/// strings instead of failing the render.
#[derive(Debug, Clone, Copy)]
pub struct ReviewContext<'a> {
    pub category: &'a str,
    pub city: &'a str,
    pub postal_code: &'a str,
    pub region: &'a str,
    pub installation_date: &'a str,
    pub customer: CustomerRef<'a>,
    pub rating: f64,
}

impl ReviewContext<'_> {
    fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.installation_date, "%Y-%m-%d").ok()
    }

    fn installation_month(&self) -> String {
        self.parsed_date()
            .map(|d| GERMAN_MONTHS[d.month0() as usize].to_string())
            .unwrap_or_default()
    }

    fn installation_year(&self) -> String {
        self.parsed_date()
            .map(|d| d.year().to_string())
            .unwrap_or_default()
    }

    fn value_of(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.to_string()),
            "city" => Some(self.city.to_string()),
            "postal_code" => Some(self.postal_code.to_string()),
            "region" => Some(self.region.to_string()),
            "installation_month" => Some(self.installation_month()),
            "installation_year" => Some(self.installation_year()),
            "customer_salutation" => Some(self.customer.salutation.to_string()),
            "customer_lastname" => Some(self.customer.lastname.to_string()),
            // Plain float Display: whole numbers drop the trailing ".0"
            "rating" => Some(format!("{}", self.rating)),
            _ => None,
        }
    }
}

/// Render a template against a review context in one pass
pub fn render(template: &str, ctx: &ReviewContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        match after.find('}') {
            Some(end) => {
                let key = &after[1..end];
                if let Some(value) = ctx.value_of(key) {
                    out.push_str(&value);
                    rest = &after[end + 1..];
                } else {
                    // unknown token: emit the brace and rescan right after it
                    out.push('{');
                    rest = &after[1..];
                }
            }
            None => {
                // unclosed brace, rest of the template is literal
                out.push_str(after);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>() -> ReviewContext<'a> {
        ReviewContext {
            category: "Kaminofen",
            city: "Bamberg",
            postal_code: "96047",
            region: "Oberfranken",
            installation_date: "2024-03-15",
            customer: CustomerRef {
                salutation: "Familie",
                lastname: "Müller",
            },
            rating: 5.0,
        }
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = "{customer_salutation} {customer_lastname} aus {postal_code} {city} \
                        ({region}) bewertet {category} mit {rating} Sternen \
                        ({installation_month} {installation_year})";
        assert_eq!(
            render(template, &ctx()),
            "Familie Müller aus 96047 Bamberg (Oberfranken) bewertet Kaminofen mit 5 Sternen \
             (März 2024)"
        );
    }

    #[test]
    fn test_render_rating_keeps_fraction() {
        let mut c = ctx();
        c.rating = 4.5;
        assert_eq!(render("{rating} von 5", &c), "4.5 von 5");
    }

    #[test]
    fn test_render_unknown_placeholder_passes_through() {
        assert_eq!(
            render("Hallo {unknown} und {city}", &ctx()),
            "Hallo {unknown} und Bamberg"
        );
    }

    #[test]
    fn test_render_unclosed_brace_is_literal() {
        assert_eq!(render("Preis in {city", &ctx()), "Preis in {city");
    }

    #[test]
    fn test_render_does_not_rescan_substituted_values() {
        let mut c = ctx();
        c.customer.lastname = "{city}";
        assert_eq!(render("{customer_lastname}", &c), "{city}");
    }

    #[test]
    fn test_render_bad_date_degrades_to_empty() {
        let mut c = ctx();
        c.installation_date = "im Sommer";
        assert_eq!(
            render("Eingebaut {installation_month} {installation_year}.", &c),
            "Eingebaut  ."
        );
    }

    #[test]
    fn test_render_month_table_boundaries() {
        let mut c = ctx();
        c.installation_date = "2024-01-01";
        assert_eq!(render("{installation_month}", &c), "Januar");
        c.installation_date = "2024-12-31";
        assert_eq!(render("{installation_month}", &c), "Dezember");
    }

    #[test]
    fn test_render_empty_template() {
        assert_eq!(render("", &ctx()), "");
    }
}
