use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::PaymentMethod;

/// One selectable `{label, value}` pair of a choice group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The externally supplied list of activity kinds. Membership is a
/// hard validation constraint; the catalog is never mutated after
/// startup.
#[derive(Debug, Clone)]
pub struct ActivityCatalog {
    options: Vec<ChoiceOption>,
}

impl ActivityCatalog {
    /// The default set shipped with the binary, used when no catalog
    /// file is supplied.
    pub fn builtin() -> Self {
        Self {
            options: vec![
                ChoiceOption::new("Road Trip", "road_trip"),
                ChoiceOption::new("Bike Ride", "bike_ride"),
                ChoiceOption::new("Hiking", "hiking"),
                ChoiceOption::new("Restaurant", "restaurant"),
                ChoiceOption::new("Cafe", "cafe"),
                ChoiceOption::new("Movie", "movie"),
                ChoiceOption::new("Gaming", "gaming"),
            ],
        }
    }

    /// Parses a catalog from a JSON array of `{label, value}` objects.
    pub fn from_json(contents: &str) -> Result<Self> {
        let options: Vec<ChoiceOption> =
            serde_json::from_str(contents).context("failed to parse activity catalog")?;
        if options.is_empty() {
            bail!("activity catalog must contain at least one option");
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.value.as_str())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// Guest counts offered by the form, lowest first.
pub const GUEST_CHOICES: [i64; 7] = [1, 2, 3, 4, 5, 6, 7];

/// Payment options in display order.
pub fn payment_options() -> impl Iterator<Item = (PaymentMethod, &'static str)> {
    PaymentMethod::ALL
        .into_iter()
        .map(|method| (method, method.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_offers_the_known_kinds() {
        let catalog = ActivityCatalog::builtin();
        assert!(catalog.contains("hiking"));
        assert!(catalog.contains("road_trip"));
        assert!(!catalog.contains("skydiving"));
    }

    #[test]
    fn catalog_parses_from_json_pairs() {
        let catalog = ActivityCatalog::from_json(
            r#"[{"label": "Bouldering", "value": "bouldering"}]"#,
        )
        .unwrap();
        assert!(catalog.contains("bouldering"));
        assert_eq!(catalog.options().len(), 1);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(ActivityCatalog::from_json("[]").is_err());
    }
}
