use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::ResolveError;

/// The meal a user picked when logging food on a past day.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Evening,
}

impl MealCategory {
    /// Hours after local midnight at which this meal is recorded.
    pub fn hour_offset(self) -> u8 {
        match self {
            MealCategory::Breakfast => 8,
            MealCategory::Lunch => 12,
            MealCategory::Dinner => 18,
            MealCategory::Evening => 22,
        }
    }

    /// Look a category up by its lowercase name (`"breakfast"`, ...).
    ///
    /// Matching is exact: the set is closed and names come from our own
    /// markup, so anything else is a caller defect.
    pub fn from_name(name: &str) -> Result<Self, ResolveError> {
        name.parse()
            .map_err(|_| ResolveError::UnknownCategory(name.to_owned()))
    }

    pub fn all() -> &'static [MealCategory] {
        Self::VARIANTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_table() {
        assert_eq!(MealCategory::Breakfast.hour_offset(), 8);
        assert_eq!(MealCategory::Lunch.hour_offset(), 12);
        assert_eq!(MealCategory::Dinner.hour_offset(), 18);
        assert_eq!(MealCategory::Evening.hour_offset(), 22);
    }

    #[test]
    fn test_from_name_accepts_button_ids() {
        for category in MealCategory::all() {
            let parsed = MealCategory::from_name(&category.to_string()).unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        for name in ["brunch", "", "Breakfast", " lunch", "cancel"] {
            let err = MealCategory::from_name(name).unwrap_err();
            assert!(
                matches!(err, ResolveError::UnknownCategory(ref n) if n == name),
                "unexpected error for {name:?}: {err}"
            );
        }
    }

    #[test]
    fn test_display_matches_serde_name() {
        let json = serde_json::to_string(&MealCategory::Evening).unwrap();
        assert_eq!(json, "\"evening\"");
        assert_eq!(MealCategory::Evening.to_string(), "evening");
    }

    #[test]
    fn test_all_lists_four_categories_in_day_order() {
        let hours: Vec<u8> = MealCategory::all()
            .iter()
            .map(|c| c.hour_offset())
            .collect();
        assert_eq!(hours, vec![8, 12, 18, 22]);
    }
}
