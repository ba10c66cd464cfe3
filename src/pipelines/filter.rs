use log::debug;

use crate::model::{Preference, TaggedRecipe};

/// Keep the recipes whose diet equals the preference, in input order.
///
/// Matching is trimmed and case-insensitive against either the diet's
/// variant name or its label, so "Non-Vegetarian" and "nonvegetarian" both
/// select `Diet::NonVegetarian`.
pub fn filter_by_preference(
    recipes: Vec<TaggedRecipe>,
    preference: &Preference,
) -> Vec<TaggedRecipe> {
    debug!("Filtering by preference '{}'", preference.dietary_preference);
    recipes
        .into_iter()
        .filter(|tagged| {
            let keep = tagged.diet.matches(&preference.dietary_preference);
            debug!(
                "Checking recipe: {} - Diet: {} - keep: {}",
                tagged.recipe.name, tagged.diet, keep
            );
            keep
        })
        .collect()
}
