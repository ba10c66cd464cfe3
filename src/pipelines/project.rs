use log::debug;
use std::collections::HashSet;

use crate::model::{DisplayRecipe, TaggedRecipe};

/// Drop repeated recipe ids and project the rest to the display shape.
///
/// The first occurrence of an id wins and the order of first appearance is
/// kept. Nutrition fields the catalog did not know stay "not available".
pub fn project(recipes: &[TaggedRecipe]) -> Vec<DisplayRecipe> {
    let mut seen = HashSet::new();
    let details: Vec<DisplayRecipe> = recipes
        .iter()
        .filter(|tagged| seen.insert(tagged.recipe.id.as_str()))
        .map(|tagged| DisplayRecipe {
            title: tagged.recipe.name.clone(),
            image: tagged.recipe.image_url.clone(),
            id: tagged.recipe.id.clone(),
            diet: tagged.diet,
            calories: tagged.nutrition.calories,
            protein: tagged.nutrition.protein,
            carbs: tagged.nutrition.carbs,
            fat: tagged.nutrition.fat,
        })
        .collect();

    debug!(
        "Projected {} unique recipes from {}",
        details.len(),
        recipes.len()
    );
    details
}
