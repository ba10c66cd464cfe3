use crate::model::DisplayRecipe;

/// System prompt for cooking guide requests.
///
/// Loaded from `prompt.txt` at compile time.
pub const GUIDE_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Build the user prompt asking for a step-by-step guide for one recipe.
pub fn build_guide_prompt(recipe: &DisplayRecipe) -> String {
    format!(
        "Provide a detailed, step-by-step cooking guide for the following recipe:\n\n\
         Title: {}\n\
         Diet: {}\n\
         Nutrition per serving: calories {}, protein {}, carbs {}, fat {}\n\n\
         The cooking guide must be plain text.",
        recipe.title,
        recipe.diet.label(),
        recipe.calories,
        recipe.protein,
        recipe.carbs,
        recipe.fat
    )
}
