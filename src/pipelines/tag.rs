use log::debug;

use crate::catalog::Catalog;
use crate::model::{RawRecipe, TaggedRecipe};

/// Attaches a diet category and nutrition facts to raw recipes.
#[derive(Debug, Clone, Default)]
pub struct Tagger {
    catalog: Catalog,
}

impl Tagger {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tag every recipe. Never fails: unmatched names become `Diet::Unknown`
    /// and unknown ids get "not available" nutrition.
    pub fn tag(&self, recipes: Vec<RawRecipe>) -> Vec<TaggedRecipe> {
        recipes
            .into_iter()
            .map(|recipe| {
                let diet = self.catalog.classify(&recipe.name);
                let nutrition = self.catalog.nutrition_for(&recipe.id);
                debug!("Tagged '{}' ({}) as {}", recipe.name, recipe.id, diet);
                TaggedRecipe {
                    recipe,
                    diet,
                    nutrition,
                }
            })
            .collect()
    }
}
