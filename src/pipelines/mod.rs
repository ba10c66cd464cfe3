pub mod filter;
pub mod project;
pub mod tag;

pub use filter::filter_by_preference;
pub use project::project;
pub use tag::Tagger;

use log::info;

use crate::catalog::Catalog;
use crate::model::{DisplayRecipe, Preference, RawRecipe};

/// Tag → filter → deduplicate, over one batch of raw recipes.
///
/// The pipeline is synchronous and does no I/O; fetching and persistence
/// happen around it.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    tagger: Tagger,
}

impl Pipeline {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            tagger: Tagger::new(catalog),
        }
    }

    pub fn tagger(&self) -> &Tagger {
        &self.tagger
    }

    pub fn run(&self, recipes: Vec<RawRecipe>, preference: &Preference) -> Vec<DisplayRecipe> {
        let fetched = recipes.len();
        let tagged = self.tagger.tag(recipes);
        let filtered = filter_by_preference(tagged, preference);
        let details = project(&filtered);
        info!(
            "{} of {} recipes match '{}'",
            details.len(),
            fetched,
            preference.dietary_preference
        );
        details
    }
}

/// Case-insensitive exact title lookup. `None` means the title is not in
/// the list.
pub fn find_by_title<'a>(recipes: &'a [DisplayRecipe], title: &str) -> Option<&'a DisplayRecipe> {
    let wanted = title.to_lowercase();
    recipes
        .iter()
        .find(|recipe| recipe.title.to_lowercase() == wanted)
}
