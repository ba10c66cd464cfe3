use log::{debug, info};
use std::io::ErrorKind;
use std::path::Path;

use crate::model::{DisplayRecipe, Preference};
use crate::RecommendError;

/// Write the display records of a run as a pretty JSON array.
///
/// An empty slice still produces `[]`, so the file always reflects the
/// latest run.
pub async fn save_recipes(
    path: impl AsRef<Path>,
    recipes: &[DisplayRecipe],
) -> Result<(), RecommendError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(recipes)?;
    tokio::fs::write(path, content).await?;
    info!("Saved {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

/// Read back a list written by [`save_recipes`]
pub async fn load_recipes(path: impl AsRef<Path>) -> Result<Vec<DisplayRecipe>, RecommendError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn save_preference(
    path: impl AsRef<Path>,
    preference: &Preference,
) -> Result<(), RecommendError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(preference)?;
    tokio::fs::write(path, content).await?;
    info!("Preferences saved to {}", path.display());
    Ok(())
}

/// The last saved preference, or `None` when nothing was saved yet
pub async fn load_preference(
    path: impl AsRef<Path>,
) -> Result<Option<Preference>, RecommendError> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No saved preference at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Diet, Nutrient};

    fn congee() -> DisplayRecipe {
        DisplayRecipe {
            title: "Chicken Congee".to_string(),
            image: "x.jpg".to_string(),
            id: "52940".to_string(),
            diet: Diet::NonVegetarian,
            calories: Nutrient::Value(500),
            protein: Nutrient::Value(35),
            carbs: Nutrient::Value(50),
            fat: Nutrient::NotAvailable,
        }
    }

    #[tokio::test]
    async fn test_recipes_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        save_recipes(&path, &[congee()]).await.unwrap();
        let loaded = load_recipes(&path).await.unwrap();
        assert_eq!(loaded, vec![congee()]);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"fat\": \"N/A\""));
    }

    #[tokio::test]
    async fn test_empty_recipes_written_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        save_recipes(&path, &[]).await.unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_preference_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_preference(dir.path().join("preferences.json"))
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_preference_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        save_preference(&path, &Preference::new("Vegan")).await.unwrap();
        let loaded = load_preference(&path).await.unwrap();
        assert_eq!(loaded, Some(Preference::new("Vegan")));
    }

    #[tokio::test]
    async fn test_preference_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "[]").unwrap();

        let result = load_preference(&path).await;
        assert!(matches!(result, Err(RecommendError::SerializationError(_))));
    }
}
