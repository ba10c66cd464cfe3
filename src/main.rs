use clap::Parser;
use log::{debug, error};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use recipe_recommender::{
    parse_ingredients, storage, AppConfig, GuideGenerator, Preference, RecipeRecommender,
    Recommendation,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recommend TheMealDB recipes by ingredient and dietary preference",
    long_about = None
)]
struct Cli {
    /// Comma-separated ingredients; asked for interactively when omitted
    #[arg(short, long)]
    ingredients: Option<String>,

    /// Dietary preference (Vegetarian, Non-Vegetarian, Vegan); asked for when omitted
    #[arg(short, long)]
    diet: Option<String>,

    /// Title of the recipe to generate a cooking guide for
    #[arg(short, long)]
    recipe: Option<String>,

    /// Path to a TOML configuration file (defaults to ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use this LLM provider for the guide instead of the configured chain
    /// (openai, groq, anthropic or ollama)
    #[arg(long)]
    provider: Option<String>,

    /// Always ask TheMealDB, ignoring the ingredient cache
    #[arg(long)]
    no_cache: bool,

    /// Do not write recipes.json and preferences.json
    #[arg(long)]
    no_save: bool,

    /// Stop after listing recipes
    #[arg(long)]
    no_guide: bool,
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_preference(last: Option<Preference>) -> io::Result<String> {
    let message = match &last {
        Some(last) => format!(
            "Enter your dietary preference (e.g., Vegetarian, Non-Vegetarian, Vegan) [{}]: ",
            last.dietary_preference
        ),
        None => {
            "Enter your dietary preference (e.g., Vegetarian, Non-Vegetarian, Vegan): ".to_string()
        }
    };

    let answer = prompt(&message)?;
    match last {
        Some(last) if answer.is_empty() => Ok(last.dietary_preference),
        _ => Ok(answer),
    }
}

fn print_recipes(recommendation: &Recommendation) {
    println!(
        "Filtered Recipes ({} of {} fetched):",
        recommendation.recipes.len(),
        recommendation.fetched
    );
    for recipe in &recommendation.recipes {
        println!();
        println!("{}", recipe.title);
        println!("  Image:    {}", recipe.image);
        println!("  Diet:     {}", recipe.diet.label());
        println!("  Calories: {}", recipe.calories);
        println!("  Protein:  {}", recipe.protein);
        println!("  Carbs:    {}", recipe.carbs);
        println!("  Fat:      {}", recipe.fat);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let preference = match cli.diet {
        Some(diet) => diet,
        None => {
            let last = storage::load_preference(&config.storage.preferences_file)
                .await
                .unwrap_or_else(|e| {
                    debug!("Ignoring saved preference: {}", e);
                    None
                });
            prompt_preference(last)?
        }
    };

    let ingredients = match cli.ingredients {
        Some(ingredients) => ingredients,
        None => prompt("Please enter the ingredients (comma-separated): ")?,
    };

    let mut builder = RecipeRecommender::builder()
        .ingredients(parse_ingredients(&ingredients))
        .preference(preference)
        .config(config.clone());
    if cli.no_cache {
        builder = builder.cache(false);
    }
    if cli.no_save {
        builder = builder.skip_persist();
    }

    let recommendation = builder.build().await?;
    if recommendation.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }
    print_recipes(&recommendation);

    if cli.no_guide {
        return Ok(());
    }

    let title = match cli.recipe {
        Some(title) => title,
        None => prompt("Please enter the title of the recipe you want details for: ")?,
    };
    if title.trim().is_empty() {
        return Ok(());
    }

    let Some(recipe) = recommendation.find(title.trim()) else {
        println!("Sorry, the recipe you selected was not found.");
        return Ok(());
    };

    let generator = match &cli.provider {
        Some(name) => GuideGenerator::with_provider_name(&config.guide, name),
        None => GuideGenerator::from_config(&config.guide),
    };
    match generator {
        Ok(generator) => {
            let guide = generator.generate(recipe).await;
            println!("Detailed Guide for {}:\n{}", recipe.title, guide);
        }
        Err(e) => {
            error!("Could not set up guide provider: {}", e);
            println!("Error generating detailed guide: {}", e);
        }
    }

    Ok(())
}
