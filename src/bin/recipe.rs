use clap::Parser;
use recipe_relay::collector::{IngredientList, READY_THRESHOLD, RecipeClient};

/// Ask the recipe relay what to cook with what you have.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Ingredients on hand, in any order
    #[arg(required = true)]
    ingredients: Vec<String>,

    /// Relay endpoint
    #[arg(long, env = "RECIPE_ENDPOINT", default_value = "http://localhost:3000/api")]
    endpoint: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let ingredients: IngredientList = args.ingredients.iter().collect();
    if ingredients.is_empty() {
        anyhow::bail!("No ingredients given");
    }
    if !ingredients.ready_for_recipe() {
        tracing::warn!(
            "Only {} ingredients, recipes work better with more than {READY_THRESHOLD}",
            ingredients.len()
        );
    }

    let client = RecipeClient::new(args.endpoint);
    if let Some(recipe) = client.fetch_recipe(&ingredients).await {
        println!("{recipe}");
    }
    Ok(())
}
