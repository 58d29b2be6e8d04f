use indoc::formatdoc;

/// Leading instruction the collector puts in front of the ingredient list.
pub const RECIPE_REQUEST_PREFIX: &str = "You are an assistant that receives a list of \
ingredients that a user has and suggests a recipe.";

pub fn recipe_request_prompt(ingredients: &str) -> String {
    formatdoc! {"
        {RECIPE_REQUEST_PREFIX}
        User ingredients: {ingredients}"
    }
}
