use crate::{prompts::recipe_request_prompt, relay::RecipeRequest};

#[cfg(feature = "client-http2")]
mod client;
#[cfg(feature = "client-http2")]
pub use client::{ClientError, GENERATION_FAILED_MESSAGE, NO_RECIPE_MESSAGE, RecipeClient};

/// Offer a recipe once the list is longer than this.
pub const READY_THRESHOLD: usize = 3;

/// Ingredients in entry order, duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<Box<str>>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed ingredient. Blank input is ignored and reported as `false`.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return false;
        }
        self.items.push(ingredient.into());
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(AsRef::as_ref)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn ready_for_recipe(&self) -> bool {
        self.items.len() > READY_THRESHOLD
    }

    pub fn joined(&self) -> String {
        self.items.join(", ")
    }

    /// `None` when there is nothing to ask about.
    pub fn to_request(&self) -> Option<RecipeRequest> {
        if self.is_empty() {
            return None;
        }
        Some(RecipeRequest {
            prompt: recipe_request_prompt(&self.joined()).into(),
        })
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for ingredient in iter {
            list.add(ingredient.as_ref());
        }
        list
    }
}
