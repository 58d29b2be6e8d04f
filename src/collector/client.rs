use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::IngredientList;

pub const GENERATION_FAILED_MESSAGE: &str = "An error occurred while generating the recipe.";
pub const NO_RECIPE_MESSAGE: &str = "No recipe generated.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No ingredients to ask about")]
    NoIngredients,

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Error generating recipe: {status} {message}")]
    Relay { status: StatusCode, message: Box<str> },
}

/// Talks to a relay endpoint such as `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: reqwest::Client,
    endpoint: Box<str>,
}

impl RecipeClient {
    pub fn new(endpoint: impl Into<Box<str>>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// `Ok(None)` when the relay answered but without any text.
    pub async fn try_fetch_recipe(
        &self,
        ingredients: &IngredientList,
    ) -> Result<Option<Box<str>>, ClientError> {
        let request = ingredients.to_request().ok_or(ClientError::NoIngredients)?;
        let response = self
            .client
            .post(self.endpoint.as_ref())
            .json(&request)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(status.canonical_reason().unwrap_or_default())
                .into();
            return Err(ClientError::Relay { status, message });
        }

        let body = response.json::<Value>().await?;
        Ok(body
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(Into::into))
    }

    /// Never fails: whatever goes wrong is logged and replaced with a message fit
    /// for display. `None` only when the list is empty and nothing was sent.
    pub async fn fetch_recipe(&self, ingredients: &IngredientList) -> Option<Box<str>> {
        match self.try_fetch_recipe(ingredients).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => Some(NO_RECIPE_MESSAGE.into()),
            Err(ClientError::NoIngredients) => None,
            Err(error) => {
                tracing::error!("{error}");
                Some(GENERATION_FAILED_MESSAGE.into())
            }
        }
    }
}
