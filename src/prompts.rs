mod request;
mod system;

pub use request::{RECIPE_REQUEST_PREFIX, recipe_request_prompt};
pub use system::SYSTEM_PROMPT;
