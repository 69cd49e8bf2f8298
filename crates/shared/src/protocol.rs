use serde::{Deserialize, Serialize};

/// Successful body of the meal image endpoint, e.g.
/// `{"image": "https://foodish-api.com/images/pizza/pizza42.jpg"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSuggestion {
    pub image: String,
}
