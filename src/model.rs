use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::ImageFile;

/// Measurement unit of an ingredient amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Millilitre,
        Unit::Litre,
        Unit::Piece,
        Unit::Teaspoon,
        Unit::Tablespoon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Piece => "piece",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
        }
    }

    /// Parse a unit code or one of the labels stored by the legacy backend
    /// (`г`, `шт.`, `ст.л.` ...). Returns `None` for anything else.
    pub fn parse(label: &str) -> Option<Unit> {
        let normalized = label.trim().trim_end_matches('.').to_lowercase();
        let unit = match normalized.as_str() {
            "g" | "г" => Unit::Gram,
            "kg" | "кг" => Unit::Kilogram,
            "ml" | "мл" => Unit::Millilitre,
            "l" | "л" => Unit::Litre,
            "piece" | "pcs" | "шт" => Unit::Piece,
            "tsp" | "ч.л" | "ч. л" => Unit::Teaspoon,
            "tbsp" | "ст.л" | "ст. л" => Unit::Tablespoon,
            _ => return None,
        };
        Some(unit)
    }
}

/// Recipe difficulty as offered by the edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(label: &str) -> Option<Difficulty> {
        match label.trim().to_lowercase().as_str() {
            "easy" | "легкий" | "лёгкий" => Some(Difficulty::Easy),
            "medium" | "средний" => Some(Difficulty::Medium),
            "hard" | "сложный" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Recipe as supplied by the parent container.
///
/// Records come from several backend versions, so scalars may be strings or
/// numbers and the list fields may be JSON text, arrays, or plain text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub servings: Option<Value>,
    #[serde(default)]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Value>,
    #[serde(default)]
    pub instructions: Option<Value>,
}

impl RecipeRecord {
    /// The image the recipe already has, preferring `main_image_url`
    pub fn existing_image(&self) -> Option<&str> {
        [&self.main_image_url, &self.image_url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }
}

/// One row of the ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientEntry {
    pub id: u32,
    pub name: String,
    pub amount: String,
    pub unit: Unit,
}

impl IngredientEntry {
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// One preparation step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepEntry {
    pub id: u32,
    pub description: String,
    pub image: Option<ImageFile>,
    /// Data URI of `image`, or the URL of an image the step already had
    pub image_preview: String,
}

impl StepEntry {
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// Per-field errors of an ingredient row (empty = valid)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientErrors {
    pub name: String,
    pub amount: String,
}

impl IngredientErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.amount.is_empty()
    }
}

/// Ingredient row as serialized into the submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientPayload {
    pub name: String,
    pub amount: String,
    pub unit: Unit,
}

impl From<&IngredientEntry> for IngredientPayload {
    fn from(entry: &IngredientEntry) -> Self {
        IngredientPayload {
            name: entry.name.clone(),
            amount: entry.amount.clone(),
            unit: entry.unit,
        }
    }
}

/// Step row as serialized into the submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPayload {
    pub description: String,
    #[serde(rename = "hasImage")]
    pub has_image: bool,
}

impl From<&StepEntry> for StepPayload {
    fn from(step: &StepEntry) -> Self {
        StepPayload {
            description: step.description.clone(),
            has_image: step.image.is_some(),
        }
    }
}

/// Record emitted by a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationData {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}
