pub mod backend;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod field;
pub mod image;
pub mod list;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod recipe_form;
pub mod register_form;
pub mod validation;

pub use backend::{BackendClient, HttpRecipeUpdater, HttpRegistrationHandler};
pub use config::FormsConfig;
pub use dialogs::{Dialogs, LogDialogs, Notice, Prompt};
pub use error::FormError;
pub use field::FormField;
pub use image::{DecodedImage, ImageFile, ImageSlot};
pub use list::{Entry, EntryList};
pub use model::{
    Difficulty, IngredientEntry, IngredientErrors, RecipeRecord, RegistrationData, StepEntry, Unit,
};
pub use payload::{MultipartPayload, Part, PartValue};
pub use recipe_form::{
    ImageTarget, IngredientEdit, IngredientField, RecipeEditForm, RecipeField, RecipeUpdater,
};
pub use register_form::{RegisterField, RegisterForm, RegistrationHandler};
