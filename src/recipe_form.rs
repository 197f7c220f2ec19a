use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::config::DefaultsConfig;
use crate::dialogs::{Dialogs, Notice, Prompt};
use crate::field::FormField;
use crate::image::{self, DecodedImage, ImageFile, ImageSlot};
use crate::list::EntryList;
use crate::model::{
    Difficulty, IngredientEntry, IngredientPayload, RecipeRecord, StepEntry, StepPayload, Unit,
};
use crate::normalize::{parse_ingredients, parse_instructions, truthy_text};
use crate::payload::MultipartPayload;
use crate::validation::{
    normalize_integer_input, validate_category, validate_cooking_time, validate_servings,
    validate_title,
};
use crate::FormError;

/// Receives the assembled payload of the edit form
#[async_trait]
pub trait RecipeUpdater: Send + Sync {
    async fn update(&self, id: Option<i64>, payload: MultipartPayload) -> Result<(), FormError>;

    /// The user closed the form without saving
    fn cancel(&self) {}
}

/// Scalar inputs of the edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    Title,
    CookingTime,
    Category,
    Servings,
}

/// A change to one field of an ingredient row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientEdit {
    Name(String),
    Amount(String),
    Unit(Unit),
}

/// Validated fields of an ingredient row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Amount,
}

/// Where a chosen image goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Main,
    Step(u32),
}

/// State of the recipe edit form.
///
/// Built once from a [`RecipeRecord`], then driven by input events (`change`,
/// `blur`, clicks, file selection) until it is submitted or cancelled.
///
/// ```
/// use std::sync::Arc;
/// use recipe_forms::{LogDialogs, RecipeEditForm, RecipeField, RecipeRecord};
///
/// let record: RecipeRecord = serde_json::from_str(
///     r#"{"id": 1, "title": "Pancakes", "ingredients": "Flour\nMilk"}"#,
/// ).unwrap();
/// let mut form = RecipeEditForm::new(&record, Arc::new(LogDialogs::default()));
///
/// form.change(RecipeField::CookingTime, "20");
/// assert_eq!(form.ingredients().len(), 2);
/// ```
pub struct RecipeEditForm {
    recipe_id: Option<i64>,
    original_image: Option<String>,
    default_servings: u32,
    title: FormField,
    cooking_time: FormField,
    category: FormField,
    servings: FormField,
    difficulty: Difficulty,
    main_image: ImageSlot,
    ingredients: EntryList<IngredientEntry>,
    steps: EntryList<StepEntry>,
    dialogs: Arc<dyn Dialogs>,
}

impl RecipeEditForm {
    pub fn new(recipe: &RecipeRecord, dialogs: Arc<dyn Dialogs>) -> Self {
        Self::with_defaults(recipe, dialogs, &DefaultsConfig::default())
    }

    pub fn with_defaults(
        recipe: &RecipeRecord,
        dialogs: Arc<dyn Dialogs>,
        defaults: &DefaultsConfig,
    ) -> Self {
        let servings = recipe
            .servings
            .as_ref()
            .map(truthy_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| defaults.servings.to_string());
        let cooking_time = recipe
            .cooking_time
            .as_ref()
            .map(truthy_text)
            .unwrap_or_default();
        let difficulty = recipe
            .difficulty
            .as_deref()
            .and_then(Difficulty::parse)
            .unwrap_or_default();
        let original_image = recipe.existing_image().map(str::to_string);

        let ingredients = parse_ingredients(recipe.ingredients.as_ref());
        let steps = parse_instructions(recipe.instructions.as_ref());
        debug!(
            "Editing recipe {:?}: {} ingredients, {} steps",
            recipe.id,
            ingredients.len(),
            steps.len()
        );

        Self {
            recipe_id: recipe.id,
            main_image: ImageSlot::with_preview(original_image.clone().unwrap_or_default()),
            original_image,
            default_servings: defaults.servings,
            title: FormField::new(
                "title",
                recipe.title.clone().unwrap_or_default(),
                validate_title,
            ),
            cooking_time: FormField::new("cooking_time", cooking_time, validate_cooking_time),
            category: FormField::new(
                "category",
                recipe.category.clone().unwrap_or_default(),
                validate_category,
            ),
            servings: FormField::new("servings", servings, validate_servings),
            difficulty,
            ingredients: EntryList::new(ingredients),
            steps: EntryList::new(steps),
            dialogs,
        }
    }

    pub fn recipe_id(&self) -> Option<i64> {
        self.recipe_id
    }

    pub fn field(&self, field: RecipeField) -> &FormField {
        match field {
            RecipeField::Title => &self.title,
            RecipeField::CookingTime => &self.cooking_time,
            RecipeField::Category => &self.category,
            RecipeField::Servings => &self.servings,
        }
    }

    fn field_mut(&mut self, field: RecipeField) -> &mut FormField {
        match field {
            RecipeField::Title => &mut self.title,
            RecipeField::CookingTime => &mut self.cooking_time,
            RecipeField::Category => &mut self.category,
            RecipeField::Servings => &mut self.servings,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn main_image(&self) -> &ImageSlot {
        &self.main_image
    }

    pub fn ingredients(&self) -> &EntryList<IngredientEntry> {
        &self.ingredients
    }

    pub fn steps(&self) -> &EntryList<StepEntry> {
        &self.steps
    }

    /// Input value changed. Servings is an integer input and keeps only the
    /// integer prefix of what was typed.
    pub fn change(&mut self, field: RecipeField, value: &str) {
        let value = match field {
            RecipeField::Servings => normalize_integer_input(value),
            _ => value.to_string(),
        };
        self.field_mut(field).change(value);
    }

    pub fn blur(&mut self, field: RecipeField) {
        self.field_mut(field).blur();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn add_ingredient(&mut self) -> u32 {
        self.ingredients.add()
    }

    pub fn change_ingredient(&mut self, id: u32, edit: IngredientEdit) -> Result<(), FormError> {
        self.ingredients.update(id, |entry| match edit {
            IngredientEdit::Name(name) => entry.name = name,
            IngredientEdit::Amount(amount) => entry.amount = amount,
            IngredientEdit::Unit(unit) => entry.unit = unit,
        })
    }

    /// Re-check only the blurred field of the row
    pub fn blur_ingredient(&mut self, id: u32, field: IngredientField) -> Result<(), FormError> {
        self.ingredients
            .revalidate_with(id, |fresh, stored| match field {
                IngredientField::Name => stored.name = fresh.name,
                IngredientField::Amount => stored.amount = fresh.amount,
            })
    }

    pub fn remove_ingredient(&mut self, id: u32) -> Result<IngredientEntry, FormError> {
        self.ingredients.remove(id).inspect_err(|e| {
            if matches!(e, FormError::LastEntry(_)) {
                warn!("Refusing to remove the last ingredient");
                self.dialogs.notify(Notice::LastIngredient);
            }
        })
    }

    pub fn add_step(&mut self) -> u32 {
        self.steps.add()
    }

    pub fn change_step(&mut self, id: u32, description: &str) -> Result<(), FormError> {
        self.steps
            .update(id, |step| step.description = description.to_string())
    }

    pub fn blur_step(&mut self, id: u32) -> Result<(), FormError> {
        self.steps
            .revalidate_with(id, |fresh, stored| *stored = fresh)
    }

    /// Remove a step after the user confirms. The last step is never removed.
    pub async fn remove_step(&mut self, id: u32) -> Result<StepEntry, FormError> {
        if let Err(e) = self.steps.check_removable(id) {
            if matches!(e, FormError::LastEntry(_)) {
                warn!("Refusing to remove the last step");
                self.dialogs.notify(Notice::LastStep);
            }
            return Err(e);
        }

        if !self.dialogs.confirm(Prompt::RemoveStep).await {
            debug!("Removal of step {} declined", id);
            return Err(FormError::Cancelled);
        }

        self.steps.remove(id)
    }

    /// Check the file type, decode the preview and store both.
    ///
    /// A non-image file raises a notice and leaves the form untouched.
    pub async fn attach_image(
        &mut self,
        target: ImageTarget,
        file: ImageFile,
    ) -> Result<(), FormError> {
        if !file.is_image() {
            warn!(
                "Rejected {} with content type '{}'",
                file.name, file.content_type
            );
            self.dialogs.notify(Notice::NotAnImage);
            return Err(FormError::NotAnImage(file.name));
        }

        let decoded = image::decode(file).await?;
        self.apply_image(target, decoded);
        Ok(())
    }

    /// Commit a decoded image, replacing whatever the target showed.
    ///
    /// Use with [`image::decode`] when decodes run concurrently: results
    /// applied later win. A step removed in the meantime is ignored.
    pub fn apply_image(&mut self, target: ImageTarget, image: DecodedImage) {
        match target {
            ImageTarget::Main => self.main_image.set(image),
            ImageTarget::Step(id) => match self.steps.get_mut(id) {
                Some(step) => {
                    step.image = Some(image.file);
                    step.image_preview = image.preview;
                }
                None => debug!("Step {} is gone, dropping its image", id),
            },
        }
    }

    /// Clear the chosen file and preview, keeping the owning step
    pub fn remove_image(&mut self, target: ImageTarget) {
        match target {
            ImageTarget::Main => self.main_image.clear(),
            ImageTarget::Step(id) => {
                if let Some(step) = self.steps.get_mut(id) {
                    step.image = None;
                    step.image_preview.clear();
                }
            }
        }
    }

    /// Validate every field and row and mark all fields touched.
    /// Returns true when everything is valid.
    pub fn validate_all(&mut self) -> bool {
        let results = [
            self.title.validate_now(),
            self.category.validate_now(),
            self.cooking_time.validate_now(),
            self.servings.validate_now(),
            self.ingredients.validate_all(),
            self.steps.validate_all(),
        ];
        results.iter().all(|valid| *valid)
    }

    /// Whether any error is currently shown
    pub fn has_errors(&self) -> bool {
        [&self.title, &self.category, &self.cooking_time, &self.servings]
            .iter()
            .any(|field| !field.error().is_empty())
            || self.ingredients.has_errors()
            || self.steps.has_errors()
    }

    /// Current errors as `<field>: <message>` lines, fields first, then
    /// ingredient and step rows by id
    pub fn error_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for field in [&self.title, &self.cooking_time, &self.category, &self.servings] {
            if !field.error().is_empty() {
                messages.push(format!("{}: {}", field.name(), field.error()));
            }
        }
        for (entry, errors) in self.ingredients.entries().iter().zip(self.ingredients.errors()) {
            for message in [&errors.name, &errors.amount] {
                if !message.is_empty() {
                    messages.push(format!("ingredient {}: {}", entry.id, message));
                }
            }
        }
        for (step, message) in self.steps.entries().iter().zip(self.steps.errors()) {
            if !message.is_empty() {
                messages.push(format!("step {}: {}", step.id, message));
            }
        }
        messages
    }

    /// Whether the recipe had an image that the user cleared without
    /// choosing another
    pub fn main_image_removed(&self) -> bool {
        self.original_image.is_some()
            && self.main_image.file.is_none()
            && self.main_image.preview.is_empty()
    }

    /// Assemble the multipart body for the current state
    pub fn build_payload(&self) -> Result<MultipartPayload, FormError> {
        let mut payload = MultipartPayload::new();
        payload
            .text("title", self.title.value())
            .text("cooking_time", or_default(self.cooking_time.value(), "0"))
            .text("category", self.category.value())
            .text("difficulty", self.difficulty.as_str())
            .text(
                "servings",
                or_default(self.servings.value(), &self.default_servings.to_string()),
            );

        if let Some(file) = &self.main_image.file {
            payload.file("main_image", file.clone());
        } else if self.main_image_removed() {
            payload.text("remove_main_image", "true");
        }

        let ingredients: Vec<IngredientPayload> = self
            .ingredients
            .entries()
            .iter()
            .map(IngredientPayload::from)
            .collect();
        payload.text("ingredients", serde_json::to_string(&ingredients)?);

        let steps: Vec<StepPayload> = self.steps.entries().iter().map(StepPayload::from).collect();
        payload.text("instructions", serde_json::to_string(&steps)?);

        for (index, step) in self.steps.entries().iter().enumerate() {
            if let Some(file) = &step.image {
                payload.file(format!("step_images_{}", index), file.clone());
            }
        }

        Ok(payload)
    }

    /// Validate and hand the payload to `updater`.
    ///
    /// On validation failure a summary notice is shown, the per-field errors
    /// stay in place and nothing is sent.
    pub async fn submit(&mut self, updater: &dyn RecipeUpdater) -> Result<(), FormError> {
        if !self.validate_all() {
            warn!("Recipe form has validation errors, not submitting");
            self.dialogs.notify(Notice::ValidationFailed);
            return Err(FormError::Invalid);
        }

        let payload = self.build_payload()?;
        info!(
            "Submitting recipe {:?} with parts: {:?}",
            self.recipe_id,
            payload.names()
        );
        updater.update(self.recipe_id, payload).await
    }

    /// Discard the form
    pub fn cancel(self, updater: &dyn RecipeUpdater) {
        debug!("Edit of recipe {:?} cancelled", self.recipe_id);
        updater.cancel();
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
