use async_trait::async_trait;
use recipe_forms::{
    Dialogs, FormError, ImageFile, ImageTarget, IngredientEdit, MultipartPayload, Notice, Prompt,
    RecipeEditForm, RecipeField, RecipeRecord, RecipeUpdater, Unit,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Dialogs that remember every notice and answer prompts with `reply`
struct RecordingDialogs {
    reply: bool,
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl RecordingDialogs {
    fn new(reply: bool) -> Arc<Self> {
        Arc::new(Self {
            reply,
            notices: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dialogs for RecordingDialogs {
    async fn confirm(&self, prompt: Prompt) -> bool {
        self.prompts.lock().unwrap().push(prompt);
        self.reply
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
struct RecordingUpdater {
    calls: Mutex<Vec<(Option<i64>, MultipartPayload)>>,
    cancelled: Mutex<bool>,
}

#[async_trait]
impl RecipeUpdater for RecordingUpdater {
    async fn update(&self, id: Option<i64>, payload: MultipartPayload) -> Result<(), FormError> {
        self.calls.lock().unwrap().push((id, payload));
        Ok(())
    }

    fn cancel(&self) {
        *self.cancelled.lock().unwrap() = true;
    }
}

fn valid_record() -> RecipeRecord {
    serde_json::from_value(json!({
        "id": 42,
        "title": "Pancakes",
        "cooking_time": "20",
        "category": "Breakfast",
        "difficulty": "easy",
        "servings": 4,
        "image_url": "https://img/pancakes.jpg",
        "ingredients": [
            {"name": "Flour", "amount": "200", "unit": "g"},
            {"name": "Milk", "amount": "300", "unit": "ml"},
            {"name": "Egg", "amount": 2, "unit": "piece"}
        ],
        "instructions": "[{\"description\": \"Mix\"}, {\"description\": \"Fry\", \"image_url\": \"https://img/fry.jpg\"}]"
    }))
    .unwrap()
}

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

#[tokio::test]
async fn test_submit_valid_form_assembles_payload() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs.clone());
    let updater = RecordingUpdater::default();

    form.attach_image(ImageTarget::Step(2), png("fry.png"))
        .await
        .unwrap();
    form.submit(&updater).await.unwrap();

    let calls = updater.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (id, payload) = &calls[0];
    assert_eq!(*id, Some(42));
    assert_eq!(
        payload.names(),
        vec![
            "title",
            "cooking_time",
            "category",
            "difficulty",
            "servings",
            "ingredients",
            "instructions",
            "step_images_1"
        ]
    );
    assert_eq!(payload.get_text("title"), Some("Pancakes"));
    assert_eq!(payload.get_text("servings"), Some("4"));

    let ingredients: Value = serde_json::from_str(payload.get_text("ingredients").unwrap()).unwrap();
    assert_eq!(
        ingredients,
        json!([
            {"name": "Flour", "amount": "200", "unit": "g"},
            {"name": "Milk", "amount": "300", "unit": "ml"},
            {"name": "Egg", "amount": "2", "unit": "piece"}
        ])
    );

    let steps: Value = serde_json::from_str(payload.get_text("instructions").unwrap()).unwrap();
    assert_eq!(
        steps,
        json!([
            {"description": "Mix", "hasImage": false},
            {"description": "Fry", "hasImage": true}
        ])
    );
    assert_eq!(payload.get_file("step_images_1").unwrap().name, "fry.png");
    assert!(dialogs.notices().is_empty());
}

#[tokio::test]
async fn test_blank_title_blocks_submission() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs.clone());
    let updater = RecordingUpdater::default();

    form.change(RecipeField::Title, "");
    let result = form.submit(&updater).await;

    assert!(matches!(result, Err(FormError::Invalid)));
    assert!(updater.calls.lock().unwrap().is_empty());
    assert_eq!(dialogs.notices(), vec![Notice::ValidationFailed]);

    assert_eq!(
        form.field(RecipeField::Title).error(),
        "Recipe title is required"
    );
    for field in [
        RecipeField::CookingTime,
        RecipeField::Category,
        RecipeField::Servings,
    ] {
        assert_eq!(form.field(field).error(), "");
        assert!(form.field(field).is_touched());
    }
    assert!(form.has_errors());
}

#[tokio::test]
async fn test_invalid_rows_block_submission() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs.clone());
    let updater = RecordingUpdater::default();

    let id = form.add_ingredient();
    form.add_step();
    let result = form.submit(&updater).await;

    assert!(matches!(result, Err(FormError::Invalid)));
    let errors = form.ingredients().error(id).unwrap();
    assert_eq!(errors.name, "Ingredient name is required");
    assert_eq!(errors.amount, "Enter a valid amount");
    assert_eq!(
        form.steps().errors().last().unwrap(),
        "Step description is required"
    );

    form.change_ingredient(id, IngredientEdit::Name("Sugar".to_string()))
        .unwrap();
    form.change_ingredient(id, IngredientEdit::Amount("1".to_string()))
        .unwrap();
    form.change_ingredient(id, IngredientEdit::Unit(Unit::Tablespoon))
        .unwrap();
    form.change_step(3, "Serve").unwrap();
    form.submit(&updater).await.unwrap();
    assert_eq!(updater.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_image_file_is_rejected() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs.clone());
    let before = form.main_image().clone();

    let pdf = ImageFile::new("recipe.pdf", "application/pdf", b"%PDF".to_vec());
    let result = form.attach_image(ImageTarget::Main, pdf).await;

    assert!(matches!(result, Err(FormError::NotAnImage(_))));
    assert_eq!(form.main_image(), &before);
    assert_eq!(form.main_image().preview, "https://img/pancakes.jpg");
    assert_eq!(dialogs.notices(), vec![Notice::NotAnImage]);
}

#[tokio::test]
async fn test_new_main_image_replaces_preview_and_is_sent() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs);
    let updater = RecordingUpdater::default();

    form.attach_image(ImageTarget::Main, png("new.png"))
        .await
        .unwrap();
    assert!(form
        .main_image()
        .preview
        .starts_with("data:image/png;base64,"));

    form.submit(&updater).await.unwrap();
    let calls = updater.calls.lock().unwrap();
    let payload = &calls[0].1;
    assert_eq!(payload.get_file("main_image").unwrap().name, "new.png");
    assert!(payload.get("remove_main_image").is_none());
}

#[tokio::test]
async fn test_cleared_main_image_sends_removal_flag() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs);
    let updater = RecordingUpdater::default();

    form.remove_image(ImageTarget::Main);
    form.submit(&updater).await.unwrap();

    let calls = updater.calls.lock().unwrap();
    let payload = &calls[0].1;
    assert_eq!(payload.get_text("remove_main_image"), Some("true"));
    assert!(payload.get("main_image").is_none());
}

#[tokio::test]
async fn test_step_image_remove_keeps_step() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs);

    assert_eq!(form.steps().get(2).unwrap().image_preview, "https://img/fry.jpg");
    form.remove_image(ImageTarget::Step(2));

    let step = form.steps().get(2).unwrap();
    assert_eq!(step.description, "Fry");
    assert!(step.image.is_none());
    assert!(step.image_preview.is_empty());
    assert_eq!(form.steps().len(), 2);
}

#[tokio::test]
async fn test_removing_last_ingredient_is_refused() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&RecipeRecord::default(), dialogs.clone());

    let result = form.remove_ingredient(1);
    assert!(matches!(result, Err(FormError::LastEntry(_))));
    assert_eq!(form.ingredients().len(), 1);
    assert_eq!(dialogs.notices(), vec![Notice::LastIngredient]);
}

#[tokio::test]
async fn test_ingredient_removal_needs_no_confirmation() {
    let dialogs = RecordingDialogs::new(false);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs.clone());

    let removed = form.remove_ingredient(2).unwrap();
    assert_eq!(removed.name, "Milk");
    assert_eq!(form.ingredients().len(), 2);
    assert_eq!(form.ingredients().errors().len(), 2);
    assert!(dialogs.prompts().is_empty());
}

#[tokio::test]
async fn test_removing_last_step_is_refused_without_prompt() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&RecipeRecord::default(), dialogs.clone());

    let result = form.remove_step(1).await;
    assert!(matches!(result, Err(FormError::LastEntry(_))));
    assert_eq!(form.steps().len(), 1);
    assert_eq!(dialogs.notices(), vec![Notice::LastStep]);
    assert!(dialogs.prompts().is_empty());
}

#[tokio::test]
async fn test_step_removal_requires_confirmation() {
    let declining = RecordingDialogs::new(false);
    let mut form = RecipeEditForm::new(&valid_record(), declining.clone());

    let result = form.remove_step(1).await;
    assert!(matches!(result, Err(FormError::Cancelled)));
    assert_eq!(form.steps().len(), 2);
    assert_eq!(declining.prompts(), vec![Prompt::RemoveStep]);

    let confirming = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), confirming.clone());
    let removed = form.remove_step(1).await.unwrap();
    assert_eq!(removed.description, "Mix");
    assert_eq!(form.steps().len(), 1);
    assert_eq!(form.steps().entries()[0].id, 2);
}

#[tokio::test]
async fn test_added_ids_exceed_existing_ids() {
    let dialogs = RecordingDialogs::new(true);
    let mut form = RecipeEditForm::new(&valid_record(), dialogs);

    let id = form.add_ingredient();
    assert!(form
        .ingredients()
        .entries()
        .iter()
        .filter(|entry| entry.id != id)
        .all(|entry| entry.id < id));

    form.remove_ingredient(1).unwrap();
    let next = form.add_ingredient();
    assert!(next > id);

    let step = form.add_step();
    assert_eq!(step, 3);
}

#[test]
fn test_cancel_notifies_updater() {
    let dialogs = RecordingDialogs::new(true);
    let form = RecipeEditForm::new(&valid_record(), dialogs);
    let updater = RecordingUpdater::default();

    form.cancel(&updater);
    assert!(*updater.cancelled.lock().unwrap());
    assert!(updater.calls.lock().unwrap().is_empty());
}
