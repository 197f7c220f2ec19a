use log::{error, info};
use std::env;
use std::path::Path;
use std::sync::Arc;

use recipe_forms::{
    BackendClient, FormError, FormsConfig, HttpRecipeUpdater, LogDialogs, RecipeEditForm,
    RecipeRecord,
};

const USAGE: &str = "Usage: recipe-forms <recipe.json> [--submit]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let path = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .ok_or(USAGE)?;
    let submit = args.iter().any(|arg| arg == "--submit");

    let config = FormsConfig::load()?;
    let text = tokio::fs::read_to_string(Path::new(path)).await?;
    let record: RecipeRecord = serde_json::from_str(&text)?;

    let mut form =
        RecipeEditForm::with_defaults(&record, Arc::new(LogDialogs::default()), &config.defaults);

    if !form.validate_all() {
        error!("Recipe in {} does not pass validation", path);
        for message in form.error_messages() {
            println!("{}", message);
        }
        return Err(FormError::Invalid.into());
    }

    if submit {
        let client = BackendClient::new(&config.backend)?;
        let client = match env::var("RECIPE_FORMS_SESSION") {
            Ok(session_id) => client.with_session(session_id),
            Err(_) => client,
        };
        info!("Submitting to {}", client.base_url());
        form.submit(&HttpRecipeUpdater::new(client)).await?;
        println!("Recipe {:?} updated", form.recipe_id());
    } else {
        let payload = form.build_payload()?;
        println!("{}", serde_json::to_string_pretty(&payload.summary())?);
    }

    Ok(())
}
