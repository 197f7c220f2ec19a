use async_trait::async_trait;
use log::{debug, info};

use crate::field::FormField;
use crate::model::RegistrationData;
use crate::validation::{
    validate_confirm_password, validate_email, validate_password, validate_username,
};
use crate::FormError;

/// Receives the record of a successful registration
#[async_trait]
pub trait RegistrationHandler: Send + Sync {
    async fn register(&self, data: RegistrationData) -> Result<(), FormError>;

    /// The user asked for the login form instead
    fn switch_to_login(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// State of the registration form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    username: FormField,
    email: FormField,
    password: FormField,
    // Checked against `password` by the form, not by the field itself
    confirm_password: FormField,
}

fn unchecked(_: &str) -> String {
    String::new()
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            username: FormField::new("username", "", validate_username),
            email: FormField::new("email", "", validate_email),
            password: FormField::new("password", "", validate_password),
            confirm_password: FormField::new("confirmPassword", "", unchecked),
        }
    }

    pub fn field(&self, field: RegisterField) -> &FormField {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn change(&mut self, field: RegisterField, value: &str) {
        match field {
            RegisterField::Username => self.username.change(value),
            RegisterField::Email => self.email.change(value),
            RegisterField::Password => {
                self.password.change(value);
                if self.password.is_touched() {
                    self.check_confirmation();
                }
            }
            RegisterField::ConfirmPassword => {
                self.confirm_password.change(value);
                if self.confirm_password.is_touched() {
                    self.check_confirmation();
                }
            }
        }
    }

    /// Leaving either password field re-checks the confirmation as well
    pub fn blur(&mut self, field: RegisterField) {
        match field {
            RegisterField::Username => self.username.blur(),
            RegisterField::Email => self.email.blur(),
            RegisterField::Password => {
                self.password.blur();
                self.check_confirmation();
            }
            RegisterField::ConfirmPassword => {
                self.confirm_password.blur();
                self.check_confirmation();
            }
        }
    }

    /// False while a password or confirmation error is present
    pub fn can_submit(&self) -> bool {
        self.password.error().is_empty() && self.confirm_password.error().is_empty()
    }

    /// Validate every field and mark them touched
    pub fn validate_all(&mut self) -> bool {
        let results = [
            self.username.validate_now(),
            self.email.validate_now(),
            self.password.validate_now(),
            {
                self.confirm_password.validate_now();
                self.check_confirmation()
            },
        ];
        results.iter().all(|valid| *valid)
    }

    pub fn data(&self) -> RegistrationData {
        RegistrationData {
            username: self.username.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            confirm_password: self.confirm_password.value().to_string(),
        }
    }

    /// Validate and hand the record to `handler`; nothing is emitted while
    /// any field is invalid
    pub async fn submit(&mut self, handler: &dyn RegistrationHandler) -> Result<(), FormError> {
        if !self.validate_all() {
            debug!("Registration form has validation errors");
            return Err(FormError::Invalid);
        }
        info!("Registering user '{}'", self.username.value());
        handler.register(self.data()).await
    }

    pub fn switch_to_login(&self, handler: &dyn RegistrationHandler) {
        handler.switch_to_login();
    }

    fn check_confirmation(&mut self) -> bool {
        let error =
            validate_confirm_password(self.password.value(), self.confirm_password.value());
        let valid = error.is_empty();
        self.confirm_password.set_error(error);
        valid
    }
}
