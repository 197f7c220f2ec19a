use std::fmt;

/// Validator attached to a scalar field
pub type Validator = fn(&str) -> String;

/// A scalar input together with its validation state
#[derive(Clone)]
pub struct FormField {
    name: &'static str,
    value: String,
    error: String,
    touched: bool,
    validator: Validator,
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("error", &self.error)
            .field("touched", &self.touched)
            .finish()
    }
}

impl FormField {
    pub fn new(name: &'static str, value: impl Into<String>, validator: Validator) -> Self {
        Self {
            name,
            value: value.into(),
            error: String::new(),
            touched: false,
            validator,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current error message, empty when valid or not yet checked
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Error to display: only shown once the field has been touched
    pub fn visible_error(&self) -> &str {
        if self.touched {
            &self.error
        } else {
            ""
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Store a new value; re-validates only once the field has been touched
    pub fn change(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.touched {
            self.validate();
        }
    }

    /// Focus left the field: mark it touched and validate
    pub fn blur(&mut self) {
        self.touched = true;
        self.validate();
    }

    /// Validate regardless of touched state and mark the field touched.
    /// Returns true when the value is valid.
    pub fn validate_now(&mut self) -> bool {
        self.touched = true;
        self.validate()
    }

    /// Overwrite the error with the result of a check that needs more than
    /// this field's value (e.g. password confirmation)
    pub fn set_error(&mut self, error: String) {
        self.error = error;
    }

    fn validate(&mut self) -> bool {
        self.error = (self.validator)(&self.value);
        self.error.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_title;

    #[test]
    fn test_untouched_field_is_not_validated_on_change() {
        let mut field = FormField::new("title", "Soup", validate_title);
        field.change("");
        assert_eq!(field.value(), "");
        assert_eq!(field.error(), "");
        assert!(!field.is_touched());
    }

    #[test]
    fn test_blur_validates_and_enables_live_validation() {
        let mut field = FormField::new("title", "", validate_title);
        field.blur();
        assert!(field.is_touched());
        assert_eq!(field.error(), "Recipe title is required");

        field.change("Soup");
        assert_eq!(field.error(), "");
        field.change("  ");
        assert_eq!(field.error(), "Recipe title is required");
    }

    #[test]
    fn test_validate_now_marks_touched() {
        let mut field = FormField::new("title", "", validate_title);
        assert!(!field.validate_now());
        assert!(field.is_touched());
        assert_eq!(field.visible_error(), "Recipe title is required");
    }
}
