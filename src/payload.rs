use serde::Serialize;

use crate::image::ImageFile;

/// Body of one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(ImageFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart form data, as a browser `FormData` would carry it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn file(&mut self, name: impl Into<String>, file: ImageFile) -> &mut Self {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::File(file),
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| &part.value)
    }

    /// Value of a text part
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PartValue::Text(text) => Some(text),
            PartValue::File(_) => None,
        }
    }

    pub fn get_file(&self, name: &str) -> Option<&ImageFile> {
        match self.get(name)? {
            PartValue::File(file) => Some(file),
            PartValue::Text(_) => None,
        }
    }

    /// One-line-per-part overview, file contents replaced by their size
    pub fn summary(&self) -> Vec<PartSummary<'_>> {
        self.parts
            .iter()
            .map(|part| match &part.value {
                PartValue::Text(text) => PartSummary {
                    name: &part.name,
                    text: Some(text),
                    file_name: None,
                    content_type: None,
                    size: None,
                },
                PartValue::File(file) => PartSummary {
                    name: &part.name,
                    text: None,
                    file_name: Some(&file.name),
                    content_type: Some(&file.content_type),
                    size: Some(file.bytes.len()),
                },
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PartSummary<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl From<&MultipartPayload> for reqwest::multipart::Form {
    fn from(payload: &MultipartPayload) -> Self {
        payload
            .parts
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, part| match &part.value {
                PartValue::Text(text) => form.text(part.name.clone(), text.clone()),
                PartValue::File(file) => {
                    let body = reqwest::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.name.clone());
                    // An unparseable declared type is sent without a content type
                    let body = match body.mime_str(&file.content_type) {
                        Ok(typed) => typed,
                        Err(_) => reqwest::multipart::Part::bytes(file.bytes.clone())
                            .file_name(file.name.clone()),
                    };
                    form.part(part.name.clone(), body)
                }
            })
    }
}
