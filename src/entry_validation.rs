use crate::entry::AttendanceTemplate;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TemplateValidationError {
    message: String,
}

impl TemplateValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn validate_template(template: &AttendanceTemplate) -> Result<(), TemplateValidationError> {
    if template.doctor_name.trim().is_empty() {
        return Err(TemplateValidationError::new("doctor name is blank"));
    }

    if template.times().is_empty() {
        return Err(TemplateValidationError::new(format!(
            "no attendance time selected for {}",
            template.doctor_name
        )));
    }

    let mut seen = HashSet::with_capacity(template.times().len());
    for (idx, time) in template.times().iter().enumerate() {
        if time.trim().is_empty() {
            return Err(TemplateValidationError::new(format!(
                "attendance time #{idx} is blank"
            )));
        }
        if !seen.insert(time.as_str()) {
            return Err(TemplateValidationError::new(format!(
                "attendance time '{time}' is listed twice"
            )));
        }
    }

    Ok(())
}
