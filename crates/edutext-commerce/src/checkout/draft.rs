//! Buyer details collected on the checkout form.

use serde::{Deserialize, Serialize};

use crate::error::{FieldIssue, ValidationError};

/// Everything the checkout form asks the student for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDraft {
    pub student_name: String,
    pub email: String,
    pub phone: String,
    pub matric_number: String,
    pub department: String,
    pub level: String,
    pub program_type: String,
}

impl CheckoutDraft {
    /// Checks every field and reports all problems at once, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        let required = [
            ("student_name", &self.student_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("matric_number", &self.matric_number),
            ("department", &self.department),
            ("level", &self.level),
            ("program_type", &self.program_type),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                issues.push(FieldIssue::new(field, format!("{field} is required")));
            }
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            issues.push(FieldIssue::new("email", "email is not valid"));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
