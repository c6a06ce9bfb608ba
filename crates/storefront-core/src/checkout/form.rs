//! Checkout form and field validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checkout::{PaymentMethod, ShippingMethod};

/// A text field on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    PostalCode,
}

impl FormField {
    /// Fields in the order they appear on the form.
    pub const ALL: [FormField; 7] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
        FormField::City,
        FormField::PostalCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::PostalCode => "postalCode",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Address => "Address",
            FormField::City => "City",
            FormField::PostalCode => "Postal code",
        }
    }

    fn required_message(&self) -> &'static str {
        match self {
            FormField::FirstName => "Please enter your first name",
            FormField::LastName => "Please enter your last name",
            FormField::Email => "Please enter your email",
            FormField::Phone => "Please enter your phone number",
            FormField::Address => "Please enter your address",
            FormField::City => "Please enter your city",
            FormField::PostalCode => "Please enter your postal code",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All field errors from one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Drop the message for a field, e.g. once the user edits it.
    pub fn clear(&mut self, field: FormField) {
        self.errors.retain(|e| e.field != field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Customer details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a text field.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
            FormField::City => &self.city,
            FormField::PostalCode => &self.postal_code,
        }
    }

    /// Replace the value of a text field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Address => self.address = value,
            FormField::City => self.city = value,
            FormField::PostalCode => self.postal_code = value,
        }
    }

    /// Check every field and collect all messages.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for field in FormField::ALL {
            let value = self.field(field).trim();
            if value.is_empty() {
                errors.push(field, field.required_message());
                continue;
            }
            if let Some(message) = format_error(field, self.field(field)) {
                errors.push(field, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Address on a single line (e.g., "12 Main St, Springfield 12345").
    pub fn one_line_address(&self) -> String {
        format!(
            "{}, {} {}",
            self.address.trim(),
            self.city.trim(),
            self.postal_code.trim()
        )
    }
}

fn format_error(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Email if !is_valid_email(value) => Some("Invalid email format"),
        FormField::Phone if !is_valid_phone(value) => Some("Phone number must be 10 digits"),
        FormField::PostalCode if !is_valid_postal_code(value) => {
            Some("Postal code must be 5 digits")
        }
        _ => None,
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot with at least one character on either side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Ten digits once dashes are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| *c != '-').collect();
    digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Exactly five digits.
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == 5 && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn valid_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            postal_code: "12345".to_string(),
            shipping_method: ShippingMethod::Standard,
            payment_method: PaymentMethod::Credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::valid_form;
    use super::*;

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), FormField::ALL.len());
        assert_eq!(errors.get(FormField::Email), Some("Please enter your email"));
        assert_eq!(errors.errors[0].field, FormField::FirstName);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = valid_form();
        form.set_field(FormField::City, "   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::City), Some("Please enter your city"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_format_messages() {
        let mut form = valid_form();
        form.set_field(FormField::Email, "ada@example");
        form.set_field(FormField::Phone, "12345");
        form.set_field(FormField::PostalCode, "1234a");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Email), Some("Invalid email format"));
        assert_eq!(errors.get(FormField::Phone), Some("Phone number must be 10 digits"));
        assert_eq!(errors.get(FormField::PostalCode), Some("Postal code must be 5 digits"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("555 123 4567"));
        assert!(!is_valid_phone("555-123-456"));
    }

    #[test]
    fn test_clear_field_error() {
        let mut errors = CheckoutForm::new().validate().unwrap_err();
        errors.clear(FormField::Phone);
        assert_eq!(errors.get(FormField::Phone), None);
        assert_eq!(errors.len(), FormField::ALL.len() - 1);
    }

    #[test]
    fn test_set_field_roundtrip() {
        let mut form = CheckoutForm::new();
        for field in FormField::ALL {
            form.set_field(field, field.label());
        }
        assert_eq!(form.field(FormField::PostalCode), "Postal code");
        assert_eq!(form.full_name(), "First name Last name");
    }
}
