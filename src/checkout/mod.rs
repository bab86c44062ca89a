//! Checkout
//!
//! Customer details collected by the checkout modal, their validation, and
//! the order payload handed to an [`OrderGateway`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::LineItem,
    validation::{is_valid_email, is_valid_phone},
    view::CheckoutModal,
};

pub mod gateway;

pub use gateway::{
    MockOrderGateway, OrderConfirmation, OrderError, OrderGateway, OrderStatus, PlacedOrder,
    SimulatedGateway,
};

/// Errors that stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Submit was called with no checkout modal open.
    #[error("Checkout is not open")]
    NotOpen,

    /// One or more form fields are missing or malformed.
    #[error("Invalid checkout details: {0}")]
    Invalid(FormErrors),

    /// The order service refused or could not take the order.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// A customer detail collected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    /// Customer name.
    Name,

    /// Contact email.
    Email,

    /// Contact phone number.
    Phone,

    /// Delivery address.
    Address,
}

impl CheckoutField {
    /// Form field name.
    pub fn name(self) -> &'static str {
        match self {
            CheckoutField::Name => "name",
            CheckoutField::Email => "email",
            CheckoutField::Phone => "phone",
            CheckoutField::Address => "address",
        }
    }

    /// Label used in messages shown to the customer.
    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::Name => "Numele",
            CheckoutField::Email => "Emailul",
            CheckoutField::Phone => "Telefonul",
            CheckoutField::Address => "Adresa",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldProblem {
    /// Blank or whitespace only.
    #[error("lipsește")]
    Missing,

    /// Not shaped like an email address.
    #[error("nu este o adresă de email validă")]
    InvalidEmail,

    /// Not shaped like a phone number.
    #[error("nu este un număr de telefon valid")]
    InvalidPhone,
}

/// A single field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field.
    pub field: CheckoutField,

    /// What is wrong with it.
    pub problem: FieldProblem,
}

/// All validation failures of a submitted form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(SmallVec<[FieldError; 4]>);

impl FormErrors {
    /// Failures, in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Problem reported for `field`, if any.
    pub fn for_field(&self, field: CheckoutField) -> Option<FieldProblem> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.problem)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{} {}", error.field, error.problem)?;
        }

        Ok(())
    }
}

/// Values submitted through the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    /// Customer name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Delivery address.
    pub address: String,
}

impl CheckoutForm {
    fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Name => &self.name,
            CheckoutField::Email => &self.email,
            CheckoutField::Phone => &self.phone,
            CheckoutField::Address => &self.address,
        }
    }

    /// Check required fields and, when `check_contact` is set, the email
    /// and phone formats.
    ///
    /// # Errors
    ///
    /// Returns every failing field as [`FormErrors`].
    pub fn validate(&self, check_contact: bool) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        for field in [
            CheckoutField::Name,
            CheckoutField::Email,
            CheckoutField::Phone,
            CheckoutField::Address,
        ] {
            let value = self.value(field).trim();

            let problem = if value.is_empty() {
                Some(FieldProblem::Missing)
            } else if !check_contact {
                None
            } else {
                match field {
                    CheckoutField::Email if !is_valid_email(value) => {
                        Some(FieldProblem::InvalidEmail)
                    }
                    CheckoutField::Phone if !is_valid_phone(value) => {
                        Some(FieldProblem::InvalidPhone)
                    }
                    _ => None,
                }
            };

            if let Some(problem) = problem {
                errors.0.push(FieldError { field, problem });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Order sent to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Customer name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Delivery address.
    pub address: String,

    /// Ordered lines.
    pub items: Vec<LineItem>,

    /// Sum of line subtotals.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

impl OrderPayload {
    /// Build the payload from the modal snapshot and the submitted form.
    ///
    /// Text fields are trimmed.
    pub fn new(form: &CheckoutForm, modal: &CheckoutModal) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            items: modal.items().to_vec(),
            total: modal.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{cart::Cart, products::ProductId, view::CartView};

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Ion Popescu".to_string(),
            email: "ion@example.md".to_string(),
            phone: "+373 69 123 456".to_string(),
            address: "str. Stefan cel Mare 1, Chisinau".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(true), Ok(()));
    }

    #[test]
    fn blank_fields_are_missing() {
        let submitted = CheckoutForm {
            name: "   ".to_string(),
            address: String::new(),
            ..form()
        };

        let Err(errors) = submitted.validate(true) else {
            unreachable!("blank name and address must fail validation");
        };

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(CheckoutField::Name),
            Some(FieldProblem::Missing)
        );
        assert_eq!(
            errors.for_field(CheckoutField::Address),
            Some(FieldProblem::Missing)
        );
        assert_eq!(errors.to_string(), "Numele lipsește, Adresa lipsește");
    }

    #[test]
    fn contact_formats_checked_only_when_enabled() {
        let submitted = CheckoutForm {
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            ..form()
        };

        assert_eq!(submitted.validate(false), Ok(()));

        let Err(errors) = submitted.validate(true) else {
            unreachable!("malformed email and phone must fail validation");
        };

        assert_eq!(
            errors.for_field(CheckoutField::Email),
            Some(FieldProblem::InvalidEmail)
        );
        assert_eq!(
            errors.for_field(CheckoutField::Phone),
            Some(FieldProblem::InvalidPhone)
        );
    }

    #[test]
    fn payload_serializes_contract_fields() -> TestResult {
        let mut cart = Cart::new();
        cart.add(ProductId::new(5), "Polen", Decimal::from(65), 2)?;
        let modal = CartView::new(iso::MDL).open_checkout(&cart);

        let payload = OrderPayload::new(&form(), &modal);
        let json = serde_json::to_value(&payload)?;

        assert_eq!(json["name"], "Ion Popescu");
        assert_eq!(json["email"], "ion@example.md");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["total"], 130.0);

        Ok(())
    }
}
