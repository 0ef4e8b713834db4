//! Payment method model
//!
//! Submissions reference a payment method by **name**, not id; the name is
//! the de facto foreign key. Renaming a method therefore orphans historical
//! references — an accepted limitation of the stored schema.

use serde::{Deserialize, Serialize};

use super::ids::PaymentMethodId;

/// A payment channel (e.g. "bKash", "Nagad", "Cash")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier
    pub id: PaymentMethodId,

    /// Method name; the value stored on submissions
    pub name: String,

    /// Free-text description (account numbers, instructions)
    #[serde(default)]
    pub description: String,
}

impl PaymentMethod {
    /// Create a new payment method
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: PaymentMethodId::new(),
            name: name.into(),
            description: description.into(),
        }
    }
}
