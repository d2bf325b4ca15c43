//! Beneficiaries: the heirs and recipients of a waqf distribution
//!
//! A beneficiary record is owned by the caller and immutable input to
//! the allocation engine. The `beneficiary_type` label drives the
//! shariah share count; the family and income fields feed the
//! need-based pattern.

use serde::{Deserialize, Serialize};

// ── Identifier ───────────────────────────────────────────────────────

/// Caller-owned unique identifier for a beneficiary
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeneficiaryId(pub String);

impl BeneficiaryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for BeneficiaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Beneficiary ──────────────────────────────────────────────────────

/// A person entitled to a share of the waqf's distributable income
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Unique identifier
    pub id: BeneficiaryId,
    /// Full name
    pub name: String,
    /// Registry number in the beneficiary ledger
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number: String,
    /// Relationship label driving the shariah share count
    /// (e.g. "ابن", "بنت", "زوجة", "واقف")
    pub beneficiary_type: String,
    /// Administrative category
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Household size; absent means a household of one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
    /// Dependent sons
    #[serde(default)]
    pub sons_count: u32,
    /// Dependent daughters
    #[serde(default)]
    pub daughters_count: u32,
    /// Dependent wives
    #[serde(default)]
    pub wives_count: u32,
    /// Monthly income in minor units; absent means no income
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income_minor: Option<i64>,
    /// Payout routing: IBAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Payout routing: bank name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl Beneficiary {
    /// Create a beneficiary with the fields every pattern needs
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        beneficiary_type: impl Into<String>,
    ) -> Self {
        Self {
            id: BeneficiaryId::new(id),
            name: name.into(),
            number: String::new(),
            beneficiary_type: beneficiary_type.into(),
            category: String::new(),
            family_size: None,
            sons_count: 0,
            daughters_count: 0,
            wives_count: 0,
            monthly_income_minor: None,
            iban: None,
            bank_name: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_family_size(mut self, size: u32) -> Self {
        self.family_size = Some(size);
        self
    }

    pub fn with_dependents(mut self, sons: u32, daughters: u32, wives: u32) -> Self {
        self.sons_count = sons;
        self.daughters_count = daughters;
        self.wives_count = wives;
        self
    }

    pub fn with_monthly_income(mut self, income_minor: i64) -> Self {
        self.monthly_income_minor = Some(income_minor);
        self
    }

    pub fn with_payout_route(
        mut self,
        iban: impl Into<String>,
        bank_name: impl Into<String>,
    ) -> Self {
        self.iban = Some(iban.into());
        self.bank_name = Some(bank_name.into());
        self
    }

    /// Household size with the missing-field default of 1
    pub fn family_size(&self) -> u32 {
        self.family_size.unwrap_or(1)
    }

    /// Total dependents across sons, daughters, and wives
    pub fn dependents_count(&self) -> u32 {
        self.sons_count + self.daughters_count + self.wives_count
    }

    /// Monthly income with the missing-field default of 0
    pub fn monthly_income_minor(&self) -> i64 {
        self.monthly_income_minor.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_missing_need_inputs() {
        let b = Beneficiary::new("b-1", "Ahmad", "ابن");
        assert_eq!(b.family_size(), 1);
        assert_eq!(b.dependents_count(), 0);
        assert_eq!(b.monthly_income_minor(), 0);
    }

    #[test]
    fn builder_fields() {
        let b = Beneficiary::new("b-2", "Fatima", "بنت")
            .with_number("WQF-0042")
            .with_category("heir")
            .with_family_size(4)
            .with_dependents(2, 1, 0)
            .with_monthly_income(350_000)
            .with_payout_route("SA4420000001234567891234", "Al Rajhi");

        assert_eq!(b.family_size(), 4);
        assert_eq!(b.dependents_count(), 3);
        assert_eq!(b.monthly_income_minor(), 350_000);
        assert_eq!(b.iban.as_deref(), Some("SA4420000001234567891234"));
    }

    #[test]
    fn deserializes_with_sparse_fields() {
        let json = r#"{
            "id": "b-3",
            "name": "Omar",
            "beneficiary_type": "son"
        }"#;
        let b: Beneficiary = serde_json::from_str(json).unwrap();
        assert_eq!(b.id, BeneficiaryId::new("b-3"));
        assert_eq!(b.sons_count, 0);
        assert!(b.family_size.is_none());
        assert!(b.iban.is_none());
    }
}
