//! Regional configuration types
//!
//! One [`RegionalConfig`] per jurisdiction key (country code + region, e.g.
//! `GN_CONAKRY`). Each carries:
//! - Legal deadlines: statutory day counts per deadline category
//! - Tax rates: optional per category, absent means not applicable
//! - Payment rules: allowed methods, preferred method, cash ceiling
//! - Banking info: institutions, mobile money, hours, public holidays

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

lazy_static! {
    /// ISO 3166 country code, underscore, region name
    static ref JURISDICTION_ID_PATTERN: Regex =
        Regex::new(r"^[A-Z]{2}_[A-Z][A-Z0-9_]*$").unwrap();
}

/// Check a jurisdiction key such as `SN_DAKAR`
pub fn is_valid_jurisdiction_id(id: &str) -> bool {
    JURISDICTION_ID_PATTERN.is_match(id)
}

/// Country part of a jurisdiction key (`"GN"` for `GN_CONAKRY`)
pub fn country_code(id: &str) -> Option<&str> {
    if is_valid_jurisdiction_id(id) {
        id.get(..2)
    } else {
        None
    }
}

// ============================================================================
// Legal deadlines
// ============================================================================

/// Statutory periods a jurisdiction assigns a day count to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineCategory {
    NoticeToQuit,
    EvictionNotice,
    MaintenanceResponse,
    DisputeResolution,
    DepositReturn,
}

impl DeadlineCategory {
    pub const ALL: [DeadlineCategory; 5] = [
        DeadlineCategory::NoticeToQuit,
        DeadlineCategory::EvictionNotice,
        DeadlineCategory::MaintenanceResponse,
        DeadlineCategory::DisputeResolution,
        DeadlineCategory::DepositReturn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineCategory::NoticeToQuit => "notice_to_quit",
            DeadlineCategory::EvictionNotice => "eviction_notice",
            DeadlineCategory::MaintenanceResponse => "maintenance_response",
            DeadlineCategory::DisputeResolution => "dispute_resolution",
            DeadlineCategory::DepositReturn => "deposit_return",
        }
    }

    /// Parse a category key (case-insensitive, `-` and `_` interchangeable)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "notice_to_quit" => Some(DeadlineCategory::NoticeToQuit),
            "eviction_notice" | "eviction" => Some(DeadlineCategory::EvictionNotice),
            "maintenance_response" | "maintenance" => Some(DeadlineCategory::MaintenanceResponse),
            "dispute_resolution" | "dispute" => Some(DeadlineCategory::DisputeResolution),
            "deposit_return" => Some(DeadlineCategory::DepositReturn),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeadlineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Taxes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    /// Registration duty on transfers and leases
    PropertyTransfer,
    /// Land / built-property tax
    UrbanProperty,
    ValueAdded,
    Housing,
}

impl std::fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaxCategory::PropertyTransfer => "property_transfer",
            TaxCategory::UrbanProperty => "urban_property",
            TaxCategory::ValueAdded => "value_added",
            TaxCategory::Housing => "housing",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    MobileMoney,
    Cash,
    Check,
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Card => "card",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedPaymentMethods {
    pub methods: BTreeSet<PaymentMethod>,
    pub preferred: PaymentMethod,
    /// Largest cash payment accepted, in whole local currency units
    #[serde(default)]
    pub max_cash_amount: Option<u64>,
}

impl AllowedPaymentMethods {
    pub fn single(method: PaymentMethod) -> Self {
        Self {
            methods: BTreeSet::from([method]),
            preferred: method,
            max_cash_amount: None,
        }
    }

    /// Whether a payment of `amount` by `method` is acceptable
    pub fn permits(&self, method: PaymentMethod, amount: u64) -> bool {
        if !self.methods.contains(&method) {
            return false;
        }
        match (method, self.max_cash_amount) {
            (PaymentMethod::Cash, Some(ceiling)) => amount <= ceiling,
            _ => true,
        }
    }
}

// ============================================================================
// Banking
// ============================================================================

/// Counter hours, open at `open` and closed from `close` onwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl BankingHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time < self.close
    }
}

impl Default for BankingHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankingInfo {
    #[serde(default)]
    pub institutions: Vec<String>,
    #[serde(default)]
    pub mobile_money_providers: Vec<String>,
    #[serde(default)]
    pub hours: BankingHours,
    /// Explicit public holidays. Not recurrence rules: a year that is not
    /// listed has no holidays at all.
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
}

impl BankingInfo {
    pub fn supports_institution(&self, name: &str) -> bool {
        self.institutions
            .iter()
            .any(|institution| institution.eq_ignore_ascii_case(name.trim()))
    }

    pub fn supports_mobile_money(&self, provider: &str) -> bool {
        self.mobile_money_providers
            .iter()
            .any(|p| p.eq_ignore_ascii_case(provider.trim()))
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Years spanned by the holiday list
    pub fn holiday_years(&self) -> Option<RangeInclusive<i32>> {
        let first = self.holidays.first()?;
        let last = self.holidays.last()?;
        Some(first.year()..=last.year())
    }

    /// Counter open at `at`, ignoring weekends and holidays
    pub fn within_hours(&self, at: NaiveDateTime) -> bool {
        self.hours.contains(at.time())
    }
}

// ============================================================================
// Regional configuration
// ============================================================================

/// Legal, tax and payment rules for one jurisdiction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalConfig {
    pub jurisdiction_id: String,
    pub country: String,
    pub region: String,
    /// ISO 639-1 language contracts are drafted in
    pub contract_language: String,
    /// ISO 4217 currency code
    pub currency_code: String,
    #[serde(default)]
    pub tax_rates: BTreeMap<TaxCategory, f64>,
    #[serde(default)]
    pub legal_deadlines: BTreeMap<DeadlineCategory, u32>,
    pub payment_methods: AllowedPaymentMethods,
    #[serde(default)]
    pub banking: BankingInfo,
}

impl RegionalConfig {
    /// Minimal configuration: no deadlines, no taxes, bank transfer only,
    /// 08:00-16:00, no holidays.
    pub fn new(jurisdiction_id: &str, country: &str, region: &str) -> Self {
        Self {
            jurisdiction_id: jurisdiction_id.to_string(),
            country: country.to_string(),
            region: region.to_string(),
            contract_language: "fr".to_string(),
            currency_code: "XOF".to_string(),
            tax_rates: BTreeMap::new(),
            legal_deadlines: BTreeMap::new(),
            payment_methods: AllowedPaymentMethods::single(PaymentMethod::BankTransfer),
            banking: BankingInfo::default(),
        }
    }

    pub fn with_currency(mut self, currency_code: &str) -> Self {
        self.currency_code = currency_code.to_string();
        self
    }

    pub fn with_language(mut self, contract_language: &str) -> Self {
        self.contract_language = contract_language.to_string();
        self
    }

    pub fn with_deadline(mut self, category: DeadlineCategory, days: u32) -> Self {
        self.legal_deadlines.insert(category, days);
        self
    }

    pub fn with_tax_rate(mut self, category: TaxCategory, rate: f64) -> Self {
        self.tax_rates.insert(category, rate);
        self
    }

    pub fn with_payment_methods(mut self, payment_methods: AllowedPaymentMethods) -> Self {
        self.payment_methods = payment_methods;
        self
    }

    pub fn with_banking(mut self, banking: BankingInfo) -> Self {
        self.banking = banking;
        self
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.banking.holidays.extend(holidays);
        self
    }

    /// Statutory day count for `category`, 0 when the jurisdiction sets none
    pub fn deadline_days(&self, category: DeadlineCategory) -> u32 {
        self.legal_deadlines.get(&category).copied().unwrap_or(0)
    }

    /// Fractional rate for `category`, 0.0 when not applicable here
    pub fn tax_rate(&self, category: TaxCategory) -> f64 {
        self.tax_rates.get(&category).copied().unwrap_or(0.0)
    }

    pub fn compute_tax(&self, amount: f64, category: TaxCategory) -> f64 {
        amount * self.tax_rate(category)
    }

    /// Check the invariants every loaded configuration must hold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jurisdiction_id.trim().is_empty() {
            return Err(ConfigError::EmptyJurisdictionId);
        }
        if !is_valid_jurisdiction_id(&self.jurisdiction_id) {
            return Err(ConfigError::MalformedJurisdictionId(
                self.jurisdiction_id.clone(),
            ));
        }

        let payments = &self.payment_methods;
        if !payments.methods.contains(&payments.preferred) {
            return Err(ConfigError::PreferredMethodNotAllowed {
                jurisdiction: self.jurisdiction_id.clone(),
                method: payments.preferred,
            });
        }

        let hours = self.banking.hours;
        if hours.open >= hours.close {
            return Err(ConfigError::InvalidBankingHours {
                jurisdiction: self.jurisdiction_id.clone(),
                open: hours.open,
                close: hours.close,
            });
        }

        for (&category, &rate) in &self.tax_rates {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidTaxRate {
                    jurisdiction: self.jurisdiction_id.clone(),
                    category,
                    rate,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_jurisdiction_id_format() {
        assert!(is_valid_jurisdiction_id("GN_CONAKRY"));
        assert!(is_valid_jurisdiction_id("CI_ABIDJAN"));
        assert!(is_valid_jurisdiction_id("SN_DAKAR_PLATEAU"));
        assert!(!is_valid_jurisdiction_id("gn_conakry"));
        assert!(!is_valid_jurisdiction_id("GUINEA"));
        assert!(!is_valid_jurisdiction_id("GN_"));
        assert!(!is_valid_jurisdiction_id(""));
    }

    #[test]
    fn test_country_code() {
        assert_eq!(country_code("GN_CONAKRY"), Some("GN"));
        assert_eq!(country_code("nonsense"), None);
    }

    #[test]
    fn test_deadline_category_parsing() {
        assert_eq!(
            DeadlineCategory::parse("notice_to_quit"),
            Some(DeadlineCategory::NoticeToQuit)
        );
        assert_eq!(
            DeadlineCategory::parse("Deposit-Return"),
            Some(DeadlineCategory::DepositReturn)
        );
        assert_eq!(
            DeadlineCategory::parse("eviction"),
            Some(DeadlineCategory::EvictionNotice)
        );
        assert_eq!(DeadlineCategory::parse("rent_increase"), None);
        for category in DeadlineCategory::ALL {
            assert_eq!(DeadlineCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_absent_entries_read_as_zero() {
        let config = RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry")
            .with_deadline(DeadlineCategory::NoticeToQuit, 90)
            .with_tax_rate(TaxCategory::ValueAdded, 0.18);

        assert_eq!(config.deadline_days(DeadlineCategory::NoticeToQuit), 90);
        assert_eq!(config.deadline_days(DeadlineCategory::DepositReturn), 0);
        assert_eq!(config.tax_rate(TaxCategory::ValueAdded), 0.18);
        assert_eq!(config.tax_rate(TaxCategory::Housing), 0.0);
        assert_eq!(config.compute_tax(1000.0, TaxCategory::Housing), 0.0);
        assert!((config.compute_tax(1000.0, TaxCategory::ValueAdded) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_cash_ceiling() {
        let payments = AllowedPaymentMethods {
            methods: BTreeSet::from([PaymentMethod::Cash, PaymentMethod::MobileMoney]),
            preferred: PaymentMethod::MobileMoney,
            max_cash_amount: Some(5_000_000),
        };
        assert!(payments.permits(PaymentMethod::Cash, 5_000_000));
        assert!(!payments.permits(PaymentMethod::Cash, 5_000_001));
        assert!(payments.permits(PaymentMethod::MobileMoney, 50_000_000));
        assert!(!payments.permits(PaymentMethod::Card, 1));
    }

    #[test]
    fn test_banking_lookup_is_case_insensitive() {
        let banking = BankingInfo {
            institutions: vec!["Ecobank".to_string()],
            mobile_money_providers: vec!["Orange Money".to_string()],
            ..BankingInfo::default()
        };
        assert!(banking.supports_institution("ECOBANK"));
        assert!(banking.supports_mobile_money(" orange money "));
        assert!(!banking.supports_mobile_money("Wave"));
    }

    #[test]
    fn test_banking_hours_are_half_open() {
        let hours = BankingHours {
            open: time(8, 30),
            close: time(16, 0),
        };
        assert!(!hours.contains(time(8, 29)));
        assert!(hours.contains(time(8, 30)));
        assert!(hours.contains(time(15, 59)));
        assert!(!hours.contains(time(16, 0)));
    }

    #[test]
    fn test_holiday_years() {
        let config = RegionalConfig::new("SN_DAKAR", "Senegal", "Dakar").with_holidays([
            NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
        ]);
        assert_eq!(config.banking.holiday_years(), Some(2025..=2026));
        assert_eq!(BankingInfo::default().holiday_years(), None);
    }

    #[test]
    fn test_validate_rejects_broken_configs() {
        let empty = RegionalConfig::new("", "Nowhere", "Nowhere");
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::EmptyJurisdictionId)
        ));

        let malformed = RegionalConfig::new("conakry", "Guinea", "Conakry");
        assert!(matches!(
            malformed.validate(),
            Err(ConfigError::MalformedJurisdictionId(_))
        ));

        let mut preferred = RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry");
        preferred.payment_methods.preferred = PaymentMethod::Cash;
        assert!(matches!(
            preferred.validate(),
            Err(ConfigError::PreferredMethodNotAllowed { .. })
        ));

        let mut hours = RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry");
        hours.banking.hours = BankingHours {
            open: time(17, 0),
            close: time(9, 0),
        };
        assert!(matches!(
            hours.validate(),
            Err(ConfigError::InvalidBankingHours { .. })
        ));

        let tax = RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry")
            .with_tax_rate(TaxCategory::ValueAdded, 18.0);
        assert!(matches!(
            tax.validate(),
            Err(ConfigError::InvalidTaxRate { .. })
        ));

        assert!(RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "jurisdiction_id": "ML_BAMAKO",
            "country": "Mali",
            "region": "Bamako",
            "contract_language": "fr",
            "currency_code": "XOF",
            "tax_rates": { "value_added": 0.18 },
            "legal_deadlines": { "notice_to_quit": 90, "deposit_return": 30 },
            "payment_methods": { "methods": ["cash", "mobile_money"], "preferred": "mobile_money" },
            "banking": {
                "hours": { "open": "08:00:00", "close": "15:30:00" },
                "holidays": ["2025-01-20"]
            }
        }"#;
        let config: RegionalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.deadline_days(DeadlineCategory::NoticeToQuit), 90);
        assert_eq!(config.payment_methods.max_cash_amount, None);
        assert!(config
            .banking
            .is_holiday(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()));
        assert!(config.validate().is_ok());
    }
}
