//! Côte d'Ivoire
//!
//! Law 2019-576 on the construction code, residential lease chapter:
//! - Notice to quit: three months
//! - Deposit capped at two months' rent, returned within 45 days
//! - Rent registration with the tax authority (droit d'enregistrement)

use super::{holidays, time};
use crate::jurisdiction::{
    AllowedPaymentMethods, BankingHours, BankingInfo, DeadlineCategory, PaymentMethod,
    RegionalConfig, TaxCategory,
};
use std::collections::BTreeSet;

pub const ABIDJAN: &str = "CI_ABIDJAN";

const PUBLIC_HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2025
    (2025, 1, 1),   // New Year's Day
    (2025, 3, 31),  // Eid al-Fitr
    (2025, 4, 21),  // Easter Monday
    (2025, 5, 1),   // Labour Day
    (2025, 5, 29),  // Ascension
    (2025, 6, 6),   // Tabaski
    (2025, 6, 9),   // Whit Monday
    (2025, 8, 7),   // Independence Day
    (2025, 8, 15),  // Assumption
    (2025, 11, 1),  // All Saints' Day
    (2025, 11, 15), // National Peace Day
    (2025, 12, 25), // Christmas
    // 2026
    (2026, 1, 1),   // New Year's Day
    (2026, 3, 20),  // Eid al-Fitr
    (2026, 4, 6),   // Easter Monday
    (2026, 5, 1),   // Labour Day
    (2026, 5, 14),  // Ascension
    (2026, 5, 25),  // Whit Monday
    (2026, 5, 27),  // Tabaski
    (2026, 8, 7),   // Independence Day
    (2026, 8, 15),  // Assumption
    (2026, 11, 1),  // All Saints' Day
    (2026, 11, 15), // National Peace Day
    (2026, 12, 25), // Christmas
];

pub fn abidjan() -> RegionalConfig {
    RegionalConfig::new(ABIDJAN, "Côte d'Ivoire", "Abidjan")
        .with_currency("XOF")
        .with_language("fr")
        .with_deadline(DeadlineCategory::NoticeToQuit, 90)
        .with_deadline(DeadlineCategory::EvictionNotice, 30)
        .with_deadline(DeadlineCategory::MaintenanceResponse, 15)
        .with_deadline(DeadlineCategory::DisputeResolution, 45)
        .with_deadline(DeadlineCategory::DepositReturn, 45)
        .with_tax_rate(TaxCategory::PropertyTransfer, 0.025)
        .with_tax_rate(TaxCategory::UrbanProperty, 0.04)
        .with_tax_rate(TaxCategory::ValueAdded, 0.18)
        .with_payment_methods(AllowedPaymentMethods {
            methods: BTreeSet::from([
                PaymentMethod::BankTransfer,
                PaymentMethod::MobileMoney,
                PaymentMethod::Check,
                PaymentMethod::Card,
                PaymentMethod::Cash,
            ]),
            preferred: PaymentMethod::MobileMoney,
            max_cash_amount: Some(5_000_000),
        })
        .with_banking(BankingInfo {
            institutions: vec![
                "SGBCI".to_string(),
                "Ecobank Côte d'Ivoire".to_string(),
                "NSIA Banque".to_string(),
                "BICICI".to_string(),
            ],
            mobile_money_providers: vec![
                "Orange Money".to_string(),
                "MTN MoMo".to_string(),
                "Moov Money".to_string(),
                "Wave".to_string(),
            ],
            hours: BankingHours {
                open: time(7, 30),
                close: time(15, 30),
            },
            holidays: holidays(PUBLIC_HOLIDAYS),
        })
}
