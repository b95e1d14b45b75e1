//! Senegal
//!
//! Code des obligations civiles et commerciales, book on leases:
//! - Notice to quit: three months for dwellings
//! - Eviction after a formal notice (mise en demeure) left unanswered
//! - Rent capped by the 2014 rent-reduction law; housing tax collected
//!   with urban property tax

use super::{holidays, time};
use crate::jurisdiction::{
    AllowedPaymentMethods, BankingHours, BankingInfo, DeadlineCategory, PaymentMethod,
    RegionalConfig, TaxCategory,
};
use std::collections::BTreeSet;

pub const DAKAR: &str = "SN_DAKAR";

const PUBLIC_HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2025
    (2025, 1, 1),   // New Year's Day
    (2025, 3, 31),  // Korité
    (2025, 4, 4),   // Independence Day
    (2025, 4, 21),  // Easter Monday
    (2025, 5, 1),   // Labour Day
    (2025, 5, 29),  // Ascension
    (2025, 6, 7),   // Tabaski
    (2025, 6, 9),   // Whit Monday
    (2025, 8, 15),  // Assumption
    (2025, 8, 22),  // Grand Magal of Touba
    (2025, 9, 4),   // Maouloud
    (2025, 11, 1),  // All Saints' Day
    (2025, 12, 25), // Christmas
    // 2026
    (2026, 1, 1),   // New Year's Day
    (2026, 3, 20),  // Korité
    (2026, 4, 4),   // Independence Day
    (2026, 4, 6),   // Easter Monday
    (2026, 5, 1),   // Labour Day
    (2026, 5, 14),  // Ascension
    (2026, 5, 25),  // Whit Monday
    (2026, 5, 27),  // Tabaski
    (2026, 8, 15),  // Assumption
    (2026, 8, 26),  // Maouloud
    (2026, 11, 1),  // All Saints' Day
    (2026, 12, 25), // Christmas
];

pub fn dakar() -> RegionalConfig {
    RegionalConfig::new(DAKAR, "Senegal", "Dakar")
        .with_currency("XOF")
        .with_language("fr")
        .with_deadline(DeadlineCategory::NoticeToQuit, 90)
        .with_deadline(DeadlineCategory::EvictionNotice, 60)
        .with_deadline(DeadlineCategory::MaintenanceResponse, 10)
        .with_deadline(DeadlineCategory::DisputeResolution, 30)
        .with_deadline(DeadlineCategory::DepositReturn, 60)
        .with_tax_rate(TaxCategory::PropertyTransfer, 0.05)
        .with_tax_rate(TaxCategory::UrbanProperty, 0.05)
        .with_tax_rate(TaxCategory::ValueAdded, 0.18)
        .with_tax_rate(TaxCategory::Housing, 0.02)
        .with_payment_methods(AllowedPaymentMethods {
            methods: BTreeSet::from([
                PaymentMethod::MobileMoney,
                PaymentMethod::BankTransfer,
                PaymentMethod::Check,
                PaymentMethod::Cash,
            ]),
            preferred: PaymentMethod::BankTransfer,
            max_cash_amount: Some(1_000_000),
        })
        .with_banking(BankingInfo {
            institutions: vec![
                "CBAO".to_string(),
                "Société Générale Sénégal".to_string(),
                "Ecobank Sénégal".to_string(),
                "BICIS".to_string(),
            ],
            mobile_money_providers: vec![
                "Wave".to_string(),
                "Orange Money".to_string(),
                "Free Money".to_string(),
            ],
            hours: BankingHours {
                open: time(8, 0),
                close: time(16, 30),
            },
            holidays: holidays(PUBLIC_HOLIDAYS),
        })
}
