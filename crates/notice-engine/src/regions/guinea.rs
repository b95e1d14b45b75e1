//! Guinea
//!
//! Residential leases under the Code civil:
//! - Tenant departure: three months' notice
//! - Deposit returned within one month of handing back the keys
//! - Registration duty on leases, VAT on commercial rent
//! - Mobile money is the dominant rent channel; cash is capped

use super::{holidays, time};
use crate::jurisdiction::{
    AllowedPaymentMethods, BankingHours, BankingInfo, DeadlineCategory, PaymentMethod,
    RegionalConfig, TaxCategory,
};
use std::collections::BTreeSet;

pub const CONAKRY: &str = "GN_CONAKRY";

const PUBLIC_HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2025
    (2025, 1, 1),   // New Year's Day
    (2025, 3, 31),  // Eid al-Fitr
    (2025, 4, 21),  // Easter Monday
    (2025, 5, 1),   // Labour Day
    (2025, 6, 6),   // Eid al-Adha
    (2025, 8, 15),  // Assumption
    (2025, 9, 4),   // Mawlid
    (2025, 10, 2),  // Independence Day
    (2025, 12, 25), // Christmas
    // 2026
    (2026, 1, 1),   // New Year's Day
    (2026, 3, 20),  // Eid al-Fitr
    (2026, 4, 6),   // Easter Monday
    (2026, 5, 1),   // Labour Day
    (2026, 5, 27),  // Eid al-Adha
    (2026, 8, 15),  // Assumption
    (2026, 8, 26),  // Mawlid
    (2026, 10, 2),  // Independence Day
    (2026, 12, 25), // Christmas
];

pub fn conakry() -> RegionalConfig {
    RegionalConfig::new(CONAKRY, "Guinea", "Conakry")
        .with_currency("GNF")
        .with_language("fr")
        .with_deadline(DeadlineCategory::NoticeToQuit, 90)
        .with_deadline(DeadlineCategory::EvictionNotice, 30)
        .with_deadline(DeadlineCategory::MaintenanceResponse, 15)
        .with_deadline(DeadlineCategory::DisputeResolution, 60)
        .with_deadline(DeadlineCategory::DepositReturn, 30)
        .with_tax_rate(TaxCategory::PropertyTransfer, 0.05)
        .with_tax_rate(TaxCategory::UrbanProperty, 0.10)
        .with_tax_rate(TaxCategory::ValueAdded, 0.18)
        .with_payment_methods(AllowedPaymentMethods {
            methods: BTreeSet::from([
                PaymentMethod::MobileMoney,
                PaymentMethod::BankTransfer,
                PaymentMethod::Cash,
            ]),
            preferred: PaymentMethod::MobileMoney,
            max_cash_amount: Some(50_000_000),
        })
        .with_banking(BankingInfo {
            institutions: vec![
                "Ecobank Guinée".to_string(),
                "Société Générale Guinée".to_string(),
                "Orabank Guinée".to_string(),
                "Banque Internationale pour le Commerce et l'Industrie de Guinée".to_string(),
            ],
            mobile_money_providers: vec!["Orange Money".to_string(), "MTN MoMo".to_string()],
            hours: BankingHours {
                open: time(8, 30),
                close: time(16, 0),
            },
            holidays: holidays(PUBLIC_HOLIDAYS),
        })
}
