//! Fee detection
//!
//! Flags expense transactions that look like bank or service fees: the name
//! contains a keyword from a (configurable) vocabulary. Groups matches by
//! exact name and scores each group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::{round2, signed_amount};
use crate::config::FeeConfig;
use crate::models::{Classification, Transaction};

/// A group of expense transactions that looks like a recurring fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeCandidate {
    pub name: String,
    pub count: usize,
    /// Positive (absolute) cumulative amount
    pub total_amount: f64,
    pub avg_amount: f64,
    pub sample_tx_ids: Vec<String>,
    pub confidence: f64,
    pub reason: String,
    pub suggested_action: String,
}

/// Built-in fee keyword vocabulary (EN + ES + common EU bank terms).
/// Used when the config supplies no override.
pub const DEFAULT_FEE_KEYWORDS: &[&str] = &[
    // English - general
    "fee",
    "fees",
    "charge",
    "charges",
    "commission",
    "commissions",
    "penalty",
    "penalties",
    "fine",
    "fines",
    "surcharge",
    "markup",
    "premium",
    // English - banking
    "overdraft",
    "nsf",
    "insufficient funds",
    "maintenance",
    "account maintenance",
    "monthly fee",
    "annual fee",
    "atm",
    "atm fee",
    "atm withdrawal",
    "foreign atm",
    "wire",
    "wire fee",
    "transfer fee",
    "swift",
    "foreign transaction",
    "fx fee",
    "currency conversion",
    "card replacement",
    "statement fee",
    "paper statement",
    "inactivity",
    "dormant",
    "minimum balance",
    "returned item",
    "returned check",
    "bounced",
    "late fee",
    "late payment",
    "interest charge",
    "cash advance",
    "cash advance fee",
    // English - services
    "service fee",
    "service charge",
    "convenience fee",
    "processing fee",
    "handling fee",
    "admin fee",
    "administrative",
    "subscription fee",
    "membership fee",
    // Spanish - general
    "comisión",
    "comisiones",
    "cargo",
    "cargos",
    "recargo",
    "recargos",
    "penalización",
    "penalizacion",
    "multa",
    "multas",
    "cuota",
    "cuotas",
    "tarifa",
    "tarifas",
    // Spanish - banking
    "descubierto",
    "sobregiro",
    "números rojos",
    "mantenimiento",
    "mantenimiento cuenta",
    "cuota mensual",
    "cuota anual",
    "cajero",
    "cajero automático",
    "reintegro cajero",
    "transferencia",
    "comisión transferencia",
    "cambio divisa",
    "comisión cambio",
    "tipo de cambio",
    "reposición tarjeta",
    "extracto",
    "extracto papel",
    "inactividad",
    "saldo mínimo",
    "devolución",
    "cheque devuelto",
    "recibo devuelto",
    "demora",
    "pago atrasado",
    "intereses",
    "anticipo",
    "disposición efectivo",
    // Spanish - services
    "gastos",
    "gastos de gestión",
    "gastos administrativos",
    "comisión servicio",
    "comisión apertura",
    "comisión cancelación",
    // German (common in EU)
    "gebühr",
    "gebuhr",
    "kontoführung",
    "kontofuhrung",
    // French (common in EU)
    "frais",
    "agios",
];

/// Detect expense groups whose names match the fee vocabulary.
///
/// A transaction with an unparsable amount still counts toward group
/// membership; only its amount contribution is dropped. Results are sorted
/// by confidence descending, ties broken by total amount descending.
pub fn detect_fees(txs: &[Transaction], config: &FeeConfig) -> Vec<FeeCandidate> {
    let defaults: Vec<String>;
    let keywords: &[String] = if config.keywords.is_empty() {
        defaults = DEFAULT_FEE_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect();
        &defaults
    } else {
        &config.keywords
    };

    let mut by_name: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in txs {
        if tx.classification != Classification::Expense {
            continue;
        }
        let name_lower = tx.name.to_lowercase();
        if !keywords
            .iter()
            .any(|k| name_lower.contains(&k.to_lowercase()))
        {
            continue;
        }
        by_name.entry(tx.name.as_str()).or_default().push(tx);
    }

    let mut out = Vec::with_capacity(by_name.len());
    for (name, list) in by_name {
        let mut total = 0.0;
        let mut sample_tx_ids = Vec::with_capacity(list.len().min(3));
        for (i, tx) in list.iter().enumerate() {
            if let Ok(v) = signed_amount(tx) {
                total += v.abs();
            }
            if i < 3 {
                sample_tx_ids.push(tx.id.clone());
            }
        }
        let avg = if list.is_empty() {
            0.0
        } else {
            total / list.len() as f64
        };

        let mut confidence: f64 = 0.75;
        if list.len() >= 3 {
            confidence += 0.10;
        }
        if avg < 10.0 {
            confidence += 0.05;
        }
        let confidence = confidence.min(1.0);

        let suggested_action = if total > 50.0 {
            "Contact bank to waive or reduce; consider switching accounts"
        } else if avg < 5.0 && list.len() >= 3 {
            "Small recurring fee; check if bundled in account package"
        } else {
            "Check if avoidable"
        };

        out.push(FeeCandidate {
            name: name.to_string(),
            count: list.len(),
            total_amount: round2(total),
            avg_amount: round2(avg),
            sample_tx_ids,
            confidence,
            reason: "keyword_match".to_string(),
            suggested_action: suggested_action.to_string(),
        });
    }

    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.total_amount
                    .partial_cmp(&a.total_amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    debug!(candidates = out.len(), "fee detection complete");
    out
}
