//! Finance-service API client
//!
//! A thin typed wrapper over the service's JSON API. Responses deserialize
//! into wire structs here and are normalized into the `models` types before
//! anything else sees them; the analytics core never touches dynamic JSON.
//!
//! No retry or backoff: a failed page fails the whole fetch, and retry
//! policy belongs to whoever drives the client.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Account, Classification, Transaction};

const DEFAULT_PER_PAGE: u32 = 100;

/// How requests authenticate against the service.
#[derive(Debug, Clone)]
pub enum Auth {
    Bearer(String),
    ApiKey(String),
    None,
}

/// Typed client for the finance-service API.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    auth: Auth,
}

impl Client {
    pub fn new(base_url: &str, auth: Auth) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let req = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.auth {
            Auth::Bearer(token) => req.bearer_auth(token),
            Auth::ApiKey(key) => req.header("X-Api-Key", key),
            Auth::None => req,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.request(path).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch all transactions dated within [start, end], paging until the
    /// reported page count is exhausted. Returns normalized records in API
    /// order.
    pub async fn fetch_transactions_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        per_page: u32,
    ) -> Result<Vec<Transaction>> {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };

        let mut page = 1u32;
        let mut all = Vec::new();
        loop {
            let body: TransactionsPage = self
                .get_json(
                    "/api/v1/transactions",
                    &[
                        ("page", page.to_string()),
                        ("per_page", per_page.to_string()),
                        ("start_date", start.format("%Y-%m-%d").to_string()),
                        ("end_date", end.format("%Y-%m-%d").to_string()),
                    ],
                )
                .await?;

            all.extend(body.transactions.into_iter().map(WireTransaction::normalize));

            match body.pagination {
                Some(p) if page < p.total_pages => page += 1,
                _ => break,
            }
        }

        debug!(count = all.len(), pages = page, "fetched transaction window");
        Ok(all)
    }

    /// List all accounts with their balance strings.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let body: AccountsPage = self.get_json("/api/v1/accounts", &[]).await?;
        Ok(body.accounts.into_iter().map(WireAccount::normalize).collect())
    }
}

#[derive(Debug, Deserialize)]
struct TransactionsPage {
    #[serde(default)]
    transactions: Vec<WireTransaction>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct WireTransaction {
    id: String,
    #[serde(default)]
    name: String,
    classification: Option<Classification>,
    #[serde(rename = "amount", default)]
    amount_text: String,
    #[serde(default)]
    currency: String,
    date: NaiveDate,
    account: Option<WireRef>,
    category: Option<WireRef>,
    merchant: Option<WireRef>,
}

#[derive(Debug, Deserialize)]
struct WireRef {
    id: Option<String>,
    name: Option<String>,
}

impl WireTransaction {
    fn normalize(self) -> Transaction {
        Transaction {
            id: self.id,
            name: self.name,
            classification: self.classification.unwrap_or(Classification::Other),
            amount_text: self.amount_text,
            currency: self.currency,
            date: self.date,
            account_name: self
                .account
                .and_then(|a| a.name)
                .unwrap_or_default(),
            category_name: self.category.as_ref().and_then(|c| c.name.clone()),
            category_id: self.category.and_then(|c| c.id),
            merchant_name: self.merchant.and_then(|m| m.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountsPage {
    #[serde(default)]
    accounts: Vec<WireAccount>,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "balance", default)]
    balance_text: String,
    #[serde(default)]
    currency: String,
    classification: Option<String>,
}

impl WireAccount {
    fn normalize(self) -> Account {
        Account {
            id: self.id,
            name: self.name,
            balance_text: self.balance_text,
            currency: self.currency,
            classification: self.classification,
        }
    }
}
