//! Account listing command

use anyhow::Result;

use super::{client, print_json};
use crate::settings::Settings;

pub async fn cmd_accounts(settings: &Settings) -> Result<()> {
    let accounts = client(settings)?.list_accounts().await?;
    print_json(&accounts)
}
