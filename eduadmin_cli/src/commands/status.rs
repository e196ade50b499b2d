//! Backend health snapshot with aggregate statistics.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use eduadmin_lib::Client;

use crate::output::{
    print_json, print_status_csv, print_status_markdown, print_status_table, OutputFormat,
};

pub async fn run(client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let resp = client.get_system_status().await?;
    if !resp.success {
        bail!(
            "{}",
            resp.message
                .unwrap_or_else(|| "request rejected by the server".to_string())
        );
    }
    let status = resp.data.context("no status payload in the answer")?;
    match format {
        OutputFormat::Table => print_status_table(&status),
        OutputFormat::Json => print_json(&status),
        OutputFormat::Csv => print_status_csv(&status)?,
        OutputFormat::Markdown => print_status_markdown(&status),
    }
    Ok(())
}
