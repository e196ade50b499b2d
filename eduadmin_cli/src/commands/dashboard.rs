//! Headline record counts for the landing screen.

use std::sync::Arc;

use anyhow::Result;
use eduadmin_lib::Client;

use crate::output::{
    print_json, print_stats_csv, print_stats_markdown, print_stats_table, OutputFormat,
};

pub async fn run(client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let stats = client.get_dashboard_stats().await?;
    match format {
        OutputFormat::Table => print_stats_table(&stats),
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Csv => print_stats_csv(&stats)?,
        OutputFormat::Markdown => print_stats_markdown(&stats),
    }
    Ok(())
}
