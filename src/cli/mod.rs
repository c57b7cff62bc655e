use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::AppConfig;
use crate::services::{format_amount, to_minutes, BookingsService, Summarizer};
use crate::services::duration::{duration, UNPARSEABLE};
use crate::store::JsonExportStore;
use crate::types::{BookingPage, PageCursor, PageRequest, TimeValue};

/// Admin toolkit for tutoring-platform bookings
#[derive(Parser)]
#[command(name = "bookdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.bookdesk/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookings from a database export
    Bookings {
        /// Export file (overrides config `source`)
        #[arg(long)]
        source: Option<PathBuf>,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Records per page (overrides config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Continue after this cursor
        #[arg(long)]
        cursor: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Duration between two time values
    Duration {
        start: String,
        end: String,
    },

    /// Format a minor-unit amount
    Amount {
        /// Amount in minor units (e.g. paise)
        minor: f64,

        /// ISO currency code
        #[arg(long)]
        currency: Option<String>,
    },

    /// Minutes since local midnight for a time value
    Minutes {
        value: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Bookings {
                source,
                page,
                page_size,
                cursor,
                json,
            } => {
                let source = source
                    .or_else(|| config.source.clone())
                    .context("no export file: pass --source or set `source` in config")?;
                let request = PageRequest {
                    page,
                    page_size: page_size.unwrap_or(config.page_size),
                    cursor: cursor.map(PageCursor::new),
                };

                let store = Arc::new(
                    JsonExportStore::open(&source)
                        .with_context(|| format!("failed to load {}", source.display()))?,
                );
                let summarizer = Summarizer::new(config.offset()?)
                    .with_default_currency(config.default_currency.clone());
                let service = BookingsService::new(store.clone(), store, summarizer);

                let page = service.list(&request)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&page)?);
                } else {
                    print!("{}", render_table(&page));
                }
                Ok(())
            }
            Commands::Duration { start, end } => {
                let offset = config.offset()?;
                let start = time_arg(&start);
                let end = time_arg(&end);
                println!("{}", duration(start.as_ref(), end.as_ref(), offset));
                Ok(())
            }
            Commands::Amount { minor, currency } => {
                let currency = currency.unwrap_or(config.default_currency);
                println!("{}", format_amount(Some(minor), Some(&currency)));
                Ok(())
            }
            Commands::Minutes { value } => {
                let offset = config.offset()?;
                match to_minutes(time_arg(&value).as_ref(), offset) {
                    Some(minutes) => println!("{}", minutes),
                    None => println!("{}", UNPARSEABLE),
                }
                Ok(())
            }
        }
    }
}

/// Command-line time arguments go through the same ingestion as record fields
fn time_arg(raw: &str) -> Option<TimeValue> {
    TimeValue::from_json(&Value::String(raw.to_string()))
}

const COLUMNS: [&str; 7] = [
    "Student", "Mentor", "Time Slot", "Duration", "Amount", "Booking", "Payment",
];

fn render_table(page: &BookingPage) -> String {
    let rows: Vec<[String; 7]> = page
        .summaries
        .iter()
        .map(|s| {
            [
                s.student_name.clone(),
                s.mentor_name.clone(),
                s.time_slot.clone(),
                s.duration.clone(),
                s.amount.clone(),
                s.booking_status.to_string(),
                s.payment_status.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&render_row(&COLUMNS.map(String::from), &widths));
    out.push_str(&render_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        out.push_str(&render_row(row, &widths));
    }

    out.push_str(&format!(
        "\nPage {} · {} per page · {} total\n",
        page.page, page.page_size, page.total_count
    ));
    if let Some(cursor) = &page.cursor {
        out.push_str(&format!("Next: --cursor {}\n", cursor));
    }
    out
}

fn render_row(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}
