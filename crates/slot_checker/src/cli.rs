use std::io::Read;

use clap::Parser;
use slot_scan::{RequestParams, SlotError, params_from_event_str};

/// Command line for a single availability check
#[derive(Parser, Debug)]
#[command(
    name = "slot-checker",
    about = "Check vaccine availability and email open slots",
    version
)]
pub(crate) struct Cli {
    /// Pincode of the centers to search
    #[arg(short, long)]
    pub(crate) pincode: Option<u32>,

    /// District id of the centers to search
    #[arg(short, long)]
    pub(crate) district: Option<u32>,

    /// First day of the week to search, dd-mm-yyyy (defaults to today)
    #[arg(long)]
    pub(crate) date: Option<String>,

    /// Age of the candidate (defaults to 18)
    #[arg(short, long)]
    pub(crate) age: Option<u32>,

    /// Vaccine brand, e.g. covishield, covaxin, sputnik
    #[arg(short = 'v', long)]
    pub(crate) vaccine: Option<String>,

    /// Email address to notify instead of the configured one
    #[arg(short, long)]
    pub(crate) email: Option<String>,

    /// Read the request from a JSON event (`-` reads stdin); may be base64 wrapped in `data`
    #[arg(
        long,
        conflicts_with_all = ["pincode", "district", "date", "age", "vaccine", "email"]
    )]
    pub(crate) event: Option<String>,

    /// Print the notification instead of sending it
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Request parameters from either the event or the individual flags.
    pub(crate) fn request_params(&self) -> Result<RequestParams, SlotError> {
        match self.event.as_deref() {
            Some("-") => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .map_err(|e| SlotError::InvalidRequest(format!("failed to read stdin: {}", e)))?;
                params_from_event_str(&raw)
            }
            Some(raw) => params_from_event_str(raw),
            None => Ok(RequestParams {
                pincode: self.pincode,
                district: self.district,
                date: self.date.clone(),
                age: self.age,
                vaccine: self.vaccine.clone(),
                email: self.email.clone(),
            }),
        }
    }
}
