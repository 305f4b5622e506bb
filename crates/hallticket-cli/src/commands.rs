// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand definitions and handlers.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hallticket_core::error::{HallTicketError, Result};
use hallticket_core::{CardConfig, Subject, SubjectCatalog};
use hallticket_document::{
    AdmitCardComposer, PdfReader, PdfWriter, admit_card_filename, parse_records,
};
use tracing::{info, instrument, warn};

/// Parsed command line for the `hallticket` binary.
#[derive(Parser, Debug)]
#[command(name = "hallticket", version, about = "Admit card (hall ticket) generator")]
pub struct Cli {
    /// Card configuration (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one admit card.
    Generate {
        /// Student record (JSON object).
        #[arg(long)]
        student: PathBuf,
        /// Exam sessions (JSON object or list of objects).
        #[arg(long)]
        sessions: PathBuf,
        /// Subject list used to name sessions that only carry a code.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Generate one card per student, all sharing the same sessions.
    Batch {
        /// List of student records (JSON array).
        #[arg(long)]
        students: PathBuf,
        #[arg(long)]
        sessions: PathBuf,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print page count and page sizes of an existing PDF.
    Inspect {
        file: PathBuf,
    },
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CardConfig::from_json_file(path)?,
        None => CardConfig::default(),
    };

    match cli.command {
        Command::Generate {
            student,
            sessions,
            catalog,
            out,
        } => {
            let composer = composer(config, catalog.as_deref())?;
            let path = generate(
                &composer,
                &read_json(&student)?,
                &read_json(&sessions)?,
                &out,
            )?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Batch {
            students,
            sessions,
            catalog,
            out,
        } => {
            let composer = composer(config, catalog.as_deref())?;
            let written = batch(&composer, &read_json(&students)?, &read_json(&sessions)?, &out)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Inspect { file } => {
            print!("{}", inspect(&file)?);
            Ok(())
        }
    }
}

fn composer(config: CardConfig, catalog: Option<&Path>) -> Result<AdmitCardComposer> {
    let composer = AdmitCardComposer::new(config);
    match catalog {
        Some(path) => Ok(composer.with_catalog(load_catalog(path)?)),
        None => Ok(composer),
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn load_catalog(path: &Path) -> Result<SubjectCatalog> {
    let subjects: Vec<Subject> = serde_json::from_value(read_json(path)?)?;
    let catalog: SubjectCatalog = subjects.into_iter().collect();
    info!(subjects = catalog.len(), "Subject catalog loaded");
    Ok(catalog)
}

/// Compose, render and write one card into `out`. Returns the written path.
#[instrument(skip_all, fields(out = %out.display()))]
fn generate(
    composer: &AdmitCardComposer,
    student: &serde_json::Value,
    sessions: &serde_json::Value,
    out: &Path,
) -> Result<PathBuf> {
    let (student, sessions) = parse_records(student, sessions)?;
    let layout = composer.compose(&student, &sessions);

    std::fs::create_dir_all(out)?;
    let path = out.join(admit_card_filename(&student.name));
    PdfWriter::new().write_to_file(&layout, &path)?;
    Ok(path)
}

/// One card per entry of `students`. A malformed entry is skipped with a
/// warning; the rest are still written.
fn batch(
    composer: &AdmitCardComposer,
    students: &serde_json::Value,
    sessions: &serde_json::Value,
    out: &Path,
) -> Result<Vec<PathBuf>> {
    let serde_json::Value::Array(students) = students else {
        return Err(HallTicketError::InvalidInput(
            "batch input must be a list of student records".into(),
        ));
    };

    let mut written = Vec::with_capacity(students.len());
    for (index, student) in students.iter().enumerate() {
        match generate(composer, student, sessions, out) {
            Ok(path) => written.push(path),
            Err(HallTicketError::InvalidInput(reason)) => {
                warn!(index, %reason, "Skipping student record");
            }
            Err(e) => return Err(e),
        }
    }
    info!(cards = written.len(), of = students.len(), "Batch complete");
    Ok(written)
}

fn inspect(path: &Path) -> Result<String> {
    let reader = PdfReader::open(path)?;
    let mut report = format!("{}: {} page(s)\n", path.display(), reader.page_count());
    for page in 1..=reader.page_count() as u32 {
        let (w, h) = reader.page_size_pt(page)?;
        report.push_str(&format!("  page {page}: {w:.2} x {h:.2} pt\n"));
    }
    Ok(report)
}
