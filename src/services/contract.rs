//! Contract printing.
//!
//! Printing waits briefly when a signature image has not finished loading, so
//! the printed page does not come out with blank signature boxes.

use crate::domain::constants::SIGNATURE_PRINT_DELAY_MS;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct SignatureImage {
    #[serde(default)]
    pub label: Option<String>,
    pub complete: bool,
    #[serde(default)]
    pub natural_width: u32,
    #[serde(default)]
    pub natural_height: u32,
}

impl SignatureImage {
    /// A finished load with zero height is a broken image, not a loaded one.
    pub fn is_ready(&self) -> bool {
        self.complete && self.natural_height > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignatureCheck {
    pub index: usize,
    pub label: Option<String>,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PrintTiming {
    Immediate,
    Delayed { delay_ms: u64 },
}

#[derive(Debug, Serialize)]
pub struct PrintPlan {
    pub timing: PrintTiming,
    pub signatures: Vec<SignatureCheck>,
}

pub fn diagnose(images: &[SignatureImage]) -> Vec<SignatureCheck> {
    images
        .iter()
        .enumerate()
        .map(|(i, img)| SignatureCheck {
            index: i + 1,
            label: img.label.clone(),
            ready: img.is_ready(),
            size: img
                .is_ready()
                .then(|| format!("{}x{}", img.natural_width, img.natural_height)),
        })
        .collect()
}

pub fn plan_print(images: &[SignatureImage]) -> PrintPlan {
    let signatures = diagnose(images);
    for s in signatures.iter().filter(|s| !s.ready) {
        warn!(index = s.index, "signature image not loaded");
    }
    let timing = if signatures.iter().all(|s| s.ready) {
        PrintTiming::Immediate
    } else {
        PrintTiming::Delayed {
            delay_ms: SIGNATURE_PRINT_DELAY_MS,
        }
    };
    info!(?timing, "print planned");
    PrintPlan { timing, signatures }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PdfExport {
    Render { file_name: String },
    /// No PDF renderer on the page; fall back to the browser print dialog.
    Print,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Erro: Conteúdo do contrato não encontrado")]
pub struct MissingContract;

pub fn plan_pdf_export(
    has_content: bool,
    renderer_available: bool,
    now_millis: i64,
) -> Result<PdfExport, MissingContract> {
    if !has_content {
        return Err(MissingContract);
    }
    if !renderer_available {
        warn!("pdf renderer unavailable, printing instead");
        return Ok(PdfExport::Print);
    }
    Ok(PdfExport::Render {
        file_name: format!("contrato-{}.pdf", now_millis),
    })
}
