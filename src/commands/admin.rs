use crate::cli::{
    Cli, Commands, ContractCommands, ExportCommands, FormatCommands, RouteCommands,
    StatusCommands,
};
use anyhow::Context;
use solicita::domain::models::{ExportReport, RouteReport, StatusReport};
use solicita::services::contract::{plan_pdf_export, plan_print, PdfExport, PrintTiming, SignatureImage};
use solicita::services::export::{sort_rows, write_export, Table};
use solicita::services::format::{currency_brl, date_br, time_hm};
use solicita::services::output::{print_one, print_out};
use solicita::services::routes::{request_route, status_report, update_status_route, ServiceStatus};

fn route_line(r: &RouteReport) -> String {
    format!("{}\t{}", r.method, r.path)
}

fn status_line(s: &StatusReport) -> String {
    format!("{}\t{}\t{}", s.code, s.display, s.css_class)
}

pub fn handle_status_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Status { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        StatusCommands::Show { code } => {
            print_one(cli.json, status_report(code), status_line)?;
        }
        StatusCommands::List => {
            let all: Vec<StatusReport> = ServiceStatus::CURRENT
                .iter()
                .map(|s| status_report(s.code()))
                .collect();
            print_out(cli.json, &all, status_line)?;
        }
    }

    Ok(true)
}

pub fn handle_route_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Route { command } = &cli.command else {
        return Ok(false);
    };

    let report = match command {
        RouteCommands::Request { action, id } => request_route(*action, *id),
        RouteCommands::UpdateStatus => update_status_route(),
    };
    print_one(cli.json, report, route_line)?;

    Ok(true)
}

pub fn handle_format_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Format { command } = &cli.command else {
        return Ok(false);
    };

    let text = match command {
        FormatCommands::Currency { value } => currency_brl(*value),
        FormatCommands::Date { value } => {
            date_br(value).with_context(|| format!("unrecognized date: {}", value))?
        }
        FormatCommands::Time { value } => time_hm(value),
    };
    print_one(cli.json, text, |t| t.clone())?;

    Ok(true)
}

pub fn handle_contract_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Contract { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ContractCommands::PrintPlan { signatures } => {
            let raw = std::fs::read_to_string(signatures)
                .with_context(|| format!("reading {}", signatures.display()))?;
            let images: Vec<SignatureImage> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", signatures.display()))?;
            let plan = plan_print(&images);
            print_one(cli.json, plan, |p| {
                let mut lines = vec![match p.timing {
                    PrintTiming::Immediate => "print now".to_string(),
                    PrintTiming::Delayed { delay_ms } => format!("print in {}ms", delay_ms),
                }];
                for s in &p.signatures {
                    lines.push(format!(
                        "signature {}\t{}",
                        s.index,
                        if s.ready { "ready" } else { "pending" }
                    ));
                }
                lines.join("\n")
            })?;
        }
        ContractCommands::PdfPlan {
            no_content,
            no_renderer,
        } => {
            let plan = plan_pdf_export(
                !no_content,
                !no_renderer,
                chrono::Utc::now().timestamp_millis(),
            )?;
            print_one(cli.json, plan, |p| match p {
                PdfExport::Render { file_name } => format!("render {}", file_name),
                PdfExport::Print => "print".to_string(),
            })?;
        }
    }

    Ok(true)
}

pub fn handle_export_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Export { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ExportCommands::Csv {
            table,
            out,
            sort_by,
        } => {
            let raw = std::fs::read_to_string(table)
                .with_context(|| format!("reading {}", table.display()))?;
            let mut data: Table = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", table.display()))?;
            if let Some(column) = sort_by {
                sort_rows(&mut data, *column)?;
            }
            let path = write_export(out, &data, chrono::Utc::now().date_naive())?;
            let report = ExportReport {
                path: path.to_string_lossy().to_string(),
                rows: data.rows.len(),
            };
            print_one(cli.json, report, |r| format!("exported {} rows to {}", r.rows, r.path))?;
        }
    }

    Ok(true)
}
