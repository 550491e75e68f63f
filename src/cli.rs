use clap::{Parser, Subcommand};
use solicita::services::routes::RouteAction;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solicita", version, about = "Service request portal form engine")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "CEP lookup source (ViaCEP-style base url or fixture directory)"
    )]
    pub cep_source: Option<String>,
    #[arg(long, global = true, help = "CEP lookup timeout in milliseconds")]
    pub timeout_ms: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Mask {
        #[command(subcommand)]
        command: MaskCommands,
    },
    Cep {
        #[command(subcommand)]
        command: CepCommands,
    },
    Validate {
        #[arg(long, help = "JSON form snapshot")]
        form: PathBuf,
        #[arg(long, default_value = "/solicitar-servico", help = "Page path the form lives on")]
        path: String,
        #[arg(long, default_value_t = false, help = "Also require a 20+ char description")]
        detailed: bool,
    },
    Session {
        #[arg(long, help = "JSON event script")]
        script: PathBuf,
    },
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    Status {
        #[command(subcommand)]
        command: StatusCommands,
    },
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },
    Contract {
        #[command(subcommand)]
        command: ContractCommands,
    },
    Format {
        #[command(subcommand)]
        command: FormatCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum MaskCommands {
    Phone { raw: String },
    Cep { raw: String },
}

#[derive(Subcommand, Debug)]
pub enum CepCommands {
    Lookup { code: String },
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    Csv {
        #[arg(long, help = "JSON table ({\"rows\": [[...], ...]})")]
        table: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long, help = "Zero-based column to sort body rows by")]
        sort_by: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    Show { code: String },
    List,
}

#[derive(Subcommand, Debug)]
pub enum RouteCommands {
    Request {
        #[arg(value_enum)]
        action: RouteAction,
        id: u64,
    },
    UpdateStatus,
}

#[derive(Subcommand, Debug)]
pub enum ContractCommands {
    PrintPlan {
        #[arg(long, help = "JSON list of signature image states")]
        signatures: PathBuf,
    },
    PdfPlan {
        #[arg(long, default_value_t = false)]
        no_content: bool,
        #[arg(long, default_value_t = false)]
        no_renderer: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FormatCommands {
    Currency {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    Date { value: String },
    Time { value: String },
}
