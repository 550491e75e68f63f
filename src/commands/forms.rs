use crate::cli::{CepCommands, Cli, Commands, MaskCommands};
use anyhow::Context;
use solicita::config::Config;
use solicita::domain::models::{FormSnapshot, FormVariant, LookupReport, Mask, MaskReport};
use solicita::services::cep::{lookup, open_source};
use solicita::services::gatekeeper::gate;
use solicita::services::mask;
use solicita::services::output::print_one;
use solicita::services::routes::form_context;
use solicita::services::session::{PageSession, SessionConfig, SessionScript};
use std::path::Path;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn handle_form_commands(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Mask { command } => {
            let (kind, raw) = match command {
                MaskCommands::Phone { raw } => (Mask::Phone, raw),
                MaskCommands::Cep { raw } => (Mask::Cep, raw),
            };
            let report = MaskReport {
                mask: kind,
                raw: raw.clone(),
                masked: mask::apply(kind, raw),
            };
            print_one(cli.json, report, |r| r.masked.clone())?;
        }
        Commands::Cep { command } => match command {
            CepCommands::Lookup { code } => {
                let source = open_source(&config.cep_source, config.timeout_ms)?;
                let address = lookup(source.as_ref(), code)
                    .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
                let populated = address.populated_count();
                let report = LookupReport {
                    cep: mask::digits_only(code),
                    outcome: if populated > 0 { "filled" } else { "no_data" }.to_string(),
                    populated,
                    address,
                };
                print_one(cli.json, report, |r| {
                    let a = &r.address;
                    [
                        ("logradouro", &a.street),
                        ("bairro", &a.district),
                        ("cidade", &a.city),
                        ("estado", &a.state_code),
                    ]
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.as_deref().unwrap_or("")))
                    .collect::<Vec<_>>()
                    .join("\n")
                })?;
            }
        },
        Commands::Validate {
            form,
            path,
            detailed,
        } => {
            let snapshot: FormSnapshot = read_json(form)?;
            let variant = if *detailed {
                FormVariant::Detailed
            } else {
                FormVariant::Standard
            };
            let report = gate(&snapshot, variant, form_context(path));
            let blocked = report.outcome.message.clone().filter(|_| !report.outcome.valid);
            print_one(cli.json, report, |r| match &r.busy_label {
                Some(label) => format!("ok\t{}", label),
                None => format!(
                    "blocked\t{}\t{}",
                    r.outcome.failed_field.as_deref().unwrap_or(""),
                    r.outcome.message.as_deref().unwrap_or("")
                ),
            })?;
            if let Some(message) = blocked {
                anyhow::bail!("submission blocked: {}", message);
            }
        }
        Commands::Session { script } => {
            let script: SessionScript = read_json(script)?;
            let source = open_source(&config.cep_source, config.timeout_ms)?;
            let mut session = PageSession::new(SessionConfig {
                path: script.path,
                variant: script.variant,
                trigger: script.trigger,
                notification_ttl_ms: config.notification_ttl_ms,
                search_debounce_ms: config.search_debounce_ms,
                today: chrono::Local::now().date_naive(),
            });
            session.prefill(&script.fields);
            session.run(script.events, source.as_ref());

            print_one(cli.json, session.summary(), |s| {
                let mut lines = vec![format!("phase: {:?}", s.phase).to_lowercase()];
                lines.extend(
                    s.fields
                        .iter()
                        .filter(|(_, v)| !v.is_empty())
                        .map(|(k, v)| format!("{}: {}", k, v)),
                );
                if let Some(focus) = &s.focus {
                    lines.push(format!("focus: {}", focus));
                }
                lines.extend(
                    s.notifications
                        .iter()
                        .map(|n| format!("[{}] {}", format!("{:?}", n.level).to_lowercase(), n.message)),
                );
                lines.join("\n")
            })?;
        }
        Commands::Export { .. }
        | Commands::Status { .. }
        | Commands::Route { .. }
        | Commands::Contract { .. }
        | Commands::Format { .. } => {
            anyhow::bail!("dashboard commands are not handled by the form dispatcher")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::handle_form_commands;
    use crate::cli::Cli;
    use clap::Parser;
    use solicita::config::Config;

    #[test]
    fn dashboard_command_is_an_error_not_a_panic() {
        let cli = Cli::parse_from(["solicita", "status", "list"]);
        let config = Config {
            cep_source: ".".into(),
            timeout_ms: 100,
            notification_ttl_ms: 5000,
            search_debounce_ms: 500,
        };
        let err = handle_form_commands(&cli, &config).expect_err("not a form command");
        assert!(err.to_string().contains("form dispatcher"));
    }
}
