//! Backend path conventions and the request status catalog.
//!
//! The backend owns the lifecycle; this side only builds the URLs forms post
//! to and renders status codes.

use crate::domain::constants::EDIT_PATH_MARKER;
use crate::domain::models::{FormContext, RouteReport, StatusReport};
use clap::ValueEnum;

pub fn form_context(path: &str) -> FormContext {
    if path.contains(EDIT_PATH_MARKER) {
        FormContext::Edit
    } else {
        FormContext::Create
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouteAction {
    Cancel,
    Delete,
    Edit,
    AdminEdit,
    View,
    AdminView,
    CreateContract,
}

pub fn request_route(action: RouteAction, id: u64) -> RouteReport {
    let (method, path) = match action {
        RouteAction::Cancel => ("POST", format!("/solicitacao/{}/cancelar", id)),
        RouteAction::Delete => ("POST", format!("/admin/solicitacao/{}/deletar", id)),
        RouteAction::Edit => ("POST", format!("/solicitacao/{}/editar", id)),
        RouteAction::AdminEdit => ("POST", format!("/admin/solicitacao/{}/editar", id)),
        RouteAction::View => ("GET", format!("/solicitacao/{}", id)),
        RouteAction::AdminView => ("GET", format!("/admin/solicitacao/{}", id)),
        RouteAction::CreateContract => {
            ("POST", format!("/admin/solicitacao/{}/criar-contrato", id))
        }
    };
    RouteReport {
        action: action
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default(),
        method: method.to_string(),
        path,
    }
}

pub fn update_status_route() -> RouteReport {
    RouteReport {
        action: "update-status".into(),
        method: "POST".into(),
        path: "/admin/update-status".into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Solicitada,
    Confirmada,
    Realizada,
    Cancelada,
    // pre-migration codes still present on old rows
    Pendente,
    EmAndamento,
    Concluido,
}

impl ServiceStatus {
    pub const CURRENT: [ServiceStatus; 4] = [
        ServiceStatus::Solicitada,
        ServiceStatus::Confirmada,
        ServiceStatus::Realizada,
        ServiceStatus::Cancelada,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "SOLICITADA" => ServiceStatus::Solicitada,
            "CONFIRMADA" => ServiceStatus::Confirmada,
            "REALIZADA" => ServiceStatus::Realizada,
            "CANCELADA" => ServiceStatus::Cancelada,
            "pendente" => ServiceStatus::Pendente,
            "em_andamento" => ServiceStatus::EmAndamento,
            "concluido" => ServiceStatus::Concluido,
            _ => return None,
        })
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::CURRENT.into_iter().find(|s| s.id() == Some(id))
    }

    pub fn code(self) -> &'static str {
        match self {
            ServiceStatus::Solicitada => "SOLICITADA",
            ServiceStatus::Confirmada => "CONFIRMADA",
            ServiceStatus::Realizada => "REALIZADA",
            ServiceStatus::Cancelada => "CANCELADA",
            ServiceStatus::Pendente => "pendente",
            ServiceStatus::EmAndamento => "em_andamento",
            ServiceStatus::Concluido => "concluido",
        }
    }

    pub fn id(self) -> Option<u8> {
        match self {
            ServiceStatus::Solicitada => Some(1),
            ServiceStatus::Confirmada => Some(2),
            ServiceStatus::Realizada => Some(3),
            ServiceStatus::Cancelada => Some(4),
            _ => None,
        }
    }

    pub fn css_class(self) -> String {
        format!("status-{}", self.code().to_lowercase())
    }

    pub fn display(self) -> &'static str {
        match self {
            ServiceStatus::Solicitada => "Solicitada",
            ServiceStatus::Confirmada => "Confirmada",
            ServiceStatus::Realizada => "Realizada",
            ServiceStatus::Cancelada => "Cancelada",
            ServiceStatus::Pendente => "Pendente",
            ServiceStatus::EmAndamento => "Em Andamento",
            ServiceStatus::Concluido => "Concluído",
        }
    }
}

/// Unknown codes render with the default badge and an "unknown" label.
pub fn status_report(code: &str) -> StatusReport {
    let parsed = ServiceStatus::from_code(code).or_else(|| {
        code.parse::<u8>()
            .ok()
            .and_then(ServiceStatus::from_id)
    });
    match parsed {
        Some(s) => StatusReport {
            code: s.code().to_string(),
            id: s.id(),
            css_class: s.css_class(),
            display: s.display().to_string(),
        },
        None => StatusReport {
            code: code.to_string(),
            id: None,
            css_class: ServiceStatus::Solicitada.css_class(),
            display: "Desconhecido".to_string(),
        },
    }
}
