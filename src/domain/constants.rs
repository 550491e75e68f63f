pub const DEFAULT_CEP_SOURCE: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

pub const CEP_DIGITS: usize = 8;
pub const PHONE_MAX_DIGITS: usize = 11;
pub const MIN_FULL_NAME_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 20;
/// Business hours, half-open: `[OPEN_HOUR, CLOSE_HOUR)`.
pub const OPEN_HOUR: u32 = 8;
pub const CLOSE_HOUR: u32 = 17;

pub const EDIT_PATH_MARKER: &str = "/editar";
pub const SIGNATURE_PRINT_DELAY_MS: u64 = 500;

// form field ids
pub const FIELD_SERVICE_TYPE: &str = "service_type";
pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_CEP: &str = "cep";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_STREET: &str = "logradouro";
pub const FIELD_DISTRICT: &str = "bairro";
pub const FIELD_CITY: &str = "cidade";
pub const FIELD_STATE: &str = "estado";
pub const FIELD_NUMBER: &str = "numero";
pub const FIELD_PREFERRED_TIME: &str = "preferred_time";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SEARCH: &str = "search";

pub const DEFAULT_SUBMIT_LABEL: &str = "Enviar Solicitação";
pub const BUSY_LABEL_CREATE: &str = "Enviando...";
pub const BUSY_LABEL_EDIT: &str = "Salvando...";

pub const MSG_SELECT_SERVICE: &str = "Por favor, selecione um tipo de serviço.";
pub const MSG_FULL_NAME: &str = "Por favor, digite seu nome completo.";
pub const MSG_CEP_INVALID: &str = "Por favor, digite um CEP válido com 8 dígitos.";
pub const MSG_BUSINESS_HOURS: &str = "Por favor, selecione um horário entre 08:00 e 17:00.";
pub const MSG_DESCRIPTION: &str =
    "Por favor, descreva o serviço com pelo menos 20 caracteres.";

pub const MSG_CEP_LENGTH: &str = "CEP deve conter 8 dígitos";
pub const MSG_CEP_NOT_FOUND: &str = "CEP não encontrado. Verifique e tente novamente.";
pub const MSG_CEP_FILLED: &str = "Endereço preenchido com sucesso!";
pub const MSG_CEP_NO_DATA: &str = "CEP válido, mas sem dados de endereço. Preencha manualmente.";
pub const MSG_CEP_FAILED: &str = "Erro ao buscar CEP. Verifique sua conexão e tente novamente.";

pub const MSG_NO_TABLE: &str = "Nenhuma tabela encontrada para exportar";
