//! User-facing copy. Errors never surface technical detail, only these fixed texts.

/// Title + body pair shown in a toast or dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

pub const SERVER_ERROR: Notice = Notice {
    title: "Error de conexión",
    message: "No se pudo comunicar con el servidor",
};

pub const INVALID_RESPONSE: Notice = Notice {
    title: "Error",
    message: "Respuesta inválida del servidor",
};

pub const EMPTY_CONVERSATION: Notice = Notice {
    title: "Conversación vacía",
    message: "Escribe al menos un mensaje antes de crear una nueva conversación",
};

pub const DELETE_CONFIRM: Notice = Notice {
    title: "Eliminar conversación",
    message: "¿Estás seguro de que deseas eliminar esta conversación? Esta acción no se puede deshacer.",
};
pub const DELETE_CONFIRM_LABEL: &str = "Eliminar";

pub const DELETE_SUCCESS: Notice = Notice {
    title: "Conversación eliminada",
    message: "La conversación se eliminó correctamente",
};

pub const DELETE_REPLACED: Notice = Notice {
    title: "Conversación eliminada",
    message: "Nueva conversación creada automáticamente",
};

pub const DELETE_ERROR: Notice = Notice {
    title: "Error al eliminar",
    message: "No se pudo eliminar la conversación",
};

pub const CREATE_SUCCESS: Notice = Notice {
    title: "Nueva conversación",
    message: "Conversación creada correctamente",
};

pub const CREATE_ERROR: Notice = Notice {
    title: "Error al crear",
    message: "No se pudo crear la conversación",
};

pub const LOAD_ERROR: Notice = Notice {
    title: "Error al cargar",
    message: "No se pudo cargar la conversación",
};

pub const EMPTY_SIDEBAR: &str = "No hay conversaciones";

pub const WELCOME_TITLE: &str = "¡Hola! Soy tu asistente";
pub const WELCOME_SUBTITLE: &str = "¿En qué puedo ayudarte hoy?";

pub const PLACEHOLDER_IDLE: &str = "Escribe tu mensaje...";
pub const PLACEHOLDER_LISTENING: &str = "Escuchando...";
pub const PLACEHOLDER_VOICE_ERROR: &str = "Error al escuchar. Intenta escribir.";
