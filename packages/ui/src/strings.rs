//! Interface text for each supported locale.

use journal::{JournalError, Locale, ValidationError};

pub struct Strings {
    pub loading: &'static str,
    pub empty: &'static str,
    pub failed: &'static str,
    pub no_matches: &'static str,
    pub search: &'static str,
    pub new_entry: &'static str,
    pub edit_entry: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub image_url: &'static str,
    pub date: &'static str,
    pub save: &'static str,
    pub saving: &'static str,
    pub cancel: &'static str,
    pub close: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub confirm_delete: &'static str,
    pub admin_on: &'static str,
    pub admin_off: &'static str,
    pub password: &'static str,
    pub unlock: &'static str,
    pub memory_only: &'static str,
}

const PT_PT: Strings = Strings {
    loading: "A carregar…",
    empty: "Ainda não há textos.",
    failed: "Não foi possível carregar os textos.",
    no_matches: "Nenhum texto corresponde à pesquisa.",
    search: "Pesquisar",
    new_entry: "Novo texto",
    edit_entry: "Editar texto",
    title: "Título",
    content: "Texto",
    image_url: "URL da imagem (opcional)",
    date: "Data",
    save: "Guardar",
    saving: "A guardar…",
    cancel: "Cancelar",
    close: "Fechar",
    edit: "Editar",
    delete: "Apagar",
    confirm_delete: "Apagar este texto? Esta ação não pode ser desfeita.",
    admin_on: "Sair do modo de edição",
    admin_off: "Modo de edição",
    password: "Palavra-passe",
    unlock: "Entrar",
    memory_only: "Os textos estão só nesta sessão.",
};

const EN: Strings = Strings {
    loading: "Loading…",
    empty: "No entries yet.",
    failed: "Entries could not be loaded.",
    no_matches: "No entries match the search.",
    search: "Search",
    new_entry: "New entry",
    edit_entry: "Edit entry",
    title: "Title",
    content: "Text",
    image_url: "Image URL (optional)",
    date: "Date",
    save: "Save",
    saving: "Saving…",
    cancel: "Cancel",
    close: "Close",
    edit: "Edit",
    delete: "Delete",
    confirm_delete: "Delete this entry? This cannot be undone.",
    admin_on: "Leave admin mode",
    admin_off: "Admin mode",
    password: "Password",
    unlock: "Unlock",
    memory_only: "Entries only live in this session.",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::PtPt => &PT_PT,
        Locale::En => &EN,
    }
}

/// Message shown under the editor form.
pub fn editor_error(error: &JournalError, locale: Locale) -> String {
    match (error, locale) {
        (JournalError::Validation(ValidationError::EmptyTitle), Locale::PtPt) => {
            "O título é obrigatório.".to_string()
        }
        (JournalError::Validation(ValidationError::EmptyContent), Locale::PtPt) => {
            "O texto é obrigatório.".to_string()
        }
        (JournalError::Validation(ValidationError::InvalidDate(_)), Locale::PtPt) => {
            "A data deve estar no formato AAAA-MM-DD.".to_string()
        }
        (JournalError::Store(e), Locale::PtPt) => format!("Não foi possível guardar: {e}"),
        (other, _) => other.to_string(),
    }
}
