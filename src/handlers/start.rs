use teloxide::types::ChatId;

use crate::{
    dispatcher::AppState,
    errors::HandlerResult,
    localization::{LANGUAGE_PROMPT, Language},
    messenger::{Button, Keyboard},
    payload::CallbackAction,
};

pub async fn start(state: &AppState, chat_id: ChatId) -> HandlerResult {
    let keyboard = Keyboard::single_row(Language::all().map(|language| {
        Button::new(
            language.native_name(),
            CallbackAction::LanguageSelected(language).encode(),
        )
    }));

    state
        .messenger
        .send_keyboard(chat_id, LANGUAGE_PROMPT, keyboard)
        .await
}
