use teloxide::types::{ChatId, UserId};

use crate::{
    dispatcher::AppState,
    errors::HandlerResult,
    localization::{Language, get_messages},
};

pub async fn language_selected(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    language: Language,
) -> HandlerResult {
    state.sessions.set_language(user_id, language).await;

    let tr = get_messages(language);
    state.messenger.send_text(chat_id, tr.start_text).await?;
    state.messenger.send_text(chat_id, tr.ask_link_text).await?;
    Ok(())
}
