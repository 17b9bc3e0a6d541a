use teloxide::types::{ChatId, UserId};

use crate::{
    dispatcher::AppState,
    errors::HandlerResult,
    localization::get_messages,
    messenger::{Button, Keyboard},
    payload::MediaKind,
};

/// Any text is treated as a link, bad ones fail later at extraction
pub async fn link_received(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    text: &str,
) -> HandlerResult {
    let tr = get_messages(state.sessions.language(user_id).await);
    let (audio_label, video_label) = tr.button_labels;

    let audio = state.links.request_for(MediaKind::Audio, text).await;
    let video = state.links.request_for(MediaKind::Video, text).await;

    let keyboard = Keyboard::single_row([
        Button::new(audio_label, audio.encode()),
        Button::new(video_label, video.encode()),
    ]);

    state
        .messenger
        .send_keyboard(chat_id, tr.choose_type_text, keyboard)
        .await
}
