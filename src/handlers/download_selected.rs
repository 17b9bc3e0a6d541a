use teloxide::types::{ChatId, UserId};

use crate::{
    dispatcher::AppState,
    errors::HandlerResult,
    localization::get_messages,
    payload::DownloadRequest,
};

pub async fn download_selected(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    request: DownloadRequest,
) -> HandlerResult {
    let Some(url) = state.links.resolve(&request.link).await else {
        log::warn!("Stored link {:?} is gone", request.link);
        let tr = get_messages(state.sessions.language(user_id).await);
        state.messenger.send_text(chat_id, tr.link_expired_text).await?;
        return Ok(());
    };

    state
        .downloads
        .handle_download(chat_id, user_id, request.kind, &url)
        .await
}
