use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{ChatId, MaybeInaccessibleMessage, UserId},
    utils::command::BotCommands,
};

use crate::{
    dispatcher::{AppState, IncomingEvent, dispatch},
    errors::{BotError, HandlerResult},
};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Choose a language and get started
    Start,
}

pub fn schema() -> UpdateHandler<BotError> {
    dptree::entry()
        .branch(
            // Filter for messages
            Update::filter_message()
                .branch(teloxide::filter_command::<Command, _>().endpoint(command_received))
                // Anything that is not a command is treated as a link
                .branch(
                    Message::filter_text()
                        .filter(|text: String| !text.starts_with('/'))
                        .endpoint(text_received),
                ),
        )
        .branch(Update::filter_callback_query().endpoint(callback_received))
}

fn sender_id(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| user.id)
}

async fn dispatch_from(
    msg: &Message,
    event: Option<IncomingEvent>,
    state: &AppState,
) -> HandlerResult {
    match event {
        Some(event) => dispatch(state, event).await,
        None => {
            log::debug!("Skipping message {} without a sender in {}", msg.id.0, msg.chat.id);
            Ok(())
        }
    }
}

async fn command_received(msg: Message, cmd: Command, state: Arc<AppState>) -> HandlerResult {
    let event = match cmd {
        Command::Start => IncomingEvent::start(msg.chat.id, sender_id(&msg)),
    };
    dispatch_from(&msg, event, &state).await
}

async fn text_received(msg: Message, text: String, state: Arc<AppState>) -> HandlerResult {
    let event = IncomingEvent::text(msg.chat.id, sender_id(&msg), text);
    dispatch_from(&msg, event, &state).await
}

async fn callback_received(query: CallbackQuery, state: Arc<AppState>) -> HandlerResult {
    let chat_id = match &query.message {
        Some(MaybeInaccessibleMessage::Inaccessible(m)) => m.chat.id,
        Some(MaybeInaccessibleMessage::Regular(m)) => m.chat.id,
        // Private chat ids equal user ids
        None => ChatId::from(query.from.id),
    };

    let event = IncomingEvent::Callback {
        chat_id,
        user_id: query.from.id,
        callback_id: query.id.to_string(),
        data: query.data.clone().unwrap_or_default(),
    };
    dispatch(&state, event).await
}
