use std::sync::Arc;

use anyhow::Result;
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::prelude::*;
use teloxide::types::{Chat, InputFile, ReplyParameters};
use tracing::{info, warn};

use crate::classifier::ResponseDirective;
use crate::platform::{ChatKind, IncomingMessage, Reply};
use crate::responder::Responder;
use crate::responses::help_text;

/// Commands the bot answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Help,
    Dog,
}

/// Recognise `/cmd` and `/cmd@botname` as the first word of a message.
fn parse_command(text: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?.strip_prefix('/')?;
    let name = first.split('@').next().unwrap_or(first);
    match name.to_lowercase().as_str() {
        "start" => Some(Command::Start),
        "help" => Some(Command::Help),
        "dog" => Some(Command::Dog),
        _ => None,
    }
}

fn chat_kind(chat: &Chat) -> ChatKind {
    if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else if chat.is_channel() {
        ChatKind::Channel
    } else {
        ChatKind::Private
    }
}

/// Run the Telegram bot platform
pub async fn run(responder: Arc<Responder>, bot_token: &str) -> Result<()> {
    let bot = Bot::new(bot_token);

    info!("Starting Telegram platform...");

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![responder])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, responder: Arc<Responder>) -> ResponseResult<()> {
    let kind = chat_kind(&msg.chat);

    let incoming = if let Some(text) = msg.text() {
        match parse_command(text) {
            Some(Command::Start | Command::Help) => {
                bot.send_message(msg.chat.id, help_text()).await?;
                return Ok(());
            }
            Some(Command::Dog) => {
                if let Some(reply) = responder.fulfil(ResponseDirective::random_dog()).await {
                    send_reply(&bot, &msg, reply).await?;
                }
                return Ok(());
            }
            None => IncomingMessage::text(text, kind),
        }
    } else if let Some(sticker) = msg.sticker() {
        IncomingMessage::sticker(sticker.emoji.clone(), kind)
    } else {
        return Ok(());
    };

    if let Some(reply) = responder.respond(&incoming).await {
        send_reply(&bot, &msg, reply).await?;
    }

    Ok(())
}

/// Send a reply to the message that triggered it.
async fn send_reply(bot: &Bot, msg: &Message, reply: Reply) -> ResponseResult<()> {
    match reply {
        Reply::Photo { url, caption } => {
            let url = match reqwest::Url::parse(&url) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Provider returned an invalid picture URL '{}': {}", url, e);
                    return Ok(());
                }
            };
            bot.send_photo(msg.chat.id, InputFile::url(url))
                .caption(caption)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
        Reply::Text(text) => {
            bot.send_message(msg.chat.id, text)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
    }
    Ok(())
}
