//! Google Chat tools.

use google_kit_core::{
    ChatMessageQuery, ChatProvider, Error, MemberQuery, NewChatMessage, Result,
};
use google_kit_format::chat::{members_to_json, messages_to_json, spaces_to_json};
use serde::Deserialize;
use serde_json::Value;

use super::{failed, ToolSpec};
use crate::params::{self, count, non_empty, present};
use crate::protocol::ToolDefinition;

const DEFAULT_PAGE_SIZE: u32 = 100;
const NEWEST_FIRST: &str = "createTime desc";

pub(crate) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolSpec::new(
            "gchat_list_spaces",
            "List all available Google Chat spaces/rooms",
        )
        .build(),
        ToolSpec::new(
            "gchat_send_message",
            "Send a message to a Google Chat space or direct message",
        )
        .required_string(
            "space_name",
            "Name of the space to send the message to (e.g. spaces/1234567890)",
        )
        .required_string("message", "Text message to send")
        .string(
            "thread_name",
            "Optional thread name to reply to (e.g. spaces/1234567890/threads/abcdef)",
        )
        .boolean(
            "use_markdown",
            "Whether to format the message using markdown (default: false)",
        )
        .build(),
        ToolSpec::new("gchat_list_users", "List or search for Google Chat users")
            .required_string(
                "space_name",
                "Name of the space to list members from (e.g. spaces/1234567890)",
            )
            .string("query", "Optional search query to filter users by name")
            .number(
                "max_results",
                "Maximum number of users to return (default: 100)",
            )
            .build(),
        ToolSpec::new("gchat_list_messages", "Get messages from a Google Chat space")
            .required_string(
                "space_name",
                "Name of the space to get messages from (e.g. spaces/1234567890)",
            )
            .number(
                "page_size",
                "Maximum number of messages to return (default: 100)",
            )
            .string("page_token", "Page token for pagination")
            .build(),
    ]
}

pub(crate) async fn call(
    chat: &dyn ChatProvider,
    name: &str,
    arguments: Option<Value>,
) -> Result<String> {
    match name {
        "gchat_list_spaces" => {
            let spaces = chat.list_spaces().await.map_err(failed("list spaces"))?;
            spaces_to_json(&spaces)
        }
        "gchat_send_message" => send_message(chat, params::parse(arguments)?).await,
        "gchat_list_users" => list_users(chat, params::parse(arguments)?).await,
        "gchat_list_messages" => list_messages(chat, params::parse(arguments)?).await,
        other => Err(Error::invalid_argument(format!("Unknown tool: {}", other))),
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageParams {
    space_name: String,
    message: String,
    #[serde(default)]
    thread_name: Option<String>,
    #[serde(default)]
    use_markdown: bool,
}

#[derive(Debug, Deserialize)]
struct ListUsersParams {
    space_name: String,
    #[serde(default)]
    query: Option<String>,
    #[serde(default, deserialize_with = "count")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ListMessagesParams {
    space_name: String,
    #[serde(default, deserialize_with = "count")]
    page_size: Option<u32>,
    #[serde(default)]
    page_token: Option<String>,
}

async fn send_message(chat: &dyn ChatProvider, params: SendMessageParams) -> Result<String> {
    let space = non_empty(&params.space_name, "space_name")?;
    let message = NewChatMessage {
        formatted_text: params.use_markdown.then(|| params.message.clone()),
        text: params.message,
        thread_name: present(&params.thread_name).map(str::to_string),
    };

    let sent = chat
        .create_message(space, &message)
        .await
        .map_err(failed("send message"))?;

    Ok(format!(
        "Message sent successfully. Message ID: {}",
        sent.name
    ))
}

async fn list_users(chat: &dyn ChatProvider, params: ListUsersParams) -> Result<String> {
    let space = non_empty(&params.space_name, "space_name")?;
    let query = MemberQuery {
        page_size: params.max_results.unwrap_or(DEFAULT_PAGE_SIZE),
        filter: present(&params.query).map(|q| format!("member.displayName:{}", q)),
    };

    let members = chat
        .list_members(space, &query)
        .await
        .map_err(failed("list users"))?;

    members_to_json(&members)
}

async fn list_messages(chat: &dyn ChatProvider, params: ListMessagesParams) -> Result<String> {
    let space = non_empty(&params.space_name, "space_name")?;
    let query = ChatMessageQuery {
        page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        page_token: present(&params.page_token).map(str::to_string),
        order_by: Some(NEWEST_FIRST.to_string()),
    };

    let page = chat
        .list_messages(space, &query)
        .await
        .map_err(failed("get messages"))?;

    messages_to_json(&page)
}
