//! End-to-end tests driving the MCP server over an in-memory transport.

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use google_kit_core::{
    ChatMessage, ChatMessagePage, ChatMessageQuery, ChatProvider, EnabledTools, MemberQuery,
    Membership, NewChatMessage, Result, Space,
};
use google_kit_mcp::{McpServer, StdioTransport, ToolHandler};
use serde_json::Value;

/// Chat service with one space that accepts every message.
struct StubChat {
    sent: Mutex<Vec<(String, NewChatMessage)>>,
}

#[async_trait]
impl ChatProvider for StubChat {
    async fn list_spaces(&self) -> Result<Vec<Space>> {
        Ok(vec![Space {
            name: "spaces/AAA".to_string(),
            display_name: Some("Team".to_string()),
            space_type: Some("ROOM".to_string()),
        }])
    }

    async fn create_message(&self, space: &str, message: &NewChatMessage) -> Result<ChatMessage> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((space.to_string(), message.clone()));
        Ok(ChatMessage {
            name: format!("{}/messages/{}", space, sent.len()),
            ..Default::default()
        })
    }

    async fn list_members(&self, _space: &str, _query: &MemberQuery) -> Result<Vec<Membership>> {
        Ok(vec![])
    }

    async fn list_messages(
        &self,
        _space: &str,
        _query: &ChatMessageQuery,
    ) -> Result<ChatMessagePage> {
        Ok(ChatMessagePage::default())
    }
}

#[derive(Clone, Default)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn run_session(enabled: EnabledTools, input: &[&str]) -> (Vec<Value>, Arc<StubChat>) {
    let chat = Arc::new(StubChat {
        sent: Mutex::new(Vec::new()),
    });
    let handler = ToolHandler::new(enabled).with_chat(chat.clone());
    let mut server = McpServer::new(handler);

    let output = SharedWriter::default();
    let mut transport = StdioTransport::new(
        Box::new(Cursor::new(input.join("\n"))),
        Box::new(output.clone()),
    );
    server.run_with(&mut transport).await.unwrap();

    let raw = String::from_utf8(output.0.lock().unwrap().clone()).unwrap();
    let responses = raw
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (responses, chat)
}

#[tokio::test]
async fn test_full_session() {
    let (responses, chat) = run_session(
        EnabledTools::All,
        &[
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"it","version":"0.1"}}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"gchat_list_spaces","arguments":{}}}"#,
            r#"{"jsonrpc":"2.0","id":"send","method":"tools/call","params":{"name":"gchat_send_message","arguments":{"space_name":"spaces/AAA","message":"hi","use_markdown":true}}}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "google-kit");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);
    assert!(tools.iter().all(|t| t["name"].as_str().unwrap().starts_with("gchat_")));
    assert_eq!(tools[1]["inputSchema"]["required"][0], "space_name");

    let spaces_text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    let spaces: Value = serde_json::from_str(spaces_text).unwrap();
    assert_eq!(spaces[0]["displayName"], "Team");
    assert!(responses[2]["result"].get("isError").is_none());

    assert_eq!(responses[3]["id"], "send");
    assert_eq!(
        responses[3]["result"]["content"][0]["text"],
        "Message sent successfully. Message ID: spaces/AAA/messages/1"
    );

    let sent = chat.sent.lock().unwrap();
    assert_eq!(sent[0].0, "spaces/AAA");
    assert_eq!(sent[0].1.formatted_text.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_parse_error_does_not_stop_server() {
    let (responses, _) = run_session(
        EnabledTools::All,
        &[
            "{not json",
            r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 5);
    assert_eq!(responses[1]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn test_tool_errors_are_results() {
    let (responses, chat) = run_session(
        EnabledTools::parse(Some("calendar, gmail")),
        &[
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"gchat_list_spaces"}}"#,
        ],
    )
    .await;

    assert_eq!(responses[0]["result"]["tools"], serde_json::json!([]));
    assert_eq!(responses[1]["result"]["isError"], true);
    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        "Unknown tool: gchat_list_spaces"
    );
    assert!(chat.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_argument_is_reported() {
    let (responses, chat) = run_session(
        EnabledTools::All,
        &[
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"gchat_send_message","arguments":{"space_name":"spaces/AAA"}}}"#,
        ],
    )
    .await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("missing field `message`"));
    assert!(chat.sent.lock().unwrap().is_empty());
}
