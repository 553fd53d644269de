use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Lifecycle of a tool invocation attached to an assistant message. A
/// `Call` that never reached `Result` is a streaming artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolInvocationState {
    Call,
    Result,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub state: ToolInvocationState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub tool_invocations: Vec<ToolInvocation>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_invocations: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Strip partially-streamed artifacts after a cancellation.
///
/// Tool invocations that never produced a result are dropped, and messages
/// left with neither content nor invocations are removed entirely.
pub fn sanitize_messages(messages: &mut Vec<Message>) {
    for message in messages.iter_mut() {
        message
            .tool_invocations
            .retain(|invocation| invocation.state == ToolInvocationState::Result);
    }
    messages.retain(|message| !message.content.is_empty() || !message.tool_invocations.is_empty());
}
