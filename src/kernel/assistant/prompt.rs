//! Prompt construction and the canned replies used when the completion
//! service cannot be reached.

use serde::{Deserialize, Serialize};

use crate::kernel::services::ports::{CompletionRequest, CompletionService};
use crate::models::FileKind;

pub const SERVICE_WARNING: &str = "AI service temporarily unavailable";

const AGENT_PROMPT: &str = "You are an expert code assistant. Generate code or content based on the user's request.
Return ONLY the code or content without explanations, markdown formatting, or code blocks.
The response will be directly inserted into the file.

";

const CHAT_PROMPT: &str = "You are an expert SQL assistant helping users with Snowflake queries.
You can help with:
- Writing and optimizing SQL queries
- Explaining query results
- Debugging SQL errors
- Suggesting best practices
- Performance optimization

";

const CHAT_PROMPT_TAIL: &str = "

When files are referenced with @ mentions, use their content to provide more accurate and contextual answers.
Provide clear, concise answers focused on SQL and database topics.";

const FALLBACK_SQL_TIPS: &str = "I apologize, but I'm having trouble connecting to the AI service right now.

However, here are some general SQL tips:
- Use SELECT to retrieve data from tables
- Add WHERE clauses to filter results
- Use JOIN to combine data from multiple tables
- Consider using LIMIT to restrict result size

Please try again in a moment, or check your query syntax manually.";

const FALLBACK_DEBUGGING: &str = "I'm currently unable to connect to the AI service to help debug your error.

Common SQL debugging steps:
1. Check for syntax errors (missing commas, parentheses)
2. Verify table and column names exist
3. Check data types match in comparisons
4. Review JOIN conditions

Please try again shortly.";

const FALLBACK_GENERIC: &str = "I apologize, but I'm having trouble connecting to the AI service right now.

The AI assistant helps with:
- Writing SQL queries
- Optimizing performance
- Debugging errors
- Explaining results

Please try again in a moment.";

const EMPTY_CHAT_REPLY: &str = "Sorry, I couldn't process that request.";
const EMPTY_AGENT_REPLY: &str = "No suggestion generated";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    #[default]
    Chat,
    Agent,
}

/// A file inlined into a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub response: String,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentQuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

const fn action(id: &'static str, label: &'static str, prompt: &'static str) -> AgentQuickAction {
    AgentQuickAction { id, label, prompt }
}

const SQL_ACTIONS: &[AgentQuickAction] = &[
    action("write", "Write Query", "Write a SQL query for: "),
    action("optimize", "Optimize Query", "Optimize this SQL query for better performance"),
    action("explain", "Explain Query", "Explain what this SQL query does in detail"),
    action("add-comments", "Add Comments", "Add helpful comments to this SQL query"),
    action("fix-errors", "Fix Errors", "Find and fix any errors in this SQL query"),
];

const MARKDOWN_ACTIONS: &[AgentQuickAction] = &[
    action("write", "Write Documentation", "Write documentation for: "),
    action("improve", "Improve Content", "Improve the clarity and structure of this markdown content"),
    action("format", "Format Document", "Format this markdown document with proper structure"),
    action("add-examples", "Add Examples", "Add code examples to this documentation"),
];

const JSON_ACTIONS: &[AgentQuickAction] = &[
    action("format", "Format JSON", "Format and prettify this JSON"),
    action("validate", "Validate Schema", "Validate this JSON and suggest improvements"),
    action("add-fields", "Add Fields", "Suggest additional fields for this JSON structure"),
    action("convert", "Convert Format", "Convert this JSON to a different format"),
];

const PYTHON_ACTIONS: &[AgentQuickAction] = &[
    action("write", "Write Function", "Write a Python function for: "),
    action("add-docstrings", "Add Docstrings", "Add comprehensive docstrings to this Python code"),
    action("optimize", "Optimize Code", "Optimize this Python code for better performance"),
    action("add-tests", "Add Tests", "Write unit tests for this Python code"),
    action("fix-errors", "Fix Errors", "Find and fix any errors in this Python code"),
];

const HELP_ACTIONS: &[AgentQuickAction] = &[action(
    "help",
    "Get Help",
    "How can I help you with your workspace?",
)];

/// Quick actions offered in agent mode for a file of the given kind.
pub fn quick_actions(kind: Option<FileKind>) -> &'static [AgentQuickAction] {
    match kind {
        Some(FileKind::Sql) => SQL_ACTIONS,
        Some(FileKind::Markdown) => MARKDOWN_ACTIONS,
        Some(FileKind::Json) => JSON_ACTIONS,
        Some(FileKind::Python) => PYTHON_ACTIONS,
        Some(FileKind::Other) | None => HELP_ACTIONS,
    }
}

/// User message sent for an agent request: the instruction followed by the
/// current file in a bare fence.
pub fn agent_message(prompt: &str, content: &str) -> String {
    format!("{}\n\nCurrent file content:\n```\n{}\n```", prompt, content)
}

pub fn system_prompt(mode: AssistantMode, context: Option<&str>, attachments: &[Attachment]) -> String {
    let context = context.filter(|c| !c.is_empty());
    match mode {
        AssistantMode::Agent => {
            let mut prompt = String::from(AGENT_PROMPT);
            if let Some(context) = context {
                prompt.push_str("Current file content:\n");
                prompt.push_str(context);
            }
            prompt
        }
        AssistantMode::Chat => {
            let mut prompt = String::from(CHAT_PROMPT);
            if let Some(context) = context {
                prompt.push_str("Current query context:\n");
                prompt.push_str(context);
            }
            if !attachments.is_empty() {
                let files: Vec<String> = attachments
                    .iter()
                    .map(|file| {
                        format!(
                            "\nFile: {}\n```{}\n{}\n```",
                            file.name,
                            FileKind::fence_tag(&file.name),
                            file.content
                        )
                    })
                    .collect();
                prompt.push_str("\n\nReferenced Files:\n");
                prompt.push_str(&files.join("\n"));
            }
            prompt.push_str(CHAT_PROMPT_TAIL);
            prompt
        }
    }
}

/// Reply used in place of a failed completion.
pub fn fallback_response(mode: AssistantMode, message: &str, context: Option<&str>) -> String {
    match mode {
        AssistantMode::Agent => format!(
            "// AI service temporarily unavailable\n// Here's a template to get you started:\n\n{}\n\n// Please try again later or use Chat mode for assistance",
            context.filter(|c| !c.is_empty()).unwrap_or("// Add your code here")
        ),
        AssistantMode::Chat => {
            let lower = message.to_lowercase();
            if lower.contains("select") || lower.contains("query") {
                FALLBACK_SQL_TIPS.to_string()
            } else if lower.contains("error") || lower.contains("debug") {
                FALLBACK_DEBUGGING.to_string()
            } else {
                FALLBACK_GENERIC.to_string()
            }
        }
    }
}

/// Runs one completion, substituting the fallback reply on failure. Never
/// returns the service error itself.
pub fn respond(
    service: &dyn CompletionService,
    mode: AssistantMode,
    message: &str,
    context: Option<&str>,
    attachments: &[Attachment],
    temperature: f32,
) -> AssistantReply {
    let request = CompletionRequest {
        system_prompt: system_prompt(mode, context, attachments),
        user_message: message.to_string(),
        temperature,
    };
    match service.complete(request) {
        Ok(text) if text.trim().is_empty() => AssistantReply {
            response: match mode {
                AssistantMode::Chat => EMPTY_CHAT_REPLY.to_string(),
                AssistantMode::Agent => EMPTY_AGENT_REPLY.to_string(),
            },
            warning: None,
        },
        Ok(text) => AssistantReply {
            response: text,
            warning: None,
        },
        Err(e) => {
            tracing::error!(error = %e, ?mode, "completion failed, using fallback");
            AssistantReply {
                response: fallback_response(mode, message, context),
                warning: Some(SERVICE_WARNING.to_string()),
            }
        }
    }
}
