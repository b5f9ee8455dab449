pub mod types;

pub use types::{
    Attachment, CodeBlock, ConversationDetail, ConversationSummary, Message, Sender, ToolData,
    ToolOutput,
};
