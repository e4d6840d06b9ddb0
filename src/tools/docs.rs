//! Static documentation lookups for mobile screen conventions.

use serde_json::Value;

use crate::registry::{ToolHandler, ToolResult};
use crate::types::{ToolDescriptor, ToolOutput};

/// Documentation topics the assistant can look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocTopic {
    /// Directory layout of a screen
    ScreenFileStructure,
    /// The SharedState repo/store library
    SharedState,
    /// The `useActions` hook
    UseActions,
    /// Header buttons via navigation options
    ScreenNavigationSetup,
    /// `ListWithSource` and list item providers
    ListWithSource,
}

impl DocTopic {
    /// All topics, in the order they are advertised.
    pub const ALL: [DocTopic; 5] = [
        DocTopic::ScreenFileStructure,
        DocTopic::SharedState,
        DocTopic::UseActions,
        DocTopic::ScreenNavigationSetup,
        DocTopic::ListWithSource,
    ];

    /// Tool name for this topic.
    pub fn tool_name(&self) -> &'static str {
        match self {
            DocTopic::ScreenFileStructure => "get_screen_file_structure_documentation",
            DocTopic::SharedState => "get_shared_state_documentation",
            DocTopic::UseActions => "get_use_actions_documentation",
            DocTopic::ScreenNavigationSetup => "get_screen_navigation_setup_documentation",
            DocTopic::ListWithSource => "get_list_with_source_documentation",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            DocTopic::ScreenFileStructure => {
                "Get the documentation of how files of a new screen are organized, with an example of each file"
            }
            DocTopic::SharedState => {
                "Get the documentation of the SharedState library used to share editable state between screens"
            }
            DocTopic::UseActions => {
                "Get the documentation of the useActions hook used to handle screen events"
            }
            DocTopic::ScreenNavigationSetup => {
                "Get the documentation of how to set up header buttons in a screen's navigation bar"
            }
            DocTopic::ListWithSource => {
                "Get the documentation of ListWithSource, list item providers and searchable lists"
            }
        }
    }

    /// Markdown text returned by the tool.
    pub fn text(&self) -> &'static str {
        match self {
            DocTopic::ScreenFileStructure => include_str!("docs/screen_file_structure.md"),
            DocTopic::SharedState => include_str!("docs/shared_state.md"),
            DocTopic::UseActions => include_str!("docs/use_actions.md"),
            DocTopic::ScreenNavigationSetup => include_str!("docs/screen_navigation_setup.md"),
            DocTopic::ListWithSource => include_str!("docs/list_with_source.md"),
        }
    }

    /// Descriptor advertised to the model.
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::without_parameters(self.tool_name(), self.description())
    }
}

/// Zero-argument tool returning one documentation topic.
#[derive(Debug, Clone, Copy)]
pub struct DocumentationTool {
    topic: DocTopic,
}

impl DocumentationTool {
    /// Create the tool for a topic.
    pub fn new(topic: DocTopic) -> Self {
        Self { topic }
    }

    /// Topic served by this tool.
    pub fn topic(&self) -> DocTopic {
        self.topic
    }
}

#[async_trait::async_trait]
impl ToolHandler for DocumentationTool {
    // Arguments are ignored; models sometimes send `{}` to zero-parameter tools.
    async fn call(&self, _args: Option<Value>) -> ToolResult<ToolOutput> {
        Ok(ToolOutput::Text(self.topic.text().trim().to_string()))
    }
}
