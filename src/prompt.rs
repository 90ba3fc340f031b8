//! Prompt templates for the three generated companion fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which companion field a prompt produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Description,
    Instructions,
    Seed,
}

impl PromptKind {
    /// Generation order used by sequential dispatch.
    pub const ALL: [PromptKind; 3] = [
        PromptKind::Description,
        PromptKind::Instructions,
        PromptKind::Seed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Description => "description",
            PromptKind::Instructions => "instructions",
            PromptKind::Seed => "seed",
        }
    }

    /// Render the prompt text for the named entity.
    pub fn render(&self, name: &str) -> String {
        match self {
            PromptKind::Description => format!(
                "Write a brief 1-2 sentence description for {name} focusing on their main achievements or role."
            ),
            PromptKind::Instructions => format!(
                "Create instructions for an AI companion based on {name} with the following format:\n\
                 Personality: (personality traits)\n\
                 Backstory: (brief backstory)\n\
                 Key Phrases: (5-6 characteristic phrases they might use)"
            ),
            PromptKind::Seed => format!(
                "Create a short example conversation between a human and {name} (5-6 exchanges) \
                 that showcases their personality and knowledge. Format it as 'Human:' and 'AI {name}:'"
            ),
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
