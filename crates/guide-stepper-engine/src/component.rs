use serde::Serialize;

/// Namespace shared by every GuideStepper component.
pub const NAMESPACE: &str = "GuideStepper";

/// GuideStepper components recognized by element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GuideStepperKind {
    Step,
    Checkpoint,
    Prompt,
    WhatYouNeed,
    WhatYouGet,
}

impl GuideStepperKind {
    const ALL: [Self; 5] = [
        Self::Step,
        Self::Checkpoint,
        Self::Prompt,
        Self::WhatYouNeed,
        Self::WhatYouGet,
    ];

    /// Matches a full element name such as `GuideStepper.Checkpoint`.
    pub fn from_element_name(name: &str) -> Option<Self> {
        let member = name.strip_prefix(NAMESPACE)?.strip_prefix('.')?;
        Self::ALL.into_iter().find(|kind| kind.member() == member)
    }

    fn member(self) -> &'static str {
        match self {
            Self::Step => "Step",
            Self::Checkpoint => "Checkpoint",
            Self::Prompt => "Prompt",
            Self::WhatYouNeed => "WhatYouNeed",
            Self::WhatYouGet => "WhatYouGet",
        }
    }

    pub fn element_name(self) -> String {
        format!("{NAMESPACE}.{}", self.member())
    }

    /// Components whose authored markdown is copied into a `rawContent` prop.
    pub fn carries_raw_content(self) -> bool {
        matches!(self, Self::Checkpoint | Self::Prompt)
    }
}
