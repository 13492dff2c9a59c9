//! Scripted assistant lines, keyed by navigation path.

/// What the assistant shows and says on one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantScript {
    pub path: &'static str,
    pub intro: Option<&'static str>,
    pub text: &'static str,
    pub voice_intro: Option<&'static str>,
    pub voice: &'static str,
}

/// Path of the quiz screen.
pub const QUIZ_PATH: &str = "/quizzes";

const SCRIPTS: &[AssistantScript] = &[
    AssistantScript {
        path: "/signup-student",
        intro: None,
        text: "Welcome! Let's get you registered as a student.",
        voice_intro: None,
        voice: "Welcome! Let's get you registered as a student.",
    },
    AssistantScript {
        path: "/login",
        intro: Some("Hello! I'm Pica"),
        text: "Welcome back! Please log in to continue.",
        voice_intro: Some("Hello! I'm Pica."),
        voice: "Welcome back! Please log in to continue.",
    },
    AssistantScript {
        path: "/student-dashboard",
        intro: None,
        text: "This is your dashboard. Track your progress here.",
        voice_intro: None,
        voice: "This is your dashboard. Track your progress here.",
    },
    AssistantScript {
        path: "/student/library",
        intro: None,
        text: "Upload PDFs here and ask me questions from them.",
        voice_intro: None,
        voice: "Upload PDFs here and ask me questions from them.",
    },
    AssistantScript {
        path: "/games",
        intro: None,
        text: "Choose a game! Each game improves a skill.",
        voice_intro: None,
        voice: "Choose a game! Each game improves a skill.",
    },
    AssistantScript {
        path: QUIZ_PATH,
        intro: None,
        text: "Get ready for quizzes. Focus and do your best!",
        voice_intro: None,
        voice: "Get ready for quizzes. Focus and do your best!",
    },
    AssistantScript {
        path: "/ai-assistant",
        intro: None,
        text: "I'm your AI assistant. Ask me anything related to learning.",
        voice_intro: None,
        voice: "I'm your AI assistant. Ask me anything related to learning.",
    },
];

pub fn script_for(path: &str) -> Option<&'static AssistantScript> {
    SCRIPTS.iter().find(|script| script.path == path)
}

pub fn scripts() -> &'static [AssistantScript] {
    SCRIPTS
}
