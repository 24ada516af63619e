//! Drives a full course build through the public API: a conversation that
//! yields a course request, a structure request, generation and packaging.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use course_builder_core::generator::layout;
use course_builder_core::{
    extract_course_description, ChatCompletionService, ConversationClient, ConversationSession,
    CourseGenerator, PortResult, PromptMessage, PromptRole, SkillLevel, StructureRequester,
};
use std::collections::VecDeque;
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

struct CannedChat {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Vec<PromptMessage>>>,
}

impl CannedChat {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatCompletionService for CannedChat {
    fn has_credential(&self) -> bool {
        true
    }

    async fn complete(&self, messages: Vec<PromptMessage>) -> PortResult<String> {
        self.prompts.lock().unwrap().push(messages);
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }
}

const ANALYSIS_REPLY: &str = r#"<think>The learner wants Python.</think>
Great choice! Here's what I gathered:
{"subject": "Python", "objectives": "basics", "skillLevel": "beginner", "duration": "4 weeks", "focusAreas": ["loops", "functions"], "confidence": 0.9}"#;

const STRUCTURE_REPLY: &str = r#"Here is your course:
{
  "title": "PYTHON.EXE",
  "subtitle": "8-BIT LEARNING SYSTEM v1.0",
  "totalChunks": 8,
  "estimatedHours": 10,
  "difficulty": "BEGINNER",
  "chunks": [
    {"title": "CHUNK 1: LOOPS", "topics": ["for", "while"], "estimatedTime": "2 hours", "difficulty": "BEGINNER", "concepts": 4},
    {"title": "CHUNK 2: FUNCTIONS", "topics": ["def", "return"], "estimatedTime": "3 hours", "difficulty": "BEGINNER", "concepts": "5"}
  ],
  "visualizations": ["Loop tracer"],
  "aiPrompt": "Explain with small runnable snippets."
}
Enjoy!"#;

#[tokio::test]
async fn conversation_to_zip() {
    let chat = Arc::new(CannedChat::new(&[ANALYSIS_REPLY, STRUCTURE_REPLY]));
    let service: Arc<dyn ChatCompletionService> = chat.clone();

    // Conversation turn produces a course request.
    let client = ConversationClient::new(service.clone());
    let mut session = ConversationSession::new();
    let reply = client
        .send_message(&mut session, "I want to learn Python loops and functions")
        .await
        .unwrap();
    assert_eq!(session.len(), 2);

    let input = extract_course_description(&reply).expect("course request in reply");
    assert_eq!(input.subject, "Python");
    assert_eq!(input.skill_level, SkillLevel::Beginner);
    assert_eq!(input.focus_areas, vec!["loops", "functions"]);

    // Structure request is a single user turn and reconciles the chunk count.
    let structure = StructureRequester::new(service)
        .request_structure(&input)
        .await
        .unwrap();
    assert_eq!(structure.total_chunks, 2);
    assert_eq!(structure.chunks[1].concepts, 5);
    {
        let prompts = chat.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[1].len(), 1);
        assert_eq!(prompts[1][0].role, PromptRole::User);
        assert!(prompts[1][0].content.contains("Focus Areas: loops, functions"));
    }

    // Generation and packaging.
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let archive = CourseGenerator::new(&structure, &input).generate_at(at).unwrap();

    let html = &archive.file(layout::INDEX_PATH).unwrap().contents;
    let app = &archive.file(layout::APP_SCRIPT_PATH).unwrap().contents;
    assert!(html.contains(r#"id="modulesGrid""#));
    assert!(app.contains("getElementById('modulesGrid')"));
    assert!(app.contains(r#"const SUBJECT_FAMILY = "programming";"#));

    let data: serde_json::Value =
        serde_json::from_str(&archive.file(layout::COURSE_DATA_PATH).unwrap().contents).unwrap();
    assert_eq!(data["totalChunks"], 2);
    assert_eq!(data["chunks"][0]["title"], "CHUNK 1: LOOPS");
    assert_eq!(data["chunks"][1]["title"], "CHUNK 2: FUNCTIONS");

    let bytes = archive.to_zip_bytes().unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(zip.len(), layout::ARCHIVE_PATHS.len());
    let mut readme = String::new();
    zip.by_name(layout::README_PATH)
        .unwrap()
        .read_to_string(&mut readme)
        .unwrap();
    assert!(readme.contains("CHUNK 2: FUNCTIONS (3 hours)"));
    assert_eq!(archive.download_file_name(), "PYTHON-EXE-course.zip");
}

#[tokio::test]
async fn regeneration_differs_only_in_timestamp() {
    let chat: Arc<dyn ChatCompletionService> = Arc::new(CannedChat::new(&[STRUCTURE_REPLY]));
    let input = course_builder_core::CourseInput {
        subject: "Python".into(),
        objectives: "basics".into(),
        skill_level: SkillLevel::Beginner,
        duration: "4 weeks".into(),
        focus_areas: vec!["loops".into(), "functions".into()],
    };
    let structure = StructureRequester::new(chat).request_structure(&input).await.unwrap();

    let first = CourseGenerator::new(&structure, &input)
        .generate_at(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap())
        .unwrap();
    let second = CourseGenerator::new(&structure, &input)
        .generate_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        .unwrap();

    for (a, b) in first.files().iter().zip(second.files()) {
        assert_eq!(a.path, b.path);
        if a.path == layout::COURSE_DATA_PATH {
            let mut a: serde_json::Value = serde_json::from_str(&a.contents).unwrap();
            let mut b: serde_json::Value = serde_json::from_str(&b.contents).unwrap();
            assert_ne!(a["generatedAt"], b["generatedAt"]);
            a["generatedAt"] = serde_json::Value::Null;
            b["generatedAt"] = serde_json::Value::Null;
            assert_eq!(a, b);
        } else {
            assert_eq!(a.contents, b.contents, "{} changed between runs", a.path);
        }
    }
}
