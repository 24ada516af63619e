pub mod conversation;
pub mod domain;
pub mod error;
pub mod extract;
pub mod generator;
pub mod ports;
pub mod progress;
pub mod structure;

#[cfg(test)]
mod test_support;

pub use conversation::{extract_course_description, ConversationClient, ConversationSession, GREETING};
pub use domain::{ChatMessage, ChatRole, CourseChunk, CourseInput, CourseStructure, SkillLevel};
pub use error::{CourseError, CourseResult};
pub use generator::{CourseArchive, CourseGenerator, GeneratedFile, SubjectFamily};
pub use ports::{ChatCompletionService, PortError, PortResult, PromptMessage, PromptRole};
pub use progress::{completion_percentage, CourseProgress};
pub use structure::{structure_prompt, StructureRequester};
