//! crates/course_builder_core/src/generator/mod.rs
//!
//! Turns a course structure and its input into the seven files of a
//! self-contained browser course and packages them as a zip archive.
//!
//! Generation is a pure function of its inputs plus the timestamp written
//! into the course data file; two runs with the same timestamp produce the
//! same bytes.

pub mod layout;
pub mod template;
pub mod subject;

mod app_script;
mod course_data;
mod docs;
mod page;
mod stylesheet;
mod tutor_script;

pub use subject::SubjectFamily;
pub use tutor_script::tutor_system_prompt;

use std::io::{Cursor, Write};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::{CourseInput, CourseStructure};
use crate::error::CourseResult;

static FILE_NAME_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("file name pattern is valid"));

//=========================================================================================
// Generated Files
//=========================================================================================

/// One file of a generated course, addressed by its path inside the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: &str, contents: String) -> Self {
        Self {
            path: path.to_string(),
            contents,
        }
    }
}

/// The complete set of files for one course.
#[derive(Debug, Clone)]
pub struct CourseArchive {
    title: String,
    generated_at: DateTime<Utc>,
    files: Vec<GeneratedFile>,
}

impl CourseArchive {
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Looks up a file by its archive path, e.g. `js/main.js`.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Suggested download name: the course title with every character outside
    /// `[A-Za-z0-9]` replaced by `-`, followed by `-course.zip`.
    pub fn download_file_name(&self) -> String {
        let slug = FILE_NAME_UNSAFE.replace_all(&self.title, "-");
        if slug.is_empty() {
            "course.zip".to_string()
        } else {
            format!("{}-course.zip", slug)
        }
    }

    /// Packages every file into a deflate-compressed zip. Entry timestamps are
    /// fixed so the bytes depend only on the file contents.
    pub fn to_zip_bytes(&self) -> CourseResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for file in &self.files {
            writer.start_file(file.path.as_str(), entry_options())?;
            writer.write_all(file.contents.as_bytes())?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
}

//=========================================================================================
// Generator
//=========================================================================================

pub struct CourseGenerator<'a> {
    structure: &'a CourseStructure,
    input: &'a CourseInput,
}

impl<'a> CourseGenerator<'a> {
    pub fn new(structure: &'a CourseStructure, input: &'a CourseInput) -> Self {
        Self { structure, input }
    }

    /// Generates the course stamped with the current time.
    pub fn generate(&self) -> CourseResult<CourseArchive> {
        self.generate_at(Utc::now())
    }

    pub fn generate_at(&self, generated_at: DateTime<Utc>) -> CourseResult<CourseArchive> {
        let (structure, input) = (self.structure, self.input);

        let files = vec![
            GeneratedFile::new(layout::INDEX_PATH, page::render_index(structure, input)),
            GeneratedFile::new(layout::STYLESHEET_PATH, stylesheet::render_stylesheet()),
            GeneratedFile::new(
                layout::TUTOR_SCRIPT_PATH,
                tutor_script::render_tutor_script(structure, input),
            ),
            GeneratedFile::new(layout::APP_SCRIPT_PATH, app_script::render_app_script(input)),
            GeneratedFile::new(
                layout::COURSE_DATA_PATH,
                course_data::render_course_data(structure, input, generated_at)?,
            ),
            GeneratedFile::new(layout::README_PATH, docs::render_readme(structure, input)),
            GeneratedFile::new(layout::SETUP_GUIDE_PATH, docs::render_setup_guide(structure, input)),
        ];

        info!(
            title = %structure.title,
            modules = structure.module_count(),
            family = SubjectFamily::classify(&input.subject).label(),
            "Generated course files"
        );

        Ok(CourseArchive {
            title: structure.title.clone(),
            generated_at,
            files,
        })
    }
}
