//! crates/course_builder_core/src/generator/layout.rs
//!
//! Every name that more than one generated file refers to: archive paths, DOM
//! ids and runtime defaults. Renderers take these values from here only.

//=========================================================================================
// Archive Paths
//=========================================================================================

pub const INDEX_PATH: &str = "index.html";
pub const STYLESHEET_PATH: &str = "styles/main.css";
pub const TUTOR_SCRIPT_PATH: &str = "js/ollama-service.js";
pub const APP_SCRIPT_PATH: &str = "js/main.js";
pub const COURSE_DATA_PATH: &str = "data/course-data.json";
pub const README_PATH: &str = "README.md";
pub const SETUP_GUIDE_PATH: &str = "SETUP-GUIDE.md";

/// Archive entries in the order they are written.
pub const ARCHIVE_PATHS: [&str; 7] = [
    INDEX_PATH,
    STYLESHEET_PATH,
    TUTOR_SCRIPT_PATH,
    APP_SCRIPT_PATH,
    COURSE_DATA_PATH,
    README_PATH,
    SETUP_GUIDE_PATH,
];

//=========================================================================================
// Runtime Defaults
//=========================================================================================

/// Where the generated tutor looks for a local Ollama server.
pub const LOCAL_INFERENCE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LOCAL_MODEL: &str = "llama3";
pub const DEFAULT_TEMPERATURE: &str = "0.7";
/// Browser local-storage key holding the learner's progress.
pub const PROGRESS_STORAGE_KEY: &str = "course-progress";

//=========================================================================================
// DOM Ids
//=========================================================================================

pub mod dom {
    pub const MODULES_GRID: &str = "modulesGrid";
    pub const PROGRESS_FILL: &str = "progressFill";
    pub const PROGRESS_TEXT: &str = "progressText";
    pub const AI_SIDEBAR: &str = "aiSidebar";
    pub const CLOSE_SIDEBAR: &str = "closeSidebar";
    pub const AI_STATUS: &str = "aiStatus";
    pub const STATUS_INDICATOR: &str = "statusIndicator";
    pub const STATUS_TEXT: &str = "statusText";
    pub const AI_CHAT: &str = "aiChat";
    pub const CHAT_MESSAGES: &str = "chatMessages";
    pub const CHAT_INPUT: &str = "chatInput";
    pub const SEND_MESSAGE: &str = "sendMessage";
    pub const MODEL_SELECT: &str = "modelSelect";
    pub const TEMPERATURE_SLIDER: &str = "temperatureSlider";
    pub const TEMP_VALUE: &str = "tempValue";
    pub const AI_TOGGLE: &str = "aiToggle";
    pub const MODULE_MODAL: &str = "moduleModal";
    pub const MODAL_TITLE: &str = "modalTitle";
    pub const CLOSE_MODAL: &str = "closeModal";
    pub const MODAL_BODY: &str = "modalBody";
    pub const PREV_MODULE: &str = "prevModule";
    pub const MARK_COMPLETE: &str = "markComplete";
    pub const NEXT_MODULE: &str = "nextModule";

    /// Template placeholder name for each id, as used by `{{id_...}}`.
    pub const PLACEHOLDERS: [(&str, &str); 23] = [
        ("id_modules_grid", MODULES_GRID),
        ("id_progress_fill", PROGRESS_FILL),
        ("id_progress_text", PROGRESS_TEXT),
        ("id_ai_sidebar", AI_SIDEBAR),
        ("id_close_sidebar", CLOSE_SIDEBAR),
        ("id_ai_status", AI_STATUS),
        ("id_status_indicator", STATUS_INDICATOR),
        ("id_status_text", STATUS_TEXT),
        ("id_ai_chat", AI_CHAT),
        ("id_chat_messages", CHAT_MESSAGES),
        ("id_chat_input", CHAT_INPUT),
        ("id_send_message", SEND_MESSAGE),
        ("id_model_select", MODEL_SELECT),
        ("id_temperature_slider", TEMPERATURE_SLIDER),
        ("id_temp_value", TEMP_VALUE),
        ("id_ai_toggle", AI_TOGGLE),
        ("id_module_modal", MODULE_MODAL),
        ("id_modal_title", MODAL_TITLE),
        ("id_close_modal", CLOSE_MODAL),
        ("id_modal_body", MODAL_BODY),
        ("id_prev_module", PREV_MODULE),
        ("id_mark_complete", MARK_COMPLETE),
        ("id_next_module", NEXT_MODULE),
    ];
}

/// `{{id_...}}` placeholder values for the renderers.
pub fn id_params() -> Vec<(&'static str, String)> {
    dom::PLACEHOLDERS
        .iter()
        .map(|(name, id)| (*name, id.to_string()))
        .collect()
}

/// The archive layout drawn as a tree, for the documentation files.
pub fn file_tree() -> String {
    format!(
        "course-folder/
├── {index}          # Main course page
├── {readme}           # Course overview
├── {guide}      # Detailed setup instructions
├── styles/
│   └── main.css        # Course styling
├── js/
│   ├── main.js         # Course functionality
│   └── ollama-service.js # AI tutor integration
└── data/
    └── course-data.json # Course content and structure",
        index = INDEX_PATH,
        readme = README_PATH,
        guide = SETUP_GUIDE_PATH,
    )
}
