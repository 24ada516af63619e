//! crates/course_builder_core/src/generator/subject.rs
//!
//! Keyword families used to pick the per-topic content template in the
//! generated application.

/// Matched anywhere in the subject.
const PROGRAMMING_FRAGMENTS: [&str; 6] = [
    "programming", "code", "coding", "software", "computer science", "web development",
];
/// Matched against whole words only ("rust" must not match "crusades").
const PROGRAMMING_WORDS: [&str; 7] = ["python", "javascript", "typescript", "rust", "java", "golang", "sql"];
const MATH_PHYSICS_FRAGMENTS: [&str; 6] = ["math", "physics", "calculus", "algebra", "geometry", "statistics"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectFamily {
    Programming,
    MathPhysics,
    General,
}

impl SubjectFamily {
    /// Case-insensitive keyword match; programming wins over math/physics.
    /// Defined for every string.
    pub fn classify(subject: &str) -> Self {
        let subject = subject.to_lowercase();
        let mut words = subject.split(|c: char| !c.is_alphanumeric());
        if PROGRAMMING_FRAGMENTS.iter().any(|k| subject.contains(k))
            || words.any(|w| PROGRAMMING_WORDS.contains(&w))
        {
            Self::Programming
        } else if MATH_PHYSICS_FRAGMENTS.iter().any(|k| subject.contains(k)) {
            Self::MathPhysics
        } else {
            Self::General
        }
    }

    /// The label the generated script switches on.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::MathPhysics => "math-physics",
            Self::General => "general",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_keyword_families() {
        assert_eq!(SubjectFamily::classify("Python"), SubjectFamily::Programming);
        assert_eq!(SubjectFamily::classify("Intro to Coding"), SubjectFamily::Programming);
        assert_eq!(SubjectFamily::classify("Quantum PHYSICS"), SubjectFamily::MathPhysics);
        assert_eq!(SubjectFamily::classify("Mathematics"), SubjectFamily::MathPhysics);
        assert_eq!(SubjectFamily::classify("Renaissance Art"), SubjectFamily::General);
        assert_eq!(SubjectFamily::classify("Rust for systems"), SubjectFamily::Programming);
        assert_eq!(SubjectFamily::classify("The Crusades"), SubjectFamily::General);
    }

    #[test]
    fn any_string_has_a_family() {
        for subject in ["", "   ", "🎨🎭", "{{weird}}", "\u{0}"] {
            assert_eq!(SubjectFamily::classify(subject), SubjectFamily::General);
        }
    }
}
