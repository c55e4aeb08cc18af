//! Technology detection from touched-file lists.
//!
//! Languages are counted per file extension; frameworks are flagged when a
//! well-known marker file appears anywhere in the history. BTreeMaps keep
//! the serialized snapshot deterministic across syncs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::git::LogSource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub stack: BTreeMap<String, u32>,
    pub frameworks: BTreeMap<String, bool>,
}

fn language_for(ext: &str) -> Option<&'static str> {
    Some(match ext {
        "go" => "Go",
        "rs" => "Rust",
        "ts" => "TypeScript",
        "tsx" => "React/TypeScript",
        "js" => "JavaScript",
        "jsx" => "React",
        "py" => "Python",
        "java" => "Java",
        "rb" => "Ruby",
        "php" => "PHP",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "Sass",
        "sql" => "SQL",
        "json" => "JSON",
        "yml" | "yaml" => "YAML",
        "md" => "Markdown",
        "erl" => "Erlang",
        "c" => "C",
        "cpp" => "C++",
        _ => return None,
    })
}

const FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("package.json", "Node.js"),
    ("next.config.js", "Next.js"),
    ("tailwind.config.js", "TailwindCSS"),
    ("vite.config.js", "Vite"),
    ("angular.json", "Angular"),
    ("requirements.txt", "Python"),
    ("bun.lock", "Bun"),
    ("go.mod", "Go"),
    ("pom.xml", "Java"),
    ("Gemfile", "Ruby on Rails"),
];

/// Build a tech summary from a list of touched file paths.
pub fn detect(paths: &[String]) -> TechStack {
    let mut tech = TechStack::default();
    for path in paths {
        let p = Path::new(path);
        if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
            if let Some(lang) = language_for(&ext.to_lowercase()) {
                *tech.stack.entry(lang.to_string()).or_insert(0) += 1;
            }
        }
        for (marker, framework) in FRAMEWORK_MARKERS {
            if path.ends_with(marker) {
                tech.frameworks.insert(framework.to_string(), true);
            }
        }
    }
    tech
}

/// Full-history tech summary for one author. Recomputed from scratch on
/// every sync rather than merged incrementally.
pub fn detect_for_author(source: &dyn LogSource, author: &str) -> Result<TechStack> {
    Ok(detect(&source.touched_files(author)?))
}
