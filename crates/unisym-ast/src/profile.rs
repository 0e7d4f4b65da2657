//! Language profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The grammar and lexical rule set selected for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    #[serde(rename = "csharp")]
    CSharp,
    #[serde(rename = "typescript")]
    TypeScript,
    /// TypeScript with embedded markup (`.tsx`)
    #[serde(rename = "typescript-markup")]
    TypeScriptMarkup,
    #[serde(rename = "javascript")]
    JavaScript,
    /// JavaScript with embedded markup (`.jsx`)
    #[serde(rename = "javascript-markup")]
    JavaScriptMarkup,
}

impl Profile {
    pub const ALL: [Profile; 5] = [
        Profile::CSharp,
        Profile::TypeScript,
        Profile::TypeScriptMarkup,
        Profile::JavaScript,
        Profile::JavaScriptMarkup,
    ];

    /// Profile for a file extension (without the leading dot)
    pub fn from_extension(ext: &str) -> Option<Profile> {
        match ext.to_ascii_lowercase().as_str() {
            "cs" => Some(Profile::CSharp),
            "ts" | "mts" | "cts" => Some(Profile::TypeScript),
            "tsx" => Some(Profile::TypeScriptMarkup),
            "js" | "mjs" | "cjs" => Some(Profile::JavaScript),
            "jsx" => Some(Profile::JavaScriptMarkup),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Profile> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Profile::from_extension)
    }

    /// Pick a profile from the path, falling back to a look at the content
    pub fn detect(path: impl AsRef<Path>, source: &str) -> Option<Profile> {
        Profile::from_path(path).or_else(|| Profile::sniff(source))
    }

    /// Content heuristics for files without a recognised extension
    pub fn sniff(source: &str) -> Option<Profile> {
        let mut csharp = 0;
        let mut typescript = 0;
        let mut markup = false;

        for line in source.lines().take(200) {
            let line = line.trim_start();
            if line.starts_with("using ") && line.trim_end().ends_with(';') {
                csharp += 2;
            }
            if line.starts_with("namespace ") && !line.contains('{') || line.contains("{ get;") {
                csharp += 2;
            }
            if line.starts_with("import ") && line.contains(" from ") {
                typescript += 2;
            }
            if line.starts_with("export ") || line.starts_with("const ") || line.starts_with("let ") {
                typescript += 1;
            }
            if line.contains("function ") || line.contains("=>") {
                typescript += 1;
            }
            if line.contains("/>") || line.contains("</") {
                markup = true;
            }
        }

        if csharp == 0 && typescript == 0 {
            return None;
        }
        if csharp > typescript {
            Some(Profile::CSharp)
        } else if markup {
            Some(Profile::TypeScriptMarkup)
        } else {
            Some(Profile::TypeScript)
        }
    }

    /// Whether markup elements may appear in expression position
    pub fn supports_markup(self) -> bool {
        matches!(self, Profile::TypeScriptMarkup | Profile::JavaScriptMarkup)
    }

    /// Profiles that share the TypeScript grammar
    pub fn is_script(self) -> bool {
        !matches!(self, Profile::CSharp)
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::CSharp => "csharp",
            Profile::TypeScript => "typescript",
            Profile::TypeScriptMarkup => "typescript-markup",
            Profile::JavaScript => "javascript",
            Profile::JavaScriptMarkup => "javascript-markup",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(Profile::from_path("src/Foo.cs"), Some(Profile::CSharp));
        assert_eq!(Profile::from_path("a/b.ts"), Some(Profile::TypeScript));
        assert_eq!(Profile::from_path("a/b.TSX"), Some(Profile::TypeScriptMarkup));
        assert_eq!(Profile::from_path("a/b.jsx"), Some(Profile::JavaScriptMarkup));
        assert_eq!(Profile::from_path("README.md"), None);
    }

    #[test]
    fn test_sniff_content() {
        let cs = "using System;\nnamespace Demo;\npublic class A { }";
        assert_eq!(Profile::detect("noext", cs), Some(Profile::CSharp));

        let ts = "import { a } from \"./a\";\nexport const b = () => a;";
        assert_eq!(Profile::sniff(ts), Some(Profile::TypeScript));

        let tsx = "import React from \"react\";\nexport const A = () => <div />;";
        assert_eq!(Profile::sniff(tsx), Some(Profile::TypeScriptMarkup));

        assert_eq!(Profile::sniff("plain words"), None);
    }

    #[test]
    fn test_markup_support() {
        assert!(Profile::TypeScriptMarkup.supports_markup());
        assert!(!Profile::TypeScript.supports_markup());
        assert!(!Profile::CSharp.is_script());
    }
}
