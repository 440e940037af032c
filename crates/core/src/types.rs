use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Type-safe wrapper for command arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandArguments(Vec<String>);

impl CommandArguments {
    /// Create new empty arguments
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create from a vector of strings
    #[must_use]
    pub fn from_vec(args: Vec<String>) -> Self {
        Self(args)
    }

    /// Add an argument
    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    /// Add multiple arguments
    pub fn extend<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(args.into_iter().map(Into::into));
    }

    /// Copy of these arguments with one more argument appended
    #[must_use]
    pub fn with_trailing(&self, arg: impl Into<String>) -> Self {
        let mut args = self.clone();
        args.push(arg);
        args
    }

    /// Get as slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Convert to inner Vec
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for CommandArguments {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for CommandArguments {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<'a> From<&[&'a str]> for CommandArguments {
    fn from(args: &[&'a str]) -> Self {
        Self(args.iter().map(|s| (*s).to_string()).collect())
    }
}

impl IntoIterator for CommandArguments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A scalar INI value as reported by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IniValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl IniValue {
    /// Render for `-d name=value` and for cache keys: booleans as `1`/`0`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            IniValue::Bool(true) => "1".to_string(),
            IniValue::Bool(false) => "0".to_string(),
            IniValue::Integer(n) => n.to_string(),
            IniValue::Float(f) => f.to_string(),
            IniValue::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for IniValue {
    fn from(value: bool) -> Self {
        IniValue::Bool(value)
    }
}

impl From<i64> for IniValue {
    fn from(value: i64) -> Self {
        IniValue::Integer(value)
    }
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        IniValue::String(value.to_string())
    }
}

/// Interpreter command-line arguments of a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhpCliArgs {
    /// Value of `-c`
    pub config: Option<String>,
    /// `"name=value"` define flags, each independently enabled
    pub define: IndexMap<String, bool>,
}

impl PhpCliArgs {
    /// Defines whose flag is `true`, in configured order
    pub fn enabled_defines(&self) -> impl Iterator<Item = &str> {
        self.define
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(define, _)| define.as_str())
    }
}

/// One configured way of invoking the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub enabled: bool,
    pub executable: String,
    pub args: PhpCliArgs,
}

impl Variant {
    #[must_use]
    pub fn new(name: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            executable: executable.into(),
            args: PhpCliArgs::default(),
        }
    }
}

/// The first two cache-key components of a variant: the result "shape".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightKey {
    /// `<major>.<minor>`
    pub version: String,
    /// Syntax-modifier fingerprint
    pub fingerprint: String,
}

impl LightKey {
    #[must_use]
    pub fn new(version: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fingerprint: fingerprint.into(),
        }
    }

    #[must_use]
    pub fn join(&self, delimiter: &str) -> String {
        format!("{}{delimiter}{}", self.version, self.fingerprint)
    }
}

/// Read-only metadata of a resolved variant, shared by every file check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMeta {
    pub name: String,
    pub executable: String,
    /// Full interpreter version string, e.g. `5.6.15`
    pub version: String,
    /// Arguments of a check invocation, without the target file
    pub command_args: CommandArguments,
    pub cache_key_items: LightKey,
}

/// Cached outcome of one check.
///
/// Field names on the wire follow the established cache format so entries
/// written by other tools stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub php_executable: String,
    pub php_command_args: CommandArguments,
    /// 0 means no diagnostic
    pub exit_code: i32,
    pub std_out: String,
    pub std_error: String,
}

impl CacheEntry {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.exit_code == 0
    }

    /// The command line shown in reports: executable followed by its arguments
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.php_executable.as_str())
            .chain(self.php_command_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
