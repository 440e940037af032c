/// Constants used throughout the phplint codebase
// Interpreter
pub const DEFAULT_EXECUTABLE: &str = "php";
pub const DEFAULT_VARIANT_NAME: &str = "default";

/// Exit code the interpreter reserves for parse failures in `-l` mode.
pub const SYNTAX_ERROR_EXIT_CODE: i32 = 255;

// Cache
pub const FILE_PATH_PLACEHOLDER: &str = "{{ filePath }}";
pub const DEFAULT_CACHE_DELIMITER: &str = ":";
pub const DEFAULT_CACHE_PREFIX: &str = "phplint";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 36_000;
pub const CACHE_NAMESPACE: &str = "lint";

// Task names, used to build the default result storage path
pub const LINT_TASK_NAME: &str = "phplint-lint";
pub const CONFIG_FILENAME: &str = "phplint.json";

// Process exit codes of the binary
pub const EXIT_OK: i32 = 0;
pub const EXIT_LINT_ERRORS: i32 = 1;
pub const EXIT_NO_RESULT: i32 = 2;
pub const EXIT_FATAL: i32 = 3;
