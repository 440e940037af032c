//! Interpreter command lines

use phplint_core::{CommandArguments, IniValue, PhpCliArgs};
use std::collections::BTreeMap;
use std::fmt;

/// Type an INI value is cast to before it is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniType {
    Boolean,
    Integer,
    Float,
    String,
}

impl IniType {
    /// PHP cast keyword
    pub fn cast(self) -> &'static str {
        match self {
            IniType::Boolean => "boolean",
            IniType::Integer => "int",
            IniType::Float => "float",
            IniType::String => "string",
        }
    }
}

impl fmt::Display for IniType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cast())
    }
}

/// `-c <config>` followed by `-d <define>` for every enabled define
pub fn build_php_command_args(args: &PhpCliArgs) -> CommandArguments {
    let mut command_args = CommandArguments::new();
    if let Some(config) = args.config.as_deref().filter(|c| !c.is_empty()) {
        command_args.push("-c");
        command_args.push(config);
    }
    for define in args.enabled_defines() {
        command_args.push("-d");
        command_args.push(define);
    }
    command_args
}

/// Arguments that print the bare version string
pub fn build_version_probe_args() -> CommandArguments {
    CommandArguments::from(&["-n", "-r", "echo PHP_VERSION;"][..])
}

/// Arguments that print the typed values of `options` as a JSON object
pub fn build_flag_probe_args(
    args: &PhpCliArgs,
    options: &BTreeMap<String, IniType>,
) -> CommandArguments {
    let mut code = String::from("$export = array(");
    for (name, ty) in options {
        code.push_str(&format!("'{name}' => ({ty}) ini_get('{name}'),"));
    }
    code.push_str("); echo json_encode($export);");

    let mut command_args = build_php_command_args(args);
    command_args.push("-r");
    command_args.push(code);
    command_args
}

/// `-n`, `-d name=value` per resolved value, then `-l`; the file goes last
pub fn build_lint_command_args(values: &BTreeMap<String, IniValue>) -> CommandArguments {
    let mut command_args = CommandArguments::new();
    command_args.push("-n");
    for (name, value) in values {
        command_args.push("-d");
        command_args.push(format!("{name}={}", value.render()));
    }
    command_args.push("-l");
    command_args
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn cli_args(config: Option<&str>, define: &[(&str, bool)]) -> PhpCliArgs {
        PhpCliArgs {
            config: config.map(str::to_string),
            define: define
                .iter()
                .map(|(d, enabled)| ((*d).to_string(), *enabled))
                .collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn test_build_php_command_args() {
        let cases: Vec<(PhpCliArgs, Vec<&str>)> = vec![
            (cli_args(None, &[]), vec![]),
            (cli_args(Some("foo.ini"), &[]), vec!["-c", "foo.ini"]),
            (
                cli_args(None, &[("foo=bar", true), ("baz=boo", true)]),
                vec!["-d", "foo=bar", "-d", "baz=boo"],
            ),
            (
                cli_args(
                    Some("foo.ini"),
                    &[("foo=bar", true), ("baz=boo", true), ("ignore=yes", false)],
                ),
                vec!["-c", "foo.ini", "-d", "foo=bar", "-d", "baz=boo"],
            ),
            (cli_args(Some(""), &[]), vec![]),
        ];

        for (args, expected) in cases {
            assert_eq!(build_php_command_args(&args).as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn test_build_lint_command_args() {
        let mut values = BTreeMap::new();
        values.insert("myNumber".to_string(), IniValue::Integer(42));
        values.insert("myTrue".to_string(), IniValue::Bool(true));
        values.insert("myFalse".to_string(), IniValue::Bool(false));
        values.insert("myString".to_string(), IniValue::from("ok"));

        assert_eq!(
            build_lint_command_args(&values).as_slice(),
            &[
                "-n",
                "-d",
                "myFalse=0",
                "-d",
                "myNumber=42",
                "-d",
                "myString=ok",
                "-d",
                "myTrue=1",
                "-l"
            ]
        );
        assert_eq!(build_lint_command_args(&BTreeMap::new()).as_slice(), &["-n", "-l"]);
    }

    #[test]
    fn test_build_flag_probe_args() {
        let mut options = BTreeMap::new();
        options.insert("short_open_tag".to_string(), IniType::Boolean);
        options.insert("asp_tags".to_string(), IniType::Boolean);

        let args = build_flag_probe_args(&cli_args(Some("php.ini"), &[("a=b", true)]), &options);
        assert_eq!(
            args.as_slice(),
            &[
                "-c",
                "php.ini",
                "-d",
                "a=b",
                "-r",
                "$export = array('asp_tags' => (boolean) ini_get('asp_tags'),'short_open_tag' => (boolean) ini_get('short_open_tag'),); echo json_encode($export);"
            ]
        );
    }
}
