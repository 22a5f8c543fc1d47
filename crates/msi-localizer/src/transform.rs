//! The external transform tool.
//!
//! Embedding a language transform into an MSI is left to an external
//! batch tool. The packager only sees [`TransformTool`]; the production
//! implementation spawns the tool once per culture and waits for it.

use crate::core::{ToolLaunchError, TransformError, TransformFailedError};
use msi_localizer_config::LocaleEntry;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// One culture to embed into the master package.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransformRequest {
    /// Directory holding the base-culture package.
    pub source_dir: PathBuf,
    /// Package file name, identical in source and target directories.
    pub package_name: String,
    /// Culture to embed.
    pub locale: LocaleEntry,
    /// Directory holding the master package, edited in place.
    pub target_dir: PathBuf,
}

impl TransformRequest {
    /// Positional arguments in the order the tool expects them.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            self.source_dir.clone().into_os_string(),
            OsString::from(&self.package_name),
            OsString::from(&self.locale.culture_name),
            OsString::from(self.locale.culture_code.to_string()),
            self.target_dir.clone().into_os_string(),
        ]
    }
}

/// Applies a language transform to the master package.
///
/// Implementations must block until the transform is fully applied.
pub trait TransformTool {
    fn apply_transform(&self, request: &TransformRequest) -> Result<(), TransformError>;
}

/// Runs an external batch tool taking five positional arguments:
/// source dir, package name, culture name, culture code, target dir.
#[derive(Clone, Debug)]
pub struct BatchTransformTool {
    program: PathBuf,
}

impl BatchTransformTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the command for a request. Standard streams are inherited.
    pub fn command(&self, request: &TransformRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(request.args());
        cmd
    }

    /// Render the invocation for logs and dry runs.
    pub fn command_line(&self, request: &TransformRequest) -> String {
        std::iter::once(self.program.clone().into_os_string())
            .chain(request.args())
            .map(|arg| quote(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TransformTool for BatchTransformTool {
    fn apply_transform(&self, request: &TransformRequest) -> Result<(), TransformError> {
        tracing::debug!(command = %self.command_line(request), "running transform tool");

        let status = self
            .command(request)
            .status()
            .map_err(|source| ToolLaunchError {
                program: self.program.clone(),
                culture: request.locale.culture_name.clone(),
                source,
            })?;

        if !status.success() {
            tracing::error!(
                culture = %request.locale.culture_name,
                %status,
                "transform tool failed"
            );
            return Err(TransformFailedError {
                culture: request.locale.culture_name.clone(),
                code: request.locale.culture_code,
                exit_code: status.code(),
            }
            .into());
        }

        Ok(())
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(culture: &str, code: u32) -> TransformRequest {
        TransformRequest {
            source_dir: PathBuf::from("/build/en-us"),
            package_name: "Package.msi".to_string(),
            locale: LocaleEntry::new(culture, code),
            target_dir: PathBuf::from("/build/Master"),
        }
    }

    #[rstest]
    #[case("de-de", 1031)]
    #[case("pt-pt", 2070)]
    #[case("zh-cn", 2052)]
    fn test_request_args_carry_culture(#[case] culture: &str, #[case] code: u32) {
        let args = request(culture, code).args();
        assert_eq!(args.len(), 5);
        assert_eq!(args[2], OsString::from(culture));
        assert_eq!(args[3], OsString::from(code.to_string()));
        assert_eq!(args[4], OsString::from("/build/Master"));
    }

    #[test]
    fn test_request_args_order() {
        let args = request("de-de", 1031).args();
        assert_eq!(
            args,
            vec![
                OsString::from("/build/en-us"),
                OsString::from("Package.msi"),
                OsString::from("de-de"),
                OsString::from("1031"),
                OsString::from("/build/Master"),
            ]
        );
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let tool = BatchTransformTool::new("/tools/Add Language.bat");
        let line = tool.command_line(&request("fr-fr", 1036));
        assert_eq!(
            line,
            "\"/tools/Add Language.bat\" /build/en-us Package.msi fr-fr 1036 /build/Master"
        );
    }

    #[test]
    fn test_launch_failure() {
        let tool = BatchTransformTool::new("/definitely/not/a/tool");
        let result = tool.apply_transform(&request("ko-kr", 1042));
        assert!(matches!(
            result,
            Err(TransformError::Launch(ToolLaunchError { culture, .. })) if culture == "ko-kr"
        ));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt as _;
        use std::path::Path;
        use tempfile::TempDir;

        fn write_script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("add-language.sh");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_tool_receives_five_arguments() {
            let temp = TempDir::new().unwrap();
            let log = temp.path().join("args.log");
            let script = write_script(
                temp.path(),
                &format!(
                    "printf '%s\\n' \"$#\" \"$@\" > '{}'",
                    log.display()
                ),
            );

            let tool = BatchTransformTool::new(script);
            tool.apply_transform(&request("ja-jp", 1041)).unwrap();

            let recorded = fs::read_to_string(&log).unwrap();
            assert_eq!(
                recorded.lines().collect::<Vec<_>>(),
                vec!["5", "/build/en-us", "Package.msi", "ja-jp", "1041", "/build/Master"]
            );
        }

        #[test]
        fn test_non_zero_exit_is_failure() {
            let temp = TempDir::new().unwrap();
            let script = write_script(temp.path(), "exit 3");

            let tool = BatchTransformTool::new(script);
            let result = tool.apply_transform(&request("es-es", 1034));

            assert!(matches!(
                result,
                Err(TransformError::Failed(TransformFailedError {
                    culture,
                    code: 1034,
                    exit_code: Some(3),
                })) if culture == "es-es"
            ));
        }
    }
}
