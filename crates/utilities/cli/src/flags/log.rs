//! Arguments for logging.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};

use crate::{LogFormat, LogRotation};

/// Logging arguments shared by every subcommand.
#[derive(Args, Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level (1-5).
    /// By default, the verbosity level is set to 3 (info level).
    ///
    /// This verbosity level is shared by both stdout and file logging (if enabled).
    #[arg(
        short = 'v',
        global = true,
        default_value = "3",
        env = "OPNODE_LOG_LEVEL",
        action = ArgAction::Count,
    )]
    pub level: u8,
    /// If set, no logs are printed to stdout.
    #[arg(
        long = "logs.stdout.quiet",
        short = 'q',
        global = true,
        default_value = "false",
        env = "OPNODE_LOG_STDOUT_QUIET"
    )]
    pub stdout_quiet: bool,
    /// The format of the logs printed to stdout. One of: full, json, pretty, compact.
    #[arg(
        long = "logs.stdout.format",
        global = true,
        default_value = "full",
        env = "OPNODE_LOG_STDOUT_FORMAT"
    )]
    pub stdout_format: LogFormat,
    /// The directory to store the log files.
    /// If not set, no logs are printed to files.
    #[arg(long = "logs.file.directory", global = true, env = "OPNODE_LOG_FILE_DIRECTORY")]
    pub file_directory: Option<PathBuf>,
    /// The format of the logs printed to log files. One of: full, json, pretty, compact.
    #[arg(
        long = "logs.file.format",
        global = true,
        default_value = "full",
        env = "OPNODE_LOG_FILE_FORMAT"
    )]
    pub file_format: LogFormat,
    /// The rotation of the log files. One of: minutely, hourly, daily, never.
    #[arg(
        long = "logs.file.rotation",
        global = true,
        default_value = "never",
        env = "OPNODE_LOG_FILE_ROTATION"
    )]
    pub file_rotation: LogRotation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        logs: LogArgs,
    }

    #[test]
    fn test_default_log_args() {
        let cli = TestCli::parse_from(["test_app"]);
        assert_eq!(cli.logs.level, 3);
        assert!(!cli.logs.stdout_quiet);
        assert_eq!(cli.logs.stdout_format, LogFormat::Full);
        assert_eq!(cli.logs.file_directory, None);
        assert_eq!(cli.logs.file_rotation, LogRotation::Never);
    }

    #[rstest]
    #[case::single(&["test_app", "-v"], 1)]
    #[case::three(&["test_app", "-vvv"], 3)]
    #[case::five(&["test_app", "-vvvvv"], 5)]
    fn test_verbosity_count(#[case] args: &[&str], #[case] expected: u8) {
        let cli = TestCli::parse_from(args);
        assert_eq!(cli.logs.level, expected);
    }

    #[test]
    fn test_file_logging_flags() {
        let cli = TestCli::parse_from([
            "test_app",
            "--logs.file.directory",
            "/tmp/opnode",
            "--logs.file.format",
            "json",
            "--logs.file.rotation",
            "hourly",
            "-q",
        ]);
        assert!(cli.logs.stdout_quiet);
        assert_eq!(cli.logs.file_directory, Some(PathBuf::from("/tmp/opnode")));
        assert_eq!(cli.logs.file_format, LogFormat::Json);
        assert_eq!(cli.logs.file_rotation, LogRotation::Hourly);
    }

    #[test]
    fn test_invalid_stdout_format() {
        assert!(TestCli::try_parse_from(["test_app", "--logs.stdout.format", "logfmt"]).is_err());
    }
}
