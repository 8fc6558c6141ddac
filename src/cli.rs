//! Minimal CLI parsing for run overrides.
//!
//! The tool runs with no arguments; these flags only adjust a run.

use std::path::PathBuf;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Report matches without saving them
    pub dry_run: bool,
    /// Print the JSON report after the summary line
    pub json: bool,
    /// Override MEDIA_ROOT
    pub media_root: Option<PathBuf>,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dry-run" => options.dry_run = true,
                "--json" => options.json = true,
                "--media-root" => {
                    if let Some(value) = args.next() {
                        options.media_root = Some(PathBuf::from(value));
                    }
                }
                _ if arg.starts_with("--media-root=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.media_root = Some(PathBuf::from(value));
                    }
                }
                _ => {}
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        assert_eq!(CliOptions::parse(Vec::<String>::new()), CliOptions::default());
    }

    #[test]
    fn test_flags() {
        let options = CliOptions::parse(["--dry-run", "--json", "--media-root", "/srv/media"]);
        assert!(options.dry_run);
        assert!(options.json);
        assert_eq!(options.media_root, Some(PathBuf::from("/srv/media")));
    }

    #[test]
    fn test_media_root_equals_form() {
        let options = CliOptions::parse(["--media-root=./public"]);
        assert_eq!(options.media_root, Some(PathBuf::from("./public")));
        assert!(!options.dry_run);
    }

    #[test]
    fn test_unknown_arguments_are_ignored() {
        let options = CliOptions::parse(["--verbose", "extra"]);
        assert_eq!(options, CliOptions::default());
    }
}
