use crate::error::SessionError;
use crate::executor::{apply_batch, ApplyOptions, ApplyReport};
use crate::lister::{list_files_with, FileEntry, ListOptions};
use crate::planner::{
    find_conflicts, pending_operations, plan, Conflict, RenameOperation, RenamePreviewEntry,
};
use crate::rule::{RenameMode, RenameRule};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything the user has picked so far: folder, listing options, rule, and
/// the preview derived from them.
///
/// The preview is recomputed in full whenever the file list or the rule changes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    folder: Option<PathBuf>,
    list_options: ListOptions,
    files: Vec<FileEntry>,
    rule: RenameRule,
    previews: Vec<RenamePreviewEntry>,
    /// The last attempt to list the folder failed
    stale: bool,
}

impl Session {
    pub fn new(rule: RenameRule, list_options: ListOptions) -> Self {
        Self {
            rule,
            list_options,
            ..Self::default()
        }
    }

    /// Select a folder and list its files
    pub fn open(&mut self, folder: impl Into<PathBuf>) -> Result<(), SessionError> {
        let folder = folder.into();
        let files = list_files_with(&folder, &self.list_options)?;
        info!(folder = %folder.display(), files = files.len(), "Opened folder");
        self.folder = Some(folder);
        self.set_files(files);
        Ok(())
    }

    /// List the current folder again
    pub fn reload(&mut self) -> Result<(), SessionError> {
        let folder = self.folder.as_ref().ok_or(SessionError::NoFolder)?;
        match list_files_with(folder, &self.list_options) {
            Ok(files) => {
                self.stale = false;
                self.set_files(files);
                Ok(())
            },
            Err(e) => {
                self.stale = true;
                Err(e.into())
            },
        }
    }

    pub fn set_recursive(&mut self, recursive: bool) -> Result<(), SessionError> {
        self.list_options.recursive = recursive;
        self.reload_if_open()
    }

    pub fn set_filters(
        &mut self,
        include: Vec<String>,
        exclude: Vec<String>,
    ) -> Result<(), SessionError> {
        self.list_options.include = include;
        self.list_options.exclude = exclude;
        self.reload_if_open()
    }

    pub fn set_rule(&mut self, rule: RenameRule) {
        self.rule = rule;
        self.refresh_previews();
    }

    pub fn set_mode(&mut self, mode: RenameMode) {
        self.rule.mode = mode;
        self.refresh_previews();
    }

    pub fn set_match_text(&mut self, text: impl Into<String>) {
        self.rule.match_text = text.into();
        self.refresh_previews();
    }

    pub fn set_replacement_text(&mut self, text: impl Into<String>) {
        self.rule.replacement_text = text.into();
        self.refresh_previews();
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn list_options(&self) -> &ListOptions {
        &self.list_options
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn rule(&self) -> &RenameRule {
        &self.rule
    }

    pub fn previews(&self) -> &[RenamePreviewEntry] {
        &self.previews
    }

    pub fn pending_operations(&self) -> Vec<RenameOperation> {
        pending_operations(&self.previews)
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        find_conflicts(&self.previews)
    }

    /// True when the file list could not be refreshed and may not match the disk
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn has_changes(&self) -> bool {
        self.previews.iter().any(RenamePreviewEntry::is_changed)
    }

    /// Apply the changed entries of the current preview.
    ///
    /// The folder is listed again afterwards when at least one rename went
    /// through, so the preview reflects the disk rather than the old names.
    /// A failed relisting does not hide the report: it is logged and the
    /// session is marked [stale](Self::is_stale).
    pub fn apply(&mut self, options: &ApplyOptions) -> Result<ApplyReport> {
        if self.folder.is_none() {
            return Err(SessionError::NoFolder.into());
        }

        let operations = self.pending_operations();
        let report = apply_batch(&operations, options)?;
        info!(
            renamed = report.succeeded,
            failed = report.failed,
            "Applied renames"
        );

        if report.succeeded > 0 {
            if let Err(e) = self.reload() {
                warn!(error = %e, "Failed to list the folder again after renaming");
            }
        }
        Ok(report)
    }

    fn reload_if_open(&mut self) -> Result<(), SessionError> {
        if self.folder.is_some() {
            self.reload()
        } else {
            Ok(())
        }
    }

    fn set_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.refresh_previews();
    }

    fn refresh_previews(&mut self) {
        self.previews = plan(&self.files, &self.rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn proposed(session: &Session) -> Vec<(&str, &str)> {
        session
            .previews()
            .iter()
            .map(|p| (p.original_name.as_str(), p.proposed_name.as_str()))
            .collect()
    }

    #[test]
    fn test_preview_follows_rule_edits() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let mut session = Session::default();
        session.open(temp_dir.path()).unwrap();
        assert_eq!(proposed(&session), vec![("notes.txt", "notes.txt")]);
        assert!(!session.has_changes());

        session.set_match_text("notes");
        session.set_replacement_text("memo");
        assert_eq!(proposed(&session), vec![("notes.txt", "memo.txt")]);

        session.set_mode(RenameMode::Prepend);
        assert_eq!(proposed(&session), vec![("notes.txt", "notesnotes.txt")]);

        session.set_mode(RenameMode::Append);
        assert_eq!(proposed(&session), vec![("notes.txt", "notesnotes.txt")]);

        session.set_rule(RenameRule::prepend("old_"));
        assert_eq!(proposed(&session), vec![("notes.txt", "old_notes.txt")]);
        assert!(session.has_changes());
    }

    #[test]
    fn test_toggling_recursive_reloads() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("top.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("inner.txt"), "").unwrap();

        let mut session = Session::default();
        session.open(temp_dir.path()).unwrap();
        assert_eq!(session.files().len(), 1);

        session.set_recursive(true).unwrap();
        assert_eq!(session.files().len(), 2);
        assert_eq!(session.previews().len(), 2);
    }

    #[test]
    fn test_apply_without_folder_fails() {
        let mut session = Session::default();
        assert!(session.apply(&ApplyOptions::default()).is_err());
        assert!(matches!(session.reload(), Err(SessionError::NoFolder)));
    }

    #[test]
    fn test_open_missing_folder_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let err = session.open(temp_dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SessionError::List(_)));
        assert!(session.folder().is_none());
    }

    #[test]
    fn test_apply_renames_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("report.txt"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let mut session =
            Session::new(RenameRule::replace("notes", "memo"), ListOptions::default());
        session.open(temp_dir.path()).unwrap();
        assert_eq!(session.pending_operations().len(), 1);

        let report = session.apply(&ApplyOptions::default()).unwrap();
        assert!(report.all_succeeded());
        assert_eq!(report.outcomes.len(), 1);

        let mut names: Vec<_> = session.files().iter().map(|f| f.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["memo.txt", "report.txt"]);
        // The rule still applies to the fresh listing, and nothing is left to rename
        assert!(!session.has_changes());
    }

    #[test]
    fn test_report_survives_a_failed_relisting() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let mut session = Session::new(RenameRule::prepend("x_"), ListOptions::default());
        session.open(temp_dir.path()).unwrap();
        // A bad pattern makes every further listing fail; the old preview stays
        assert!(session
            .set_filters(vec!["[".to_string()], vec![])
            .is_err());
        assert!(session.is_stale());
        assert!(session.has_changes());

        let report = session.apply(&ApplyOptions::default()).unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.outcomes.len(), 1);
        assert!(session.is_stale());
        assert!(temp_dir.path().join("x_notes.txt").exists());

        session.set_filters(vec![], vec![]).unwrap();
        assert!(!session.is_stale());
        assert_eq!(session.files()[0].name, "x_notes.txt");
    }
}
