use anyhow::Result;
use batch_rename_core::lister::resolve_folder;
use batch_rename_core::preview::render_preview;
use batch_rename_core::{
    render_failures, ApplyOptions, Preview, PreviewStats, RenameMode, Session,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
Commands:
  open <folder>          list the files of a folder
  recursive on|off       include files in nested folders
  mode <mode>            prepend, append, or replace
  match <text>           text to add, or to search for in replace mode
  with <text>            replacement text (replace mode)
  show                   show the full preview
  apply                  rename the files marked for renaming
  reload                 list the folder again
  help                   show this help
  quit                   leave
";

/// Settings that stay fixed for the whole interactive run
pub struct InteractiveOptions {
    pub preview: Preview,
    pub apply_options: ApplyOptions,
    pub use_color: bool,
}

pub fn handle_interactive(
    mut session: Session,
    folder: Option<PathBuf>,
    options: &InteractiveOptions,
) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    if let Some(folder) = folder {
        let command = format!("open {}", folder.display());
        run_command(&mut session, &command, options, &mut output)?;
    }
    run_interactive(&mut session, &mut stdin.lock(), &mut output, options)
}

/// Read commands line by line until `quit` or end of input
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
    options: &InteractiveOptions,
) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let command = line.trim_end_matches(['\n', '\r']);
        if matches!(command.trim(), "quit" | "exit" | "q") {
            return Ok(());
        }
        run_command(session, command, options, output)?;
    }
}

/// Run one command line against the session.
///
/// Mistakes are reported to `output` and never end the loop; only write
/// errors on `output` itself are returned.
fn run_command<W: Write>(
    session: &mut Session,
    line: &str,
    options: &InteractiveOptions,
    output: &mut W,
) -> Result<()> {
    let (command, argument) = match line.trim_start().split_once(' ') {
        Some((command, argument)) => (command, argument),
        None => (line.trim(), ""),
    };

    match command {
        "" => {},
        "help" => write!(output, "{HELP}")?,
        "open" => {
            let folder = argument.trim();
            if folder.is_empty() {
                writeln!(output, "No folder selected")?;
            } else {
                match session.open(folder) {
                    Ok(()) => write_stats(session, output)?,
                    Err(e) => writeln!(output, "Error: {e}")?,
                }
            }
        },
        "reload" => match session.reload() {
            Ok(()) => write_stats(session, output)?,
            Err(e) => writeln!(output, "Error: {e}")?,
        },
        "recursive" => {
            let recursive = match argument.trim() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    writeln!(output, "Expected on or off, got '{other}'")?;
                    return Ok(());
                },
            };
            match session.set_recursive(recursive) {
                Ok(()) => write_stats(session, output)?,
                Err(e) => writeln!(output, "Error: {e}")?,
            }
        },
        "mode" => match RenameMode::from_str(argument.trim()) {
            Ok(mode) => {
                session.set_mode(mode);
                write_stats(session, output)?;
            },
            Err(e) => writeln!(output, "{e}")?,
        },
        "match" => {
            session.set_match_text(argument);
            write_stats(session, output)?;
        },
        "with" => {
            session.set_replacement_text(argument);
            write_stats(session, output)?;
        },
        "show" => {
            let root = session.folder().map(resolve_folder);
            let rendered = render_preview(
                session.previews(),
                session.rule(),
                root.as_deref(),
                options.preview,
                Some(options.use_color),
            );
            if rendered.ends_with('\n') || rendered.is_empty() {
                write!(output, "{rendered}")?;
            } else {
                writeln!(output, "{rendered}")?;
            }
        },
        "apply" => apply(session, options, output)?,
        other => writeln!(
            output,
            "Unknown command '{other}'. Type help for a list of commands."
        )?,
    }

    Ok(())
}

fn apply<W: Write>(
    session: &mut Session,
    options: &InteractiveOptions,
    output: &mut W,
) -> Result<()> {
    if session.folder().is_none() {
        writeln!(output, "No folder selected")?;
        return Ok(());
    }
    if !session.has_changes() {
        writeln!(output, "Nothing to rename")?;
        return Ok(());
    }

    let report = match session.apply(&options.apply_options) {
        Ok(report) => report,
        Err(e) => {
            writeln!(output, "Error: {e:#}")?;
            return Ok(());
        },
    };

    if report.succeeded > 0 {
        writeln!(output, "✓ Renamed {} files", report.succeeded)?;
    }
    if !report.all_succeeded() {
        writeln!(output, "Some files could not be renamed")?;
        let root = session.folder().map(resolve_folder);
        let failures = render_failures(&report, root.as_deref(), options.use_color);
        writeln!(output, "{}", failures.trim_end())?;
    }
    if session.is_stale() {
        writeln!(
            output,
            "Could not list the folder again; the preview may be out of date. Type reload to retry."
        )?;
    }
    write_stats(session, output)
}

fn write_stats<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    let stats = PreviewStats::from_previews(session.previews());
    write!(
        output,
        "{}: {} files, {} to rename",
        session.rule(),
        stats.files,
        stats.changed
    )?;
    if stats.conflicts > 0 {
        write!(output, ", {} conflicts", stats.conflicts)?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_rename_core::{ListOptions, RenameRule};
    use std::fs;
    use tempfile::TempDir;

    fn options() -> InteractiveOptions {
        InteractiveOptions {
            preview: Preview::Summary,
            apply_options: ApplyOptions::default(),
            use_color: false,
        }
    }

    fn run(session: &mut Session, script: &str) -> String {
        let mut output = Vec::new();
        run_interactive(session, &mut script.as_bytes(), &mut output, &options()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_edit_rule_and_apply() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("report.txt"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let mut session = Session::default();
        let script = format!(
            "open {}\nmode replace\nmatch notes\nwith memo\nshow\napply\nquit\n",
            temp_dir.path().display()
        );
        let output = run(&mut session, &script);

        assert!(output.contains("notes.txt -> memo.txt"));
        assert!(output.contains("✓ Renamed 1 files"));
        assert!(temp_dir.path().join("memo.txt").exists());
        assert!(temp_dir.path().join("report.txt").exists());
        assert!(!session.has_changes());
    }

    #[test]
    fn test_match_text_keeps_spaces() {
        let mut session = Session::new(RenameRule::prepend(""), ListOptions::default());
        run(&mut session, "match  draft \n");
        assert_eq!(session.rule().match_text, " draft ");
    }

    #[test]
    fn test_mistakes_do_not_end_the_loop() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::default();
        let script = format!(
            "frobnicate\nmode sideways\nopen {}\nrecursive maybe\napply\nhelp\n",
            temp_dir.path().join("missing").display()
        );
        let output = run(&mut session, &script);

        assert!(output.contains("Unknown command 'frobnicate'"));
        assert!(output.contains("Invalid rename mode: sideways"));
        assert!(output.contains("Folder not found"));
        assert!(output.contains("Expected on or off, got 'maybe'"));
        assert!(output.contains("No folder selected"));
        assert!(output.contains("Commands:"));
    }

    #[test]
    fn test_recursive_toggle_relists() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub").join("b.txt"), "").unwrap();

        let mut session = Session::default();
        let script = format!("open {}\nrecursive on\n", temp_dir.path().display());
        let output = run(&mut session, &script);

        assert!(output.contains("1 files, 0 to rename"));
        assert!(output.contains("2 files, 0 to rename"));
        assert_eq!(session.files().len(), 2);
    }

    #[test]
    fn test_stale_listing_is_reported_after_apply() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();

        let mut session = Session::new(RenameRule::prepend("x_"), ListOptions::default());
        session.open(temp_dir.path()).unwrap();
        session.set_filters(vec!["[".to_string()], vec![]).unwrap_err();

        let output = run(&mut session, "apply\n");

        assert!(output.contains("✓ Renamed 1 files"));
        assert!(output.contains("the preview may be out of date"));
        assert!(temp_dir.path().join("x_a.txt").exists());
    }

    #[test]
    fn test_failed_renames_are_reported() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::write(temp_dir.path().join("x_a.txt"), "").unwrap();

        let mut session = Session::default();
        let script = format!(
            "open {}\nmode prepend\nmatch x_\napply\n",
            temp_dir.path().display()
        );
        let output = run(&mut session, &script);

        assert!(output.contains("Some files could not be renamed"));
        assert!(temp_dir.path().join("a.txt").exists());
    }
}
