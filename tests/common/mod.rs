use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn moodlog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("moodlog").unwrap();
    cmd.env_remove("MOODLOG_ROOT");
    cmd.env_remove("MOODLOG_LOG");
    cmd
}

/// Initialize a journal in `root` through the CLI
pub fn init_journal(root: &Path) {
    moodlog_cmd().arg("init").arg(root).assert().success();
}

/// Write a daily note `<date>.md` with an optional mood line
pub fn write_note(root: &Path, date: &str, mood: Option<&str>, body: &str) {
    let content = match mood {
        Some(mood) => format!("mood: {}\n\n{}\n", mood, body),
        None => format!("{}\n", body),
    };
    fs::write(root.join(format!("{}.md", date)), content).unwrap();
}
