//! File system repository and the read-only data access the engine consumes

use crate::domain::{Entry, EntryId, Mood, NoteParser, ParsedNote, Tag, TagId, TagOrigin};
use crate::error::{MoodlogError, Result};
use crate::infrastructure::config::CONFIG_DIR;
use crate::infrastructure::Config;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Environment variable pointing at a journal root
pub const ROOT_ENV: &str = "MOODLOG_ROOT";

/// Read-only view of the journal consumed by the insights engine.
///
/// Implementations serve an already-fetched snapshot, so these calls cannot
/// fail; storage errors surface while the snapshot is built.
pub trait DataAccess {
    /// Every distinct date that has an entry
    fn all_entry_dates(&self) -> BTreeSet<NaiveDate>;

    /// Entries dated within `[start, end]`, ascending by date
    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Entry>;

    /// Full tag catalog
    fn all_tags(&self) -> Vec<Tag>;
}

/// In-memory snapshot of entries and tags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalSnapshot {
    entries: BTreeMap<NaiveDate, Entry>,
    tags: Vec<Tag>,
}

impl JournalSnapshot {
    /// Build a snapshot. Entries sharing a date collapse to the first one.
    pub fn new(entries: Vec<Entry>, tags: Vec<Tag>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Entry> = BTreeMap::new();
        for entry in entries {
            if let Some(existing) = by_date.get(&entry.date) {
                warn!(
                    date = %entry.date,
                    kept = existing.id.0,
                    dropped = entry.id.0,
                    "duplicate entry date"
                );
                continue;
            }
            by_date.insert(entry.date, entry);
        }
        JournalSnapshot {
            entries: by_date,
            tags,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DataAccess for JournalSnapshot {
    fn all_entry_dates(&self) -> BTreeSet<NaiveDate> {
        self.entries.keys().copied().collect()
    }

    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Entry> {
        if start > end {
            return Vec::new();
        }
        self.entries.range(start..=end).map(|(_, e)| e.clone()).collect()
    }

    fn all_tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }
}

/// A daily note file found under the journal root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Path relative to the root, `/`-separated
    pub filename: String,
    pub date: NaiveDate,
}

/// Abstract repository for journal operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .moodlog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .moodlog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .moodlog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .moodlog directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks MOODLOG_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MoodlogError::Config(format!(
                    "MOODLOG_ROOT is set to '{}' but no .moodlog directory found. \
                    Run 'moodlog init' in that directory or unset MOODLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_config_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| MoodlogError::NotJournalDirectory(start.to_path_buf()))
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(MoodlogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&config_dir)?;
        Ok(())
    }
}

// Note operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// Date of a `YYYY-MM-DD.md` file name
    pub fn date_from_filename(leaf: &str) -> Option<NaiveDate> {
        let stem = leaf.strip_suffix(".md")?;
        NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
    }

    /// All daily notes below the root, skipping dot-directories, sorted by path
    pub fn note_files(&self) -> Vec<NoteFile> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !name.starts_with('.'))
            });

        let mut notes = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(date) = entry.file_name().to_str().and_then(Self::date_from_filename) else {
                continue;
            };
            let Some(filename) = entry
                .path()
                .strip_prefix(&self.root)
                .ok()
                .and_then(Self::normalize_relative_path)
            else {
                continue;
            };
            notes.push(NoteFile { filename, date });
        }

        notes.sort_by(|a, b| a.filename.cmp(&b.filename));
        notes
    }

    /// Read note content
    pub fn read_note(&self, filename: &str) -> Result<String> {
        let path = self.root.join(filename);
        fs::read_to_string(&path).map_err(|e| MoodlogError::Note {
            path,
            message: e.to_string(),
        })
    }

    /// Load every note once and resolve moods and tags against the catalogs
    pub fn snapshot(&self, config: &Config) -> Result<JournalSnapshot> {
        let mut parsed: BTreeMap<NaiveDate, (String, ParsedNote)> = BTreeMap::new();

        for note in self.note_files() {
            if let Some((kept, _)) = parsed.get(&note.date) {
                warn!(
                    date = %note.date,
                    kept = %kept,
                    skipped = %note.filename,
                    "duplicate note date"
                );
                continue;
            }
            let content = self.read_note(&note.filename)?;
            parsed.insert(note.date, (note.filename, NoteParser::parse(&content)));
        }

        let tags = build_tag_catalog(config, parsed.values().map(|(_, note)| note));
        let tag_ids: HashMap<&str, TagId> = tags.iter().map(|t| (t.name.as_str(), t.id)).collect();

        let entries = parsed
            .iter()
            .enumerate()
            .map(|(index, (date, (filename, note)))| {
                resolve_entry(EntryId(index as u32), *date, filename, note, config, &tag_ids)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            entries = entries.len(),
            tags = tags.len(),
            root = %self.root.display(),
            "journal snapshot loaded"
        );
        Ok(JournalSnapshot::new(entries, tags))
    }
}

/// System tags from the config plus every tag written in notes, sorted by name
fn build_tag_catalog<'a, I>(config: &Config, notes: I) -> Vec<Tag>
where
    I: IntoIterator<Item = &'a ParsedNote>,
{
    let system: BTreeSet<String> = config
        .system_tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut names = system.clone();
    for note in notes {
        names.extend(note.tags.iter().cloned());
    }

    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let origin = if system.contains(&name) {
                TagOrigin::System
            } else {
                TagOrigin::User
            };
            Tag::new(TagId(index as u32), name, origin)
        })
        .collect()
}

fn resolve_entry(
    id: EntryId,
    date: NaiveDate,
    filename: &str,
    note: &ParsedNote,
    config: &Config,
    tag_ids: &HashMap<&str, TagId>,
) -> Result<Entry> {
    let primary = match note.moods.first() {
        Some(name) => match config.find_mood(name) {
            Some(mood) => mood.clone(),
            None => {
                warn!(
                    note = filename,
                    mood = %name,
                    fallback = %config.default_mood,
                    "unknown primary mood"
                );
                default_mood(config)?
            }
        },
        None => {
            debug!(note = filename, "no mood line, using default mood");
            default_mood(config)?
        }
    };

    let mut secondary: Vec<Mood> = Vec::new();
    for name in note.moods.iter().skip(1) {
        match config.find_mood(name) {
            Some(mood) => secondary.push(mood.clone()),
            None => warn!(note = filename, mood = %name, "unknown secondary mood dropped"),
        }
    }
    if secondary.len() > Entry::MAX_SECONDARY_MOODS {
        warn!(
            note = filename,
            count = secondary.len(),
            "more than {} secondary moods, extra ones dropped",
            Entry::MAX_SECONDARY_MOODS
        );
    }

    let tags = note
        .tags
        .iter()
        .filter_map(|name| tag_ids.get(name.as_str()).copied())
        .collect();

    Ok(Entry::new(id, date, note.word_count, primary)
        .with_secondary_moods(secondary)
        .with_tags(tags)
        .with_category(note.category.clone().unwrap_or_else(|| "general".to_string())))
}

fn default_mood(config: &Config) -> Result<Mood> {
    config
        .find_mood(&config.default_mood)
        .cloned()
        .ok_or_else(|| {
            MoodlogError::Config(format!("Unknown default mood: '{}'", config.default_mood))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MoodCategory;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn journal() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();
        assert!(repo.is_initialized());
        assert!(temp.path().join(".moodlog").is_dir());

        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".moodlog")).unwrap();

        let subdir = temp.path().join("sub").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let repo = FileSystemRepository::discover_from(&subdir).unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_fails_without_marker() {
        let temp = TempDir::new().unwrap();

        match FileSystemRepository::discover_from(temp.path()).unwrap_err() {
            MoodlogError::NotJournalDirectory(_) => {}
            other => panic!("Expected NotJournalDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_with_env_var() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".moodlog")).unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        let repo = FileSystemRepository::discover().unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_with_invalid_env_var() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        match FileSystemRepository::discover().unwrap_err() {
            MoodlogError::Config(msg) => assert!(msg.contains("no .moodlog directory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_date_from_filename() {
        assert_eq!(
            FileSystemRepository::date_from_filename("2025-01-17.md"),
            Some(date(1, 17))
        );
        assert_eq!(FileSystemRepository::date_from_filename("2025-01-17.txt"), None);
        assert_eq!(FileSystemRepository::date_from_filename("notes.md"), None);
        assert_eq!(FileSystemRepository::date_from_filename("2025-02-30.md"), None);
    }

    #[test]
    fn test_note_files_recursive_skips_hidden_dirs() {
        let (temp, repo) = journal();
        fs::create_dir_all(temp.path().join("2025/01")).unwrap();
        fs::create_dir_all(temp.path().join(".archive")).unwrap();
        fs::write(temp.path().join("2025/01/2025-01-02.md"), "x").unwrap();
        fs::write(temp.path().join("2025-01-01.md"), "x").unwrap();
        fs::write(temp.path().join(".archive/2025-01-03.md"), "x").unwrap();
        fs::write(temp.path().join("README.md"), "x").unwrap();

        let notes = repo.note_files();
        let names: Vec<&str> = notes.iter().map(|n| n.filename.as_str()).collect();
        assert_eq!(names, vec!["2025-01-01.md", "2025/01/2025-01-02.md"]);
        assert_eq!(notes[1].date, date(1, 2));
    }

    #[test]
    fn test_snapshot_resolves_moods_and_tags() {
        let (temp, repo) = journal();
        fs::write(
            temp.path().join("2025-03-01.md"),
            "mood: happy, tired, nonsense\ncategory: travel\n\nTrain to the coast #travel #beach",
        )
        .unwrap();
        fs::write(temp.path().join("2025-03-02.md"), "No mood today #beach").unwrap();

        let config = repo.load_config().unwrap();
        let snapshot = repo.snapshot(&config).unwrap();
        assert_eq!(snapshot.len(), 2);

        let entries = snapshot.entries_in_range(date(3, 1), date(3, 31));
        let first = &entries[0];
        assert_eq!(first.primary_mood.name, "happy");
        assert_eq!(first.secondary_moods.len(), 1);
        assert_eq!(first.secondary_moods[0].category, MoodCategory::Neutral);
        assert_eq!(first.category, "travel");
        assert_eq!(first.word_count, 6);
        assert_eq!(first.tags.len(), 2);

        let second = &entries[1];
        assert_eq!(second.primary_mood.name, "okay");
        assert_eq!(second.category, "general");

        let tags = snapshot.all_tags();
        let beach = tags.iter().find(|t| t.name == "beach").unwrap();
        let travel = tags.iter().find(|t| t.name == "travel").unwrap();
        assert_eq!(beach.origin, TagOrigin::User);
        assert_eq!(travel.origin, TagOrigin::System);
        assert!(second.tags.contains(&beach.id));
    }

    #[test]
    fn test_snapshot_unknown_primary_mood_falls_back() {
        let (temp, repo) = journal();
        fs::write(temp.path().join("2025-03-01.md"), "mood: elated\n\nwords").unwrap();

        let config = repo.load_config().unwrap();
        let snapshot = repo.snapshot(&config).unwrap();
        let entries = snapshot.entries_in_range(date(3, 1), date(3, 1));
        assert_eq!(entries[0].primary_mood.name, config.default_mood);
    }

    #[test]
    fn test_snapshot_duplicate_dates_keep_first_path() {
        let (temp, repo) = journal();
        fs::create_dir_all(temp.path().join("old")).unwrap();
        fs::write(temp.path().join("2025-03-01.md"), "one").unwrap();
        fs::write(temp.path().join("old/2025-03-01.md"), "one two three").unwrap();

        let config = repo.load_config().unwrap();
        let snapshot = repo.snapshot(&config).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.entries_in_range(date(3, 1), date(3, 1))[0].word_count,
            1
        );
    }

    #[test]
    fn test_snapshot_data_access() {
        let mood = Mood::new("calm", MoodCategory::Positive, 1);
        let entries = vec![
            Entry::new(EntryId(0), date(1, 5), 10, mood.clone()),
            Entry::new(EntryId(1), date(1, 1), 20, mood.clone()),
            Entry::new(EntryId(2), date(1, 5), 30, mood),
        ];
        let snapshot = JournalSnapshot::new(entries, Vec::new());

        assert_eq!(
            snapshot.all_entry_dates().into_iter().collect::<Vec<_>>(),
            vec![date(1, 1), date(1, 5)]
        );
        let in_range = snapshot.entries_in_range(date(1, 2), date(1, 5));
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].word_count, 10);
        assert!(snapshot.entries_in_range(date(1, 5), date(1, 1)).is_empty());
    }

    #[test]
    fn test_snapshot_of_empty_journal() {
        let (_temp, repo) = journal();
        let config = repo.load_config().unwrap();
        let snapshot = repo.snapshot(&config).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.all_tags().len(), config.system_tags.len());
    }
}
