//! File-backed joke and fact collections.
//!
//! Each list lives in a plain text file, one non-blank line per entry. Loading
//! never fails the caller: a missing or blank file is seeded with the built-in
//! defaults, and any other I/O problem falls back to the defaults in memory
//! with a warning. Appends are best-effort for the same reason.

use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

pub const JOKES_FILE: &str = "jokes.txt";
pub const FACTS_FILE: &str = "facts.txt";

pub const DEFAULT_JOKES: [&str; 3] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the computer go to the doctor? Because it had a virus!",
    "What do you call fake spaghetti? An impasta!",
];

pub const DEFAULT_FACTS: [&str; 3] = [
    "Honey never spoils. Archaeologists found edible honey in ancient Egyptian tombs.",
    "Bananas are berries, but strawberries aren't.",
    "Octopuses have three hearts.",
];

/// One ordered, append-only list of lines backed by a text file.
#[derive(Debug, Clone)]
pub struct ContentList {
    path: PathBuf,
    defaults: &'static [&'static str],
    entries: Vec<String>,
}

impl ContentList {
    /// Loads the list from `path`, creating the file with `defaults` when it
    /// is absent or holds nothing but blank lines.
    pub async fn load(path: impl Into<PathBuf>, defaults: &'static [&'static str]) -> Self {
        let path = path.into();
        let entries = match read_entries(&path).await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                if let Err(e) = tokio::fs::write(&path, defaults.join("\n")).await {
                    warn!(path = %path.display(), error = %e, "could not seed content file");
                }
                owned(defaults)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable content file, using built-ins");
                owned(defaults)
            }
        };
        Self {
            path,
            defaults,
            entries,
        }
    }

    /// A list that never touches a file. Appends still land in memory.
    pub fn in_memory(defaults: &'static [&'static str]) -> Self {
        Self {
            path: PathBuf::new(),
            defaults,
            entries: owned(defaults),
        }
    }

    /// Appends one trimmed line, rejecting empty input. The in-memory list is
    /// always updated; the file write is best-effort and failures are only
    /// logged.
    pub async fn append(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.entries.push(trimmed.to_string());

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)
                .await?;
            file.write_all(format!("\n{trimmed}").as_bytes()).await
        }
        .await;
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "content append not persisted");
        }
        true
    }

    /// Uniform random entry. Falls back to the first default if the list is
    /// somehow empty at call time.
    pub fn random_item<R: Rng>(&self, rng: &mut R) -> &str {
        if self.entries.is_empty() {
            return self.defaults.first().copied().unwrap_or("");
        }
        &self.entries[rng.gen_range(0..self.entries.len())]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn owned(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}

/// Reads trimmed non-blank lines. `Ok(None)` means absent or effectively
/// empty, which callers treat as "seed me".
async fn read_entries(path: &Path) -> std::io::Result<Option<Vec<String>>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let entries: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    Ok(if entries.is_empty() { None } else { Some(entries) })
}

/// The jokes and facts a session serves, loaded together from one directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    jokes: ContentList,
    facts: ContentList,
}

impl ContentStore {
    pub async fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            jokes: ContentList::load(dir.join(JOKES_FILE), &DEFAULT_JOKES).await,
            facts: ContentList::load(dir.join(FACTS_FILE), &DEFAULT_FACTS).await,
        }
    }

    /// A store seeded with the built-in defaults and no backing files.
    pub fn in_memory() -> Self {
        Self {
            jokes: ContentList::in_memory(&DEFAULT_JOKES),
            facts: ContentList::in_memory(&DEFAULT_FACTS),
        }
    }

    pub fn random_joke<R: Rng>(&self, rng: &mut R) -> &str {
        self.jokes.random_item(rng)
    }

    pub fn random_fact<R: Rng>(&self, rng: &mut R) -> &str {
        self.facts.random_item(rng)
    }

    pub async fn add_joke(&mut self, text: &str) -> bool {
        self.jokes.append(text).await
    }

    pub async fn add_fact(&mut self, text: &str) -> bool {
        self.facts.append(text).await
    }

    pub fn jokes(&self) -> &[String] {
        self.jokes.entries()
    }

    pub fn facts(&self) -> &[String] {
        self.facts.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_seeds_missing_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jokes.txt");

        let list = ContentList::load(&path, &DEFAULT_JOKES).await;

        assert_eq!(list.entries(), &DEFAULT_JOKES[..]);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_JOKES.join("\n"));
    }

    #[tokio::test]
    async fn test_load_trims_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facts.txt");
        std::fs::write(&path, "one\n\n   \n  two  \n").unwrap();

        let list = ContentList::load(&path, &DEFAULT_FACTS).await;

        assert_eq!(list.entries(), &["one", "two"][..]);
    }

    #[tokio::test]
    async fn test_load_reseeds_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jokes.txt");
        std::fs::write(&path, "\n   \n").unwrap();

        let list = ContentList::load(&path, &DEFAULT_JOKES).await;

        assert_eq!(list.entries(), &DEFAULT_JOKES[..]);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_JOKES.join("\n"));
    }

    #[tokio::test]
    async fn test_append_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jokes.txt");

        let mut list = ContentList::load(&path, &DEFAULT_JOKES).await;
        assert!(list.append("  X  ").await);
        assert_eq!(list.entries().last().map(String::as_str), Some("X"));

        let reloaded = ContentList::load(&path, &DEFAULT_JOKES).await;
        assert!(reloaded.entries().iter().any(|e| e == "X"));
        assert_eq!(reloaded.len(), DEFAULT_JOKES.len() + 1);
    }

    #[tokio::test]
    async fn test_append_rejects_empty_input() {
        let mut list = ContentList::in_memory(&DEFAULT_JOKES);
        assert!(!list.append("   ").await);
        assert_eq!(list.len(), DEFAULT_JOKES.len());
    }

    #[test]
    fn test_random_item_does_not_mutate() {
        let list = ContentList::in_memory(&DEFAULT_FACTS);
        let before = list.entries().to_vec();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let item = list.random_item(&mut rng);
            assert!(before.iter().any(|e| e == item));
        }
        assert_eq!(list.entries(), before.as_slice());
    }

    #[test]
    fn test_random_item_empty_list_falls_back_to_first_default() {
        let list = ContentList {
            path: PathBuf::new(),
            defaults: &DEFAULT_JOKES,
            entries: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(list.random_item(&mut rng), DEFAULT_JOKES[0]);
    }

    #[tokio::test]
    async fn test_store_loads_both_collections() {
        let dir = TempDir::new().unwrap();

        let store = ContentStore::load(dir.path()).await;

        assert_eq!(store.jokes(), &DEFAULT_JOKES[..]);
        assert_eq!(store.facts(), &DEFAULT_FACTS[..]);
        assert!(dir.path().join(JOKES_FILE).exists());
        assert!(dir.path().join(FACTS_FILE).exists());
    }
}
