//! Ready-made form sessions and stores for integration tests

use desires::{CsvStore, FormState, LinkType, OpenStore, Session};
use std::path::PathBuf;
use tempfile::TempDir;

/// A fully filled form for `name`
pub fn filled_form(name: &str, main_desire: &str) -> FormState {
    let mut form = FormState::new();
    form.name = name.to_string();
    form.main_desire = main_desire.to_string();
    let links = [LinkType::Real, LinkType::Spurious, LinkType::Unclear];
    for (slot, sub) in form.subs.iter_mut().enumerate() {
        sub.sub_desire = format!("{} sub {}", main_desire, slot + 1);
        sub.outcome = format!("{} outcome {}", main_desire, slot + 1);
        sub.link_type = links[slot];
    }
    form
}

pub fn session(name: &str, main_desire: &str) -> Session {
    Session::with_form(filled_form(name, main_desire))
}

/// A CSV store in a fresh temporary directory. Keep the `TempDir` alive for
/// as long as the store is used.
pub struct TempTable {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempTable {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("all_reflections.csv");
        Self { dir, path }
    }

    pub fn csv_store(&self) -> CsvStore {
        CsvStore::open(&self.path).expect("Failed to open CSV store")
    }
}
