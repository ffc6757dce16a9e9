//! JSON file persistence for records and the faculty profile
//!
//! Stands in for the institution's record backend: the app loads
//! everything up front, mutates in memory, and writes the whole file back
//! on every change.

use crate::model::profile::FacultyProfile;
use crate::model::record::Record;
use crate::model::schema::Category;
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk shape of records.json: category slug → records
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordsFile {
    #[serde(flatten)]
    categories: BTreeMap<String, Vec<Record>>,
}

/// File-backed store rooted at one data directory
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn records_path(&self) -> PathBuf {
        self.data_dir.join("records.json")
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).with_context(|| {
                format!("Failed to create data directory {}", self.data_dir.display())
            })?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Load all records; a missing file is an empty store.
    ///
    /// Categories with unknown slugs (e.g. from a newer version) are
    /// skipped rather than treated as corruption.
    pub fn load_records(&self) -> Result<BTreeMap<Category, Vec<Record>>> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: RecordsFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut records = BTreeMap::new();
        for (slug, entries) in file.categories {
            if let Some(category) = Category::from_slug(&slug) {
                records.insert(category, entries);
            }
        }
        Ok(records)
    }

    pub fn save_records(&self, records: &BTreeMap<Category, Vec<Record>>) -> Result<()> {
        self.ensure_dir()?;
        let file = RecordsFile {
            categories: records
                .iter()
                .map(|(category, entries)| (category.slug().to_string(), entries.clone()))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let path = self.records_path();
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Next free record id across every category
    pub fn next_id(records: &BTreeMap<Category, Vec<Record>>) -> u64 {
        records
            .values()
            .flatten()
            .map(|r| r.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Insert a new record, stamp it, and persist. Returns the new id.
    pub fn add_record(
        &self,
        records: &mut BTreeMap<Category, Vec<Record>>,
        category: Category,
        fields: BTreeMap<String, String>,
    ) -> Result<u64> {
        let id = Self::next_id(records);
        let mut record = Record::new(id, fields);
        record.created_at = Some(Local::now().to_rfc3339());
        records.entry(category).or_default().push(record);
        self.save_records(records)?;
        Ok(id)
    }

    /// Replace an existing record's fields, stamp it, and persist
    pub fn update_record(
        &self,
        records: &mut BTreeMap<Category, Vec<Record>>,
        category: Category,
        id: u64,
        fields: BTreeMap<String, String>,
    ) -> Result<bool> {
        let updated = records
            .get_mut(&category)
            .and_then(|entries| entries.iter_mut().find(|r| r.id == id))
            .map(|record| {
                record.fields = fields;
                record.updated_at = Some(Local::now().to_rfc3339());
            })
            .is_some();
        if updated {
            self.save_records(records)?;
        }
        Ok(updated)
    }

    /// Remove a record and persist
    pub fn delete_record(
        &self,
        records: &mut BTreeMap<Category, Vec<Record>>,
        category: Category,
        id: u64,
    ) -> Result<bool> {
        let deleted = records
            .get_mut(&category)
            .map(|entries| {
                let before = entries.len();
                entries.retain(|r| r.id != id);
                entries.len() != before
            })
            .unwrap_or(false);
        if deleted {
            self.save_records(records)?;
        }
        Ok(deleted)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile
    // ─────────────────────────────────────────────────────────────────────────

    pub fn load_profile(&self) -> Option<FacultyProfile> {
        let path = self.profile_path();
        if !path.exists() {
            return None;
        }
        let contents = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn save_profile(&self, profile: &FacultyProfile) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(profile)?;
        let path = self.profile_path();
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> RecordStore {
        let dir = std::env::temp_dir().join(format!("fims-store-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        RecordStore::new(dir)
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.load_records().unwrap().is_empty());
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn test_add_update_delete_round_trip() {
        let store = temp_store("crud");
        let mut records = BTreeMap::new();

        let id = store
            .add_record(
                &mut records,
                Category::Awards,
                fields(&[("title", "Best Teacher"), ("year", "2022")]),
            )
            .unwrap();
        assert_eq!(id, 1);

        let loaded = store.load_records().unwrap();
        let award = &loaded[&Category::Awards][0];
        assert_eq!(award.get("title"), Some("Best Teacher"));
        assert!(award.created_at.is_some());

        assert!(store
            .update_record(
                &mut records,
                Category::Awards,
                id,
                fields(&[("title", "Best Teacher Award"), ("year", "2022")]),
            )
            .unwrap());
        let loaded = store.load_records().unwrap();
        assert_eq!(
            loaded[&Category::Awards][0].get("title"),
            Some("Best Teacher Award")
        );
        assert!(loaded[&Category::Awards][0].updated_at.is_some());

        assert!(store
            .delete_record(&mut records, Category::Awards, id)
            .unwrap());
        let loaded = store.load_records().unwrap();
        assert!(loaded
            .get(&Category::Awards)
            .map(|v| v.is_empty())
            .unwrap_or(true));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = temp_store("noop");
        let mut records = BTreeMap::new();
        assert!(!store
            .update_record(&mut records, Category::Books, 42, fields(&[]))
            .unwrap());
        assert!(!store
            .delete_record(&mut records, Category::Books, 42)
            .unwrap());
    }

    #[test]
    fn test_next_id_spans_categories() {
        let mut records: BTreeMap<Category, Vec<Record>> = BTreeMap::new();
        records
            .entry(Category::Awards)
            .or_default()
            .push(Record::new(3, BTreeMap::new()));
        records
            .entry(Category::Books)
            .or_default()
            .push(Record::new(7, BTreeMap::new()));
        assert_eq!(RecordStore::next_id(&records), 8);
        assert_eq!(RecordStore::next_id(&BTreeMap::new()), 1);
    }

    #[test]
    fn test_profile_round_trip() {
        let store = temp_store("profile");
        let profile = FacultyProfile {
            name: "Dr. R. Iyer".to_string(),
            email: "r.iyer@univ.edu".to_string(),
            department: "Physics".to_string(),
            designation: "Professor".to_string(),
            joining_year: "2008".to_string(),
            teaching_load: "50".to_string(),
            weekly_hours: "16".to_string(),
        };
        store.save_profile(&profile).unwrap();
        let loaded = store.load_profile().unwrap();
        assert_eq!(loaded.name, "Dr. R. Iyer");
        assert_eq!(loaded.joining_year, "2008");
    }

    #[test]
    fn test_unknown_slug_is_skipped() {
        let store = temp_store("unknown-slug");
        store.ensure_dir().unwrap();
        fs::write(
            store.records_path(),
            r#"{"awards": [], "patents": [{"id": 1, "fields": {}}]}"#,
        )
        .unwrap();
        let records = store.load_records().unwrap();
        assert!(records.contains_key(&Category::Awards));
        assert_eq!(records.len(), 1);
    }
}
