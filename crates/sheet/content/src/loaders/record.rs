//! Record fixture loader.

use std::path::Path;

use sheet_core::SheetRecord;

use crate::loaders::{LoadResult, read_file};

/// Loader for records stored as RON or JSON, chosen by file extension.
pub struct RecordLoader;

impl RecordLoader {
    pub fn load(path: &Path) -> LoadResult<SheetRecord> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse record JSON: {}", e)),
            Some("ron") => ron::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse record RON: {}", e)),
            other => Err(anyhow::anyhow!(
                "Unsupported record format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            )),
        }
    }

    /// Loads every `.ron`/`.json` record in a directory, sorted by path.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<SheetRecord>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
        {
            let path = entry?.path();
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("ron" | "json")
            ) {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| Self::load(path)).collect()
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{RecordKind, Sheet};

    use super::*;

    const RECRUIT_RON: &str = r#"(
        id: "porter",
        name: "Porter",
        sheet: recruit((
            hitPoints: (value: 2, max: 4),
            slots: (value: 0.0, max: 6.0),
        )),
        items: [
            (id: "pack", quantity: 1, slots: 1.0, sort: 1),
        ],
    )"#;

    #[test]
    fn loads_ron_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("porter.ron");
        std::fs::write(&path, RECRUIT_RON).unwrap();

        let record = RecordLoader::load(&path).unwrap();
        assert_eq!(record.kind(), RecordKind::Recruit);
        assert_eq!(record.items[0].sort, 1);
        let Sheet::Recruit(sheet) = &record.sheet else {
            panic!("expected a recruit");
        };
        assert_eq!(sheet.hit_points.max, 4);
        assert_eq!(sheet.slots.max, 6.0);
    }

    #[test]
    fn ron_items_carry_stored_split_and_write_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("porter.ron");
        std::fs::write(
            &path,
            r#"(
                id: "porter",
                sheet: recruit((slots: (value: 0.0, max: 6.0))),
                items: [
                    (id: "rope", quantity: 2, slots: 1.0, held: Some(1), dropped: Some(false), modifiedTime: Some(40)),
                    (id: "tent", quantity: 1, slots: 2.0, held: Some("lots"), dropped: Some(1)),
                ],
            )"#,
        )
        .unwrap();

        let record = RecordLoader::load(&path).unwrap();
        let rope = &record.items[0];
        assert_eq!(rope.held, Some(1.0));
        assert_eq!(rope.dropped, Some(false));
        assert_eq!(rope.modified_time, Some(40));

        let tent = &record.items[1];
        assert_eq!(tent.held, None);
        assert_eq!(tent.dropped, None);
        assert_eq!(tent.modified_time, None);
    }

    #[test]
    fn loads_json_records_from_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ron"), RECRUIT_RON).unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{"id": "hero", "sheet": {"character": {}}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let records = RecordLoader::load_dir(dir.path()).unwrap();
        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["hero", "porter"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.yaml");
        std::fs::write(&path, "id: hero").unwrap();
        assert!(RecordLoader::load(&path).is_err());
    }
}
