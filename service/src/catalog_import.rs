use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord};

use crate::{catalog_store::CatalogStore, error::Error};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: usize,
    /// Rows that added a new catalog entry.
    pub imported: usize,
    /// Well formed rows whose entry already existed.
    pub duplicates: usize,
    /// Malformed rows: too few columns, empty required fields, bad encoding.
    pub skipped: usize,
}

impl ImportSummary {
    fn merge(&mut self, other: ImportSummary) {
        self.files += other.files;
        self.imported += other.imported;
        self.duplicates += other.duplicates;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowLayout {
    /// english, localized
    TwoColumn,
    /// machine id, english, localized
    MachineId,
}

/// Imports every `*.csv` file of `dir`, in file name order. The file stem is
/// the platform scope of its rows. A file that cannot be read is logged and
/// skipped.
pub fn import_directory(dir: &Path, store: &mut CatalogStore) -> Result<ImportSummary, Error> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    let mut summary = ImportSummary::default();
    for path in files {
        let Some(scope) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        let scope = scope.to_string();
        let file_summary = File::open(&path)
            .map_err(Error::from)
            .and_then(|file| import_reader(file, &scope, store));
        match file_summary {
            Ok(file_summary) => {
                tracing::info!(
                    scope = %scope,
                    imported = file_summary.imported,
                    skipped = file_summary.skipped,
                    "Imported catalog file"
                );
                summary.merge(file_summary);
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Failed to import catalog file"
                );
            }
        }
    }
    Ok(summary)
}

/// Imports the catalog files of the per-user catalog directory. A missing
/// directory is an empty catalog.
pub fn import_default_directory(store: &mut CatalogStore) -> Result<ImportSummary, Error> {
    let dir = file_system::get_catalog_source_dir()?;
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "No catalog directory");
        return Ok(ImportSummary::default());
    }
    import_directory(&dir, store)
}

/// Imports one CSV document into `scope`.
///
/// The layout is detected from the first row: a first cell mentioning
/// "MAME" (with at least three columns) announces the machine id layout, a
/// first cell containing "Name" is a two column header, anything else is
/// already a two column data row.
pub fn import_reader<R: Read>(
    reader: R,
    scope: &str,
    store: &mut CatalogStore,
) -> Result<ImportSummary, Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();
    let mut summary = ImportSummary {
        files: 1,
        ..Default::default()
    };

    let first = match records.next() {
        None => return Ok(summary),
        Some(first) => first?,
    };
    let first_cell = first.get(0).map(strip_bom).unwrap_or_default();
    let layout = if first.len() >= 3 && first_cell.to_lowercase().contains("mame") {
        RowLayout::MachineId
    } else if first_cell == "Name EN" || first_cell.contains("Name") {
        RowLayout::TwoColumn
    } else {
        import_row(&first, RowLayout::TwoColumn, scope, store, &mut summary);
        RowLayout::TwoColumn
    };

    for record in records {
        match record {
            Ok(record) => import_row(&record, layout, scope, store, &mut summary),
            Err(err) => {
                tracing::warn!(scope, error = %err, "Skipping malformed catalog row");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

fn import_row(
    record: &StringRecord,
    layout: RowLayout,
    scope: &str,
    store: &mut CatalogStore,
    summary: &mut ImportSummary,
) {
    let cell = |index: usize| record.get(index).map(|c| strip_bom(c).trim()).unwrap_or_default();
    let (machine_id, english, localized) = match layout {
        RowLayout::MachineId if record.len() >= 3 => (Some(cell(0)), cell(1), cell(2)),
        RowLayout::TwoColumn if record.len() >= 2 => (None, cell(0), cell(1)),
        _ => {
            summary.skipped += 1;
            return;
        }
    };
    if english.is_empty() || machine_id.is_some_and(str::is_empty) {
        summary.skipped += 1;
        return;
    }

    if store.insert(english, localized, scope) {
        summary.imported += 1;
    } else {
        summary.duplicates += 1;
    }
    store.add_alias(english, english);
    if let Some(machine_id) = machine_id {
        store.add_alias(machine_id, english);
    }
}

fn strip_bom(cell: &str) -> &str {
    cell.trim_start_matches('\u{feff}')
}

#[cfg(test)]
mod tests {
    use domain::normalize;

    use super::*;

    #[test]
    fn test_two_column_with_header() {
        let csv = "Name EN,Name CN\nFinal Fight,快打旋风\nPulstar,\n,空\nBroken\n";
        let mut store = CatalogStore::new();
        let summary = import_reader(csv.as_bytes(), "SNES", &mut store).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.resolve_exact("Final Fight", &[]), Some("快打旋风"));
        assert_eq!(store.resolve_exact("Pulstar", &[]), Some("Pulstar"));
        assert!(store.resolve_by_alias("finalfight", &[]).is_some());
    }

    #[test]
    fn test_headerless_first_row_is_data() {
        let csv = "\u{feff}Contra (Japan),魂斗罗\nContra (Japan),魂斗罗 改\n";
        let mut store = CatalogStore::new();
        let summary = import_reader(csv.as_bytes(), "Nintendo - NES", &mut store).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(store.resolve_exact("Contra (Japan)", &[]), Some("魂斗罗"));
    }

    #[test]
    fn test_machine_id_layout_registers_aliases() {
        let csv = "MAME Name,EN Name,CN Name\n1941,1941: Counter Attack (World 900227),1941 反击战\nmslug,,合金弹头\n";
        let mut store = CatalogStore::new();
        let summary = import_reader(csv.as_bytes(), "Arcade - CPS1", &mut store).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        let pair = store.resolve_by_alias(&normalize("1941"), &[]).unwrap();
        assert_eq!(pair.localized, "1941 反击战");
        assert_eq!(pair.reference, "1941: Counter Attack (World 900227)");
        assert!(store.resolve_by_alias("1941counterattack", &[]).is_some());
    }

    #[test]
    fn test_empty_document() {
        let mut store = CatalogStore::new();
        let summary = import_reader("".as_bytes(), "SNES", &mut store).unwrap();
        assert_eq!(summary, ImportSummary { files: 1, ..Default::default() });
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_directory_uses_file_stem_as_scope() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Nintendo - Super Nintendo Entertainment System.csv"),
            "Name EN,Name CN\nFinal Fight,快打旋风\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Arcade - NEOGEO.csv"),
            "MAME,EN,CN\nmslug,Metal Slug - Super Vehicle-001,合金弹头\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a catalog").unwrap();

        let mut store = CatalogStore::new();
        let summary = import_directory(dir.path(), &mut store).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.imported, 2);
        let neogeo = vec!["Arcade - NEOGEO".to_string()];
        assert_eq!(
            store.resolve_exact("Metal Slug - Super Vehicle-001", &neogeo),
            Some("合金弹头")
        );
        let snes = vec!["Nintendo - Super Nintendo Entertainment System".to_string()];
        assert_eq!(store.resolve_exact("Final Fight", &snes), Some("快打旋风"));
        assert_eq!(store.resolve_exact("Final Fight", &neogeo), None);
    }

    #[test]
    fn test_import_directory_missing_dir_is_error() {
        let mut store = CatalogStore::new();
        let result = import_directory(Path::new("/nonexistent/catalog"), &mut store);
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
