use anyhow::Result;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

// --- CSV Fixtures ---

/// Three extractable rows: a plain cell, a quoted cell, and a malformed object.
pub const MIXED_CSV: &str = r#"Name,Slug,JSON
Example,example-1,"{""key"":""value""}"
Nested,nested,"{""items"":[1,2,3],""meta"":{""ok"":true}}"
Broken,broken,"{key: value}"
Skipped,,"{""orphan"":true}"
NoJson,no-json,plain text
"#;

/// A CSV whose columns do not look like slug or JSON columns.
pub const UNRECOGNIZED_CSV: &str = "A,B\n1,2\n";

/// Two rows with the same slug.
pub const DUPLICATE_CSV: &str = r#"slug,json
same,"{""version"":1}"
other,"{""version"":0}"
same,"{""version"":2}"
"#;

// --- Archive Helpers ---

/// Reads every file of a zip into a `name -> content` map.
pub fn read_zip_entries(bytes: &[u8]) -> Result<BTreeMap<String, String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        entries.insert(file.name().to_string(), content);
    }
    Ok(entries)
}

/// Lists the file names of a zip in archive order.
pub fn zip_entry_names(bytes: &[u8]) -> Result<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

// --- Test-Specific Helpers ---
#[cfg(feature = "http")]
pub mod helpers {
    use reqwest::multipart::{Form, Part};

    /// Builds an upload form with `csv` in the `file` field.
    pub fn csv_upload_form(csv: &str) -> Form {
        let part = Part::text(csv.to_string())
            .file_name("upload.csv")
            .mime_str("text/csv")
            .expect("text/csv is a valid mime type");
        Form::new().part("file", part)
    }
}
