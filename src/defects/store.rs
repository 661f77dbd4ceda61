use super::DefectRecord;
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;

/// Load a defect record set from a JSON file.
///
/// The file holds either a bare array of records or an object with a
/// `defects` array (the shape the `extract` and `sample` commands emit).
/// Every record is validated at ingestion; the metrics engine assumes
/// pre-validated input.
pub fn load(path: &Utf8Path) -> Result<Vec<DefectRecord>> {
    let content = fs::read_to_string(path).into_app_err(format!("unable to read defect file {path}"))?;
    let records = parse(&content).into_app_err(format!("unable to parse defect file {path}"))?;

    for record in &records {
        record.validate()?;
    }

    log::debug!("loaded {} defect record(s) from {path}", records.len());
    Ok(records)
}

/// Write a defect record set as pretty-printed JSON.
pub fn save(path: &Utf8Path, records: &[DefectRecord]) -> Result<()> {
    let doc = serde_json::json!({ "defects": records });
    let content = serde_json::to_string_pretty(&doc)?;
    fs::write(path, content).into_app_err(format!("unable to write defect file {path}"))?;
    Ok(())
}

fn parse(content: &str) -> Result<Vec<DefectRecord>, serde_json::Error> {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        defects: Vec<DefectRecord>,
    }

    if let Ok(wrapper) = serde_json::from_str::<Wrapper>(content) {
        return Ok(wrapper.defects);
    }

    serde_json::from_str::<Vec<DefectRecord>>(content)
}
