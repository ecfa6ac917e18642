use crate::spans::ArtefactRecord;
use std::path::Path;

/// Writes the record table with a header row, one record per line.
pub(crate) fn write(path: &Path, records: &[ArtefactRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    // Written explicitly so an empty table still carries its header.
    writer.write_record(["frame", "z_plane", "y_min", "y_max"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::PathBuf};

    fn create_test_filename(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("{name}.csv"));
        path
    }

    #[test]
    fn writes_header_and_rows() {
        let records = vec![
            ArtefactRecord {
                frame: 1,
                z_plane: 0,
                y_min: 256,
                y_max: 512,
            },
            ArtefactRecord {
                frame: 1,
                z_plane: 1,
                y_min: 0,
                y_max: 36,
            },
        ];

        let path = create_test_filename("artefact_table_basic");
        write(&path, &records).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(path);

        assert_eq!(
            contents,
            "frame,z_plane,y_min,y_max\n1,0,256,512\n1,1,0,36\n"
        );
    }

    #[test]
    fn empty_table_keeps_its_header() {
        let path = create_test_filename("artefact_table_empty");
        write(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(path);

        assert_eq!(contents, "frame,z_plane,y_min,y_max\n");
    }
}
