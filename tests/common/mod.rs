#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv_fit::FlatRecord;
use tempfile::{TempDir, tempdir};

/// Builds a record from literal pairs, keeping their order.
pub fn record(pairs: &[(&str, &str)]) -> FlatRecord {
    pairs.iter().copied().collect()
}

/// Header and two result rows in the layout the `fit` command expects.
pub const RACES_CSV: &str = "\
Race Number,lane1_place,lane1_time,lane1_laptime1,lane1_laptime2,lane2_place,lane2_time,lane2_laptime1,lane2_laptime2
3,1,00:01:30,00:00:45,00:00:45,2,00:01:40,00:00:48,00:00:52
4,2,00:01:35,00:00:47,00:00:48,1,00:01:33,00:00:46,00:00:47
";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
