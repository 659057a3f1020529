use std::{env, fs, path::{Path, PathBuf}, ops::Deref, fmt::{self, Formatter, Display}};
use tempfile::TempDir;

pub const TEST_DATA_DIR: &str = "tests/test-data";

/// A test file living within its own temporary directory. The directory is removed once the fixture is dropped.
pub struct Fixture {
    path    : PathBuf,
    _tempdir: TempDir,
}

impl Fixture {
    /// Reserve a path within a fresh temporary directory, without creating the file.
    pub fn blank(filename: &str) -> Self {
        let tempdir = tempfile::tempdir().expect("Failed to generate temp directory");
        let path    = tempdir.path().join(filename);
        Fixture { path, _tempdir: tempdir }
    }

    /// Copy a file of `tests/test-data/` into a fresh temporary directory.
    pub fn copy(filename: &str) -> Self {
        let fixture = Fixture::blank(filename);
        fs::copy(Self::source(filename), &fixture.path)
            .unwrap_or_else(|e| panic!("Failed to copy fixture {filename}: {e}"));
        fixture
    }

    /// Write `contents` into a fresh temporary file.
    pub fn with_contents(filename: &str, contents: &str) -> Self {
        let fixture = Fixture::blank(filename);
        fs::write(&fixture.path, contents).expect("Failed to write fixture");
        fixture
    }

    fn source(filename: &str) -> PathBuf {
        let root_dir = env::var("CARGO_MANIFEST_DIR").expect("$CARGO_MANIFEST_DIR");
        Path::new(&root_dir).join(TEST_DATA_DIR).join(filename)
    }

    /// Path of a sibling file, within the same temporary directory.
    pub fn sibling(&self, filename: &str) -> PathBuf {
        self.path.with_file_name(filename)
    }
}

impl Deref for Fixture {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path.deref()
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
