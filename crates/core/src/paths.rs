//! Path comparison for stage inputs and outputs

use std::path::{Component, Path, PathBuf};

/// Whether two paths name the same file
///
/// Existing files are compared by their canonical paths. Otherwise the
/// comparison is lexical with `.` components removed.
pub fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => lexical(a) == lexical(b),
    }
}

fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_dot_ignored() {
        assert!(same_path(Path::new("./tr_freq_list_v1.txt"), Path::new("tr_freq_list_v1.txt")));
        assert!(same_path(Path::new("out/./a.txt"), Path::new("out/a.txt")));
        assert!(!same_path(Path::new("a.txt"), Path::new("b.txt")));
    }

    #[test]
    fn test_existing_files_compared_canonically() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("list.txt");
        std::fs::write(&file, "kalem,5\n").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let roundabout = dir.path().join("sub").join("..").join("list.txt");
        assert!(same_path(&file, &roundabout));
        assert!(!same_path(&file, &dir.path().join("other.txt")));
    }
}
