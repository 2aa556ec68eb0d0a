//! Folder walking.
//!
//! Decides which folders a run visits and which audio files each folder
//! holds. Every listing is sorted by file name so runs are reproducible
//! and "the first audio file" of a folder is well defined.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result, ResultExt};

/// Which folders a run visits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traversal {
    /// Exactly this folder
    Single(PathBuf),
    /// Every directory below the root, at any depth (root excluded)
    Library(PathBuf),
    /// Only directories below the root named like a disc (`CD 1`, `cd2`, ...)
    DiscFolders(PathBuf),
    /// `root/<artist>/<album>`; with `discs`, an album's disc folders
    /// replace the album itself when it has any
    Albums { root: PathBuf, discs: bool },
}

impl Traversal {
    pub fn root(&self) -> &Path {
        match self {
            Traversal::Single(path)
            | Traversal::Library(path)
            | Traversal::DiscFolders(path)
            | Traversal::Albums { root: path, .. } => path,
        }
    }

    /// Enumerate the target folders.
    ///
    /// Fails with [`Error::NotFound`] when the root isn't a directory.
    /// Unreadable subdirectories are logged and skipped.
    pub fn folders(&self) -> Result<Vec<PathBuf>> {
        let root = self.root();
        if !root.is_dir() {
            return Err(Error::not_found(root));
        }

        Ok(match self {
            Traversal::Single(folder) => vec![folder.clone()],
            Traversal::Library(root) => walk_dirs(root, |_| true),
            Traversal::DiscFolders(root) => walk_dirs(root, |path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_disc_folder)
            }),
            Traversal::Albums { root, discs } => album_folders(root, *discs)?,
        })
    }
}

/// All directories below `root` in depth-first, name-sorted order
fn walk_dirs(root: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .filter(|path| keep(path))
        .collect()
}

fn album_folders(root: &Path, discs: bool) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();

    for artist in sorted_subdirs(root)? {
        let albums = match sorted_subdirs(&artist) {
            Ok(albums) => albums,
            Err(e) => {
                warn!(path = %artist.display(), error = %e, "Skipping unreadable artist folder");
                continue;
            }
        };

        for album in albums {
            let disc_folders: Vec<PathBuf> = if discs {
                sorted_subdirs(&album)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|dir| {
                        dir.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(is_disc_folder)
                    })
                    .collect()
            } else {
                Vec::new()
            };

            if disc_folders.is_empty() {
                folders.push(album);
            } else {
                folders.extend(disc_folders);
            }
        }
    }

    Ok(folders)
}

/// Immediate subdirectories of `dir`, sorted by name
pub fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(format!("reading {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// `.mp3` files directly inside `folder`, sorted by file name
pub fn audio_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .with_context(format!("reading {}", folder.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|path| is_audio_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Check if a path has an MP3 extension (any case)
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// `cd`, an optional separator (space, `-`, `_`, `.`), then a disc number;
/// any case. Anything may follow the number (`CD 1 (Live)`, `CD2 - Bonus`).
pub fn is_disc_folder(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let Some(rest) = lower.strip_prefix("cd") else {
        return false;
    };
    let number = rest
        .strip_prefix([' ', '-', '_', '.'])
        .unwrap_or(rest);
    number.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_disc_folder_names() {
        for name in [
            "CD 1",
            "cd2",
            "Cd-03",
            "CD_4",
            "cd.5",
            "CD10",
            "CD 1 (Live)",
            "CD 2 - Bonus",
            "CD1 Remastered",
        ] {
            assert!(is_disc_folder(name), "{name} should be a disc folder");
        }
        for name in ["CD", "cd ", "Cdrom", "CD Extras", "Disc 1", "abcd1", "cd--1"] {
            assert!(!is_disc_folder(name), "{name} should not be a disc folder");
        }
    }

    #[test]
    fn test_audio_file_extensions() {
        assert!(is_audio_file(Path::new("song.mp3")));
        assert!(is_audio_file(Path::new("SONG.MP3")));
        assert!(!is_audio_file(Path::new("song.flac")));
        assert!(!is_audio_file(Path::new("cover.jpg")));
        assert!(!is_audio_file(Path::new("mp3")));
    }

    #[test]
    fn test_audio_files_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for name in ["02 - b.mp3", "01 - a.MP3", "cover.jpg", "notes.txt", "10 - c.mp3"] {
            File::create(root.join(name)).unwrap();
        }
        mkdirs(root, &["sub.mp3"]);

        let files = audio_files(root).unwrap();
        assert_eq!(names(root, &files), vec!["01 - a.MP3", "02 - b.mp3", "10 - c.mp3"]);
    }

    #[test]
    fn test_single_folder() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("Album");
        mkdirs(temp.path(), &["Album/CD 1"]);

        let folders = Traversal::Single(folder.clone()).folders().unwrap();
        assert_eq!(folders, vec![folder]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = Traversal::Library(missing.clone()).folders().unwrap_err();
        assert!(matches!(err, Error::NotFound(path) if path == missing));
    }

    #[test]
    fn test_file_as_root_is_not_found() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("song.mp3");
        File::create(&file).unwrap();

        assert!(matches!(
            Traversal::Single(file).folders(),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_library_walks_every_level_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdirs(root, &["B/Album", "A/Second/CD 2", "A/Second/CD 1", "A/First"]);
        File::create(root.join("A/First/01.mp3")).unwrap();

        let folders = Traversal::Library(root.to_path_buf()).folders().unwrap();
        assert_eq!(
            names(root, &folders),
            vec![
                "A",
                "A/First",
                "A/Second",
                "A/Second/CD 1",
                "A/Second/CD 2",
                "B",
                "B/Album",
            ]
        );
    }

    #[test]
    fn test_disc_folders_only() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdirs(root, &["A/Double/cd2", "A/Double/CD 1", "A/Single", "B/Box/Cd-10", "B/Box/Extras"]);

        let folders = Traversal::DiscFolders(root.to_path_buf()).folders().unwrap();
        assert_eq!(
            names(root, &folders),
            vec!["A/Double/CD 1", "A/Double/cd2", "B/Box/Cd-10"]
        );
    }

    #[test]
    fn test_disc_folders_with_suffixes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdirs(root, &["A/Live/CD 1 (Live)", "A/Live/CD 2 - Bonus", "A/Box/CD1 Remastered"]);

        let folders = Traversal::DiscFolders(root.to_path_buf()).folders().unwrap();
        assert_eq!(
            names(root, &folders),
            vec!["A/Box/CD1 Remastered", "A/Live/CD 1 (Live)", "A/Live/CD 2 - Bonus"]
        );

        let albums = Traversal::Albums {
            root: root.to_path_buf(),
            discs: true,
        };
        assert_eq!(names(root, &albums.folders().unwrap()), names(root, &folders));
    }

    #[test]
    fn test_albums_without_discs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdirs(root, &["Queen/Innuendo", "Queen/Jazz/CD 1", "ABBA/Arrival"]);
        File::create(root.join("stray.mp3")).unwrap();

        let traversal = Traversal::Albums {
            root: root.to_path_buf(),
            discs: false,
        };
        assert_eq!(
            names(root, &traversal.folders().unwrap()),
            vec!["ABBA/Arrival", "Queen/Innuendo", "Queen/Jazz"]
        );
    }

    #[test]
    fn test_albums_with_discs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        mkdirs(
            root,
            &["Queen/Innuendo", "Queen/Live/CD 2", "Queen/Live/CD 1", "Queen/Live/Scans"],
        );

        let traversal = Traversal::Albums {
            root: root.to_path_buf(),
            discs: true,
        };
        assert_eq!(
            names(root, &traversal.folders().unwrap()),
            vec!["Queen/Innuendo", "Queen/Live/CD 1", "Queen/Live/CD 2"]
        );
    }
}
