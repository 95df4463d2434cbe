//! Throwaway repositories for tests.

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

pub fn init_repo() -> (TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

/// Write files and add them to the index
pub fn stage(repo: &Repository, root: &Path, files: &[(&str, &str)]) {
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();
}

/// Stage `files` and commit them on HEAD
pub fn commit_all(repo: &Repository, root: &Path, files: &[(&str, &str)], message: &str) -> Oid {
    stage(repo, root, files);

    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Quill Test", "quill@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

pub fn tag(repo: &Repository, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}
