#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::io::Write;
use std::process::{Command, Stdio};

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn git_output(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
    assert!(out.status.success(), "git {args:?} failed in {}", dir.display());
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=Test Dev",
            "-c",
            "user.email=dev@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

pub fn init_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-q"]);
}

pub fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "--allow-empty", "-m", message]);
}

/// A Next.js app with a Dockerfile, a README and a TODO list, committed once.
pub fn next_app(dir: &Path) {
    init_repo(dir);
    write(
        dir,
        "package.json",
        r#"{"dependencies": {"next": "14.0.0", "react": "18.2.0"}, "scripts": {"build": "next build"}}"#,
    );
    write(dir, "Dockerfile", "FROM node:20\n");
    write(dir, "README.md", "# Shop\n\nOnline storefront for the bakery.\n");
    write(dir, "TODO.md", "- [ ] checkout\n- [x] catalog\n");
    write(dir, "docs/api.md", "# API\n");
    commit_all(dir, "Initial commit");
}

/// Adds a commit dated now whose author and subject are Latin-1 bytes.
pub fn commit_latin1(dir: &Path) {
    let tree = git_output(dir, &["rev-parse", "HEAD^{tree}"]);
    let parent = git_output(dir, &["rev-parse", "HEAD"]);
    let stamp = chrono::Utc::now().timestamp();

    let mut object = format!("tree {tree}\nparent {parent}\nauthor Jos").into_bytes();
    object.push(0xe9);
    object.extend_from_slice(
        format!(
            " <jose@example.com> {stamp} +0000\ncommitter Test Dev <dev@example.com> {stamp} +0000\n\nCaf"
        )
        .as_bytes(),
    );
    object.push(0xe9);
    object.extend_from_slice(b" menu\n");

    let mut child = Command::new("git")
        .args(["hash-object", "-t", "commit", "-w", "--stdin"])
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&object).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let hash = String::from_utf8(out.stdout).unwrap();
    git(dir, &["update-ref", "HEAD", hash.trim()]);
}
