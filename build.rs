use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

fn embed_build_info() {
  // Append the short commit hash and commit date to `--version` output.
  // Falls back to the bare package version if Git is unavailable.
  let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
  let git_hash = git_output(&["rev-parse", "--short", "HEAD"]);
  let git_date = git_output(&["log", "-1", "--format=%cs"]);

  let long_version = match (git_hash, git_date) {
    (Some(hash), Some(date)) => format!("{version} ({hash} {date})"),
    (Some(hash), None) => format!("{version} ({hash})"),
    _ => version,
  };
  println!("cargo:rustc-env=ADDLICENSE_LONG_VERSION={long_version}");
}

fn git_output(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!text.is_empty()).then_some(text)
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
