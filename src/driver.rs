//! Path resolution and per-file diagnostic reporting: the part of the
//! pipeline the CLI calls into directly. A single `.jack` file compiles to
//! sibling `.vm`/`.xml` outputs; a directory compiles every top-level
//! `*.jack` file it contains, continuing past individual failures so later
//! files in the directory still get a chance to compile.

use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct FileResult {
  pub path: PathBuf,
  pub outcome: Result<(), Error>,
}

/// Compiles `input`, writing outputs either alongside each source file or
/// into `out_dir` if given. Returns one result per `.jack` file attempted;
/// the driver itself never stops early on a per-file error.
pub fn run(input: &Path, emit_xml: bool, out_dir: Option<&Path>) -> std::io::Result<Vec<FileResult>> {
  let files = collect_jack_files(input)?;
  let mut results = Vec::with_capacity(files.len());
  for path in files {
    let outcome = compile_one(&path, emit_xml, out_dir);
    results.push(FileResult { path, outcome });
  }
  Ok(results)
}

fn collect_jack_files(input: &Path) -> std::io::Result<Vec<PathBuf>> {
  if input.is_dir() {
    let mut files: Vec<PathBuf> = std::fs::read_dir(input)?
      .filter_map(|entry| entry.ok())
      .map(|entry| entry.path())
      .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("jack"))
      .collect();
    files.sort();
    Ok(files)
  } else {
    Ok(vec![input.to_path_buf()])
  }
}

fn compile_one(path: &Path, emit_xml: bool, out_dir: Option<&Path>) -> Result<(), Error> {
  let (vm, xml) = crate::compile_file(path, emit_xml)?;

  let vm_path = sibling_path(path, out_dir, "vm");
  std::fs::write(&vm_path, vm)?;

  if let Some(xml) = xml {
    let xml_path = sibling_path(path, out_dir, "xml");
    std::fs::write(&xml_path, xml)?;
  }

  Ok(())
}

fn sibling_path(path: &Path, out_dir: Option<&Path>, ext: &str) -> PathBuf {
  let file_name = path.with_extension(ext);
  match out_dir {
    Some(dir) => dir.join(file_name.file_name().expect("a compiled file always has a name")),
    None => file_name,
  }
}
