//! Exercises `jackc::driver::run` directly: directory-mode file collection,
//! sibling-file output naming, and the "continue past a failed file"
//! policy from spec.md §5/§7 that the scenario-level tests in
//! `compile.rs` never touch (they all go through `compile_str`, bypassing
//! the driver entirely).

use std::fs;

use tempfile::tempdir;

#[test]
fn directory_mode_compiles_every_jack_file_and_writes_siblings() {
  let dir = tempdir().unwrap();
  fs::write(
    dir.path().join("A.jack"),
    "class A { function void f() { return; } }",
  )
  .unwrap();
  fs::write(
    dir.path().join("B.jack"),
    "class B { field int x; method int g() { return x; } }",
  )
  .unwrap();
  // Not a .jack file; must be ignored by directory-mode collection.
  fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

  let results = jackc::driver::run(dir.path(), false, None).unwrap();
  assert_eq!(results.len(), 2);
  assert!(results.iter().all(|r| r.outcome.is_ok()));

  let vm_a = fs::read_to_string(dir.path().join("A.vm")).unwrap();
  assert_eq!(vm_a, "function A.f 0\npush constant 0\nreturn\n");

  let vm_b = fs::read_to_string(dir.path().join("B.vm")).unwrap();
  assert_eq!(
    vm_b,
    "function B.g 0\npush argument 0\npop pointer 0\npush this 0\nreturn\n"
  );
}

#[test]
fn a_failing_file_does_not_stop_the_rest_of_the_directory() {
  let dir = tempdir().unwrap();
  fs::write(
    dir.path().join("a_bad.jack"),
    "class Bad { function void f() { let x = 1; return; } }",
  )
  .unwrap();
  fs::write(
    dir.path().join("b_good.jack"),
    "class Good { function void f() { return; } }",
  )
  .unwrap();

  let results = jackc::driver::run(dir.path(), false, None).unwrap();
  assert_eq!(results.len(), 2);

  let bad = &results[0];
  assert!(bad.path.ends_with("a_bad.jack"));
  assert!(bad.outcome.is_err());
  // The failed file must not have produced a sibling .vm output.
  assert!(!dir.path().join("a_bad.vm").exists());

  let good = &results[1];
  assert!(good.path.ends_with("b_good.jack"));
  assert!(good.outcome.is_ok());
  assert!(dir.path().join("b_good.vm").exists());
}

#[test]
fn single_file_input_compiles_just_that_file() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("Main.jack");
  fs::write(&path, "class Main { function void main() { return; } }").unwrap();

  let results = jackc::driver::run(&path, false, None).unwrap();
  assert_eq!(results.len(), 1);
  assert!(results[0].outcome.is_ok());
  assert!(dir.path().join("Main.vm").exists());
}

#[test]
fn out_dir_overrides_sibling_placement() {
  let src_dir = tempdir().unwrap();
  let out_dir = tempdir().unwrap();
  let path = src_dir.path().join("Main.jack");
  fs::write(&path, "class Main { function void main() { return; } }").unwrap();

  let results = jackc::driver::run(&path, true, Some(out_dir.path())).unwrap();
  assert!(results[0].outcome.is_ok());

  assert!(out_dir.path().join("Main.vm").exists());
  assert!(out_dir.path().join("Main.xml").exists());
  // Nothing should have been written alongside the source.
  assert!(!src_dir.path().join("Main.vm").exists());
}
