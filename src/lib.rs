//! Single-pass compiler from Jack source to Nand2Tetris stack-VM assembly.
//!
//! [`compile_str`] and [`compile_file`] are the library's only two public
//! entry points; everything else (lexer, symbol table, VM/XML writers,
//! engine) is assembled by them and exposed for the CLI and for tests that
//! want to exercise a single component directly.

pub mod driver;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod symbol;
pub mod vmwriter;
pub mod xmlwriter;

pub use error::{Error, Result};
pub use span::Span;

use engine::Engine;
use vmwriter::VmWriter;
use xmlwriter::XmlWriter;

/// Compiles one class's Jack source to VM text, optionally also producing
/// its XML parse tree.
pub fn compile_str(src: &str, emit_xml: bool) -> Result<(String, Option<String>)> {
  let vm = VmWriter::new(Vec::new());
  let xml = emit_xml.then(|| XmlWriter::new(Vec::new()));

  let mut vm_out = None;
  let mut xml_out = None;

  let engine = Engine::new(src, vm, xml)?;
  let (vm, xml) = engine.compile_and_take()?;
  vm_out.replace(String::from_utf8(vm.into_inner()).expect("VM output is always valid UTF-8"));
  if let Some(xml) = xml {
    xml_out.replace(String::from_utf8(xml.into_inner()).expect("XML output is always valid UTF-8"));
  }

  Ok((vm_out.expect("set above"), xml_out))
}

/// Reads `path`, compiles it, and returns the same pair [`compile_str`]
/// does. Used by [`driver`] for both the single-file and directory cases.
pub fn compile_file(path: &std::path::Path, emit_xml: bool) -> Result<(String, Option<String>)> {
  let src = std::fs::read_to_string(path)?;
  compile_str(&src, emit_xml)
}
