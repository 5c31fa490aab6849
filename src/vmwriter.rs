use std::io::{self, Write};

use crate::error::{Error, SemanticError};

/// Emits one stack-VM instruction per line. Generic over the sink, exactly
/// like the reference writers being generic over `fmt`/`io` write traits;
/// flushes on drop so a class's output is never left buffered on an error
/// exit path.
pub struct VmWriter<W: Write> {
  out: Option<W>,
}

impl<W: Write> VmWriter<W> {
  pub fn new(out: W) -> Self {
    Self { out: Some(out) }
  }

  /// Reclaims the sink. The writer is already flushed at this point, but
  /// `Drop` would otherwise try to flush an empty `Option` harmlessly.
  pub fn into_inner(mut self) -> W {
    self.out.take().expect("sink already taken")
  }

  fn line(&mut self, s: &str) -> io::Result<()> {
    writeln!(self.out.as_mut().expect("sink already taken"), "{s}")
  }

  pub fn write_push(&mut self, segment: &str, index: u16) -> io::Result<()> {
    self.line(&format!("push {segment} {index}"))
  }

  /// Fails if `segment == "constant"`: the VM has no way to write to it.
  /// Also propagates a sink write failure, unlike every other `write_*`
  /// method here only in that it has two distinct error sources to thread
  /// upward (semantic vs. I/O) rather than just I/O.
  pub fn write_pop(&mut self, segment: &str, index: u16, span: span::Span) -> Result<(), Error> {
    if segment == "constant" {
      return Err(SemanticError::PopConstant { span }.into());
    }
    self.line(&format!("pop {segment} {index}"))?;
    Ok(())
  }

  pub fn write_arithmetic(&mut self, op: &str) -> io::Result<()> {
    self.line(op)
  }

  pub fn write_label(&mut self, label: &str) -> io::Result<()> {
    self.line(&format!("label {label}"))
  }

  pub fn write_goto(&mut self, label: &str) -> io::Result<()> {
    self.line(&format!("goto {label}"))
  }

  pub fn write_if_goto(&mut self, label: &str) -> io::Result<()> {
    self.line(&format!("if-goto {label}"))
  }

  pub fn write_call(&mut self, name: &str, n_args: u16) -> io::Result<()> {
    self.line(&format!("call {name} {n_args}"))
  }

  pub fn write_function(&mut self, name: &str, n_locals: u16) -> io::Result<()> {
    self.line(&format!("function {name} {n_locals}"))
  }

  pub fn write_return(&mut self) -> io::Result<()> {
    self.line("return")
  }
}

impl<W: Write> Drop for VmWriter<W> {
  fn drop(&mut self) {
    if let Some(out) = self.out.as_mut() {
      let _ = out.flush();
    }
  }
}
