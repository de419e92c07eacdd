use anyhow::anyhow;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Blocks for one line of input holding the user's choice.
pub fn read_selection() -> anyhow::Result<String> {
    let mut editor = DefaultEditor::new()?;
    match editor.readline("") {
        Ok(line) => Ok(line),
        Err(ReadlineError::Eof) => Err(anyhow!("no selection given")),
        Err(ReadlineError::Interrupted) => Err(anyhow!("interrupted")),
        Err(e) => Err(e.into()),
    }
}
