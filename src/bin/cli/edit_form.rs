use anyhow::Result;
use bookdash::{types::Column, BookSource, TableController};

/// Walk through every column of the book being edited, then ask whether to
/// save. Leaving a prompt empty with escape keeps the field as it is.
pub fn run<S: BookSource>(controller: &mut TableController<S>) -> Result<()> {
    for column in Column::ALL {
        loop {
            let current = match controller.edit() {
                Some(edit) => edit.scratch.cell(column).to_string(),
                None => anyhow::bail!("No book is being edited"),
            };
            let value = inquire::Text::new(&format!("{}:", column.header()))
                .with_initial_value(&current)
                .prompt_skippable()?;
            match value {
                None => break,
                Some(value) if value == current => break,
                Some(value) => match controller.stage_field(column, &value) {
                    Ok(()) => break,
                    Err(e) => println!("{e}"),
                },
            }
        }
    }
    if inquire::Confirm::new("Save book?")
        .with_default(true)
        .prompt()?
    {
        controller.commit_edit()?;
    } else {
        controller.cancel_edit();
        println!("Edit discarded");
    }
    Ok(())
}
