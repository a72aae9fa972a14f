use std::path::PathBuf;

use anyhow::Result;
use bookdash::{
    config::Config,
    export,
    render,
    types::{Column, SortDirection},
    LoadStatus, OpenLibrary, TableController, Transition,
};
use clap::ArgMatches;
use tracing::info;

use crate::edit_form;

pub enum Flow {
    Continue,
    Exit,
}

/// One interactive session: the table state and the configuration it was
/// set up from.
pub struct Session {
    pub controller: TableController<OpenLibrary>,
    pub config:     Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            controller: config.controller(),
            config,
        }
    }

    pub fn print_table(&self) {
        println!(
            "{}",
            render::render(&self.controller.view(), &self.config.table)
        );
    }

    /// Load if the transition asks for it. A failed load is reported and the
    /// previous books stay on screen.
    async fn settle(&mut self, transition: Transition) -> Result<()> {
        if transition == Transition::Reload {
            if self.controller.query().author_term.is_empty() {
                info!("No author to search for yet, not loading");
                return Ok(());
            }
            self.controller.load().await?;
        }
        Ok(())
    }

    /// Apply `--author`, `--page`, `--size`, `--sort` and `--desc`.
    fn apply_query_args(&mut self, matches: &ArgMatches) -> Result<Transition> {
        let mut transition = Transition::Redraw;
        let mut merge = |t: Transition| {
            if t == Transition::Reload {
                transition = Transition::Reload;
            }
        };
        if let Some(author) = matches.get_one::<String>("author") {
            merge(self.controller.set_author_term(author.as_str()));
        }
        if let Some(size) = matches.get_one::<u32>("size") {
            merge(self.controller.set_page_size(*size)?);
        }
        if let Some(page) = matches.get_one::<u32>("page") {
            merge(self.controller.set_page(*page)?);
        }
        let direction = if matches.get_flag("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        if let Some(column) = matches.get_one::<String>("sort") {
            self.controller.set_sort(column.parse::<Column>()?, direction);
        } else if matches.get_flag("desc") {
            let column = self.controller.query().sort_column;
            self.controller.set_sort(column, direction);
        }
        if self.controller.status() == &LoadStatus::Idle {
            merge(Transition::Reload);
        }
        Ok(transition)
    }

    pub async fn dispatch(&mut self, matches: &ArgMatches) -> Result<Flow> {
        match matches.subcommand() {
            Some(("author", m)) => {
                let term = m
                    .get_many::<String>("term")
                    .map(|parts| parts.cloned().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                let transition = self.controller.set_author_term(term);
                self.settle(transition).await?;
                self.print_table();
            }
            Some(("search", _)) => {
                let transition = self.controller.search();
                self.settle(transition).await?;
                self.print_table();
            }
            Some(("reload", _)) => {
                self.settle(Transition::Reload).await?;
                self.print_table();
            }
            Some(("sort", m)) => {
                if let Some(column) = m.get_one::<String>("column") {
                    self.controller.request_sort(column.parse()?);
                }
                self.print_table();
            }
            Some(("next", _)) => {
                let transition = self.controller.next_page()?;
                self.settle(transition).await?;
                self.print_table();
            }
            Some(("prev", _)) => {
                let transition = self.controller.previous_page()?;
                self.settle(transition).await?;
                self.print_table();
            }
            Some(("page", m)) => {
                if let Some(page) = m.get_one::<u32>("number") {
                    let transition = self.controller.set_page(*page)?;
                    self.settle(transition).await?;
                }
                self.print_table();
            }
            Some(("size", m)) => {
                if let Some(rows) = m.get_one::<u32>("rows") {
                    let transition = self.controller.set_page_size(*rows)?;
                    self.settle(transition).await?;
                }
                self.print_table();
            }
            Some(("show", m)) => {
                let transition = self.apply_query_args(m)?;
                self.settle(transition).await?;
                self.print_table();
            }
            Some(("edit", m)) => {
                if let Some(key) = m.get_one::<String>("key") {
                    self.controller.begin_edit(key)?;
                    edit_form::run(&mut self.controller)?;
                }
                self.print_table();
            }
            Some(("set", m)) => {
                if let Some(column) = m.get_one::<String>("column") {
                    let value = m
                        .get_many::<String>("value")
                        .map(|parts| parts.cloned().collect::<Vec<_>>().join(" "))
                        .unwrap_or_default();
                    self.controller.stage_field(column.parse()?, &value)?;
                }
                self.print_table();
            }
            Some(("save", _)) => {
                self.controller.commit_edit()?;
                self.print_table();
            }
            Some(("cancel", _)) => {
                if self.controller.cancel_edit().is_none() {
                    println!("Nothing to cancel");
                }
                self.print_table();
            }
            Some(("export", m)) => {
                let transition = self.apply_query_args(m)?;
                self.settle(transition).await?;
                let csv = self.controller.export_csv(self.config.behaviour.csv)?;
                match m.get_one::<String>("path").map(String::as_str) {
                    Some("-") => print!("{}", with_final_newline(csv)),
                    Some(path) => export::write_file(&PathBuf::from(path), &csv)?,
                    None => export::write_file(&self.config.export_path, &csv)?,
                }
            }
            Some(("exit", _)) => return Ok(Flow::Exit),
            Some((name, _)) => anyhow::bail!("Unknown command {name}"),
            None => unreachable!("subcommand required"),
        }
        Ok(Flow::Continue)
    }
}

/// Quoted CSV already ends its last record, raw CSV does not.
fn with_final_newline(mut csv: String) -> String {
    if !csv.ends_with('\n') {
        csv.push('\n');
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_export_ends_with_exactly_one_newline() {
        assert_eq!(with_final_newline("Title\nDune\n".into()), "Title\nDune\n");
        assert_eq!(with_final_newline("Title\nDune".into()), "Title\nDune\n");
    }
}
