use bookdash::types::Column;
use clap::{builder::PossibleValuesParser, value_parser, Arg, ArgAction, Command};

fn column_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .value_parser(PossibleValuesParser::new(Column::ALL.map(|c| c.name())))
        .help("Column to act on")
}

/// `--author`, `--page`, `--size`, `--sort` and `--desc`, to set up the query
/// in one go.
fn query_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("author")
            .long("author")
            .short('a')
            .help("Author to search for"),
    )
    .arg(
        Arg::new("page")
            .long("page")
            .short('p')
            .value_parser(value_parser!(u32).range(1..)),
    )
    .arg(
        Arg::new("size")
            .long("size")
            .short('s')
            .value_parser(value_parser!(u32))
            .help("Rows per page, one of 10, 25, 50 or 100"),
    )
    .arg(
        column_arg("sort")
            .long("sort")
            .help("Column to sort by"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .action(ArgAction::SetTrue)
            .help("Sort descending"),
    )
}

pub fn arg_parser() -> Command {
    Command::new("bookdash")
        .about("Browse Open Library books by author")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("author")
                .about("Change the author searched for and reload")
                .arg(Arg::new("term").num_args(1..).required(true)),
        )
        .subcommand(
            Command::new("search")
                .about("Keep only loaded books by the current author and go to page 1"),
        )
        .subcommand(Command::new("reload").about("Fetch the current page again"))
        .subcommand(
            Command::new("sort")
                .about("Sort by a column, again to flip the direction")
                .arg(column_arg("column").required(true)),
        )
        .subcommand(Command::new("next").about("Next page"))
        .subcommand(Command::new("prev").about("Previous page"))
        .subcommand(
            Command::new("page")
                .about("Jump to a page")
                .arg(
                    Arg::new("number")
                        .required(true)
                        .value_parser(value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(
            Command::new("size")
                .about("Change the number of rows per page")
                .arg(
                    Arg::new("rows")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(query_args(Command::new("show").about("Show the table")))
        .subcommand(
            Command::new("edit")
                .about("Edit a book interactively")
                .arg(Arg::new("key").required(true)),
        )
        .subcommand(
            Command::new("set")
                .about("Change a field of the book being edited")
                .arg(column_arg("column").required(true))
                .arg(Arg::new("value").num_args(0..).allow_hyphen_values(true)),
        )
        .subcommand(Command::new("save").about("Save the book being edited"))
        .subcommand(Command::new("cancel").about("Discard the edit in progress"))
        .subcommand(query_args(
            Command::new("export")
                .about("Write all loaded books as CSV, `-` for stdout")
                .arg(Arg::new("path")),
        ))
        .subcommand(Command::new("exit").about("Leave the repl"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser()
        .subcommand(Command::new("repl").about("Launch a read eval print loop"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!("{parent_fn_name} {}", cmd.get_name())
            .trim()
            .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    for column in Column::ALL {
        subcmds.push(format!("sort {}", column.name()));
        subcmds.push(format!("set {}", column.name()));
    }
    subcmds.sort();
    subcmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_is_consistent() {
        arg_parser_cli().debug_assert();
    }

    #[test]
    fn repl_line_parses() {
        let matches = arg_parser()
            .try_get_matches_from(["author", "J.R.R.", "Tolkien"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "author");
        let term: Vec<&String> = sub.get_many::<String>("term").unwrap().collect();
        assert_eq!(term, ["J.R.R.", "Tolkien"]);
    }

    #[test]
    fn completions_cover_columns() {
        let completions = generate_completions();
        assert!(completions.contains(&"sort ratings_average".to_string()));
        assert!(completions.contains(&"export".to_string()));
    }
}
