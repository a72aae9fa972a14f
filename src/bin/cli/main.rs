use std::{env, ffi::OsString};

use anyhow::Result;
use reedline::Signal;

mod command_parser;
mod edit_form;
mod prompt;
mod repl;
mod session;

use bookdash::config::Config;
use session::{Flow, Session};

async fn handle_command(command: String, session: &mut Session) -> Result<Flow> {
    let args = command_parser::arg_parser();
    let command = match shlex::split(&command) {
        Some(command) => command,
        None => anyhow::bail!("Invalid command"),
    };
    if command.is_empty() {
        return Ok(Flow::Continue);
    }
    let matches = match args.try_get_matches_from(command) {
        Ok(matches) => matches,
        Err(e) => anyhow::bail!(e),
    };
    session.dispatch(&matches).await
}

async fn run_repl(session: &mut Session) -> Result<()> {
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        session.config.history_file.clone(),
    )?;
    loop {
        let query = session.controller.query();
        repl.set_context(&query.author_term, query.page);
        match repl.read_line() {
            Ok(Signal::Success(buffer)) => match handle_command(buffer, session).await {
                Ok(Flow::Continue) => (),
                Ok(Flow::Exit) => break,
                Err(e) => println!("Error: {}", e),
            },
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
            #[allow(unreachable_patterns)]
            x => {
                println!("Event: {:?}", x);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::read_config()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<OsString> = env::args_os().skip(1).collect();
    if args.is_empty() {
        args.push("repl".into());
    }
    let args_parsed = command_parser::arg_parser_cli().get_matches_from(args);

    match args_parsed.subcommand() {
        Some(("repl", _)) => {
            let mut session = Session::new(config);
            run_repl(&mut session).await?;
        }
        Some(("config", _)) => {
            print!("{}", Config::default_as_string()?);
        }
        _ => {
            let mut session = Session::new(config);
            session.dispatch(&args_parsed).await?;
        }
    }

    Ok(())
}
