use std::{io::Write, rc::Rc};

use lox_core::{runner::prelude::Session, utils::prelude::ErrorEmitter};

use crate::ConsoleErrorEmitter;

const PROMPT: &str = "> ";

pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| { std::process::exit(0); })
		.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

	let stdin = std::io::stdin();
	let mut session = Session::new(std::io::stdout(), ErrorEmitter::new(Rc::new(ConsoleErrorEmitter)));
	session.set_repl(true);

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!();
			return Ok(());
		}

		match input.trim_end() {
			"" => {},
			".exit" => return Ok(()),
			line => {
				let result = session.run(line);
				log::debug!("line finished with status {}", result.exit_code());
			}
		}
	}
}
