use std::io::Write;

use lox_core::{lexer::prelude::scan, parser::prelude::parse};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim_end() {
			"" => {},
			".exit" => return Ok(()),
			line => {
				let (tokens, lexical_errors) = scan(line);

				if !lexical_errors.is_empty() {
					lexical_errors.iter().for_each(|err| println!("{err}"));
					continue;
				}

				let parsed = parse(tokens);

				for statement in &parsed.statements {
					println!("{statement}");
				}

				for err in &parsed.errors {
					let (_, notes) = err.details();
					println!("{err}\n\t{}", notes.join(";\n\t"));
				}
			}
		}
	}
}
