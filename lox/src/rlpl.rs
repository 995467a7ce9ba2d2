use std::io::Write;

use lox_core::lexer::prelude::Lexer;

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
				for result in Lexer::new(line.chars()) {
					match result {
						Ok(token) => println!("{token}"),
						Err(err) => {
							let (_, notes) = err.details();
							println!("{err}");
							if !notes.is_empty() {
								println!("\t{}", notes.join("\n\t"));
							}
						}
					}
				}
			}
		}
	}
}
