use std::io::{self, BufRead};

use pipelog::{Chunk, Count, Sink, SinkConfig, SinkKind};

fn main() {
	tracing_subscriber::fmt::init();

	let args: Vec<String> = std::env::args().skip(1).collect();
	if args.iter().any(|a| a == "--help" || a == "-h") {
		print_usage();
		return;
	}

	let config = match parse_args(&args) {
		Ok(c) => c,
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(1);
		}
	};

	let mut sink = match config.build() {
		Ok(s) => s,
		Err(e) => {
			eprintln!("failed to construct sink: {}", e);
			std::process::exit(1);
		}
	};

	for line in io::stdin().lock().lines() {
		let line = match line {
			Ok(l) => l,
			Err(e) => {
				eprintln!("stdin error: {}", e);
				break;
			}
		};
		if line.is_empty() {
			continue;
		}

		let chunk: Chunk = match serde_json::from_str(&line) {
			Ok(c) => c,
			Err(e) => {
				tracing::warn!("invalid chunk: {}", e);
				continue;
			}
		};

		if let Err(e) = sink.write(&chunk) {
			eprintln!("write failed: {}", e);
			std::process::exit(1);
		}
	}

	if let Err(e) = sink.close() {
		eprintln!("close failed: {}", e);
		std::process::exit(1);
	}
}

fn parse_args(args: &[String]) -> Result<SinkConfig, String> {
	let mut config = SinkConfig {
		kind: SinkKind::Terminal,
		filename: None,
		time_format: None,
		max_bytes: Count::Int(0),
		backup_count: Count::Int(0),
		color: None,
	};

	let mut i = 0;
	while i < args.len() {
		let value = |i: usize| -> Result<String, String> {
			args.get(i + 1)
				.cloned()
				.ok_or_else(|| format!("{} requires a value", args[i]))
		};

		match args[i].as_str() {
			"--file" => {
				config.kind = SinkKind::File;
				config.filename = Some(value(i)?.into());
				i += 2;
			}
			"--color" => {
				config.color = Some(value(i)?);
				i += 2;
			}
			"--time-format" => {
				config.time_format = Some(value(i)?);
				i += 2;
			}
			"--max-bytes" => {
				config.max_bytes = Count::Text(value(i)?);
				i += 2;
			}
			"--backup-count" => {
				config.backup_count = Count::Text(value(i)?);
				i += 2;
			}
			other => return Err(format!("unknown argument: {}", other)),
		}
	}

	Ok(config)
}

fn print_usage() {
	println!("pipelog — feed JSON chunks from stdin into an output sink");
	println!();
	println!("usage: pipelog [--file PATH | --color NAME] [--time-format FMT]");
	println!("               [--max-bytes N] [--backup-count N]");
	println!();
	println!("reads one JSON object per line: {{\"pid\": 333, \"data\": \"...\"}}");
	println!("without --file, lines go to stdout with ANSI color framing");
}
