/// Fixed, ordered terminal palette. The ANSI foreground digit for an entry is
/// its index + 1, so red renders as `\x1b[0;31;40m` and white as `\x1b[0;37;40m`.
pub const COLORS: [&str; 7] = ["red", "green", "yellow", "blue", "magenta", "cyan", "white"];

pub fn color_code(name: &str) -> Option<u8> {
	COLORS.iter().position(|c| *c == name).map(|i| i as u8 + 1)
}

/// One palette code picked pseudo-randomly, for sinks constructed without an
/// explicit color. Called once at construction; the choice is held for the
/// sink's lifetime.
pub fn random_code() -> u8 {
	let nanos = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap()
		.subsec_nanos();
	(nanos % COLORS.len() as u32) as u8 + 1
}
