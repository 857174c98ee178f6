/// Generate scoreposts for the recent plays of an osu! player
#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// The player's osu! username
	#[arg(short, long)]
	pub username: String,

	/// Mode of the plays: osu, taiko, fruits, mania, or 0-3
	#[arg(short, long)]
	pub mode: Option<String>,

	/// How many recent plays to post, newest first
	#[arg(short, long, default_value_t = 1)]
	pub limit: u32,
}
