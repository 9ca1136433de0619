use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = fahras_api::Args::parse();

	fahras_api::run(args).await
}
